use crate::constants::{HEADER_X_CONTENT_TYPE_OPTIONS, HEADER_X_CSP, NOSNIFF};
use crate::core::config::SecureHeadersConfiguration;
use crate::core::csp::CspMode;
use crate::error::SecureHeadersError;
use crate::headers::SecureHeader;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use smallvec::SmallVec;

/// Response headers as seen by the engine.
pub trait HeaderBag {
    fn contains_header(&self, name: &HeaderName) -> bool;

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue);

    fn remove_header(&mut self, name: &HeaderName) -> bool;

    /// Inserts only when no header of that name exists. Returns whether it was added.
    fn add_if_absent(&mut self, name: HeaderName, value: HeaderValue) -> bool {
        if self.contains_header(&name) {
            log::trace!("{} already present, leaving it untouched", name);
            return false;
        }
        log::trace!("adding {}", name);
        self.insert_header(name, value);
        true
    }
}

impl HeaderBag for HeaderMap {
    #[inline]
    fn contains_header(&self, name: &HeaderName) -> bool {
        self.contains_key(name)
    }

    #[inline]
    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.insert(name, value);
    }

    #[inline]
    fn remove_header(&mut self, name: &HeaderName) -> bool {
        self.remove(name).next().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOp {
    Add(HeaderName, HeaderValue),
    Remove(HeaderName),
}

/// The header changes for one request, computed before the wrapped handler
/// runs and applied to its response afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderPlan {
    ops: SmallVec<[HeaderOp; 16]>,
}

impl HeaderPlan {
    /// `Ok(None)` when `path` is on the ignore list.
    pub fn for_request(
        config: Option<&SecureHeadersConfiguration>,
        path: &str,
    ) -> Result<Option<Self>, SecureHeadersError> {
        let config = config.ok_or(SecureHeadersError::ConfigurationMissing)?;

        if config.is_ignored(path) {
            log::debug!("{} is ignored, no security headers applied", path);
            return Ok(None);
        }

        let mut ctx = RequestContext::new(config, path);
        ctx.plan_all()?;
        Ok(Some(ctx.plan))
    }

    #[inline]
    pub fn ops(&self) -> &[HeaderOp] {
        &self.ops
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.ops.iter().find_map(|op| match op {
            HeaderOp::Add(header, value) if header.as_str() == name => Some(value),
            _ => None,
        })
    }

    /// Applies the plan in order. Existing headers are never overwritten.
    /// Returns the number of headers added.
    pub fn apply_to<B: HeaderBag + ?Sized>(&self, headers: &mut B) -> usize {
        let mut added = 0;
        for op in &self.ops {
            match op {
                HeaderOp::Add(name, value) => {
                    if headers.add_if_absent(name.clone(), value.clone()) {
                        added += 1;
                    }
                }
                HeaderOp::Remove(name) => {
                    if headers.remove_header(name) {
                        log::trace!("removed {}", name);
                    }
                }
            }
        }
        added
    }
}

/// Plans and applies in one step.
pub fn apply_secure_headers<B: HeaderBag + ?Sized>(
    config: Option<&SecureHeadersConfiguration>,
    path: &str,
    headers: &mut B,
) -> Result<usize, SecureHeadersError> {
    Ok(HeaderPlan::for_request(config, path)?
        .map_or(0, |plan| plan.apply_to(headers)))
}

/// Per-request state, including the enforcing CSP value which is rendered at
/// most once even though two headers carry it.
struct RequestContext<'a> {
    config: &'a SecureHeadersConfiguration,
    path: &'a str,
    csp_value: Option<HeaderValue>,
    plan: HeaderPlan,
}

impl<'a> RequestContext<'a> {
    fn new(config: &'a SecureHeadersConfiguration, path: &'a str) -> Self {
        Self {
            config,
            path,
            csp_value: None,
            plan: HeaderPlan::default(),
        }
    }

    fn push_value(&mut self, name: HeaderName, value: &str) {
        match HeaderValue::from_str(value) {
            Ok(value) => self.plan.ops.push(HeaderOp::Add(name, value)),
            Err(_) => log::error!("skipping {}: invalid header value {:?}", name, value),
        }
    }

    fn add<H: SecureHeader>(&mut self, header: Option<&H>) {
        if let Some(header) = header {
            self.push_value(H::header_name(), &header.build_header_value());
        }
    }

    fn enforcing_csp(&mut self) -> Option<HeaderValue> {
        if self.csp_value.is_none() {
            let csp = self.config.csp.as_ref()?;
            match csp
                .build_header_value(CspMode::Enforce)
                .map_err(|e| e.to_string())
                .and_then(|v| HeaderValue::from_str(&v).map_err(|e| e.to_string()))
            {
                Ok(value) => self.csp_value = Some(value),
                Err(err) => {
                    log::error!("skipping content-security-policy: {}", err);
                    return None;
                }
            }
        }
        self.csp_value.clone()
    }

    fn plan_csp(&mut self) {
        if let Some(report_only) = self.config.csp_report_only.as_ref() {
            match report_only.build_header_value(CspMode::ReportOnly) {
                Ok(value) => self.push_value(CspMode::ReportOnly.header_name(), &value),
                Err(err) => log::error!("skipping content-security-policy-report-only: {}", err),
            }
        } else if let Some(value) = self.enforcing_csp() {
            self.plan
                .ops
                .push(HeaderOp::Add(CspMode::Enforce.header_name(), value));
        }

        if self.config.legacy_csp {
            if self.config.csp_report_only.is_some() {
                log::debug!("x-content-security-policy skipped: report-only policy takes precedence");
            } else if let Some(value) = self.enforcing_csp() {
                self.plan
                    .ops
                    .push(HeaderOp::Add(HeaderName::from_static(HEADER_X_CSP), value));
            }
        }
    }

    fn plan_all(&mut self) -> Result<(), SecureHeadersError> {
        let config = self.config;

        self.add(config.hsts.as_ref());
        self.add(config.x_frame_options.as_ref());
        self.add(config.xss_protection.as_ref());
        if config.content_type_options {
            self.push_value(HeaderName::from_static(HEADER_X_CONTENT_TYPE_OPTIONS), NOSNIFF);
        }
        self.plan_csp();
        self.add(config.permitted_cross_domain.as_ref());
        self.add(config.referrer_policy.as_ref());
        self.add(config.expect_ct.as_ref());
        self.add(config.cache_control.as_ref());
        for name in config.headers_to_remove.iter() {
            self.plan.ops.push(HeaderOp::Remove(name.clone()));
        }
        self.add(config.corp.as_ref());
        self.add(config.coop.as_ref());
        if config.has_embedder_policy_conflict() {
            return Err(SecureHeadersError::ConfigurationConflict(
                "Cross-Origin-Embedder-Policy requires Cross-Origin-Resource-Policy".to_owned(),
            ));
        }
        self.add(config.coep.as_ref());
        self.add(config.reporting_endpoints.as_ref());
        if let Some(paths) = config.clear_site_data.as_ref() {
            self.add(paths.resolve(self.path));
        }
        Ok(())
    }
}
