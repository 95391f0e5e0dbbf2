use crate::constants::{HEADER_SERVER, HEADER_X_POWERED_BY};
use crate::core::csp::{CspConfig, CspMode};
use crate::core::directives::{CspSlot, SandboxConfig};
use crate::core::element::DirectiveElement;
use crate::error::SecureHeadersError;
use crate::headers::{
    CacheControlConfig, ClearSiteDataConfig, ClearSiteDataPathConfig, CrossOriginEmbedderPolicy,
    CrossOriginOpenerPolicy, CrossOriginResourcePolicy, ExpectCtConfig, HstsConfig,
    PermittedCrossDomainPolicy, ReferrerPolicy, ReportingEndpointsConfig, SecureHeader,
    XFrameOptions, XssProtection,
};
use actix_web::http::header::{HeaderName, HeaderValue};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Which headers are emitted and how. Immutable once built; share it through
/// an `Arc` or `web::Data`.
#[derive(Debug, Clone, Default)]
pub struct SecureHeadersConfiguration {
    pub(crate) hsts: Option<HstsConfig>,
    pub(crate) x_frame_options: Option<XFrameOptions>,
    pub(crate) xss_protection: Option<XssProtection>,
    pub(crate) content_type_options: bool,
    pub(crate) csp: Option<CspConfig>,
    pub(crate) csp_report_only: Option<CspConfig>,
    pub(crate) legacy_csp: bool,
    pub(crate) permitted_cross_domain: Option<PermittedCrossDomainPolicy>,
    pub(crate) referrer_policy: Option<ReferrerPolicy>,
    pub(crate) expect_ct: Option<ExpectCtConfig>,
    pub(crate) cache_control: Option<CacheControlConfig>,
    pub(crate) headers_to_remove: SmallVec<[HeaderName; 4]>,
    pub(crate) corp: Option<CrossOriginResourcePolicy>,
    pub(crate) coop: Option<CrossOriginOpenerPolicy>,
    pub(crate) coep: Option<CrossOriginEmbedderPolicy>,
    pub(crate) reporting_endpoints: Option<ReportingEndpointsConfig>,
    pub(crate) clear_site_data: Option<ClearSiteDataPathConfig>,
    pub(crate) ignored_paths: FxHashSet<String>,
}

impl SecureHeadersConfiguration {
    #[inline]
    pub fn builder() -> SecureHeadersBuilder {
        SecureHeadersBuilder::new()
    }

    pub fn recommended() -> Self {
        let mut config = Self::default();
        config.apply_recommended();
        config
    }

    fn apply_recommended(&mut self) {
        self.hsts = Some(HstsConfig::default());
        self.x_frame_options = Some(XFrameOptions::Deny);
        self.xss_protection = Some(XssProtection::Disabled);
        self.content_type_options = true;
        self.csp = Some(CspConfig::recommended());
        self.permitted_cross_domain = Some(PermittedCrossDomainPolicy::None);
        self.referrer_policy = Some(ReferrerPolicy::NoReferrer);
        self.cache_control = Some(CacheControlConfig::default());
        self.add_removal(HeaderName::from_static(HEADER_SERVER));
        self.add_removal(HeaderName::from_static(HEADER_X_POWERED_BY));
        self.corp = Some(CrossOriginResourcePolicy::SameOrigin);
        self.coop = Some(CrossOriginOpenerPolicy::SameOrigin);
        self.coep = Some(CrossOriginEmbedderPolicy::RequireCorp);
    }

    fn add_removal(&mut self, name: HeaderName) {
        if !self.headers_to_remove.contains(&name) {
            self.headers_to_remove.push(name);
        }
    }

    #[inline]
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignored_paths.contains(path)
    }

    #[inline]
    pub fn hsts(&self) -> Option<&HstsConfig> {
        self.hsts.as_ref()
    }

    #[inline]
    pub fn x_frame_options(&self) -> Option<&XFrameOptions> {
        self.x_frame_options.as_ref()
    }

    #[inline]
    pub fn content_security_policy(&self) -> Option<&CspConfig> {
        self.csp.as_ref()
    }

    #[inline]
    pub fn content_security_policy_report_only(&self) -> Option<&CspConfig> {
        self.csp_report_only.as_ref()
    }

    #[inline]
    pub fn clear_site_data(&self) -> Option<&ClearSiteDataPathConfig> {
        self.clear_site_data.as_ref()
    }

    #[inline]
    pub fn headers_to_remove(&self) -> &[HeaderName] {
        &self.headers_to_remove
    }

    /// Embedder policy without a resource policy is rejected per request.
    #[inline]
    pub fn has_embedder_policy_conflict(&self) -> bool {
        self.coep.is_some() && self.corp.is_none()
    }

    /// Renders every enabled header once so malformed values fail at startup.
    pub fn validate(&self) -> Result<(), SecureHeadersError> {
        fn check<H: SecureHeader>(header: Option<&H>) -> Result<(), SecureHeadersError> {
            if let Some(header) = header {
                header.validate()?;
                check_value(H::NAME, &header.build_header_value())?;
            }
            Ok(())
        }

        check(self.hsts.as_ref())?;
        check(self.x_frame_options.as_ref())?;
        check(self.xss_protection.as_ref())?;
        check(self.permitted_cross_domain.as_ref())?;
        check(self.referrer_policy.as_ref())?;
        check(self.expect_ct.as_ref())?;
        check(self.cache_control.as_ref())?;
        check(self.corp.as_ref())?;
        check(self.coop.as_ref())?;
        check(self.coep.as_ref())?;
        check(self.reporting_endpoints.as_ref())?;

        if let Some(csp) = &self.csp {
            check_value("content-security-policy", &csp.build_header_value(CspMode::Enforce)?)?;
        }
        if let Some(csp) = &self.csp_report_only {
            check_value(
                "content-security-policy-report-only",
                &csp.build_header_value(CspMode::ReportOnly)?,
            )?;
        }
        if let Some(paths) = &self.clear_site_data {
            for config in paths.configs() {
                check(Some(config))?;
            }
        }
        Ok(())
    }
}

fn check_value(name: &str, value: &str) -> Result<(), SecureHeadersError> {
    HeaderValue::from_str(value)
        .map(|_| ())
        .map_err(|_| SecureHeadersError::InvalidHeaderValue(format!("{}: {:?}", name, value)))
}

/// Fluent builder. Setters never fail; the first invalid input is kept and
/// returned from [`SecureHeadersBuilder::build`].
#[derive(Debug, Default)]
pub struct SecureHeadersBuilder {
    config: SecureHeadersConfiguration,
    error: Option<SecureHeadersError>,
}

impl SecureHeadersBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, error: SecureHeadersError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn with_recommended(mut self) -> Self {
        self.config.apply_recommended();
        self
    }

    #[inline]
    pub fn use_hsts(mut self, config: HstsConfig) -> Self {
        self.config.hsts = Some(config);
        self
    }

    #[inline]
    pub fn use_x_frame_options(mut self, option: XFrameOptions) -> Self {
        self.config.x_frame_options = Some(option);
        self
    }

    #[inline]
    pub fn use_xss_protection(mut self, mode: XssProtection) -> Self {
        self.config.xss_protection = Some(mode);
        self
    }

    #[inline]
    pub fn use_content_type_options(mut self) -> Self {
        self.config.content_type_options = true;
        self
    }

    #[inline]
    pub fn use_content_security_policy(mut self, config: CspConfig) -> Self {
        self.config.csp = Some(config);
        self
    }

    pub fn use_content_security_policy_report_only(mut self, config: CspConfig) -> Self {
        let has_report_uri = config
            .get_report_uri()
            .map_or(false, |uri| !uri.trim().is_empty());
        if has_report_uri {
            self.config.csp_report_only = Some(config);
        } else {
            self.fail(SecureHeadersError::MissingReportUri);
        }
        self
    }

    /// Also send the enforcing policy as `X-Content-Security-Policy`.
    #[inline]
    pub fn use_x_content_security_policy(mut self) -> Self {
        self.config.legacy_csp = true;
        self
    }

    #[inline]
    pub fn use_permitted_cross_domain_policy(mut self, policy: PermittedCrossDomainPolicy) -> Self {
        self.config.permitted_cross_domain = Some(policy);
        self
    }

    #[inline]
    pub fn use_referrer_policy(mut self, policy: ReferrerPolicy) -> Self {
        self.config.referrer_policy = Some(policy);
        self
    }

    #[inline]
    pub fn use_expect_ct(mut self, config: ExpectCtConfig) -> Self {
        self.config.expect_ct = Some(config);
        self
    }

    #[inline]
    pub fn use_cache_control(mut self, config: CacheControlConfig) -> Self {
        self.config.cache_control = Some(config);
        self
    }

    pub fn remove_server_headers(mut self) -> Self {
        self.config
            .add_removal(HeaderName::from_static(HEADER_SERVER));
        self.config
            .add_removal(HeaderName::from_static(HEADER_X_POWERED_BY));
        self
    }

    pub fn remove_header(mut self, name: &str) -> Self {
        match HeaderName::from_bytes(name.trim().as_bytes()) {
            Ok(name) => self.config.add_removal(name),
            Err(_) => self.fail(SecureHeadersError::invalid(format!(
                "invalid header name '{}'",
                name
            ))),
        }
        self
    }

    #[inline]
    pub fn use_cross_origin_resource_policy(mut self, policy: CrossOriginResourcePolicy) -> Self {
        self.config.corp = Some(policy);
        self
    }

    #[inline]
    pub fn use_cross_origin_opener_policy(mut self, policy: CrossOriginOpenerPolicy) -> Self {
        self.config.coop = Some(policy);
        self
    }

    #[inline]
    pub fn use_cross_origin_embedder_policy(mut self, policy: CrossOriginEmbedderPolicy) -> Self {
        self.config.coep = Some(policy);
        self
    }

    #[inline]
    pub fn use_reporting_endpoints(mut self, config: ReportingEndpointsConfig) -> Self {
        self.config.reporting_endpoints = Some(config);
        self
    }

    /// Clear-Site-Data on every response.
    #[inline]
    pub fn use_clear_site_data(mut self, config: ClearSiteDataConfig) -> Self {
        self.config.clear_site_data = Some(ClearSiteDataPathConfig::with_default(config));
        self
    }

    #[inline]
    pub fn use_clear_site_data_for_paths(mut self, paths: ClearSiteDataPathConfig) -> Self {
        self.config.clear_site_data = Some(paths);
        self
    }

    fn csp_configs_mut(&mut self) -> impl Iterator<Item = &mut CspConfig> {
        self.config
            .csp
            .iter_mut()
            .chain(self.config.csp_report_only.iter_mut())
    }

    /// Replaces one directive slot on every enabled CSP variant. No-op until a
    /// CSP variant is enabled.
    pub fn set_csp_uris(
        mut self,
        slot: CspSlot,
        elements: impl IntoIterator<Item = DirectiveElement>,
    ) -> Self {
        let elements: Vec<DirectiveElement> = elements.into_iter().collect();
        let mut touched = false;
        for csp in self.csp_configs_mut() {
            csp.set_slot(slot, elements.iter().cloned());
            touched = true;
        }
        if !touched {
            log::debug!("set_csp_uris({}) ignored: no Content-Security-Policy enabled", slot);
        }
        self
    }

    pub fn set_csp_uris_named(
        self,
        slot: &str,
        elements: impl IntoIterator<Item = DirectiveElement>,
    ) -> Self {
        match slot.parse::<CspSlot>() {
            Ok(slot) => self.set_csp_uris(slot, elements),
            Err(err) => {
                let mut builder = self;
                builder.fail(err);
                builder
            }
        }
    }

    pub fn set_csp_sandbox(mut self, sandbox: SandboxConfig) -> Self {
        let mut touched = false;
        for csp in self.csp_configs_mut() {
            csp.set_sandbox(sandbox.clone());
            touched = true;
        }
        if !touched {
            log::debug!("set_csp_sandbox ignored: no Content-Security-Policy enabled");
        }
        self
    }

    pub fn ignore_path(mut self, path: impl Into<String>) -> Self {
        self.config.ignored_paths.insert(path.into());
        self
    }

    pub fn ignore_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .ignored_paths
            .extend(paths.into_iter().map(Into::into));
        self
    }

    pub(crate) fn record_error(mut self, error: SecureHeadersError) -> Self {
        self.fail(error);
        self
    }

    pub fn build(self) -> Result<SecureHeadersConfiguration, SecureHeadersError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        self.config.validate()?;

        if self.config.has_embedder_policy_conflict() {
            log::warn!(
                "Cross-Origin-Embedder-Policy is enabled without Cross-Origin-Resource-Policy; \
                 requests will be rejected"
            );
        }

        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_csp_uris_before_csp_is_noop() {
        let config = SecureHeadersBuilder::new()
            .set_csp_uris(CspSlot::ScriptSrc, [DirectiveElement::self_()])
            .build()
            .unwrap();
        assert!(config.content_security_policy().is_none());
    }

    #[test]
    fn test_first_error_is_kept() {
        let result = SecureHeadersBuilder::new()
            .remove_header("bad header")
            .set_csp_uris_named("nope-src", [DirectiveElement::self_()])
            .build();
        match result {
            Err(SecureHeadersError::InvalidArgument(message)) => {
                assert!(message.contains("bad header"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_recommended_is_valid() {
        let config = SecureHeadersConfiguration::recommended();
        assert!(config.validate().is_ok());
        assert!(!config.has_embedder_policy_conflict());
        assert_eq!(config.headers_to_remove().len(), 2);
    }
}
