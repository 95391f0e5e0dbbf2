//! Deployment-time settings loaded from JSON.
//!
//! Settings feed the same [`SecureHeadersBuilder`] as code configuration, so
//! both paths share one set of validation rules.

use crate::core::config::SecureHeadersBuilder;
use crate::core::csp::CspConfig;
use crate::core::directives::{CspSlot, SandboxConfig};
use crate::core::element::DirectiveElement;
use crate::error::SecureHeadersError;
use crate::headers::{
    CacheControlConfig, ClearSiteDataConfig, ClearSiteDataOption, ClearSiteDataPathConfig,
    CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy, CrossOriginResourcePolicy, ExpectCtConfig,
    HstsConfig, PermittedCrossDomainPolicy, ReferrerPolicy, ReportingEndpointsConfig,
    XFrameOptions, XssProtection,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CspSettings {
    /// Slot name to sources, e.g. `"script-src": ["'self'", "cdn.example.com"]`.
    pub directives: IndexMap<String, Vec<String>>,
    pub sandbox: Option<SandboxConfig>,
    pub plugin_types: Option<String>,
    pub block_all_mixed_content: bool,
    pub upgrade_insecure_requests: bool,
    pub referrer: Option<String>,
    pub report_uri: Option<String>,
    pub report_to: Option<String>,
}

impl CspSettings {
    pub fn into_config(self) -> Result<CspConfig, SecureHeadersError> {
        let mut config = CspConfig::new()
            .block_all_mixed_content(self.block_all_mixed_content)
            .upgrade_insecure_requests(self.upgrade_insecure_requests);

        for (slot, sources) in self.directives {
            let slot: CspSlot = slot.parse()?;
            config.set_slot(slot, sources.iter().map(|s| DirectiveElement::parse(s)));
        }
        if let Some(sandbox) = self.sandbox {
            config = config.sandbox(sandbox);
        }
        if let Some(plugin_types) = self.plugin_types {
            config = config.plugin_types(plugin_types);
        }
        if let Some(referrer) = self.referrer {
            config = config.referrer(referrer);
        }
        if let Some(report_uri) = self.report_uri {
            config = config.report_uri(report_uri);
        }
        if let Some(report_to) = self.report_to {
            config = config.report_to(report_to);
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClearSiteDataSettings {
    pub default: Option<Vec<ClearSiteDataOption>>,
    pub paths: IndexMap<String, Vec<ClearSiteDataOption>>,
}

impl ClearSiteDataSettings {
    pub fn into_config(self) -> Result<ClearSiteDataPathConfig, SecureHeadersError> {
        let mut config = ClearSiteDataPathConfig::new();
        if let Some(default) = self.default {
            config = config.default_config(ClearSiteDataConfig::new(default)?);
        }
        for (path, options) in self.paths {
            config = config.path(path, ClearSiteDataConfig::new(options)?);
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecureHeadersSettings {
    /// Start from the recommended header set before applying the fields below.
    pub recommended: bool,
    pub hsts: Option<HstsConfig>,
    pub x_frame_options: Option<XFrameOptions>,
    pub xss_protection: Option<XssProtection>,
    pub content_type_options: bool,
    pub content_security_policy: Option<CspSettings>,
    pub content_security_policy_report_only: Option<CspSettings>,
    pub x_content_security_policy: bool,
    pub permitted_cross_domain_policy: Option<PermittedCrossDomainPolicy>,
    pub referrer_policy: Option<ReferrerPolicy>,
    pub expect_ct: Option<ExpectCtConfig>,
    pub cache_control: Option<CacheControlConfig>,
    pub remove_headers: Vec<String>,
    pub cross_origin_resource_policy: Option<CrossOriginResourcePolicy>,
    pub cross_origin_opener_policy: Option<CrossOriginOpenerPolicy>,
    pub cross_origin_embedder_policy: Option<CrossOriginEmbedderPolicy>,
    pub reporting_endpoints: Option<ReportingEndpointsConfig>,
    pub clear_site_data: Option<ClearSiteDataSettings>,
    pub ignored_paths: Vec<String>,
}

impl SecureHeadersSettings {
    pub fn from_json(json: &str) -> Result<Self, SecureHeadersError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_builder(self) -> SecureHeadersBuilder {
        let mut builder = SecureHeadersBuilder::new();
        if self.recommended {
            builder = builder.with_recommended();
        }
        if let Some(hsts) = self.hsts {
            builder = builder.use_hsts(hsts);
        }
        if let Some(option) = self.x_frame_options {
            builder = builder.use_x_frame_options(option);
        }
        if let Some(mode) = self.xss_protection {
            builder = builder.use_xss_protection(mode);
        }
        if self.content_type_options {
            builder = builder.use_content_type_options();
        }
        if let Some(csp) = self.content_security_policy {
            builder = match csp.into_config() {
                Ok(config) => builder.use_content_security_policy(config),
                Err(err) => builder.record_error(err),
            };
        }
        if let Some(csp) = self.content_security_policy_report_only {
            builder = match csp.into_config() {
                Ok(config) => builder.use_content_security_policy_report_only(config),
                Err(err) => builder.record_error(err),
            };
        }
        if self.x_content_security_policy {
            builder = builder.use_x_content_security_policy();
        }
        if let Some(policy) = self.permitted_cross_domain_policy {
            builder = builder.use_permitted_cross_domain_policy(policy);
        }
        if let Some(policy) = self.referrer_policy {
            builder = builder.use_referrer_policy(policy);
        }
        if let Some(config) = self.expect_ct {
            builder = builder.use_expect_ct(config);
        }
        if let Some(config) = self.cache_control {
            builder = builder.use_cache_control(config);
        }
        for name in &self.remove_headers {
            builder = builder.remove_header(name);
        }
        if let Some(policy) = self.cross_origin_resource_policy {
            builder = builder.use_cross_origin_resource_policy(policy);
        }
        if let Some(policy) = self.cross_origin_opener_policy {
            builder = builder.use_cross_origin_opener_policy(policy);
        }
        if let Some(policy) = self.cross_origin_embedder_policy {
            builder = builder.use_cross_origin_embedder_policy(policy);
        }
        if let Some(config) = self.reporting_endpoints {
            builder = builder.use_reporting_endpoints(config);
        }
        if let Some(clear_site_data) = self.clear_site_data {
            builder = match clear_site_data.into_config() {
                Ok(paths) => builder.use_clear_site_data_for_paths(paths),
                Err(err) => builder.record_error(err),
            };
        }
        builder.ignore_paths(self.ignored_paths)
    }
}
