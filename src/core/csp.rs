use crate::constants::{
    BLOCK_ALL_MIXED_CONTENT, DEFAULT_BUFFER_CAPACITY, HEADER_CSP, HEADER_CSP_REPORT_ONLY,
    PLUGIN_TYPES, REFERRER, REPORT_TO, REPORT_URI, SEMICOLON, SPACE, UPGRADE_INSECURE_REQUESTS,
};
use crate::core::directives::{CspDirectiveSet, CspSlot, SandboxConfig};
use crate::core::element::DirectiveElement;
use crate::error::SecureHeadersError;
use crate::utils::{buffer_into_string, is_blank, trim_trailing_whitespace, BufferWriter};
use actix_web::http::header::HeaderName;
use bytes::BytesMut;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CspMode {
    Enforce,
    /// Requires a non-blank report-uri.
    ReportOnly,
}

impl CspMode {
    #[inline]
    pub fn header_name(&self) -> HeaderName {
        match self {
            CspMode::Enforce => HeaderName::from_static(HEADER_CSP),
            CspMode::ReportOnly => HeaderName::from_static(HEADER_CSP_REPORT_ONLY),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspConfig {
    directives: CspDirectiveSet,
    sandbox: Option<SandboxConfig>,
    plugin_types: Option<Cow<'static, str>>,
    block_all_mixed_content: bool,
    upgrade_insecure_requests: bool,
    referrer: Option<Cow<'static, str>>,
    report_uri: Option<Cow<'static, str>>,
    report_to: Option<Cow<'static, str>>,
}

impl CspConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// `script-src 'self';object-src 'self';block-all-mixed-content;upgrade-insecure-requests;`
    pub fn recommended() -> Self {
        let mut config = Self::new()
            .block_all_mixed_content(true)
            .upgrade_insecure_requests(true);
        config
            .set_slot(CspSlot::ScriptSrc, [DirectiveElement::self_()])
            .set_slot(CspSlot::ObjectSrc, [DirectiveElement::self_()]);
        config
    }

    pub fn report_only(report_uri: impl Into<Cow<'static, str>>) -> Result<Self, SecureHeadersError> {
        let report_uri = report_uri.into();
        if is_blank(&report_uri) {
            return Err(SecureHeadersError::MissingReportUri);
        }
        Ok(Self::new().report_uri(report_uri))
    }

    pub fn with_slot(
        mut self,
        slot: CspSlot,
        elements: impl IntoIterator<Item = DirectiveElement>,
    ) -> Self {
        self.directives.set(slot, elements);
        self
    }

    pub fn set_slot(
        &mut self,
        slot: CspSlot,
        elements: impl IntoIterator<Item = DirectiveElement>,
    ) -> &mut Self {
        self.directives.set(slot, elements);
        self
    }

    pub fn set_sandbox(&mut self, sandbox: SandboxConfig) -> &mut Self {
        self.sandbox = Some(sandbox);
        self
    }

    #[inline]
    pub fn sandbox(mut self, sandbox: SandboxConfig) -> Self {
        self.set_sandbox(sandbox);
        self
    }

    #[inline]
    pub fn plugin_types(mut self, value: impl Into<Cow<'static, str>>) -> Self {
        self.plugin_types = Some(value.into());
        self
    }

    #[inline]
    pub fn block_all_mixed_content(mut self, enabled: bool) -> Self {
        self.block_all_mixed_content = enabled;
        self
    }

    #[inline]
    pub fn upgrade_insecure_requests(mut self, enabled: bool) -> Self {
        self.upgrade_insecure_requests = enabled;
        self
    }

    #[inline]
    pub fn referrer(mut self, value: impl Into<Cow<'static, str>>) -> Self {
        self.referrer = Some(value.into());
        self
    }

    #[inline]
    pub fn report_uri(mut self, uri: impl Into<Cow<'static, str>>) -> Self {
        self.report_uri = Some(uri.into());
        self
    }

    #[inline]
    pub fn report_to(mut self, endpoint: impl Into<Cow<'static, str>>) -> Self {
        self.report_to = Some(endpoint.into());
        self
    }

    #[inline]
    pub fn directives(&self) -> &CspDirectiveSet {
        &self.directives
    }

    #[inline]
    pub fn get_sandbox(&self) -> Option<&SandboxConfig> {
        self.sandbox.as_ref()
    }

    #[inline]
    pub fn get_report_uri(&self) -> Option<&str> {
        self.report_uri.as_deref()
    }

    #[inline]
    pub fn get_report_to(&self) -> Option<&str> {
        self.report_to.as_deref()
    }

    pub fn build_header_value(&self, mode: CspMode) -> Result<String, SecureHeadersError> {
        build_header_value(self, mode)
    }
}

fn write_clause(buffer: &mut BytesMut, name: &str, value: Option<&str>) {
    buffer.extend_from_slice(name.as_bytes());
    if let Some(value) = value {
        for token in value.split_whitespace() {
            buffer.extend_from_slice(&[SPACE]);
            buffer.extend_from_slice(token.as_bytes());
        }
    }
    buffer.extend_from_slice(&[SEMICOLON]);
}

/// Assembles a Content-Security-Policy value. Both the enforcing and the
/// report-only header go through here; `mode` only adds the report-uri check.
/// Blank or whitespace-containing sources are rejected with `InvalidArgument`.
pub fn build_header_value(config: &CspConfig, mode: CspMode) -> Result<String, SecureHeadersError> {
    if mode == CspMode::ReportOnly && config.report_uri.as_deref().map_or(true, is_blank) {
        return Err(SecureHeadersError::MissingReportUri);
    }
    config.directives.validate()?;

    let mut buffer =
        BytesMut::with_capacity(config.directives.estimated_size().max(DEFAULT_BUFFER_CAPACITY));

    config.directives.write_to_buffer(&mut buffer);

    if let Some(sandbox) = &config.sandbox {
        sandbox.write_to_buffer(&mut buffer);
    }

    let present = |value: &Option<Cow<'static, str>>| {
        value.as_deref().filter(|v| !is_blank(v)).map(str::to_owned)
    };

    if let Some(plugin_types) = present(&config.plugin_types) {
        write_clause(&mut buffer, PLUGIN_TYPES, Some(plugin_types.as_str()));
    }
    if config.block_all_mixed_content {
        write_clause(&mut buffer, BLOCK_ALL_MIXED_CONTENT, None);
    }
    if config.upgrade_insecure_requests {
        write_clause(&mut buffer, UPGRADE_INSECURE_REQUESTS, None);
    }
    if let Some(referrer) = present(&config.referrer) {
        write_clause(&mut buffer, REFERRER, Some(referrer.as_str()));
    }
    if let Some(report_uri) = present(&config.report_uri) {
        write_clause(&mut buffer, REPORT_URI, Some(report_uri.as_str()));
    }
    if let Some(report_to) = present(&config.report_to) {
        write_clause(&mut buffer, REPORT_TO, Some(report_to.as_str()));
    }

    trim_trailing_whitespace(&mut buffer);
    Ok(buffer_into_string(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_src_with_directive_and_uri() {
        let config = CspConfig::new().with_slot(
            CspSlot::StyleSrc,
            [
                DirectiveElement::self_(),
                DirectiveElement::uri("cdnjs.cloudflare.com"),
            ],
        );
        let value = config.build_header_value(CspMode::Enforce).unwrap();
        assert_eq!(value, "style-src 'self' cdnjs.cloudflare.com;");
        assert_eq!(value.len(), 38);
    }

    #[test]
    fn test_recommended_policy() {
        let value = CspConfig::recommended()
            .build_header_value(CspMode::Enforce)
            .unwrap();
        assert_eq!(
            value,
            "script-src 'self';object-src 'self';block-all-mixed-content;upgrade-insecure-requests;"
        );
    }

    #[test]
    fn test_sandbox_trailing_space_is_trimmed() {
        let config = CspConfig::new().sandbox(SandboxConfig::new().allow_forms());
        assert_eq!(
            config.build_header_value(CspMode::Enforce).unwrap(),
            "sandbox allow-forms;"
        );
    }

    #[test]
    fn test_report_only_without_uri_fails() {
        let config = CspConfig::recommended();
        assert_eq!(
            config.build_header_value(CspMode::ReportOnly),
            Err(SecureHeadersError::MissingReportUri)
        );
        assert_eq!(
            CspConfig::recommended()
                .report_uri("   ")
                .build_header_value(CspMode::ReportOnly),
            Err(SecureHeadersError::MissingReportUri)
        );
    }

    #[test]
    fn test_blank_source_is_rejected() {
        let config = CspConfig::new().with_slot(
            CspSlot::ImgSrc,
            [
                DirectiveElement::uri("a.com"),
                DirectiveElement::uri(" "),
                DirectiveElement::uri("b.com"),
            ],
        );
        match config.build_header_value(CspMode::Enforce) {
            Err(SecureHeadersError::InvalidArgument(message)) => {
                assert!(message.starts_with("img-src"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_clause_whitespace_is_collapsed() {
        let config = CspConfig::new().plugin_types(" application/pdf   image/svg+xml ");
        assert_eq!(
            config.build_header_value(CspMode::Enforce).unwrap(),
            "plugin-types application/pdf image/svg+xml;"
        );
    }

    #[test]
    fn test_header_names() {
        assert_eq!(CspMode::Enforce.header_name().as_str(), "content-security-policy");
        assert_eq!(
            CspMode::ReportOnly.header_name().as_str(),
            "content-security-policy-report-only"
        );
    }
}
