use crate::constants::{HEADER_X_FRAME_OPTIONS, HEADER_X_XSS_PROTECTION};
use crate::error::SecureHeadersError;
use crate::headers::{validate_absolute_uri, SecureHeader};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum XFrameOptions {
    #[default]
    Deny,
    SameOrigin,
    AllowFrom(String),
}

impl XFrameOptions {
    pub fn allow_from(uri: impl Into<String>) -> Result<Self, SecureHeadersError> {
        let uri = uri.into();
        validate_absolute_uri("X-Frame-Options ALLOW-FROM", &uri)?;
        Ok(Self::AllowFrom(uri))
    }
}

impl SecureHeader for XFrameOptions {
    const NAME: &'static str = HEADER_X_FRAME_OPTIONS;

    fn build_header_value(&self) -> String {
        match self {
            XFrameOptions::Deny => "DENY".to_owned(),
            XFrameOptions::SameOrigin => "SAMEORIGIN".to_owned(),
            XFrameOptions::AllowFrom(uri) => format!("ALLOW-FROM {}", uri.trim()),
        }
    }

    fn validate(&self) -> Result<(), SecureHeadersError> {
        match self {
            XFrameOptions::AllowFrom(uri) => validate_absolute_uri("X-Frame-Options ALLOW-FROM", uri),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum XssProtection {
    /// `0`, the current recommendation.
    #[default]
    Disabled,
    Enabled,
    Block,
    Report(String),
}

impl XssProtection {
    pub fn report(uri: impl Into<String>) -> Result<Self, SecureHeadersError> {
        let uri = uri.into();
        validate_absolute_uri("X-XSS-Protection report", &uri)?;
        Ok(Self::Report(uri))
    }
}

impl SecureHeader for XssProtection {
    const NAME: &'static str = HEADER_X_XSS_PROTECTION;

    fn build_header_value(&self) -> String {
        match self {
            XssProtection::Disabled => "0".to_owned(),
            XssProtection::Enabled => "1".to_owned(),
            XssProtection::Block => "1; mode=block".to_owned(),
            XssProtection::Report(uri) => format!("1; report={}", uri.trim()),
        }
    }

    fn validate(&self) -> Result<(), SecureHeadersError> {
        match self {
            XssProtection::Report(uri) => validate_absolute_uri("X-XSS-Protection report", uri),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_options_tokens() {
        assert_eq!(XFrameOptions::Deny.build_header_value(), "DENY");
        assert_eq!(XFrameOptions::SameOrigin.build_header_value(), "SAMEORIGIN");
        assert_eq!(
            XFrameOptions::allow_from("https://example.com/")
                .unwrap()
                .build_header_value(),
            "ALLOW-FROM https://example.com/"
        );
    }

    #[test]
    fn test_xss_report_requires_absolute_uri() {
        assert!(matches!(
            XssProtection::report(""),
            Err(SecureHeadersError::InvalidArgument(_))
        ));
        assert_eq!(
            XssProtection::report("https://example.com/xss")
                .unwrap()
                .build_header_value(),
            "1; report=https://example.com/xss"
        );
    }
}
