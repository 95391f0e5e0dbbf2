use crate::constants::{
    DEFAULT_EXPECT_CT_MAX_AGE, DEFAULT_HSTS_MAX_AGE, HEADER_EXPECT_CT, HEADER_HSTS,
};
use crate::error::SecureHeadersError;
use crate::headers::{validate_absolute_uri, SecureHeader};
use crate::utils::is_blank;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HstsConfig {
    pub max_age: u64,
    pub include_subdomains: bool,
    pub preload: bool,
}

impl Default for HstsConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_HSTS_MAX_AGE,
            include_subdomains: true,
            preload: false,
        }
    }
}

impl HstsConfig {
    #[inline]
    pub fn new(max_age: u64, include_subdomains: bool) -> Self {
        Self {
            max_age,
            include_subdomains,
            preload: false,
        }
    }

    #[inline]
    pub fn preload(mut self) -> Self {
        self.preload = true;
        self
    }
}

impl SecureHeader for HstsConfig {
    const NAME: &'static str = HEADER_HSTS;

    fn build_header_value(&self) -> String {
        let mut value = format!("max-age={}", self.max_age);
        if self.include_subdomains {
            value.push_str(";includeSubDomains");
        }
        if self.preload {
            value.push_str(";preload");
        }
        value
    }

    fn validate(&self) -> Result<(), SecureHeadersError> {
        if self.preload && !self.include_subdomains {
            return Err(SecureHeadersError::invalid(
                "HSTS preload requires includeSubDomains",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectCtConfig {
    pub max_age: u64,
    pub enforce: bool,
    pub report_uri: Option<String>,
}

impl Default for ExpectCtConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_EXPECT_CT_MAX_AGE,
            enforce: false,
            report_uri: None,
        }
    }
}

impl ExpectCtConfig {
    #[inline]
    pub fn new(max_age: u64, enforce: bool) -> Self {
        Self {
            max_age,
            enforce,
            report_uri: None,
        }
    }

    pub fn with_report_uri(mut self, uri: impl Into<String>) -> Result<Self, SecureHeadersError> {
        let uri = uri.into();
        validate_absolute_uri("Expect-CT report-uri", &uri)?;
        self.report_uri = Some(uri);
        Ok(self)
    }
}

impl SecureHeader for ExpectCtConfig {
    const NAME: &'static str = HEADER_EXPECT_CT;

    fn build_header_value(&self) -> String {
        let mut value = format!("max-age={}", self.max_age);
        if self.enforce {
            value.push_str(", enforce");
        }
        if let Some(uri) = self.report_uri.as_deref().filter(|u| !is_blank(u)) {
            value.push_str(", report-uri=\"");
            value.push_str(uri.trim());
            value.push('"');
        }
        value
    }

    fn validate(&self) -> Result<(), SecureHeadersError> {
        match self.report_uri.as_deref() {
            Some(uri) => validate_absolute_uri("Expect-CT report-uri", uri),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsts_default() {
        assert_eq!(
            HstsConfig::default().build_header_value(),
            "max-age=63072000;includeSubDomains"
        );
    }

    #[test]
    fn test_hsts_preload_requires_subdomains() {
        assert!(HstsConfig::new(31536000, false).preload().validate().is_err());
        assert_eq!(
            HstsConfig::new(31536000, true).preload().build_header_value(),
            "max-age=31536000;includeSubDomains;preload"
        );
    }

    #[test]
    fn test_expect_ct() {
        let config = ExpectCtConfig::new(86400, true)
            .with_report_uri("https://example.com/ct")
            .unwrap();
        assert_eq!(
            config.build_header_value(),
            "max-age=86400, enforce, report-uri=\"https://example.com/ct\""
        );
        assert!(ExpectCtConfig::default().with_report_uri("not a url").is_err());
    }
}
