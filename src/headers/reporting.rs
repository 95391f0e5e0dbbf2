use crate::constants::{COMMA_SPACE, HEADER_REPORTING_ENDPOINTS};
use crate::error::SecureHeadersError;
use crate::headers::{validate_absolute_uri, SecureHeader};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `Reporting-Endpoints: csp="https://example.com/csp", default="https://example.com/r"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportingEndpointsConfig {
    endpoints: IndexMap<String, String>,
}

fn is_valid_endpoint_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

impl ReportingEndpointsConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(
        mut self,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, SecureHeadersError> {
        let name = name.into();
        let url = url.into();
        if !is_valid_endpoint_name(&name) {
            return Err(SecureHeadersError::invalid(format!(
                "invalid reporting endpoint name '{}'",
                name
            )));
        }
        validate_absolute_uri("Reporting-Endpoints url", &url)?;
        self.endpoints.insert(name, url);
        Ok(self)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.endpoints.get(name).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl SecureHeader for ReportingEndpointsConfig {
    const NAME: &'static str = HEADER_REPORTING_ENDPOINTS;

    fn build_header_value(&self) -> String {
        self.endpoints
            .iter()
            .map(|(name, url)| format!("{}=\"{}\"", name, url.trim()))
            .collect::<Vec<_>>()
            .join(COMMA_SPACE)
    }

    fn validate(&self) -> Result<(), SecureHeadersError> {
        if self.endpoints.is_empty() {
            return Err(SecureHeadersError::invalid(
                "Reporting-Endpoints needs at least one endpoint",
            ));
        }
        for (name, url) in &self.endpoints {
            if !is_valid_endpoint_name(name) {
                return Err(SecureHeadersError::invalid(format!(
                    "invalid reporting endpoint name '{}'",
                    name
                )));
            }
            validate_absolute_uri("Reporting-Endpoints url", url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_render_in_insertion_order() {
        let config = ReportingEndpointsConfig::new()
            .endpoint("csp-endpoint", "https://example.com/csp")
            .unwrap()
            .endpoint("default", "https://example.com/reports")
            .unwrap();
        assert_eq!(
            config.build_header_value(),
            "csp-endpoint=\"https://example.com/csp\", default=\"https://example.com/reports\""
        );
    }

    #[test]
    fn test_invalid_endpoints() {
        assert!(ReportingEndpointsConfig::new()
            .endpoint("bad name", "https://example.com")
            .is_err());
        assert!(ReportingEndpointsConfig::new()
            .endpoint("csp", "/relative")
            .is_err());
        assert!(ReportingEndpointsConfig::new().validate().is_err());
    }
}
