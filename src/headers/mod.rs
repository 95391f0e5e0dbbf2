pub mod clear_site_data;
pub mod cross_origin;
pub mod framing;
pub mod policy;
pub mod reporting;
pub mod transport;

pub use clear_site_data::{ClearSiteDataConfig, ClearSiteDataOption, ClearSiteDataPathConfig};
pub use cross_origin::{
    CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy, CrossOriginResourcePolicy,
};
pub use framing::{XFrameOptions, XssProtection};
pub use policy::{CacheControlConfig, CacheVisibility, PermittedCrossDomainPolicy, ReferrerPolicy};
pub use reporting::ReportingEndpointsConfig;
pub use transport::{ExpectCtConfig, HstsConfig};

use crate::error::SecureHeadersError;
use actix_web::http::header::HeaderName;
use url::Url;

/// A typed header configuration that renders its own wire value.
pub trait SecureHeader {
    const NAME: &'static str;

    fn build_header_value(&self) -> String;

    fn validate(&self) -> Result<(), SecureHeadersError> {
        Ok(())
    }

    #[inline]
    fn header_name() -> HeaderName {
        HeaderName::from_static(Self::NAME)
    }
}

pub(crate) fn validate_absolute_uri(field: &str, value: &str) -> Result<(), SecureHeadersError> {
    match Url::parse(value.trim()) {
        Ok(url) if !url.cannot_be_a_base() => Ok(()),
        Ok(_) => Err(SecureHeadersError::invalid(format!(
            "{} must be a hierarchical URL, got '{}'",
            field, value
        ))),
        Err(err) => Err(SecureHeadersError::invalid(format!(
            "{} must be an absolute URL, got '{}': {}",
            field, value, err
        ))),
    }
}
