pub mod constants;
pub mod core;
pub mod error;
pub mod headers;
pub mod middleware;
pub mod prelude;
pub mod security;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::{
    CspConfig, CspMode, CspSlot, DirectiveElement, SandboxConfig, SandboxToken,
    SecureHeadersBuilder, SecureHeadersConfiguration,
};
pub use error::SecureHeadersError;
pub use headers::{
    CacheControlConfig, ClearSiteDataConfig, ClearSiteDataOption, ClearSiteDataPathConfig,
    CrossOriginEmbedderPolicy, CrossOriginOpenerPolicy, CrossOriginResourcePolicy, ExpectCtConfig,
    HstsConfig, PermittedCrossDomainPolicy, ReferrerPolicy, ReportingEndpointsConfig, SecureHeader,
    XFrameOptions, XssProtection,
};
pub use middleware::{
    apply_secure_headers, configure_secure_headers, secure_headers, HeaderBag, HeaderPlan,
    SecureHeadersMiddleware,
};
pub use security::{HashAlgorithm, HashGenerator};
pub use settings::SecureHeadersSettings;
