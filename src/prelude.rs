pub use crate::core::{
    CspConfig, CspSlot, DirectiveElement, SandboxConfig, SecureHeadersBuilder,
    SecureHeadersConfiguration,
};
pub use crate::headers::{
    ClearSiteDataConfig, ClearSiteDataOption, ClearSiteDataPathConfig, HstsConfig,
    ReferrerPolicy, SecureHeader, XFrameOptions, XssProtection,
};
pub use crate::middleware::{configure_secure_headers, secure_headers, SecureHeadersMiddleware};
pub use crate::security::{HashAlgorithm, HashGenerator};
