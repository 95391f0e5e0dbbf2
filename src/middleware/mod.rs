pub mod engine;
pub mod secure_headers;

pub use engine::{apply_secure_headers, HeaderBag, HeaderOp, HeaderPlan};
pub use secure_headers::{
    configure_secure_headers, secure_headers, SecureHeadersMiddleware,
    SecureHeadersMiddlewareService,
};
