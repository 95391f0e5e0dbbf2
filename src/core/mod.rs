pub mod config;
pub mod csp;
pub mod directives;
pub mod element;

pub use config::{SecureHeadersBuilder, SecureHeadersConfiguration};
pub use csp::{build_header_value, CspConfig, CspMode};
pub use directives::{CspDirectiveSet, CspSlot, SandboxConfig, SandboxToken};
pub use element::{DirectiveElement, ElementKind};
