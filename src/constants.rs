pub(crate) const HEADER_HSTS: &str = "strict-transport-security";
pub(crate) const HEADER_X_FRAME_OPTIONS: &str = "x-frame-options";
pub(crate) const HEADER_X_XSS_PROTECTION: &str = "x-xss-protection";
pub(crate) const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
pub(crate) const HEADER_CSP: &str = "content-security-policy";
pub(crate) const HEADER_CSP_REPORT_ONLY: &str = "content-security-policy-report-only";
pub(crate) const HEADER_X_CSP: &str = "x-content-security-policy";
pub(crate) const HEADER_PERMITTED_CROSS_DOMAIN: &str = "x-permitted-cross-domain-policies";
pub(crate) const HEADER_REFERRER_POLICY: &str = "referrer-policy";
pub(crate) const HEADER_EXPECT_CT: &str = "expect-ct";
pub(crate) const HEADER_CACHE_CONTROL: &str = "cache-control";
pub(crate) const HEADER_CORP: &str = "cross-origin-resource-policy";
pub(crate) const HEADER_COOP: &str = "cross-origin-opener-policy";
pub(crate) const HEADER_COEP: &str = "cross-origin-embedder-policy";
pub(crate) const HEADER_REPORTING_ENDPOINTS: &str = "reporting-endpoints";
pub(crate) const HEADER_CLEAR_SITE_DATA: &str = "clear-site-data";

pub(crate) const HEADER_SERVER: &str = "server";
pub(crate) const HEADER_X_POWERED_BY: &str = "x-powered-by";

pub(crate) const NOSNIFF: &str = "nosniff";

pub(crate) const BASE_URI: &str = "base-uri";
pub(crate) const DEFAULT_SRC: &str = "default-src";
pub(crate) const SCRIPT_SRC: &str = "script-src";
pub(crate) const OBJECT_SRC: &str = "object-src";
pub(crate) const STYLE_SRC: &str = "style-src";
pub(crate) const IMG_SRC: &str = "img-src";
pub(crate) const MEDIA_SRC: &str = "media-src";
pub(crate) const FRAME_SRC: &str = "frame-src";
pub(crate) const CHILD_SRC: &str = "child-src";
pub(crate) const FRAME_ANCESTORS: &str = "frame-ancestors";
pub(crate) const FONT_SRC: &str = "font-src";
pub(crate) const CONNECT_SRC: &str = "connect-src";
pub(crate) const MANIFEST_SRC: &str = "manifest-src";
pub(crate) const FORM_ACTION: &str = "form-action";

pub(crate) const SANDBOX: &str = "sandbox";
pub(crate) const PLUGIN_TYPES: &str = "plugin-types";
pub(crate) const BLOCK_ALL_MIXED_CONTENT: &str = "block-all-mixed-content";
pub(crate) const UPGRADE_INSECURE_REQUESTS: &str = "upgrade-insecure-requests";
pub(crate) const REFERRER: &str = "referrer";
pub(crate) const REPORT_URI: &str = "report-uri";
pub(crate) const REPORT_TO: &str = "report-to";

pub(crate) const SELF_KEYWORD: &str = "self";
pub(crate) const NONE_KEYWORD: &str = "none";
pub(crate) const UNSAFE_INLINE_KEYWORD: &str = "unsafe-inline";
pub(crate) const UNSAFE_EVAL_KEYWORD: &str = "unsafe-eval";
pub(crate) const STRICT_DYNAMIC_KEYWORD: &str = "strict-dynamic";
pub(crate) const REPORT_SAMPLE_KEYWORD: &str = "report-sample";

pub(crate) const SINGLE_QUOTE: u8 = b'\'';
pub(crate) const SEMICOLON: u8 = b';';
pub(crate) const SPACE: u8 = b' ';
pub(crate) const COMMA_SPACE: &str = ", ";

pub(crate) const DEFAULT_HSTS_MAX_AGE: u64 = 63_072_000;
pub(crate) const DEFAULT_EXPECT_CT_MAX_AGE: u64 = 86_400;
pub(crate) const DEFAULT_BUFFER_CAPACITY: usize = 256;
