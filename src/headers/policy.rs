use crate::constants::{
    COMMA_SPACE, HEADER_CACHE_CONTROL, HEADER_PERMITTED_CROSS_DOMAIN, HEADER_REFERRER_POLICY,
};
use crate::error::SecureHeadersError;
use crate::headers::SecureHeader;
use crate::utils::strip_trailing_separator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferrerPolicy {
    #[default]
    NoReferrer,
    NoReferrerWhenDowngrade,
    Origin,
    OriginWhenCrossOrigin,
    SameOrigin,
    StrictOrigin,
    StrictOriginWhenCrossOrigin,
    UnsafeUrl,
}

impl ReferrerPolicy {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReferrerPolicy::NoReferrer => "no-referrer",
            ReferrerPolicy::NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
            ReferrerPolicy::Origin => "origin",
            ReferrerPolicy::OriginWhenCrossOrigin => "origin-when-cross-origin",
            ReferrerPolicy::SameOrigin => "same-origin",
            ReferrerPolicy::StrictOrigin => "strict-origin",
            ReferrerPolicy::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
            ReferrerPolicy::UnsafeUrl => "unsafe-url",
        }
    }
}

impl SecureHeader for ReferrerPolicy {
    const NAME: &'static str = HEADER_REFERRER_POLICY;

    fn build_header_value(&self) -> String {
        self.as_str().to_owned()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermittedCrossDomainPolicy {
    #[default]
    None,
    MasterOnly,
    ByContentType,
    ByFtpFilename,
    All,
}

impl PermittedCrossDomainPolicy {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PermittedCrossDomainPolicy::None => "none",
            PermittedCrossDomainPolicy::MasterOnly => "master-only",
            PermittedCrossDomainPolicy::ByContentType => "by-content-type",
            PermittedCrossDomainPolicy::ByFtpFilename => "by-ftp-filename",
            PermittedCrossDomainPolicy::All => "all",
        }
    }
}

impl SecureHeader for PermittedCrossDomainPolicy {
    const NAME: &'static str = HEADER_PERMITTED_CROSS_DOMAIN;

    fn build_header_value(&self) -> String {
        self.as_str().to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheVisibility {
    Private,
    Public,
}

impl CacheVisibility {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CacheVisibility::Private => "private",
            CacheVisibility::Public => "public",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheControlConfig {
    pub visibility: Option<CacheVisibility>,
    pub max_age: Option<u64>,
    pub no_cache: bool,
    pub no_store: bool,
    pub must_revalidate: bool,
}

impl Default for CacheControlConfig {
    /// `max-age=0, no-store`
    fn default() -> Self {
        Self {
            visibility: None,
            max_age: Some(0),
            no_cache: false,
            no_store: true,
            must_revalidate: false,
        }
    }
}

impl CacheControlConfig {
    /// No directives set; add at least one before use.
    pub fn empty() -> Self {
        Self {
            visibility: None,
            max_age: None,
            no_cache: false,
            no_store: false,
            must_revalidate: false,
        }
    }

    #[inline]
    pub fn visibility(mut self, visibility: CacheVisibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    #[inline]
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    #[inline]
    pub fn no_cache(mut self) -> Self {
        self.no_cache = true;
        self
    }

    #[inline]
    pub fn no_store(mut self) -> Self {
        self.no_store = true;
        self
    }

    #[inline]
    pub fn must_revalidate(mut self) -> Self {
        self.must_revalidate = true;
        self
    }
}

impl SecureHeader for CacheControlConfig {
    const NAME: &'static str = HEADER_CACHE_CONTROL;

    fn build_header_value(&self) -> String {
        let mut value = String::new();
        if let Some(visibility) = self.visibility {
            value.push_str(visibility.as_str());
            value.push_str(COMMA_SPACE);
        }
        if let Some(max_age) = self.max_age {
            value.push_str(&format!("max-age={}", max_age));
            value.push_str(COMMA_SPACE);
        }
        for (enabled, token) in [
            (self.no_cache, "no-cache"),
            (self.no_store, "no-store"),
            (self.must_revalidate, "must-revalidate"),
        ] {
            if enabled {
                value.push_str(token);
                value.push_str(COMMA_SPACE);
            }
        }
        strip_trailing_separator(&value, ',').to_owned()
    }

    fn validate(&self) -> Result<(), SecureHeadersError> {
        if self.build_header_value().is_empty() {
            return Err(SecureHeadersError::invalid(
                "Cache-Control needs at least one directive",
            ));
        }
        Ok(())
    }
}
