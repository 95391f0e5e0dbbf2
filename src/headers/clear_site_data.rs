use crate::constants::HEADER_CLEAR_SITE_DATA;
use crate::error::SecureHeadersError;
use crate::headers::SecureHeader;
use crate::utils::join_quoted;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearSiteDataOption {
    Cache,
    Cookies,
    Storage,
    #[serde(rename = "*")]
    Wildcard,
}

impl ClearSiteDataOption {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClearSiteDataOption::Cache => "cache",
            ClearSiteDataOption::Cookies => "cookies",
            ClearSiteDataOption::Storage => "storage",
            ClearSiteDataOption::Wildcard => "*",
        }
    }
}

/// A non-empty, de-duplicated set of data categories to clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearSiteDataConfig {
    options: IndexSet<ClearSiteDataOption>,
}

impl ClearSiteDataConfig {
    pub fn new(
        options: impl IntoIterator<Item = ClearSiteDataOption>,
    ) -> Result<Self, SecureHeadersError> {
        let options: IndexSet<_> = options.into_iter().collect();
        if options.is_empty() {
            return Err(SecureHeadersError::invalid(
                "Clear-Site-Data needs at least one option",
            ));
        }
        Ok(Self { options })
    }

    #[inline]
    pub fn wildcard() -> Self {
        Self {
            options: IndexSet::from([ClearSiteDataOption::Wildcard]),
        }
    }

    #[inline]
    pub fn has_wildcard(&self) -> bool {
        self.options.contains(&ClearSiteDataOption::Wildcard)
    }

    #[inline]
    pub fn options(&self) -> impl Iterator<Item = ClearSiteDataOption> + '_ {
        self.options.iter().copied()
    }
}

impl SecureHeader for ClearSiteDataConfig {
    const NAME: &'static str = HEADER_CLEAR_SITE_DATA;

    fn build_header_value(&self) -> String {
        if self.has_wildcard() {
            return join_quoted([ClearSiteDataOption::Wildcard.as_str()], ",");
        }
        join_quoted(self.options.iter().map(|o| o.as_str()), ",")
    }
}

/// Clear-Site-Data settings per request path.
///
/// Paths match exactly and case-sensitively. Keys are consulted longest first,
/// which only decides precedence between keys; a request path never matches a
/// key it merely starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearSiteDataPathConfig {
    entries: Vec<(String, ClearSiteDataConfig)>,
    default: Option<ClearSiteDataConfig>,
}

impl ClearSiteDataPathConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(default: ClearSiteDataConfig) -> Self {
        Self {
            entries: Vec::new(),
            default: Some(default),
        }
    }

    pub fn path(mut self, path: impl Into<String>, config: ClearSiteDataConfig) -> Self {
        let path = path.into();
        match self.entries.iter_mut().find(|(key, _)| *key == path) {
            Some(entry) => entry.1 = config,
            None => {
                self.entries.push((path, config));
                self.entries.sort_by_key(|(key, _)| Reverse(key.len()));
            }
        }
        self
    }

    #[inline]
    pub fn default_config(mut self, config: ClearSiteDataConfig) -> Self {
        self.default = Some(config);
        self
    }

    pub fn resolve(&self, request_path: &str) -> Option<&ClearSiteDataConfig> {
        if request_path.is_empty() {
            return self.default.as_ref();
        }
        self.entries
            .iter()
            .find(|(key, _)| key.as_str() == request_path)
            .map(|(_, config)| config)
            .or(self.default.as_ref())
    }

    /// Registered keys, longest first.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub(crate) fn configs(&self) -> impl Iterator<Item = &ClearSiteDataConfig> {
        self.entries
            .iter()
            .map(|(_, config)| config)
            .chain(self.default.iter())
    }
}
