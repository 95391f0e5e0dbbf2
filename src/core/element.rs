use crate::constants::{
    NONE_KEYWORD, REPORT_SAMPLE_KEYWORD, SELF_KEYWORD, SINGLE_QUOTE, STRICT_DYNAMIC_KEYWORD,
    UNSAFE_EVAL_KEYWORD, UNSAFE_INLINE_KEYWORD,
};
use crate::error::SecureHeadersError;
use crate::utils::BufferWriter;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Keyword rendered single-quoted, e.g. `'self'`.
    Directive,
    /// Host, URL or scheme rendered bare.
    Uri,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectiveElement {
    kind: ElementKind,
    value: Cow<'static, str>,
}

impl DirectiveElement {
    #[inline]
    pub fn new(kind: ElementKind, value: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    #[inline]
    pub fn directive(value: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ElementKind::Directive, value)
    }

    #[inline]
    pub fn uri(value: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ElementKind::Uri, value)
    }

    #[inline]
    pub fn self_() -> Self {
        Self::directive(SELF_KEYWORD)
    }

    #[inline]
    pub fn none() -> Self {
        Self::directive(NONE_KEYWORD)
    }

    #[inline]
    pub fn unsafe_inline() -> Self {
        Self::directive(UNSAFE_INLINE_KEYWORD)
    }

    #[inline]
    pub fn unsafe_eval() -> Self {
        Self::directive(UNSAFE_EVAL_KEYWORD)
    }

    #[inline]
    pub fn strict_dynamic() -> Self {
        Self::directive(STRICT_DYNAMIC_KEYWORD)
    }

    #[inline]
    pub fn report_sample() -> Self {
        Self::directive(REPORT_SAMPLE_KEYWORD)
    }

    /// Parses policy text: `'self'` becomes a directive, anything else a URI.
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        match source
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
        {
            Some(keyword) if !keyword.is_empty() => Self::directive(keyword.to_owned()),
            _ => Self::uri(source.to_owned()),
        }
    }

    #[inline(always)]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline(always)]
    pub const fn is_directive(&self) -> bool {
        matches!(self.kind, ElementKind::Directive)
    }

    #[inline(always)]
    pub const fn is_uri(&self) -> bool {
        matches!(self.kind, ElementKind::Uri)
    }

    /// A source is a single token: non-empty and free of whitespace.
    pub fn validate(&self) -> Result<(), SecureHeadersError> {
        if self.value.is_empty() || self.value.chars().any(char::is_whitespace) {
            return Err(SecureHeadersError::invalid(format!(
                "CSP source must be a single non-empty token, got {:?}",
                self.value
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn estimated_size(&self) -> usize {
        match self.kind {
            ElementKind::Directive => self.value.len() + 2,
            ElementKind::Uri => self.value.len(),
        }
    }
}

impl fmt::Display for DirectiveElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ElementKind::Directive => write!(f, "'{}'", self.value),
            ElementKind::Uri => f.write_str(&self.value),
        }
    }
}

impl BufferWriter for DirectiveElement {
    fn write_to_buffer(&self, buffer: &mut BytesMut) {
        match self.kind {
            ElementKind::Directive => {
                buffer.reserve(self.value.len() + 2);
                buffer.extend_from_slice(&[SINGLE_QUOTE]);
                buffer.extend_from_slice(self.value.as_bytes());
                buffer.extend_from_slice(&[SINGLE_QUOTE]);
            }
            ElementKind::Uri => buffer.extend_from_slice(self.value.as_bytes()),
        }
    }
}
