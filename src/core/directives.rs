use crate::constants::{self, SEMICOLON, SPACE};
use crate::core::element::DirectiveElement;
use crate::error::SecureHeadersError;
use crate::utils::{write_space_separated, BufferWriter};
use bytes::BytesMut;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::{fmt, str::FromStr};

pub(crate) const SLOT_COUNT: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CspSlot {
    BaseUri,
    DefaultSrc,
    ScriptSrc,
    ObjectSrc,
    StyleSrc,
    ImgSrc,
    MediaSrc,
    FrameSrc,
    ChildSrc,
    FrameAncestors,
    FontSrc,
    ConnectSrc,
    ManifestSrc,
    FormAction,
}

impl CspSlot {
    /// Slots in the order they are rendered.
    pub const ALL: [CspSlot; SLOT_COUNT] = [
        CspSlot::BaseUri,
        CspSlot::DefaultSrc,
        CspSlot::ScriptSrc,
        CspSlot::ObjectSrc,
        CspSlot::StyleSrc,
        CspSlot::ImgSrc,
        CspSlot::MediaSrc,
        CspSlot::FrameSrc,
        CspSlot::ChildSrc,
        CspSlot::FrameAncestors,
        CspSlot::FontSrc,
        CspSlot::ConnectSrc,
        CspSlot::ManifestSrc,
        CspSlot::FormAction,
    ];

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CspSlot::BaseUri => constants::BASE_URI,
            CspSlot::DefaultSrc => constants::DEFAULT_SRC,
            CspSlot::ScriptSrc => constants::SCRIPT_SRC,
            CspSlot::ObjectSrc => constants::OBJECT_SRC,
            CspSlot::StyleSrc => constants::STYLE_SRC,
            CspSlot::ImgSrc => constants::IMG_SRC,
            CspSlot::MediaSrc => constants::MEDIA_SRC,
            CspSlot::FrameSrc => constants::FRAME_SRC,
            CspSlot::ChildSrc => constants::CHILD_SRC,
            CspSlot::FrameAncestors => constants::FRAME_ANCESTORS,
            CspSlot::FontSrc => constants::FONT_SRC,
            CspSlot::ConnectSrc => constants::CONNECT_SRC,
            CspSlot::ManifestSrc => constants::MANIFEST_SRC,
            CspSlot::FormAction => constants::FORM_ACTION,
        }
    }

    #[inline(always)]
    const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for CspSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CspSlot {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CspSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                SecureHeadersError::invalid(format!("unknown CSP directive slot '{}'", s))
            })
    }
}

pub type ElementList = SmallVec<[DirectiveElement; 4]>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspDirectiveSet {
    slots: [ElementList; SLOT_COUNT],
}

impl CspDirectiveSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents of `slot`.
    pub fn set(
        &mut self,
        slot: CspSlot,
        elements: impl IntoIterator<Item = DirectiveElement>,
    ) -> &mut Self {
        self.slots[slot.index()].clear();
        self.extend(slot, elements)
    }

    pub fn extend(
        &mut self,
        slot: CspSlot,
        elements: impl IntoIterator<Item = DirectiveElement>,
    ) -> &mut Self {
        for element in elements {
            self.push(slot, element);
        }
        self
    }

    pub fn push(&mut self, slot: CspSlot, element: DirectiveElement) -> &mut Self {
        let list = &mut self.slots[slot.index()];
        if !list.contains(&element) {
            list.push(element);
        }
        self
    }

    #[inline]
    pub fn get(&self, slot: CspSlot) -> &[DirectiveElement] {
        &self.slots[slot.index()]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|list| list.is_empty())
    }

    /// Non-empty slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CspSlot, &[DirectiveElement])> {
        CspSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.get(slot)))
            .filter(|(_, elements)| !elements.is_empty())
    }

    /// Rejects any blank or whitespace-containing element.
    pub fn validate(&self) -> Result<(), SecureHeadersError> {
        for (slot, elements) in self.iter() {
            for element in elements {
                element.validate().map_err(|err| match err {
                    SecureHeadersError::InvalidArgument(message) => {
                        SecureHeadersError::invalid(format!("{}: {}", slot, message))
                    }
                    other => other,
                })?;
            }
        }
        Ok(())
    }

    pub fn estimated_size(&self) -> usize {
        self.iter()
            .map(|(slot, elements)| {
                slot.as_str().len()
                    + 2
                    + elements
                        .iter()
                        .map(|e| e.estimated_size() + 1)
                        .sum::<usize>()
            })
            .sum()
    }
}

impl BufferWriter for CspDirectiveSet {
    fn write_to_buffer(&self, buffer: &mut BytesMut) {
        for (slot, elements) in self.iter() {
            buffer.extend_from_slice(slot.as_str().as_bytes());
            buffer.extend_from_slice(&[SPACE]);

            let has_directives = elements.iter().any(|e| e.is_directive());
            let has_uris = elements.iter().any(|e| e.is_uri());

            write_space_separated(buffer, elements.iter().filter(|e| e.is_directive()));
            if has_directives && has_uris {
                buffer.extend_from_slice(&[SPACE]);
            }
            write_space_separated(buffer, elements.iter().filter(|e| e.is_uri()));

            buffer.extend_from_slice(&[SEMICOLON]);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxToken {
    AllowDownloads,
    AllowForms,
    AllowModals,
    AllowOrientationLock,
    AllowPointerLock,
    AllowPopups,
    AllowPopupsToEscapeSandbox,
    AllowPresentation,
    AllowSameOrigin,
    AllowScripts,
    AllowTopNavigation,
    AllowTopNavigationByUserActivation,
}

impl SandboxToken {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SandboxToken::AllowDownloads => "allow-downloads",
            SandboxToken::AllowForms => "allow-forms",
            SandboxToken::AllowModals => "allow-modals",
            SandboxToken::AllowOrientationLock => "allow-orientation-lock",
            SandboxToken::AllowPointerLock => "allow-pointer-lock",
            SandboxToken::AllowPopups => "allow-popups",
            SandboxToken::AllowPopupsToEscapeSandbox => "allow-popups-to-escape-sandbox",
            SandboxToken::AllowPresentation => "allow-presentation",
            SandboxToken::AllowSameOrigin => "allow-same-origin",
            SandboxToken::AllowScripts => "allow-scripts",
            SandboxToken::AllowTopNavigation => "allow-top-navigation",
            SandboxToken::AllowTopNavigationByUserActivation => {
                "allow-top-navigation-by-user-activation"
            }
        }
    }
}

impl fmt::Display for SandboxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `sandbox` directive. An empty set still renders the bare `sandbox` token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SandboxConfig {
    tokens: IndexSet<SandboxToken>,
}

impl SandboxConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: impl IntoIterator<Item = SandboxToken>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    #[inline]
    pub fn allow(mut self, token: SandboxToken) -> Self {
        self.tokens.insert(token);
        self
    }

    #[inline]
    pub fn allow_forms(self) -> Self {
        self.allow(SandboxToken::AllowForms)
    }

    #[inline]
    pub fn allow_scripts(self) -> Self {
        self.allow(SandboxToken::AllowScripts)
    }

    #[inline]
    pub fn allow_same_origin(self) -> Self {
        self.allow(SandboxToken::AllowSameOrigin)
    }

    #[inline]
    pub fn allow_popups(self) -> Self {
        self.allow(SandboxToken::AllowPopups)
    }

    #[inline]
    pub fn tokens(&self) -> impl Iterator<Item = SandboxToken> + '_ {
        self.tokens.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl BufferWriter for SandboxConfig {
    fn write_to_buffer(&self, buffer: &mut BytesMut) {
        buffer.extend_from_slice(constants::SANDBOX.as_bytes());
        for token in &self.tokens {
            buffer.extend_from_slice(&[SPACE]);
            buffer.extend_from_slice(token.as_str().as_bytes());
        }
        buffer.extend_from_slice(b"; ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::buffer_into_string;

    fn render(set: &CspDirectiveSet) -> String {
        let mut buffer = BytesMut::new();
        set.write_to_buffer(&mut buffer);
        buffer_into_string(buffer)
    }

    #[test]
    fn test_slot_from_str() {
        assert_eq!("script-src".parse::<CspSlot>().unwrap(), CspSlot::ScriptSrc);
        assert_eq!("Frame-Ancestors".parse::<CspSlot>().unwrap(), CspSlot::FrameAncestors);
        assert!(matches!(
            "worker-src".parse::<CspSlot>(),
            Err(SecureHeadersError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_directives_before_uris() {
        let mut set = CspDirectiveSet::new();
        set.set(
            CspSlot::ImgSrc,
            [
                DirectiveElement::uri("data:"),
                DirectiveElement::self_(),
                DirectiveElement::uri("img.example.com"),
            ],
        );
        assert_eq!(render(&set), "img-src 'self' data: img.example.com;");
    }

    #[test]
    fn test_uri_only_slot_has_single_space() {
        let mut set = CspDirectiveSet::new();
        set.set(CspSlot::ConnectSrc, [DirectiveElement::uri("wss://example.com")]);
        assert_eq!(render(&set), "connect-src wss://example.com;");
    }

    #[test]
    fn test_canonical_order_ignores_insertion_order() {
        let mut set = CspDirectiveSet::new();
        set.set(CspSlot::FormAction, [DirectiveElement::self_()]);
        set.set(CspSlot::BaseUri, [DirectiveElement::none()]);
        assert_eq!(render(&set), "base-uri 'none';form-action 'self';");
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut set = CspDirectiveSet::new();
        set.extend(
            CspSlot::ScriptSrc,
            [DirectiveElement::self_(), DirectiveElement::self_()],
        );
        assert_eq!(set.get(CspSlot::ScriptSrc).len(), 1);
    }

    #[test]
    fn test_sandbox_tokens_collapse() {
        let sandbox = SandboxConfig::new()
            .allow_forms()
            .allow_scripts()
            .allow_forms();
        assert_eq!(sandbox.len(), 2);

        let mut buffer = BytesMut::new();
        sandbox.write_to_buffer(&mut buffer);
        assert_eq!(&buffer[..], b"sandbox allow-forms allow-scripts; ");
    }

    #[test]
    fn test_empty_sandbox_renders_bare_token() {
        let mut buffer = BytesMut::new();
        SandboxConfig::new().write_to_buffer(&mut buffer);
        assert_eq!(&buffer[..], b"sandbox; ");
    }
}
