use crate::core::element::DirectiveElement;
use crate::error::SecureHeadersError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ring::digest::{self, SHA256, SHA384, SHA512};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    #[inline(always)]
    pub fn digest_algorithm(&self) -> &'static digest::Algorithm {
        match self {
            HashAlgorithm::Sha256 => &SHA256,
            HashAlgorithm::Sha384 => &SHA384,
            HashAlgorithm::Sha512 => &SHA512,
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for HashAlgorithm {
    type Error = SecureHeadersError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(SecureHeadersError::invalid(format!(
                "unsupported hash algorithm '{}'",
                s
            ))),
        }
    }
}

/// Hash sources for inline `<script>`/`<style>` content.
pub struct HashGenerator;

impl HashGenerator {
    /// Base64 digest of `data`.
    pub fn generate(algorithm: HashAlgorithm, data: &[u8]) -> String {
        let digest = digest::digest(algorithm.digest_algorithm(), data);
        BASE64.encode(digest.as_ref())
    }

    /// A directive element rendering as `'sha256-<digest>'`.
    pub fn generate_element(algorithm: HashAlgorithm, data: &[u8]) -> DirectiveElement {
        DirectiveElement::directive(format!(
            "{}-{}",
            algorithm.name(),
            Self::generate(algorithm, data)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_of_empty_input() {
        assert_eq!(
            HashGenerator::generate(HashAlgorithm::Sha256, b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn test_generate_element_is_quoted() {
        let element = HashGenerator::generate_element(HashAlgorithm::Sha256, b"");
        assert!(element.is_directive());
        assert_eq!(
            element.to_string(),
            "'sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU='"
        );
    }

    #[test]
    fn test_algorithm_try_from() {
        assert_eq!(HashAlgorithm::try_from("sha384").unwrap(), HashAlgorithm::Sha384);
        assert!(HashAlgorithm::try_from("md5").is_err());
    }
}
