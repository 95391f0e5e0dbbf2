use crate::constants::{HEADER_COEP, HEADER_COOP, HEADER_CORP};
use crate::headers::SecureHeader;
use serde::{Deserialize, Serialize};

macro_rules! define_token_header {
    (
        $(#[$meta:meta])*
        $name:ident, $header:expr, default = $default:ident,
        { $($variant:ident => $token:expr),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant,)+
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                $name::$default
            }
        }

        impl $name {
            #[inline]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl SecureHeader for $name {
            const NAME: &'static str = $header;

            fn build_header_value(&self) -> String {
                self.as_str().to_owned()
            }
        }
    };
}

define_token_header!(
    CrossOriginResourcePolicy, HEADER_CORP, default = SameOrigin,
    {
        SameSite => "same-site",
        SameOrigin => "same-origin",
        CrossOrigin => "cross-origin",
    }
);

define_token_header!(
    CrossOriginOpenerPolicy, HEADER_COOP, default = SameOrigin,
    {
        UnsafeNone => "unsafe-none",
        SameOriginAllowPopups => "same-origin-allow-popups",
        SameOrigin => "same-origin",
    }
);

define_token_header!(
    /// Requires Cross-Origin-Resource-Policy to be enabled alongside it.
    CrossOriginEmbedderPolicy, HEADER_COEP, default = RequireCorp,
    {
        UnsafeNone => "unsafe-none",
        RequireCorp => "require-corp",
        Credentialless => "credentialless",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            CrossOriginResourcePolicy::default().build_header_value(),
            "same-origin"
        );
        assert_eq!(
            CrossOriginOpenerPolicy::default().build_header_value(),
            "same-origin"
        );
        assert_eq!(
            CrossOriginEmbedderPolicy::default().build_header_value(),
            "require-corp"
        );
    }

    #[test]
    fn test_header_names() {
        assert_eq!(
            CrossOriginEmbedderPolicy::header_name().as_str(),
            "cross-origin-embedder-policy"
        );
    }
}
