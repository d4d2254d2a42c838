//! Per-service error kinds and their discriminator registries.

use std::fmt;

/// A closed set of modeled error kinds for one service.
///
/// Each service exposes an ordered registry of `(discriminator, kind)` pairs.
/// Lookup is exact match, first entry wins; anything else resolves to
/// [`unknown`](Self::unknown) carrying the raw code.
pub trait ServiceErrorKind: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Ordered registry of modeled discriminators.
    fn registry() -> &'static [(&'static str, Self)];

    /// The kind used for discriminators missing from the registry.
    fn unknown(code: String) -> Self;

    /// Whether this kind is transient. Defaults to false.
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Declares a service error kind enum and its registry.
///
/// The generated enum gets an extra `Unknown(String)` variant, a `code()`
/// accessor returning the wire discriminator, and a [`ServiceErrorKind`]
/// implementation whose registry preserves declaration order.
macro_rules! service_error_kind {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal,
            )+
        }
        retryable: [$($retry:ident),* $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A discriminator this client does not model. Carries the raw code.
            Unknown(String),
        }

        impl $name {
            /// The wire discriminator for this kind.
            pub fn code(&self) -> &str {
                match self {
                    $( $name::$variant => $code, )+
                    $name::Unknown(code) => code,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl $crate::error::ServiceErrorKind for $name {
            fn registry() -> &'static [(&'static str, Self)] {
                static REGISTRY: [(&str, $name); [$($code),+].len()] = [
                    $( ($code, $name::$variant), )+
                ];
                &REGISTRY
            }

            fn unknown(code: String) -> Self {
                $name::Unknown(code)
            }

            fn is_retryable(&self) -> bool {
                match self {
                    $( $name::$retry => true, )*
                    _ => false,
                }
            }
        }
    };
}

pub(crate) use service_error_kind;
