//! Declarative macros for shapes and open enumerations.

/// Declares a shape struct together with its schema descriptor.
///
/// Every member is an `Option` so that absent and empty values stay distinct;
/// absent members are skipped on the wire. Each member line names its wire
/// name, whether it is `required` or `optional`, and its
/// [`MemberKind`](crate::shape::MemberKind). Nested structure kinds name the
/// nested shape type.
///
/// ```rust
/// aws_rpc::shape! {
///     /// A key/value tag.
///     pub struct Tag {
///         /// Tag key.
///         key: Option<String> => "Key", required String;
///         /// Tag value.
///         value: Option<String> => "Value", required String;
///     }
/// }
///
/// aws_rpc::shape! {
///     /// Tags a resource.
///     pub struct TagResourceRequest {
///         /// Resource ARN.
///         resource_arn: Option<String> => "ResourceARN", required String;
///         /// Tags to apply.
///         tags: Option<Vec<Tag>> => "Tags", required StructureList(Tag);
///     }
/// }
/// ```
#[macro_export]
macro_rules! shape {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $wire:literal, $req:ident $kind:ident $( ($inner:ty) )?;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(rename = $wire, default, skip_serializing_if = "Option::is_none")]
                pub $field: $ty,
            )*
        }

        impl $crate::shape::Shape for $name {
            const SHAPE_NAME: &'static str = stringify!($name);
            const MEMBERS: &'static [$crate::shape::Member] = &[
                $(
                    $crate::shape::Member::$req(
                        stringify!($field),
                        $wire,
                        $crate::shape::MemberKind::$kind $( (<$inner as $crate::shape::Shape>::MEMBERS) )?,
                    ),
                )*
            ];
        }
    };
}

/// Declares an open string enumeration.
///
/// Values outside the modeled set parse into `Unknown(raw)` instead of
/// failing, and serialize back to the same raw string.
///
/// ```rust
/// aws_rpc::open_enum! {
///     /// Availability of a layer.
///     pub enum LayerAvailability {
///         /// The layer is available.
///         Available = "AVAILABLE",
///         /// The layer is not available.
///         Unavailable = "UNAVAILABLE",
///     }
/// }
///
/// assert_eq!(LayerAvailability::from("AVAILABLE"), LayerAvailability::Available);
/// assert_eq!(LayerAvailability::from("ARCHIVED").as_str(), "ARCHIVED");
/// ```
#[macro_export]
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A value this client does not model. Carries the raw wire string.
            Unknown(String),
        }

        impl $name {
            /// Wire values of the modeled variants, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            /// The wire value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Unknown(value) => value,
                }
            }

            /// True for values this client does not model.
            pub fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => $name::$variant, )+
                    other => $name::Unknown(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match $name::from(value.as_str()) {
                    $name::Unknown(_) => $name::Unknown(value),
                    known => known,
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::from(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok($name::from(value))
            }
        }
    };
}
