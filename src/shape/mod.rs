//! Request and result shapes.
//!
//! A shape is a plain Rust struct plus a static schema descriptor listing its
//! members, their wire names, required-ness, and kinds. The single generic
//! marshaller walks the descriptor to validate input before anything is sent,
//! so no per-operation marshalling code exists.
//!
//! Shapes are declared with the [`shape!`](crate::shape!) macro and open
//! string enumerations with [`open_enum!`](crate::open_enum!).

pub mod encoding;
mod macros;
mod validate;

pub use validate::validate_required;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A typed request or result structure with a static schema descriptor.
pub trait Shape:
    Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static
{
    /// Shape name used in diagnostics.
    const SHAPE_NAME: &'static str;

    /// Member descriptors in declaration order.
    const MEMBERS: &'static [Member];
}

/// Schema descriptor for one member of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// Rust field name.
    pub name: &'static str,
    /// Member name on the wire.
    pub wire_name: &'static str,
    /// Whether the member must be present for the request to be sent.
    pub required: bool,
    /// Kind of the member value.
    pub kind: MemberKind,
}

impl Member {
    /// Descriptor for a required member.
    pub const fn required(name: &'static str, wire_name: &'static str, kind: MemberKind) -> Self {
        Self {
            name,
            wire_name,
            required: true,
            kind,
        }
    }

    /// Descriptor for an optional member.
    pub const fn optional(name: &'static str, wire_name: &'static str, kind: MemberKind) -> Self {
        Self {
            name,
            wire_name,
            required: false,
            kind,
        }
    }
}

/// Kind of a member value.
///
/// Nested structures carry their own member descriptors so validation can
/// descend into them, into list elements, and into map values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// UTF-8 string.
    String,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Long,
    /// Floating point number.
    Double,
    /// Boolean.
    Boolean,
    /// Timestamp encoded as epoch seconds.
    Timestamp,
    /// Binary data encoded as base64.
    Blob,
    /// Open string enumeration.
    Enum,
    /// Nested structure.
    Structure(&'static [Member]),
    /// List of scalars or enums.
    List,
    /// List of nested structures.
    StructureList(&'static [Member]),
    /// String-keyed map of scalars.
    Map,
    /// String-keyed map of nested structures.
    StructureMap(&'static [Member]),
}

impl MemberKind {
    /// Member descriptors of nested structures, if any.
    pub fn nested(&self) -> Option<&'static [Member]> {
        match self {
            MemberKind::Structure(members)
            | MemberKind::StructureList(members)
            | MemberKind::StructureMap(members) => Some(members),
            _ => None,
        }
    }
}
