use super::{Member, MemberKind};
use crate::error::MarshallError;
use serde_json::Value;

/// Check every required member of `members` against the serialized `value`.
///
/// Descends into nested structures, list elements, and map values. A member
/// that is absent or `null` fails with a path such as `Tags[1].Key`.
pub fn validate_required(
    shape: &'static str,
    members: &[Member],
    value: &Value,
) -> Result<(), MarshallError> {
    match value {
        Value::Object(_) => validate_members(shape, members, value, ""),
        _ => Err(MarshallError::Serialization {
            shape,
            message: "shape did not serialize to a JSON object".to_string(),
        }),
    }
}

fn validate_members(
    shape: &'static str,
    members: &[Member],
    value: &Value,
    prefix: &str,
) -> Result<(), MarshallError> {
    for member in members {
        let path = if prefix.is_empty() {
            member.wire_name.to_string()
        } else {
            format!("{}.{}", prefix, member.wire_name)
        };

        match value.get(member.wire_name) {
            None | Some(Value::Null) => {
                if member.required {
                    return Err(MarshallError::MissingRequiredParameter {
                        shape,
                        parameter: path,
                    });
                }
            }
            Some(present) => validate_nested(shape, &member.kind, present, &path)?,
        }
    }
    Ok(())
}

fn validate_nested(
    shape: &'static str,
    kind: &MemberKind,
    value: &Value,
    path: &str,
) -> Result<(), MarshallError> {
    match (kind, value) {
        (MemberKind::Structure(members), Value::Object(_)) => {
            validate_members(shape, members, value, path)
        }
        (MemberKind::StructureList(members), Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                validate_members(shape, members, item, &format!("{}[{}]", path, index))?;
            }
            Ok(())
        }
        (MemberKind::StructureMap(members), Value::Object(entries)) => {
            for (key, item) in entries {
                validate_members(shape, members, item, &format!("{}[{}]", path, key))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
