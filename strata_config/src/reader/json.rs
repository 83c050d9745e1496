//! JSON reader mapping objects onto raw trees.

use serde_json::{Map, Value};

use super::parse_error;
use crate::{RawTree, StrataResult, StrataResultExt};

/// Parses a JSON object into a raw tree.
///
/// Object members become ordered children, arrays become repeated siblings
/// named by their key, scalars become payloads and `null` becomes an empty
/// node.
pub(crate) fn read_json(text: &str) -> StrataResult<RawTree> {
    let value: Value = serde_json::from_str(text).into_strata()?;
    let Value::Object(members) = value else {
        return Err(parse_error("top-level JSON value must be an object", None));
    };
    let mut document = RawTree::new();
    append_members(&mut document, members)?;
    Ok(document)
}

fn append_members(node: &mut RawTree, members: Map<String, Value>) -> StrataResult<()> {
    members
        .into_iter()
        .try_for_each(|(key, value)| append_value(node, key, value, false))
}

fn append_value(node: &mut RawTree, key: String, value: Value, in_array: bool) -> StrataResult<()> {
    match value {
        Value::Null => {
            node.push_child(key, RawTree::new());
        }
        Value::Bool(flag) => {
            node.push_child(key, RawTree::leaf(flag.to_string()));
        }
        Value::Number(number) => {
            node.push_child(key, RawTree::leaf(number.to_string()));
        }
        Value::String(text) => {
            node.push_child(key, RawTree::leaf(text));
        }
        Value::Array(items) => {
            if in_array {
                return Err(parse_error(
                    format!("nested arrays are not supported (key '{key}')"),
                    None,
                ));
            }
            for item in items {
                append_value(node, key.clone(), item, true)?;
            }
        }
        Value::Object(members) => {
            append_members(node.push_child(key, RawTree::new()), members)?;
        }
    }
    Ok(())
}
