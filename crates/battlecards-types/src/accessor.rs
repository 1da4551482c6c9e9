//! Generic get/set/delete against a nested mapping/sequence tree.
//!
//! Key versus index lookup is decided by the container actually found at each
//! step: a segment applied to a mapping uses its key text, a segment applied to
//! a sequence uses its numeric value. Nothing here creates intermediate
//! structure.

use crate::{Path, PathError, Seg};
use serde_json::Value;

/// Name of a JSON value's type, for diagnostics.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

fn child<'a>(value: &'a Value, seg: &Seg) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(seg.key_text().as_ref()),
        Value::Array(items) => seg.index_value().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, seg: &Seg) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(seg.key_text().as_ref()),
        Value::Array(items) => seg.index_value().and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

/// Resolve a path. Absent intermediates yield `None`, never an error.
///
/// ```
/// use battlecards_types::{get, Path};
/// use serde_json::json;
///
/// let doc = json!({"acme": {"tabs": [{"title": "Pricing"}]}});
/// let title = get(&doc, &Path::parse("acme.tabs[0].title").unwrap());
/// assert_eq!(title, Some(&json!("Pricing")));
/// assert_eq!(get(&doc, &Path::parse("acme.tabs[3].title").unwrap()), None);
/// ```
pub fn get<'a>(doc: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(doc, |current, seg| child(current, seg))
}

pub fn get_mut<'a>(doc: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    path.segments()
        .iter()
        .try_fold(doc, |current, seg| child_mut(current, seg))
}

/// Assign `value` at `path`.
///
/// Every segment before the last must already exist. On a sequence parent the
/// final index may equal the length (append) but not exceed it.
pub fn set(doc: &mut Value, path: &Path, value: Value) -> Result<(), PathError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(PathError::invalid(path, "cannot replace the document root"));
    };

    let parent = parents
        .iter()
        .try_fold(doc, |current, seg| child_mut(current, seg))
        .ok_or_else(|| PathError::invalid(path, "parent does not exist"))?;

    match parent {
        Value::Object(map) => {
            map.insert(last.key_text().into_owned(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = last
                .index_value()
                .ok_or_else(|| PathError::invalid(path, "sequence slot needs an index"))?;
            if index < items.len() {
                items[index] = value;
            } else if index == items.len() {
                items.push(value);
            } else {
                return Err(PathError::invalid(path, "index out of bounds"));
            }
            Ok(())
        }
        _ => Err(PathError::invalid(path, "parent is not a container")),
    }
}

/// Remove the value at `path` and return it.
///
/// Removing a sequence element shifts every later element down by one, so any
/// path held past this call that pointed beyond `path` is stale.
pub fn delete(doc: &mut Value, path: &Path) -> Result<Value, PathError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(PathError::invalid(path, "empty path"));
    };

    let parent = parents
        .iter()
        .try_fold(doc, |current, seg| child_mut(current, seg))
        .ok_or_else(|| PathError::invalid(path, "parent does not exist"))?;

    match parent {
        Value::Object(map) => map
            .shift_remove(last.key_text().as_ref())
            .ok_or_else(|| PathError::invalid(path, "no such key")),
        Value::Array(items) => match last.index_value() {
            Some(index) if index < items.len() => Ok(items.remove(index)),
            _ => Err(PathError::invalid(path, "no such element")),
        },
        _ => Err(PathError::invalid(path, "parent is not a container")),
    }
}
