//! Tabular shape detection.
//!
//! An array collapses to the table layout when every element is an object
//! with the same keys in the same order and every field is a scalar. The
//! detector is the sole authority on that decision; the encoder asks it
//! once per array and never second-guesses the answer.

use crate::Value;

/// Returns the ordered column keys if `elements` is table-shaped,
/// `None` otherwise.
///
/// Table-shaped means: non-empty, all elements are objects, every object
/// has the identical key sequence (at least one key), and every field
/// value is a scalar. Key order must match exactly; two objects with the
/// same keys in different orders do not form a table.
pub(crate) fn table_columns(elements: &[Value]) -> Option<Vec<&str>> {
    let first = match elements.first()? {
        Value::Object(obj) => obj,
        _ => return None,
    };
    if first.is_empty() {
        return None;
    }
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    for element in elements {
        let obj = match element {
            Value::Object(obj) => obj,
            _ => return None,
        };
        if obj.len() != columns.len() {
            return None;
        }
        for (key, column) in obj.keys().zip(&columns) {
            if key.as_str() != *column {
                return None;
            }
        }
        if obj.values().any(|value| !value.is_scalar()) {
            return None;
        }
    }
    Some(columns)
}
