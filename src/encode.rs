//! TOON encoder.
//!
//! Encoding is a pure function of the value tree and the options: no I/O,
//! no interior state, deterministic output. Lines are collected into a
//! buffer and joined with `\n` at the end, so the output never carries a
//! trailing newline.
//!
//! Layout selection per array, in order: inline (`[]`, or `[a,b]` when
//! the option is on and every element is a scalar), table (header plus
//! one comma-joined row per element, chosen whenever the tabular detector
//! accepts the array), list (`- ` items) otherwise.

use crate::scalar;
use crate::tabular::table_columns;
use crate::{EncodeError, EncodeOptions, Map, Value};

/// Encodes a value with the default options.
///
/// ## Examples
///
/// ```rust
/// use toon_core::{encode, toon};
///
/// let value = toon!({"name" => "Alice", "age" => 30});
/// assert_eq!(encode(&value).unwrap(), "name: Alice\nage: 30");
/// ```
pub fn encode(value: &Value) -> Result<String, EncodeError> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encodes a value with explicit options.
///
/// Fails only when the tree contains a number with no textual
/// representation (NaN or an infinity); nothing is emitted in that case.
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
    if let Some(token) = inline_value(value, options)? {
        return Ok(token);
    }
    let mut writer = Writer::new(options.indent);
    match value {
        Value::Array(elements) => encode_array_body(elements, &mut writer, 0, options)?,
        Value::Object(fields) => encode_entries(fields, &mut writer, 0, options)?,
        // Scalars and empty containers were already handled as inline tokens.
        _ => {}
    }
    Ok(writer.finish())
}

struct Writer {
    lines: Vec<String>,
    indent: String,
}

impl Writer {
    fn new(indent_width: usize) -> Self {
        Writer {
            lines: Vec::new(),
            indent: " ".repeat(indent_width),
        }
    }

    fn push(&mut self, depth: usize, content: String) {
        let mut line = self.indent.repeat(depth);
        line.push_str(&content);
        self.lines.push(line);
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Renders a value as a single token if it has a one-line form:
/// any scalar, `{}`, `[]`, or (with the option on) an all-scalar array.
fn inline_value(value: &Value, options: &EncodeOptions) -> Result<Option<String>, EncodeError> {
    match value {
        Value::Array(elements) if elements.is_empty() => Ok(Some("[]".to_string())),
        Value::Object(fields) if fields.is_empty() => Ok(Some("{}".to_string())),
        Value::Array(elements) if options.inline_arrays && elements.iter().all(Value::is_scalar) => {
            let mut cells = Vec::with_capacity(elements.len());
            for element in elements {
                cells.push(scalar::format_scalar(element)?);
            }
            Ok(Some(format!("[{}]", cells.join(","))))
        }
        Value::Array(_) | Value::Object(_) => Ok(None),
        scalar => Ok(Some(scalar::format_scalar(scalar)?)),
    }
}

fn encode_entries(fields: &Map, writer: &mut Writer, depth: usize, options: &EncodeOptions) -> Result<(), EncodeError> {
    for (key, value) in fields {
        encode_entry(key, value, writer, depth, options)?;
    }
    Ok(())
}

fn encode_entry(
    key: &str,
    value: &Value,
    writer: &mut Writer,
    depth: usize,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    let key = scalar::format_key(key);
    if let Some(token) = inline_value(value, options)? {
        writer.push(depth, format!("{}{}{}", key, options.separator.as_str(), token));
        return Ok(());
    }
    writer.push(depth, format!("{}:", key));
    match value {
        Value::Array(elements) => encode_array_body(elements, writer, depth + 1, options),
        Value::Object(fields) => encode_entries(fields, writer, depth + 1, options),
        // Scalars always render inline.
        _ => Ok(()),
    }
}

/// Writes a non-empty, non-inline array as either a table or a list,
/// starting at `depth`.
fn encode_array_body(
    elements: &[Value],
    writer: &mut Writer,
    depth: usize,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    if let Some(columns) = table_columns(elements) {
        let mut header = columns
            .iter()
            .map(|&column| scalar::format_key(column))
            .collect::<Vec<String>>()
            .join(",");
        if options.length_markers {
            header.push_str(&format!("[{}]", elements.len()));
        }
        writer.push(depth, header);
        for element in elements {
            if let Value::Object(row) = element {
                let mut cells = Vec::with_capacity(columns.len());
                for &column in &columns {
                    if let Some(cell) = row.get(column) {
                        cells.push(scalar::format_scalar(cell)?);
                    }
                }
                writer.push(depth, cells.join(","));
            }
        }
        return Ok(());
    }
    for element in elements {
        encode_list_item(element, writer, depth, options)?;
    }
    Ok(())
}

fn encode_list_item(
    value: &Value,
    writer: &mut Writer,
    depth: usize,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    if let Some(token) = inline_value(value, options)? {
        writer.push(depth, format!("- {}", token));
        return Ok(());
    }
    match value {
        Value::Array(elements) => {
            writer.push(depth, "-".to_string());
            encode_array_body(elements, writer, depth + 1, options)
        }
        Value::Object(fields) => {
            // The first field rides on the marker line when its value is
            // inline; otherwise the marker stands alone and every field
            // goes one level deeper.
            let mut entries = fields.iter();
            let first_inline = entries
                .next()
                .map(|(key, value)| Ok::<_, EncodeError>((key, value, inline_value(value, options)?)))
                .transpose()?;
            match first_inline {
                Some((key, _, Some(token))) => {
                    writer.push(
                        depth,
                        format!(
                            "- {}{}{}",
                            scalar::format_key(key),
                            options.separator.as_str(),
                            token
                        ),
                    );
                    for (key, value) in entries {
                        encode_entry(key, value, writer, depth + 1, options)?;
                    }
                    Ok(())
                }
                _ => {
                    writer.push(depth, "-".to_string());
                    encode_entries(fields, writer, depth + 1, options)
                }
            }
        }
        // Scalars always render inline.
        _ => Ok(()),
    }
}
