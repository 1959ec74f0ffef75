//! TOON decoder.
//!
//! Decoding runs in two passes. A scanner first strips each physical line
//! to `(line number, depth, content)`, dropping blank lines and validating
//! indentation against the document's established unit. A cursor over the
//! scanned lines then drives recursive descent: each container consumes
//! every line at its depth and deeper, and hands control back when the
//! depth drops.
//!
//! Container kinds are told apart by the shape of the first child line:
//! a `- ` marker opens a list, a `key:` line opens an object, anything
//! else is a table header. Decoding is strict about structure (duplicate
//! keys, field counts, declared row counts, indentation) and lenient
//! about bare scalar content, mirroring the encoder's quoting rules.

use crate::scalar;
use crate::{DecodeError, Map, Value};

/// Decodes TOON text into a value tree.
///
/// Empty input (or input with only blank lines) decodes to `Null`.
///
/// ## Examples
///
/// ```rust
/// use toon_core::{decode, toon};
///
/// let value = decode("id,name\n1,Alice\n2,Bob").unwrap();
/// assert_eq!(
///     value,
///     toon!([{"id" => 1, "name" => "Alice"}, {"id" => 2, "name" => "Bob"}])
/// );
/// ```
pub fn decode(input: &str) -> Result<Value, DecodeError> {
    let lines = scan(input)?;
    let mut cursor = Cursor { lines, index: 0 };
    let value = decode_root(&mut cursor)?;
    if let Some(line) = cursor.peek() {
        return Err(DecodeError::malformed(
            line.number,
            line.indent + 1,
            "unexpected trailing content",
        ));
    }
    Ok(value)
}

#[derive(Clone, Copy)]
struct Line<'a> {
    number: usize,
    indent: usize,
    depth: usize,
    content: &'a str,
}

struct Cursor<'a> {
    lines: Vec<Line<'a>>,
    index: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn remaining(&self) -> usize {
        self.lines.len() - self.index
    }
}

/// Strips raw input into content lines with validated depths.
///
/// The first indented line fixes the document's indentation unit; every
/// later indent must be a whole multiple of it, and depth may grow by at
/// most one level from one line to the next. Tabs in leading whitespace
/// are rejected outright. Blank lines and trailing `\r` are dropped.
fn scan(input: &str) -> Result<Vec<Line<'_>>, DecodeError> {
    let mut lines = Vec::new();
    let mut unit: Option<usize> = None;
    let mut prev_depth = 0usize;
    for (i, raw) in input.split('\n').enumerate() {
        let number = i + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let mut indent = 0;
        for byte in raw.bytes() {
            match byte {
                b' ' => indent += 1,
                b'\t' => {
                    return Err(DecodeError::indentation(
                        number,
                        "tab character in indentation",
                    ));
                }
                _ => break,
            }
        }
        let content = raw[indent..].trim_end();
        if content.is_empty() {
            continue;
        }
        let depth = if indent == 0 {
            0
        } else {
            let unit = *unit.get_or_insert(indent);
            if indent % unit != 0 {
                return Err(DecodeError::indentation(
                    number,
                    format!(
                        "indent of {} spaces is not a multiple of the document's unit of {}",
                        indent, unit
                    ),
                ));
            }
            indent / unit
        };
        if depth > prev_depth + 1 {
            return Err(DecodeError::indentation(
                number,
                format!("indentation jumped from level {} to {}", prev_depth, depth),
            ));
        }
        prev_depth = depth;
        lines.push(Line {
            number,
            indent,
            depth,
            content,
        });
    }
    Ok(lines)
}

fn is_list_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

/// A line opens an object field when its first unquoted colon comes
/// before any unquoted comma. A table header such as `id,"a:b"` hits the
/// comma first (or has no unquoted colon at all) and is not a key line,
/// even though a quoted column name may contain a colon.
fn is_key_line(content: &str) -> bool {
    let bytes = content.as_bytes();
    let mut in_quotes = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quotes => i += 2,
            b'"' => {
                in_quotes = !in_quotes;
                i += 1;
            }
            b':' if !in_quotes => return true,
            b',' if !in_quotes => return false,
            _ => i += 1,
        }
    }
    false
}

/// Byte index of the first colon outside any quoted section.
fn find_unquoted_colon(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut in_quotes = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quotes => i += 2,
            b'"' => {
                in_quotes = !in_quotes;
                i += 1;
            }
            b':' if !in_quotes => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Splits a `key: value` line into its key and the trimmed remainder
/// after the colon. Returns the remainder's 1-based column within
/// `content` (indentation excluded) for error reporting.
///
/// `Ok(None)` means the line is not key-shaped at all.
fn split_key(
    content: &str,
    line_no: usize,
    indent: usize,
) -> Result<Option<(String, &str, usize)>, DecodeError> {
    let (key, after_colon) = if content.starts_with('"') {
        let end = match scalar::find_closing_quote(content) {
            Some(end) => end,
            None => return Ok(None),
        };
        let after = content[end + 1..].trim_start();
        let rest = match after.strip_prefix(':') {
            Some(rest) => rest,
            None => return Ok(None),
        };
        let key = scalar::unescape(&content[1..end], line_no, indent + 1)?;
        (key, rest)
    } else {
        match find_unquoted_colon(content) {
            Some(idx) => (
                content[..idx].trim().to_string(),
                &content[idx + 1..],
            ),
            None => return Ok(None),
        }
    };
    let rest = after_colon.trim();
    let offset = rest.as_ptr() as usize - content.as_ptr() as usize;
    let column = scalar::char_col(content, offset) + 1;
    Ok(Some((key, rest, column)))
}

fn decode_root(cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
    let Some(first) = cursor.peek() else {
        return Ok(Value::Null);
    };
    if is_list_item(first.content) {
        decode_list(cursor, 0)
    } else if is_key_line(first.content) {
        decode_object(cursor, 0)
    } else if cursor.remaining() == 1 {
        cursor.advance();
        parse_value_token(first.content, first.number, first.indent + 1)
    } else {
        decode_table(cursor, 0)
    }
}

/// Decodes the container opened by a `key:` or bare `-` line, whose
/// children sit at `depth`. No children at all decodes to an empty object.
fn decode_container(cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, DecodeError> {
    let first = match cursor.peek() {
        Some(line) if line.depth == depth => line,
        _ => return Ok(Value::Object(Map::new())),
    };
    if is_list_item(first.content) {
        decode_list(cursor, depth)
    } else if is_key_line(first.content) {
        decode_object(cursor, depth)
    } else {
        decode_table(cursor, depth)
    }
}

fn decode_object(cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, DecodeError> {
    let mut map = Map::new();
    decode_fields_into(&mut map, cursor, depth)?;
    Ok(Value::Object(map))
}

/// Consumes `key: value` lines at `depth` into `map` until the depth
/// drops below `depth` or the input ends.
fn decode_fields_into(
    map: &mut Map,
    cursor: &mut Cursor<'_>,
    depth: usize,
) -> Result<(), DecodeError> {
    while let Some(line) = cursor.peek() {
        if line.depth < depth {
            break;
        }
        if line.depth > depth {
            return Err(DecodeError::indentation(
                line.number,
                "unexpected indentation under a completed value",
            ));
        }
        cursor.advance();
        let Some((key, rest, rest_col)) = split_key(line.content, line.number, line.indent)? else {
            return Err(DecodeError::malformed(
                line.number,
                line.indent + 1,
                "expected a \"key:\" line",
            ));
        };
        if map.contains_key(&key) {
            return Err(DecodeError::DuplicateKey {
                line: line.number,
                key,
            });
        }
        let value = if rest.is_empty() {
            decode_container(cursor, depth + 1)?
        } else {
            parse_value_token(rest, line.number, line.indent + rest_col)?
        };
        map.insert(key, value);
    }
    Ok(())
}

fn decode_list(cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, DecodeError> {
    let mut items = Vec::new();
    while let Some(line) = cursor.peek() {
        if line.depth < depth {
            break;
        }
        if line.depth > depth {
            return Err(DecodeError::indentation(
                line.number,
                "unexpected indentation inside a list",
            ));
        }
        if !is_list_item(line.content) {
            return Err(DecodeError::malformed(
                line.number,
                line.indent + 1,
                "expected a list item starting with \"- \"",
            ));
        }
        cursor.advance();
        items.push(decode_list_item(line, cursor, depth)?);
    }
    Ok(Value::Array(items))
}

/// Decodes one list item. A bare `-` opens a nested container on the
/// following deeper lines; `- key: ...` starts an object whose remaining
/// fields sit one level deeper; anything else is an inline value.
fn decode_list_item(
    item: Line<'_>,
    cursor: &mut Cursor<'_>,
    depth: usize,
) -> Result<Value, DecodeError> {
    if item.content == "-" {
        return decode_container(cursor, depth + 1);
    }
    let rest = item.content[2..].trim();
    let rest_offset = rest.as_ptr() as usize - item.content.as_ptr() as usize;
    let rest_col = item.indent + scalar::char_col(item.content, rest_offset) + 1;
    let Some((key, value_token, token_col)) = split_key(rest, item.number, item.indent)? else {
        return Ok(parse_value_token(rest, item.number, rest_col)?);
    };
    let mut map = Map::new();
    let first_value = if value_token.is_empty() {
        decode_container(cursor, depth + 1)?
    } else {
        parse_value_token(value_token, item.number, rest_col + token_col - 1)?
    };
    map.insert(key, first_value);
    decode_fields_into(&mut map, cursor, depth + 1)?;
    Ok(Value::Object(map))
}

fn decode_table(cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, DecodeError> {
    let Some(header) = cursor.peek() else {
        return Ok(Value::Array(Vec::new()));
    };
    cursor.advance();
    let (columns_part, declared) = strip_row_count(header.content);
    let mut columns: Vec<String> = Vec::new();
    for (offset, raw) in scalar::split_fields(columns_part) {
        let leading = raw.len() - raw.trim_start().len();
        let token = raw.trim();
        let column = header.indent + scalar::char_col(columns_part, offset + leading) + 1;
        if token.is_empty() {
            return Err(DecodeError::malformed(
                header.number,
                column,
                "empty column name in table header",
            ));
        }
        let name = if token.starts_with('"') {
            scalar::parse_quoted(token, header.number, column)?
        } else {
            token.to_string()
        };
        if columns.contains(&name) {
            return Err(DecodeError::DuplicateKey {
                line: header.number,
                key: name,
            });
        }
        columns.push(name);
    }

    let mut rows = Vec::new();
    while let Some(line) = cursor.peek() {
        if line.depth < depth {
            break;
        }
        if line.depth > depth {
            return Err(DecodeError::indentation(
                line.number,
                "unexpected indentation inside a table",
            ));
        }
        if let Some(expected) = declared {
            if rows.len() == expected {
                return Err(DecodeError::RowCountMismatch {
                    line: line.number,
                    expected,
                    found: expected + 1,
                });
            }
        }
        cursor.advance();
        let fields = scalar::split_fields(line.content);
        if fields.len() != columns.len() {
            return Err(DecodeError::ColumnCountMismatch {
                line: line.number,
                expected: columns.len(),
                found: fields.len(),
            });
        }
        let mut row = Map::with_capacity(columns.len());
        for ((offset, raw), column_name) in fields.into_iter().zip(&columns) {
            let leading = raw.len() - raw.trim_start().len();
            let token = raw.trim();
            let column = line.indent + scalar::char_col(line.content, offset + leading) + 1;
            if token.is_empty() {
                return Err(DecodeError::malformed(
                    line.number,
                    column,
                    "empty field in table row",
                ));
            }
            let value = scalar::parse_scalar(token, line.number, column)?;
            row.insert(column_name.clone(), value);
        }
        rows.push(Value::Object(row));
    }

    if let Some(expected) = declared {
        if rows.len() != expected {
            return Err(DecodeError::RowCountMismatch {
                line: header.number,
                expected,
                found: rows.len(),
            });
        }
    } else if rows.is_empty() {
        return Err(DecodeError::malformed(
            header.number,
            header.indent + 1,
            "table header with no rows",
        ));
    }
    Ok(Value::Array(rows))
}

/// Parses a value token in `key: value` or `- value` position:
/// `{}`, `[]`, an inline `[a,b]` array, or a scalar.
fn parse_value_token(token: &str, line: usize, column: usize) -> Result<Value, DecodeError> {
    if token == "{}" {
        return Ok(Value::Object(Map::new()));
    }
    if let Some(inner) = token.strip_prefix('[') {
        if let Some(inner) = inner.strip_suffix(']') {
            return parse_inline_array(inner, line, column);
        }
    }
    scalar::parse_scalar(token, line, column)
}

fn parse_inline_array(inner: &str, line: usize, column: usize) -> Result<Value, DecodeError> {
    if inner.trim().is_empty() {
        return Ok(Value::Array(Vec::new()));
    }
    let mut elements = Vec::new();
    for (offset, raw) in scalar::split_fields(inner) {
        let leading = raw.len() - raw.trim_start().len();
        let token = raw.trim();
        let cell_column = column + 1 + scalar::char_col(inner, offset + leading);
        if token.is_empty() {
            return Err(DecodeError::malformed(
                line,
                cell_column,
                "empty element in inline array",
            ));
        }
        elements.push(scalar::parse_scalar(token, line, cell_column)?);
    }
    Ok(Value::Array(elements))
}

/// Splits an optional trailing `[N]` row-count annotation off a table
/// header. The bracket must sit outside any quoted column name.
fn strip_row_count(content: &str) -> (&str, Option<usize>) {
    if !content.ends_with(']') {
        return (content, None);
    }
    let Some(open) = content.rfind('[') else {
        return (content, None);
    };
    let digits = &content[open + 1..content.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (content, None);
    }
    if in_quotes_at(content, open) {
        return (content, None);
    }
    match digits.parse::<usize>() {
        Ok(count) => (&content[..open], Some(count)),
        Err(_) => (content, None),
    }
}

fn in_quotes_at(content: &str, target: usize) -> bool {
    let bytes = content.as_bytes();
    let mut in_quotes = false;
    let mut i = 0;
    while i < target.min(bytes.len()) {
        match bytes[i] {
            b'\\' if in_quotes => i += 2,
            b'"' => {
                in_quotes = !in_quotes;
                i += 1;
            }
            _ => i += 1,
        }
    }
    in_quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{toon, Number};

    #[test]
    fn empty_input_is_null() {
        assert_eq!(decode("").unwrap(), Value::Null);
        assert_eq!(decode("\n  \n\n").unwrap(), Value::Null);
    }

    #[test]
    fn scalar_roots() {
        assert_eq!(decode("42").unwrap(), toon!(42));
        assert_eq!(decode("null").unwrap(), Value::Null);
        assert_eq!(decode("hello world").unwrap(), toon!("hello world"));
        assert_eq!(decode("\"42\"").unwrap(), toon!("42"));
        assert_eq!(decode("{}").unwrap(), toon!({}));
        assert_eq!(decode("[]").unwrap(), toon!([]));
        assert_eq!(decode("[1,2,3]").unwrap(), toon!([1, 2, 3]));
    }

    #[test]
    fn flat_object() {
        let value = decode("name: Alice\nage: 30\nactive: true").unwrap();
        assert_eq!(value, toon!({"name" => "Alice", "age" => 30, "active" => true}));
    }

    #[test]
    fn nested_object() {
        let value = decode("server:\n  host: localhost\n  port: 8080").unwrap();
        assert_eq!(
            value,
            toon!({"server" => {"host" => "localhost", "port" => 8080}})
        );
    }

    #[test]
    fn separator_without_space() {
        assert_eq!(decode("a:1\nb:two").unwrap(), toon!({"a" => 1, "b" => "two"}));
    }

    #[test]
    fn root_table() {
        let value = decode("id,name,role\n1,Alice,admin\n2,Bob,user").unwrap();
        assert_eq!(
            value,
            toon!([
                {"id" => 1, "name" => "Alice", "role" => "admin"},
                {"id" => 2, "name" => "Bob", "role" => "user"}
            ])
        );
    }

    #[test]
    fn nested_table() {
        let value = decode("users:\n  id,name\n  1,Alice\n  2,Bob").unwrap();
        assert_eq!(
            value,
            toon!({"users" => [{"id" => 1, "name" => "Alice"}, {"id" => 2, "name" => "Bob"}]})
        );
    }

    #[test]
    fn table_headers_with_quoted_colons() {
        let value = decode("id,\"a:b\"\n1,2\n3,4").unwrap();
        assert_eq!(
            value,
            toon!([{"id" => 1, "a:b" => 2}, {"id" => 3, "a:b" => 4}])
        );
    }

    #[test]
    fn nested_table_headers_with_quoted_colons() {
        let value = decode("rows:\n  id,\"a:b\"\n  1,2").unwrap();
        assert_eq!(value, toon!({"rows" => [{"id" => 1, "a:b" => 2}]}));
    }

    #[test]
    fn quoted_table_cells_keep_commas() {
        let value = decode("id,name\n1,\"Smith, Jane\"").unwrap();
        assert_eq!(value, toon!([{"id" => 1, "name" => "Smith, Jane"}]));
    }

    #[test]
    fn lists() {
        let value = decode("- 1\n- two\n- null").unwrap();
        assert_eq!(value, toon!([1, "two", null]));
    }

    #[test]
    fn list_item_objects() {
        let value = decode("- id: 3\n  name: Carol").unwrap();
        assert_eq!(value, toon!([{"id" => 3, "name" => "Carol"}]));
    }

    #[test]
    fn bare_marker_opens_nested_container() {
        let value = decode("-\n  - 1\n  - 2\n-\n  - 3").unwrap();
        assert_eq!(value, toon!([[1, 2], [3]]));
    }

    #[test]
    fn bare_marker_without_children_is_empty_object() {
        assert_eq!(decode("-").unwrap(), toon!([{}]));
    }

    #[test]
    fn key_without_children_is_empty_object() {
        assert_eq!(decode("a:").unwrap(), toon!({"a" => {}}));
    }

    #[test]
    fn column_count_mismatch() {
        let err = decode("rows:\n  id,name\n  1,Alice\n  2").unwrap_err();
        assert_eq!(
            err,
            DecodeError::ColumnCountMismatch {
                line: 4,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn row_count_annotation_enforced_short() {
        let err = decode("id,name[3]\n1,Alice").unwrap_err();
        assert_eq!(
            err,
            DecodeError::RowCountMismatch {
                line: 1,
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn row_count_annotation_enforced_long() {
        let err = decode("id,name[1]\n1,Alice\n2,Bob").unwrap_err();
        assert!(matches!(err, DecodeError::RowCountMismatch { line: 3, .. }));
    }

    #[test]
    fn row_count_annotation_exact() {
        let value = decode("id,name[2]\n1,Alice\n2,Bob").unwrap();
        assert_eq!(
            value,
            toon!([{"id" => 1, "name" => "Alice"}, {"id" => 2, "name" => "Bob"}])
        );
    }

    #[test]
    fn duplicate_object_key() {
        let err = decode("a: 1\na: 2").unwrap_err();
        assert_eq!(
            err,
            DecodeError::DuplicateKey {
                line: 2,
                key: "a".to_string()
            }
        );
    }

    #[test]
    fn duplicate_table_column() {
        let err = decode("id,id\n1,2").unwrap_err();
        assert!(matches!(err, DecodeError::DuplicateKey { line: 1, .. }));
    }

    #[test]
    fn tab_indentation_rejected() {
        let err = decode("a:\n\tb: 1").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidIndentation { line: 2, .. }));
    }

    #[test]
    fn misaligned_indent_rejected() {
        let err = decode("a:\n  b: 1\nc:\n   d: 2").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidIndentation { line: 4, .. }));
    }

    #[test]
    fn indentation_jump_rejected() {
        let err = decode("a:\n    b: 1\n  c: 2").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidIndentation { .. }));
    }

    #[test]
    fn indentation_under_scalar_rejected() {
        let err = decode("a: 1\n  b: 2").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidIndentation { line: 2, .. }));
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let err = decode("a: \"never").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedScalar { line: 1, .. }));
    }

    #[test]
    fn crlf_input() {
        let value = decode("a: 1\r\nb: 2\r\n").unwrap();
        assert_eq!(value, toon!({"a" => 1, "b" => 2}));
    }

    #[test]
    fn quoted_keys() {
        let value = decode("\"a:b\": 1\n\"\": 2").unwrap();
        assert_eq!(value, toon!({"a:b" => 1, "" => 2}));
    }

    #[test]
    fn numeric_fidelity() {
        let value = decode("big: 9007199254740993\nhuge: 123456789012345678901234567890").unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(
            object.get("big"),
            Some(&Value::Number(Number::Integer(9007199254740993)))
        );
        match object.get("huge") {
            Some(Value::Number(Number::BigInt(b))) => {
                assert_eq!(b.to_string(), "123456789012345678901234567890");
            }
            other => panic!("expected BigInt, got {:?}", other),
        }
    }

    #[test]
    fn leading_zero_decodes_as_string() {
        assert_eq!(decode("a: 05").unwrap(), toon!({"a" => "05"}));
    }

    #[test]
    fn bare_values_are_lenient() {
        assert_eq!(
            decode("note: a: b, c").unwrap(),
            toon!({"note" => "a: b, c"})
        );
    }

    #[test]
    fn wider_indent_unit() {
        let value = decode("a:\n    b:\n        c: 1").unwrap();
        assert_eq!(value, toon!({"a" => {"b" => {"c" => 1}}}));
    }
}
