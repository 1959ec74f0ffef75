//! Scalar formatting and parsing.
//!
//! Everything that happens within a single token lives here: deciding
//! whether a string can be written bare or needs quotes, escaping and
//! unescaping, the numeric grammar, and quote-aware splitting of
//! comma-separated fields. The encoder and decoder both build on these
//! primitives so the two sides cannot drift apart.
//!
//! Bare strings are the common case and carry no punctuation at all. A
//! string is quoted when leaving it bare would be ambiguous: it is empty,
//! has leading or trailing whitespace, collides with a reserved literal,
//! looks like a number, starts with the list-item marker, or contains a
//! structural character, a quote, a backslash, or a control character.

use crate::{DecodeError, EncodeError, Number, Value};
use num_bigint::BigInt;

/// Returns `true` if `s` matches the numeric grammar
/// `-?digits(.digits)?([eE][+-]?digits)?`, leading zeros included.
///
/// Used for the quoting decision: any string of this shape must be quoted
/// so it cannot be mistaken for a number on the way back in.
pub(crate) fn is_numeric_like(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'-' {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return false;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == b.len()
}

/// Leading-zero integers (`05`) are not valid literals; they decode as
/// strings and therefore must be quoted when encoding.
fn has_leading_zero(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    digits.len() > 1 && digits.starts_with('0') && !digits[1..].starts_with('.')
}

fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s != s.trim() {
        return true;
    }
    if matches!(s, "null" | "true" | "false") {
        return true;
    }
    if is_numeric_like(s) || s.starts_with('-') {
        return true;
    }
    s.chars().any(|c| {
        matches!(c, ':' | ',' | '"' | '\\' | '[' | ']' | '{' | '}') || c.is_control()
    })
}

fn push_escaped(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

/// Renders a string bare when safe, quoted with escapes otherwise.
pub(crate) fn format_string(s: &str) -> String {
    if !needs_quotes(s) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    push_escaped(&mut out, s);
    out.push('"');
    out
}

/// Object keys and table columns quote by the same rules as string values.
pub(crate) fn format_key(key: &str) -> String {
    format_string(key)
}

/// Renders a number: integers without point or exponent, floats with the
/// fewest decimal digits that parse back to the identical value. The
/// formatter stays in plain decimal for moderate magnitudes (`1e10`
/// renders as `10000000000.0`) and switches to exponent notation only at
/// the extremes. NaN and the infinities are unencodable.
pub(crate) fn format_number(number: &Number) -> Result<String, EncodeError> {
    match number {
        Number::Integer(i) => Ok(i.to_string()),
        Number::BigInt(b) => Ok(b.to_string()),
        Number::Float(f) if f.is_finite() => Ok(format!("{:?}", f)),
        Number::Float(f) => Err(EncodeError::UnencodableValue(format!(
            "{} is outside the numeric grammar",
            f
        ))),
    }
}

/// Renders a scalar value as a single token.
pub(crate) fn format_scalar(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(true) => Ok("true".to_string()),
        Value::Bool(false) => Ok("false".to_string()),
        Value::Number(n) => format_number(n),
        Value::String(s) => Ok(format_string(s)),
        Value::Array(_) | Value::Object(_) => Err(EncodeError::UnencodableValue(
            "container in scalar position".to_string(),
        )),
    }
}

/// Parses a numeric literal, or `None` if the token is not one.
///
/// Integer literals outside the i64 range parse exactly as big integers.
/// Decimal and exponent literals parse as f64; a literal that overflows to
/// infinity is not treated as a number (it round-trips as a string, which
/// the encoder quotes).
pub(crate) fn parse_number_token(token: &str) -> Option<Number> {
    if !is_numeric_like(token) || has_leading_zero(token) {
        return None;
    }
    if token.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return match token.parse::<i64>() {
            Ok(i) => Some(Number::Integer(i)),
            Err(_) => token.parse::<BigInt>().ok().map(Number::BigInt),
        };
    }
    match token.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(Number::Float(f)),
        _ => None,
    }
}

/// Parses one scalar token (already trimmed).
///
/// Order of attempts: quoted string, reserved literal, number, bare
/// string. The bare fallback is deliberately lenient — whatever remains on
/// the line is taken literally — because the encoder's quoting rules
/// guarantee its own output never relies on that leniency.
pub(crate) fn parse_scalar(token: &str, line: usize, column: usize) -> Result<Value, DecodeError> {
    if token.starts_with('"') {
        return Ok(Value::String(parse_quoted(token, line, column)?));
    }
    match token {
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Some(number) = parse_number_token(token) {
        return Ok(Value::Number(number));
    }
    Ok(Value::String(token.to_string()))
}

/// Byte index of the closing quote of a token starting with `"`,
/// honoring escape sequences. `None` if the quote is unterminated.
pub(crate) fn find_closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Unescapes the interior of a quoted string (without its quotes).
pub(crate) fn unescape(inner: &str, line: usize, column: usize) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = chars.next().and_then(|c| c.to_digit(16)).ok_or_else(|| {
                        DecodeError::malformed(
                            line,
                            column,
                            "invalid unicode escape (expected 4 hex digits)",
                        )
                    })?;
                    code = code * 16 + digit;
                }
                let decoded = char::from_u32(code).ok_or_else(|| {
                    DecodeError::malformed(line, column, "invalid unicode code point")
                })?;
                out.push(decoded);
            }
            Some(other) => {
                return Err(DecodeError::malformed(
                    line,
                    column,
                    format!("invalid escape sequence: \\{}", other),
                ));
            }
            None => {
                return Err(DecodeError::malformed(
                    line,
                    column,
                    "backslash at end of string",
                ));
            }
        }
    }
    Ok(out)
}

/// Parses a complete quoted token: opening quote, interior, closing quote,
/// nothing after.
pub(crate) fn parse_quoted(token: &str, line: usize, column: usize) -> Result<String, DecodeError> {
    let end = find_closing_quote(token)
        .ok_or_else(|| DecodeError::malformed(line, column, "unterminated string"))?;
    if end != token.len() - 1 {
        return Err(DecodeError::malformed(
            line,
            column,
            "unexpected characters after closing quote",
        ));
    }
    unescape(&token[1..end], line, column)
}

/// Splits a line into comma-separated fields, ignoring commas inside
/// quoted sections. Returns `(byte offset, raw field)` pairs; fields are
/// untrimmed so callers can compute exact column positions.
pub(crate) fn split_fields(content: &str) -> Vec<(usize, &str)> {
    let bytes = content.as_bytes();
    let mut fields = Vec::new();
    let mut start = 0;
    let mut i = 0;
    let mut in_quotes = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quotes => i += 2,
            b'"' => {
                in_quotes = !in_quotes;
                i += 1;
            }
            b',' if !in_quotes => {
                fields.push((start, &content[start..i]));
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    fields.push((start, &content[start..]));
    fields
}

/// Character count before `byte_offset`, for 1-based column reporting.
pub(crate) fn char_col(content: &str, byte_offset: usize) -> usize {
    content[..byte_offset.min(content.len())].chars().count()
}
