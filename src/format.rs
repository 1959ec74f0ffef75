//! The TOON text format, version 1.
//!
//! This module carries no code; it is the reference description of the
//! wire format the encoder writes and the decoder accepts.
//!
//! # Documents
//!
//! A document is UTF-8 text, lines separated by `\n` (a trailing `\r` on
//! a line is tolerated on input and never written on output). Output
//! carries no trailing newline. Blank lines are insignificant on input.
//! An empty document denotes `null`.
//!
//! # Indentation
//!
//! Nesting depth is expressed with leading spaces; tabs are rejected.
//! The first indented line of a document establishes the indentation
//! unit (two spaces by default on output), and every deeper line must
//! use a whole multiple of it. Depth may grow by at most one level from
//! one line to the next.
//!
//! # Scalars
//!
//! Five scalar spellings:
//!
//! - `null`, `true`, `false` — reserved literals.
//! - Numbers — `-?digits(.digits)?([eE][+-]?digits)?`. Integer literals
//!   of any width keep exact values; decimal and exponent literals are
//!   IEEE 754 doubles. Leading-zero integers such as `05` are not
//!   numbers and decode as strings.
//! - Strings — bare when unambiguous, otherwise double-quoted with the
//!   escapes `\"`, `\\`, `\n`, `\r`, `\t`, `\b`, `\f`, `\0` and
//!   `\uXXXX` for other control characters. A string is quoted when it
//!   is empty, has leading or trailing whitespace, spells a reserved
//!   literal, matches the numeric grammar, starts with `-`, or contains
//!   `: , " \ [ ] { }` or a control character.
//!
//! # Objects
//!
//! One `key: value` line per field, in order. Keys quote by the same
//! rules as strings. A field whose value is a non-empty container writes
//! `key:` and the container block one level deeper. Empty containers are
//! the inline tokens `{}` and `[]`. Duplicate keys are an error.
//!
//! # Arrays
//!
//! Three layouts, chosen per array:
//!
//! - **Table** — when every element is an object with the same keys in
//!   the same order and all field values are scalars: a header line of
//!   comma-joined column keys, then one comma-joined row per element at
//!   the same depth. The header may carry a trailing `[N]` row-count
//!   annotation; when present the body must contain exactly N rows.
//! - **List** — one `- value` item per element; a bare `-` introduces a
//!   nested container one level deeper. An object item inlines its
//!   first field on the marker line when that field's value fits on one
//!   line, with the remaining fields one level deeper.
//! - **Inline** — `[a,b,c]`, scalars only. Written only when the
//!   encoder is configured for it; always accepted on input.
//!
//! # Root forms
//!
//! The root value may be a scalar (a single line), an object, a list,
//! or a table. A multi-line document whose first line is neither a
//! `key:` line nor a list item is read as a root table.
