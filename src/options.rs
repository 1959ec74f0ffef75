//! Encoder configuration.
//!
//! ## Examples
//!
//! ```rust
//! use toon_core::{encode_with_options, toon, EncodeOptions, KeySeparator};
//!
//! let value = toon!({"a" => 1});
//! let options = EncodeOptions::new().with_separator(KeySeparator::Colon);
//! assert_eq!(encode_with_options(&value, &options).unwrap(), "a:1");
//! ```

/// Separator written between a key and its inline value.
///
/// Container-opening lines always end in a bare `:` with the block on the
/// following lines, so the separator style only affects keys whose value
/// fits on the same line. The decoder accepts either style regardless of
/// what the encoder was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeySeparator {
    /// `key: value` (the default).
    #[default]
    ColonSpace,
    /// `key:value`, one character tighter per field.
    Colon,
}

impl KeySeparator {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            KeySeparator::ColonSpace => ": ",
            KeySeparator::Colon => ":",
        }
    }
}

/// Options controlling the encoder's output.
///
/// Options only vary presentation. Decoding the output of any option
/// combination yields the same value tree.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    /// Spaces per indentation level.
    pub indent: usize,
    /// Separator between a key and its inline value.
    pub separator: KeySeparator,
    /// Render arrays of scalars inline as `[a,b,c]` instead of one list
    /// item per line.
    pub inline_arrays: bool,
    /// Append `[N]` row-count annotations to table headers. Decoders
    /// enforce annotated counts exactly.
    pub length_markers: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            separator: KeySeparator::default(),
            inline_arrays: false,
            length_markers: false,
        }
    }
}

impl EncodeOptions {
    /// Creates options with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the key separator style.
    #[must_use]
    pub fn with_separator(mut self, separator: KeySeparator) -> Self {
        self.separator = separator;
        self
    }

    /// Enables or disables inline rendering of scalar arrays.
    #[must_use]
    pub fn with_inline_arrays(mut self, inline: bool) -> Self {
        self.inline_arrays = inline;
        self
    }

    /// Enables or disables `[N]` row-count annotations on table headers.
    #[must_use]
    pub fn with_length_markers(mut self, markers: bool) -> Self {
        self.length_markers = markers;
        self
    }
}
