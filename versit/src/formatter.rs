// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Versit formatter module.
//!
//! This module writes versit documents in the line-folded text format of
//! RFC 2425 to any `std::io::Write` implementer. The [`Formatter`] owns the
//! folding state; the [`DocumentWriter`] walks a document and applies the
//! property rules of the target format.
//!
//! # Example
//!
//! ```
//! use versit::codec::UTF_8;
//! use versit::formatter::encode_document;
//! use versit::{VersitDocument, VersitProperty, VersitType};
//!
//! let document = VersitDocument::new("VCARD")
//!     .with_property(VersitProperty::text("FN", "John Doe"));
//!
//! let mut buffer = Vec::new();
//! assert!(encode_document(&mut buffer, &UTF_8, VersitType::VCard21, &document));
//! assert_eq!(
//!     String::from_utf8(buffer).unwrap(),
//!     "BEGIN:VCARD\r\nVERSION:2.1\r\nFN:John Doe\r\nEND:VCARD\r\n"
//! );
//! ```

mod document;
mod escape;
mod vcard21;
mod vcard30;

use std::io::{self, Write};

use crate::codec::Codec;
use crate::document::{VersitDocument, VersitType};

pub use crate::formatter::document::{DocumentWriter, Ruleset};
pub use crate::formatter::escape::{
    backslash_escape, quote_if_needed, quoted_printable_encode, should_be_quoted_printable_encoded,
};

/// Maximum length of a physical line, in characters for text and in bytes
/// for raw payloads.
pub const MAX_LINE_LENGTH: usize = 76;

/// Smallest accepted folding width; the Quoted-Printable fold may back off by
/// two characters and still has to make progress.
const MIN_LINE_LENGTH: usize = 4;

/// Continuation sequence of a plain fold.
const FOLD: &str = "\r\n ";

/// Quoted-Printable soft line break.
const SOFT_BREAK: &str = "=\r\n";

const CRLF: &str = "\r\n";

/// Encodes a single document, with a `VERSION` line, to `sink`.
///
/// Returns `true` if every write to the sink succeeded.
pub fn encode_document<W: Write>(
    sink: W,
    codec: &dyn Codec,
    versit_type: VersitType,
    document: &VersitDocument,
) -> bool {
    DocumentWriter::new(sink, codec, versit_type).encode_document(document, true)
}

/// Formatting options for the versit formatter.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Maximum line length before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n characters
    ///
    /// Default: `Some(76)`.
    pub folding: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(MAX_LINE_LENGTH),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    fn max_line_length(self) -> Option<usize> {
        self.folding.map(|n| n.max(MIN_LINE_LENGTH))
    }
}

/// Line-folding writer.
///
/// Text is encoded with the session codec and folded with CRLF + SPACE once a
/// line would grow past the maximum length. The current line length is kept
/// across calls, so one logical line may be written in many pieces.
///
/// Sink failures do not stop the formatter: the failure is remembered, later
/// writes are still attempted so the line bookkeeping stays consistent, and
/// [`Formatter::is_successful`] reports the outcome.
#[derive(Debug)]
pub struct Formatter<'c, W: Write> {
    /// The underlying writer.
    writer: W,
    /// Codec used for all text output.
    codec: &'c dyn Codec,
    /// Formatting options.
    options: FormatOptions,
    /// Current line length (excluding the pending CRLF).
    line_length: usize,
    /// Whether the codec's byte order mark still has to be written.
    bom_pending: bool,
    /// Sticky success flag.
    successful: bool,
    /// First error reported by the sink.
    error: Option<io::Error>,
}

impl<'c, W: Write> Formatter<'c, W> {
    /// Create a new formatter with default options.
    #[must_use]
    pub fn new(writer: W, codec: &'c dyn Codec) -> Self {
        Self::with_options(writer, codec, FormatOptions::default())
    }

    /// Create a new formatter with options.
    #[must_use]
    pub fn with_options(writer: W, codec: &'c dyn Codec, options: FormatOptions) -> Self {
        Self {
            writer,
            codec,
            options,
            line_length: 0,
            bom_pending: true,
            successful: true,
            error: None,
        }
    }

    /// Get a reference to the underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// The codec text is written with.
    #[must_use]
    pub fn codec(&self) -> &'c dyn Codec {
        self.codec
    }

    /// Length of the current, unterminated line.
    #[must_use]
    pub fn line_length(&self) -> usize {
        self.line_length
    }

    /// Whether every write so far has succeeded.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.successful
    }

    /// Takes the first error reported by the sink, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Writes `value`, folding with CRLF + SPACE as needed.
    pub fn write_text(&mut self, value: &str) {
        let Some(max_len) = self.options.max_line_length() else {
            self.put_text(value);
            self.line_length += value.chars().count();
            return;
        };

        let mut remaining = value;
        let mut remaining_len = remaining.chars().count();
        let mut space_remaining = max_len.saturating_sub(self.line_length);
        while space_remaining < remaining_len {
            let (line, rest) = split_at_char(remaining, space_remaining);
            self.put_text(line);
            self.put_text(FOLD);
            remaining = rest;
            remaining_len -= space_remaining;
            space_remaining = max_len - 1; // minus 1 for the leading space
            self.line_length = 1;
        }

        self.put_text(remaining);
        self.line_length += remaining_len;
    }

    /// Writes pre-encoded bytes, folding with CRLF + SPACE as needed.
    ///
    /// The bytes bypass the codec, so this is only meant for ASCII-compatible
    /// codecs.
    pub fn write_bytes(&mut self, value: &[u8]) {
        let Some(max_len) = self.options.max_line_length() else {
            self.put(value);
            self.line_length += value.len();
            return;
        };

        let mut remaining = value;
        let mut space_remaining = max_len.saturating_sub(self.line_length);
        while space_remaining < remaining.len() {
            let (line, rest) = remaining.split_at(space_remaining);
            self.put(line);
            self.put(FOLD.as_bytes());
            remaining = rest;
            space_remaining = max_len - 1; // minus 1 for the leading space
            self.line_length = 1;
        }

        self.put(remaining);
        self.line_length += remaining.len();
    }

    /// Writes Quoted-Printable text, folding with `=` CRLF soft line breaks
    /// (RFC 2045).
    ///
    /// One column is kept free for the trailing `=`, and a break never lands
    /// inside an `=XX` escape.
    #[expect(clippy::indexing_slicing)]
    pub fn write_quoted_printable_text(&mut self, value: &str) {
        let Some(max_len) = self.options.max_line_length() else {
            self.put_text(value);
            self.line_length += value.chars().count();
            return;
        };

        let chars: Vec<char> = value.chars().collect();
        let offsets: Vec<usize> = value
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(value.len()))
            .collect();

        // no room left for even a lone `=`, so start on a continuation line
        if !value.is_empty() && self.line_length + 1 > max_len {
            self.put_text(FOLD);
            self.line_length = 1;
        }

        let mut chars_written = 0;
        // minus 1 for the equals required at the end
        let mut space_remaining = max_len.saturating_sub(self.line_length + 1);
        while space_remaining < chars.len() - chars_written {
            if space_remaining >= 2 && chars[chars_written + space_remaining - 2] == '=' {
                space_remaining -= 2;
            } else if space_remaining >= 1 && chars[chars_written + space_remaining - 1] == '=' {
                space_remaining -= 1;
            }

            let end = chars_written + space_remaining;
            self.put_text(&value[offsets[chars_written]..offsets[end]]);
            self.put_text(SOFT_BREAK);
            chars_written = end;
            space_remaining = max_len - 1;
            self.line_length = 0;
        }

        self.put_text(&value[offsets[chars_written]..]);
        self.line_length += chars.len() - chars_written;
    }

    /// Write a CRLF line ending.
    ///
    /// Unlike writing `"\r\n"` as text, this never folds and lets the
    /// formatter know a new line starts.
    pub fn write_line_break(&mut self) {
        self.put_text(CRLF);
        self.line_length = 0;
    }

    fn put_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let bytes = self.codec.encode(text);
        self.put(&bytes);
    }

    fn put(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if self.bom_pending {
            self.bom_pending = false;
            let bom = self.codec.byte_order_mark();
            if !bom.is_empty() {
                let result = self.writer.write_all(bom);
                self.record(result);
            }
        }
        let result = self.writer.write_all(bytes);
        self.record(result);
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            if self.successful {
                tracing::warn!(%err, "write to sink failed, output will be incomplete");
            }
            self.successful = false;
            if self.error.is_none() {
                self.error = Some(err);
            }
        }
    }
}

/// Splits `s` after `n` characters.
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((i, _)) => s.split_at(i),
        None => (s, ""),
    }
}
