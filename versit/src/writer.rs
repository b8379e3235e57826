// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Writing batches of versit documents.

use std::io::{self, Write};
use std::string::FromUtf8Error;

use crate::codec::{Codec, Latin1Codec, UTF_8};
use crate::document::{VersitDocument, VersitType};
use crate::formatter::{DocumentWriter, FormatOptions};

/// Error returned by [`VersitWriter`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// Writing a document to the sink failed
    #[error("Failed to write document #{index}")]
    Io {
        /// Position of the failed document in the batch
        index: usize,
        /// The first error reported by the sink
        #[source]
        source: io::Error,
    },

    /// Flushing the sink failed
    #[error("Failed to flush output")]
    Flush(#[source] io::Error),

    /// The formatted output is not valid UTF-8
    #[error("Formatted output is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Writes versit documents to a sink, one encoding session per document.
///
/// # Example
///
/// ```
/// use versit::{VersitDocument, VersitProperty, VersitType, VersitWriter};
///
/// let document = VersitDocument::new("VCARD")
///     .with_type(VersitType::VCard30)
///     .with_property(VersitProperty::text("FN", "John Doe"));
///
/// let mut writer = VersitWriter::new(Vec::new());
/// writer.write_document(&document).unwrap();
/// assert_eq!(
///     writer.into_inner(),
///     b"BEGIN:VCARD\r\nVERSION:3.0\r\nFN:John Doe\r\nEND:VCARD\r\n"
/// );
/// ```
#[derive(Debug)]
pub struct VersitWriter<W: Write> {
    sink: W,
    codec: Option<Box<dyn Codec>>,
    ascii_only: bool,
    default_type: VersitType,
    options: FormatOptions,
}

impl<W: Write> VersitWriter<W> {
    /// Creates a writer that picks a codec for each document's format.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            codec: None,
            ascii_only: false,
            default_type: VersitType::VCard30,
            options: FormatOptions::default(),
        }
    }

    /// Uses `codec` for every document instead of the per-format default.
    #[must_use]
    pub fn with_codec(mut self, codec: Box<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Marks the explicit codec as plain 7-bit ASCII.
    #[must_use]
    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Format used for documents that do not carry their own.
    #[must_use]
    pub fn with_default_type(mut self, versit_type: VersitType) -> Self {
        self.default_type = versit_type;
        self
    }

    /// Sets the formatting options.
    #[must_use]
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Writes every document in order.
    ///
    /// Stops at the first document whose output could not be written.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Io`] with the position of the failed document.
    pub fn write_documents(&mut self, documents: &[VersitDocument]) -> Result<(), WriterError> {
        for (index, document) in documents.iter().enumerate() {
            self.write_at(index, document)?;
        }
        Ok(())
    }

    /// Writes a single document.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Io`] if the sink reported a failure.
    pub fn write_document(&mut self, document: &VersitDocument) -> Result<(), WriterError> {
        self.write_at(0, document)
    }

    /// Flushes the sink.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError::Flush`] if the sink could not be flushed.
    pub fn flush(&mut self) -> Result<(), WriterError> {
        self.sink.flush().map_err(WriterError::Flush)
    }

    /// Consumes the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_at(&mut self, index: usize, document: &VersitDocument) -> Result<(), WriterError> {
        let versit_type = document.versit_type.unwrap_or(self.default_type);

        let (codec, ascii_only): (&dyn Codec, bool) = match (&self.codec, versit_type) {
            (Some(codec), _) => (codec.as_ref(), self.ascii_only),
            (None, VersitType::VCard21) => (&Latin1Codec, true),
            (None, _) => (&UTF_8, false),
        };
        tracing::debug!(index, %versit_type, codec = codec.name(), ascii_only, "writing document");

        let mut writer =
            DocumentWriter::with_options(&mut self.sink, codec, versit_type, self.options)
                .with_ascii_only(ascii_only);
        if writer.encode_document(document, true) {
            return Ok(());
        }

        let source = writer
            .take_error()
            .unwrap_or_else(|| io::Error::other("write failed"));
        tracing::error!(index, error = %source, "failed to write document");
        Err(WriterError::Io { index, source })
    }
}

/// Formats `document` as `versit_type` text with the UTF-8 codec.
///
/// # Errors
///
/// Returns [`WriterError::InvalidUtf8`] if the output is not valid UTF-8.
pub fn format_to_string(
    document: &VersitDocument,
    versit_type: VersitType,
) -> Result<String, WriterError> {
    let mut writer = DocumentWriter::new(Vec::new(), &UTF_8, versit_type);
    if !writer.encode_document(document, true) {
        let source = writer
            .take_error()
            .unwrap_or_else(|| io::Error::other("write failed"));
        return Err(WriterError::Io { index: 0, source });
    }
    Ok(String::from_utf8(writer.into_inner())?)
}
