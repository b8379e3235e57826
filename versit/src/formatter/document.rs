// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Document formatting: `BEGIN`, `VERSION`, properties, nested documents,
//! `END`.

use std::io::{self, Write};

use crate::codec::Codec;
use crate::document::{VersitDocument, VersitType};
use crate::formatter::{FormatOptions, Formatter, vcard21, vcard30};
use crate::keyword::{KW_BEGIN, KW_END, KW_VERSION};
use crate::property::VersitProperty;

/// Property encoding rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ruleset {
    /// vCard 2.1: `CHARSET`, Quoted-Printable and bare `TYPE` values.
    VCard21,
    /// vCard 3.0 and later, and iCalendar: backslash escaping.
    VCard30,
}

impl From<VersitType> for Ruleset {
    fn from(versit_type: VersitType) -> Self {
        match versit_type {
            VersitType::VCard21 => Self::VCard21,
            VersitType::VCard30 | VersitType::VCard40 | VersitType::ICalendar20 => Self::VCard30,
        }
    }
}

/// Writes one versit document to a sink.
///
/// A writer is a single-use session: it keeps the folding state and the
/// success flag of one top-level encode. Create a new one for every
/// independent document.
#[derive(Debug)]
pub struct DocumentWriter<'c, W: Write> {
    pub(crate) formatter: Formatter<'c, W>,
    pub(crate) versit_type: VersitType,
    pub(crate) ascii_only: bool,
}

impl<'c, W: Write> DocumentWriter<'c, W> {
    /// Creates a writer for `versit_type` documents.
    #[must_use]
    pub fn new(sink: W, codec: &'c dyn Codec, versit_type: VersitType) -> Self {
        Self::with_options(sink, codec, versit_type, FormatOptions::default())
    }

    /// Creates a writer with formatting options.
    #[must_use]
    pub fn with_options(
        sink: W,
        codec: &'c dyn Codec,
        versit_type: VersitType,
        options: FormatOptions,
    ) -> Self {
        Self {
            formatter: Formatter::with_options(sink, codec, options),
            versit_type,
            ascii_only: false,
        }
    }

    /// Marks the codec as plain 7-bit ASCII. Any non-ASCII value is then
    /// written as UTF-8 with a `CHARSET` parameter (vCard 2.1 only).
    #[must_use]
    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Format the writer was created for.
    #[must_use]
    pub fn versit_type(&self) -> VersitType {
        self.versit_type
    }

    /// The ruleset used for properties.
    #[must_use]
    pub fn ruleset(&self) -> Ruleset {
        self.versit_type.into()
    }

    /// Whether every write so far has succeeded.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.formatter.is_successful()
    }

    /// Takes the first error reported by the sink, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.formatter.take_error()
    }

    /// Consumes the writer, returning the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.formatter.into_writer()
    }

    /// Encodes `document` and writes it to the sink. A `VERSION` line is
    /// added iff `encode_version` is true.
    ///
    /// The whole document is always walked, even after a write failed.
    /// Returns `true` if every write succeeded.
    pub fn encode_document(&mut self, document: &VersitDocument, encode_version: bool) -> bool {
        tracing::debug!(
            component = document.component_or_default(),
            versit_type = %self.versit_type,
            "encoding versit document"
        );
        self.write_document(document, encode_version);
        self.formatter.is_successful()
    }

    pub(crate) fn write_document(&mut self, document: &VersitDocument, encode_version: bool) {
        let name = document.component_or_default();
        self.with_block(name, |w| {
            if encode_version {
                w.formatter.write_text(KW_VERSION);
                w.formatter.write_text(":");
                w.formatter.write_text(w.versit_type.version());
                w.formatter.write_line_break();
            }

            for property in &document.properties {
                w.write_property(property);
            }

            // nested documents never repeat the version
            for sub_document in &document.sub_documents {
                w.write_document(sub_document, false);
            }
        });
    }

    fn write_property(&mut self, property: &VersitProperty) {
        match self.ruleset() {
            Ruleset::VCard21 => vcard21::write_property(self, property),
            Ruleset::VCard30 => vcard30::write_property(self, property),
        }
    }

    /// Writes the group path and `name`, e.g. `item1.TEL`.
    pub(crate) fn write_groups_and_name(&mut self, groups: &[String], name: &str) {
        if !groups.is_empty() {
            self.formatter.write_text(&groups.join("."));
            self.formatter.write_text(".");
        }
        self.formatter.write_text(name);
    }

    fn with_block<F: FnOnce(&mut Self)>(&mut self, name: &str, write_content: F) {
        self.formatter.write_text(KW_BEGIN);
        self.formatter.write_text(":");
        self.formatter.write_text(name);
        self.formatter.write_line_break();

        write_content(self);

        self.formatter.write_text(KW_END);
        self.formatter.write_text(":");
        self.formatter.write_text(name);
        self.formatter.write_line_break();
    }
}
