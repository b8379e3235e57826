// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Versit documents and the format variants they are written in.

use strum::{Display, EnumString};

use crate::keyword::{KW_VCARD, KW_VERSION_21, KW_VERSION_30, KW_VERSION_40, KW_VERSION_ICAL};
use crate::property::VersitProperty;

/// Format variant of a versit document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum VersitType {
    /// vCard 2.1
    #[strum(to_string = "vCard 2.1", serialize = "2.1", serialize = "vcard21")]
    VCard21,

    /// vCard 3.0 (RFC 2426)
    #[strum(to_string = "vCard 3.0", serialize = "3.0", serialize = "vcard30")]
    VCard30,

    /// vCard 4.0 (RFC 6350)
    #[strum(to_string = "vCard 4.0", serialize = "4.0", serialize = "vcard40")]
    VCard40,

    /// iCalendar 2.0 (RFC 5545)
    #[strum(
        to_string = "iCalendar 2.0",
        serialize = "ical",
        serialize = "icalendar",
        serialize = "2.0"
    )]
    ICalendar20,
}

impl VersitType {
    /// Returns the text printed on the `VERSION` line for this format.
    #[must_use]
    pub const fn version(self) -> &'static str {
        match self {
            Self::VCard21 => KW_VERSION_21,
            Self::VCard30 => KW_VERSION_30,
            Self::VCard40 => KW_VERSION_40,
            Self::ICalendar20 => KW_VERSION_ICAL,
        }
    }

    /// Whether this is one of the contact (vCard) formats.
    #[must_use]
    pub const fn is_vcard(self) -> bool {
        matches!(self, Self::VCard21 | Self::VCard30 | Self::VCard40)
    }
}

/// A versit document: a component holding properties and nested documents.
///
/// Property order is output order, as is the order of the sub-documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersitDocument {
    /// Format the document should be written in; the writer default applies
    /// when unset.
    pub versit_type: Option<VersitType>,

    /// Component type printed on the `BEGIN`/`END` lines, e.g. `VCARD`.
    pub component_type: String,

    /// Properties of the document.
    pub properties: Vec<VersitProperty>,

    /// Nested documents, e.g. the `VEVENT`s of a `VCALENDAR`.
    pub sub_documents: Vec<VersitDocument>,
}

impl VersitDocument {
    /// Creates an empty document with the given component type.
    #[must_use]
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            ..Self::default()
        }
    }

    /// Sets the format of the document.
    #[must_use]
    pub fn with_type(mut self, versit_type: VersitType) -> Self {
        self.versit_type = Some(versit_type);
        self
    }

    /// Appends a property.
    #[must_use]
    pub fn with_property(mut self, property: VersitProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Appends a nested document.
    #[must_use]
    pub fn with_sub_document(mut self, document: VersitDocument) -> Self {
        self.sub_documents.push(document);
        self
    }

    /// Component type to print, falling back to `VCARD` when empty.
    #[must_use]
    pub fn component_or_default(&self) -> &str {
        if self.component_type.is_empty() {
            KW_VCARD
        } else {
            &self.component_type
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versit_type_parse() {
        assert_eq!("2.1".parse::<VersitType>().unwrap(), VersitType::VCard21);
        assert_eq!("vCard30".parse::<VersitType>().unwrap(), VersitType::VCard30);
        assert_eq!("4.0".parse::<VersitType>().unwrap(), VersitType::VCard40);
        assert_eq!("ICAL".parse::<VersitType>().unwrap(), VersitType::ICalendar20);
        assert!("1.0".parse::<VersitType>().is_err());
    }

    #[test]
    fn test_versit_type_version() {
        assert_eq!(VersitType::VCard21.version(), "2.1");
        assert_eq!(VersitType::VCard30.version(), "3.0");
        assert_eq!(VersitType::VCard40.version(), "4.0");
        assert_eq!(VersitType::ICalendar20.version(), "2.0");
        assert_eq!(VersitType::ICalendar20.to_string(), "iCalendar 2.0");
    }

    #[test]
    fn test_component_or_default() {
        assert_eq!(VersitDocument::default().component_or_default(), "VCARD");
        assert_eq!(
            VersitDocument::new("VCALENDAR").component_or_default(),
            "VCALENDAR"
        );
    }
}
