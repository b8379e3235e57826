// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Versit properties and their values.

use crate::document::VersitDocument;
use crate::parameter::Parameters;

/// How a property value is to be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Plain text, escaped as the format requires.
    #[default]
    Plain,
    /// Text written without backslash escaping.
    Preformatted,
    /// Positional components joined with `;`, e.g. a structured name.
    Compound,
    /// Unordered items joined with `,`.
    List,
    /// Raw bytes, written as Base64.
    Binary,
    /// A nested versit document, e.g. an `AGENT`.
    Document,
}

/// Value held by a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A single text value.
    Text(String),
    /// Several text items, joined according to the [`ValueType`].
    TextList(Vec<String>),
    /// Binary data.
    Binary(Vec<u8>),
    /// An embedded document.
    Document(Box<VersitDocument>),
}

impl Default for PropertyValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// A single property: `[group.]NAME[;PARAM=VALUE]:VALUE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersitProperty {
    /// Group path segments, joined with `.` before the name.
    pub groups: Vec<String>,

    /// Property name, e.g. `FN`.
    pub name: String,

    /// Parameters of the property.
    pub parameters: Parameters,

    /// How the value is rendered.
    pub value_type: ValueType,

    /// The value itself.
    pub value: PropertyValue,
}

impl VersitProperty {
    /// Creates a property holding a plain text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PropertyValue::Text(value.into()),
            value_type: ValueType::Plain,
            ..Self::default()
        }
    }

    /// Creates a property holding text that must not be escaped.
    #[must_use]
    pub fn preformatted(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value_type: ValueType::Preformatted,
            ..Self::text(name, value)
        }
    }

    /// Creates a property holding a compound (`;`-separated) value.
    #[must_use]
    pub fn compound<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value: PropertyValue::TextList(values.into_iter().map(Into::into).collect()),
            value_type: ValueType::Compound,
            ..Self::default()
        }
    }

    /// Creates a property holding a list (`,`-separated) value.
    #[must_use]
    pub fn list<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value_type: ValueType::List,
            ..Self::compound(name, values)
        }
    }

    /// Creates a property holding binary data.
    #[must_use]
    pub fn binary(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: PropertyValue::Binary(value.into()),
            value_type: ValueType::Binary,
            ..Self::default()
        }
    }

    /// Creates a property holding an embedded document.
    #[must_use]
    pub fn document(name: impl Into<String>, document: VersitDocument) -> Self {
        Self {
            name: name.into(),
            value: PropertyValue::Document(Box::new(document)),
            value_type: ValueType::Document,
            ..Self::default()
        }
    }

    /// Appends a group segment.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Adds a parameter value.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name, value);
        self
    }

    /// Overrides the value type.
    #[must_use]
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }
}
