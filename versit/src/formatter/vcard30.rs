// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property formatting for vCard 3.0, vCard 4.0 and iCalendar 2.0.
//!
//! These formats drop `CHARSET` and Quoted-Printable in favour of backslash
//! escaping, and carry binary values inline.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::codec::UTF_8;
use crate::document::{VersitDocument, VersitType};
use crate::formatter::escape::{backslash_escape, quote_if_needed};
use crate::formatter::{DocumentWriter, FormatOptions};
use crate::keyword::{
    KW_ENCODING, KW_ENCODING_B, KW_ENCODING_BASE64, KW_IMPP, KW_NICKNAME, KW_VALUE,
    KW_VALUE_BINARY, KW_X_IMPP, KW_X_NICKNAME,
};
use crate::parameter::Parameters;
use crate::property::{PropertyValue, ValueType, VersitProperty};

/// Encodes `property` and writes it to the writer.
pub(crate) fn write_property<W: Write>(w: &mut DocumentWriter<'_, W>, property: &VersitProperty) {
    let name = property_name(w.versit_type, &property.name);
    w.write_groups_and_name(&property.groups, name);

    let mut parameters = property.parameters.clone();
    if let PropertyValue::Binary(_) = property.value {
        if w.versit_type == VersitType::ICalendar20 {
            parameters.replace(KW_ENCODING, KW_ENCODING_BASE64);
            parameters.replace(KW_VALUE, KW_VALUE_BINARY);
        } else {
            parameters.replace(KW_ENCODING, KW_ENCODING_B);
        }
    }
    write_parameters(w, &parameters);
    w.formatter.write_text(":");

    match &property.value {
        PropertyValue::Text(value) if property.value_type == ValueType::Preformatted => {
            w.formatter.write_text(value);
        }
        PropertyValue::Text(value) => w.formatter.write_text(&backslash_escape(value)),
        PropertyValue::TextList(values) => {
            let rendered = render_text_list(property, values);
            w.formatter.write_text(&rendered);
        }
        PropertyValue::Binary(bytes) => {
            let encoded = STANDARD.encode(bytes);
            if w.formatter.codec().is_ascii_compatible() {
                w.formatter.write_bytes(encoded.as_bytes());
            } else {
                w.formatter.write_text(&encoded);
            }
        }
        PropertyValue::Document(document) => {
            let rendered = render_document(w.versit_type, document);
            w.formatter.write_text(&backslash_escape(&rendered));
        }
    }
    w.formatter.write_line_break();
}

/// Maps extension names that became standard in vCard 3.0.
fn property_name(versit_type: VersitType, name: &str) -> &str {
    if !versit_type.is_vcard() {
        return name;
    }
    match name {
        KW_X_NICKNAME => KW_NICKNAME,
        KW_X_IMPP => KW_IMPP,
        _ => name,
    }
}

fn render_text_list(property: &VersitProperty, values: &[String]) -> String {
    let separator = match property.value_type {
        ValueType::Compound => ";",
        ValueType::List => ",",
        value_type => {
            tracing::warn!(
                property = %property.name,
                ?value_type,
                "text list value on a property that is neither compound nor list, writing it as a list"
            );
            ","
        }
    };

    values
        .iter()
        .filter(|value| !(value.is_empty() && property.value_type == ValueType::List))
        .map(|value| backslash_escape(value))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Renders an embedded document as unfolded text, ready to be escaped into
/// the value of its parent property.
fn render_document(versit_type: VersitType, document: &VersitDocument) -> String {
    let options = FormatOptions::default().folding(None);
    let mut writer = DocumentWriter::with_options(Vec::new(), &UTF_8, versit_type, options);
    writer.encode_document(document, false);
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Writes the parameters in vCard 3.0 syntax: `;NAME=VALUE1,VALUE2`.
fn write_parameters<W: Write>(w: &mut DocumentWriter<'_, W>, parameters: &Parameters) {
    for (name, values) in parameters.iter_for_output() {
        w.formatter.write_text(";");
        if !name.is_empty() {
            w.formatter.write_text(name);
            w.formatter.write_text("=");
        }
        let values: Vec<_> = values.into_iter().map(quote_if_needed).collect();
        w.formatter.write_text(&values.join(","));
    }
}
