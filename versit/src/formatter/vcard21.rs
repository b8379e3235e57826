// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property formatting for vCard 2.1.
//!
//! vCard 2.1 has no backslash escaping of text. Values the codec cannot carry
//! are sent as UTF-8 with a `CHARSET` parameter, unsafe characters are
//! Quoted-Printable encoded, and binary values are Base64 encoded on a line
//! of their own.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::codec::{Codec, UTF_8};
use crate::document::VersitDocument;
use crate::formatter::DocumentWriter;
use crate::formatter::escape::{bytes_as_latin1, escape_separator, quoted_printable_encode};
use crate::keyword::{
    KW_CHARSET, KW_CHARSET_UTF8, KW_ENCODING, KW_ENCODING_BASE64, KW_ENCODING_QP, KW_TYPE,
};
use crate::parameter::Parameters;
use crate::property::{PropertyValue, ValueType, VersitProperty};

/// A property value after charset selection and escaping.
enum RenderedValue<'a> {
    Text(String),
    Base64(Base64Body),
    Document(&'a VersitDocument),
}

enum Base64Body {
    /// Base64 bytes written as they are; the codec is ASCII-compatible.
    Raw(Vec<u8>),
    /// Base64 text that still has to go through the codec.
    Text(String),
}

/// Encodes `property` and writes it to the writer.
pub(crate) fn write_property<W: Write>(w: &mut DocumentWriter<'_, W>, property: &VersitProperty) {
    w.write_groups_and_name(&property.groups, &property.name);

    let mut parameters = property.parameters.clone();
    let rendered = match &property.value {
        PropertyValue::TextList(values) => RenderedValue::Text(render_text_list(
            w,
            &mut parameters,
            property,
            values,
        )),
        PropertyValue::Text(value) => {
            RenderedValue::Text(encode_value(w, &mut parameters, value, false))
        }
        PropertyValue::Binary(bytes) => {
            parameters.replace(KW_ENCODING, KW_ENCODING_BASE64);
            let encoded = STANDARD.encode(bytes);
            if w.formatter.codec().is_ascii_compatible() {
                RenderedValue::Base64(Base64Body::Raw(encoded.into_bytes()))
            } else {
                RenderedValue::Base64(Base64Body::Text(encoded))
            }
        }
        PropertyValue::Document(document) => RenderedValue::Document(document),
    };

    write_parameters(w, &parameters);

    w.formatter.write_text(":");
    match rendered {
        RenderedValue::Document(document) => {
            w.formatter.write_line_break();
            w.write_document(document, false);
        }
        RenderedValue::Text(text) => {
            // Some devices cannot unfold quoted-printable values, so those
            // use soft line breaks instead of whitespace folding.
            if parameters.contains(KW_ENCODING, KW_ENCODING_QP) {
                w.formatter.write_quoted_printable_text(&text);
            } else {
                w.formatter.write_text(&text);
            }
        }
        RenderedValue::Base64(body) => {
            // vCard 2.1 wants the value folded onto its own line and an
            // extra line break after it
            w.formatter.write_line_break();
            w.formatter.write_text(" ");
            match body {
                Base64Body::Raw(bytes) => w.formatter.write_bytes(&bytes),
                Base64Body::Text(text) => w.formatter.write_text(&text),
            }
            w.formatter.write_line_break();
        }
    }
    w.formatter.write_line_break();
}

/// Joins the items of a compound or list value.
///
/// Either every item is sent as UTF-8 or none is, so the value carries a
/// single `CHARSET`.
fn render_text_list<W: Write>(
    w: &DocumentWriter<'_, W>,
    parameters: &mut Parameters,
    property: &VersitProperty,
    values: &[String],
) -> String {
    let separator = match property.value_type {
        ValueType::Compound => ';',
        ValueType::List => ',',
        value_type => {
            tracing::warn!(
                property = %property.name,
                ?value_type,
                "text list value on a property that is neither compound nor list, writing it as a list"
            );
            ','
        }
    };

    let force_utf8 = values.iter().any(|value| requires_utf8(w, value));

    let mut rendered = String::new();
    let mut first = true;
    for value in values {
        if value.is_empty() && property.value_type == ValueType::List {
            continue;
        }
        let encoded = encode_value(w, parameters, value, force_utf8);
        if !first {
            rendered.push(separator);
        }
        rendered.push_str(&escape_separator(&encoded, separator));
        first = false;
    }
    rendered
}

/// Whether `value` cannot be written with the session codec as it is.
fn requires_utf8<W: Write>(w: &DocumentWriter<'_, W>, value: &str) -> bool {
    !w.formatter.codec().can_encode(value) || (w.ascii_only && !value.is_ascii())
}

/// Applies the charset and Quoted-Printable rules to a text value, updating
/// `CHARSET` and `ENCODING` to match.
fn encode_value<W: Write>(
    w: &DocumentWriter<'_, W>,
    parameters: &mut Parameters,
    value: &str,
    force_utf8: bool,
) -> String {
    let value = if force_utf8 || requires_utf8(w, value) {
        parameters.replace(KW_CHARSET, KW_CHARSET_UTF8);
        bytes_as_latin1(&UTF_8.encode(value))
    } else {
        value.to_string()
    };

    match quoted_printable_encode(&value) {
        Some(encoded) => {
            parameters.replace(KW_ENCODING, KW_ENCODING_QP);
            encoded
        }
        None => value,
    }
}

/// Writes the parameters in vCard 2.1 syntax: `;NAME=VALUE`, with `TYPE`
/// values written bare as `;VALUE`.
fn write_parameters<W: Write>(w: &mut DocumentWriter<'_, W>, parameters: &Parameters) {
    for (name, values) in parameters.iter_for_output() {
        for value in values {
            w.formatter.write_text(";");
            if !name.is_empty() && name != KW_TYPE {
                w.formatter.write_text(name);
                w.formatter.write_text("=");
            }
            w.formatter.write_text(value);
        }
    }
}
