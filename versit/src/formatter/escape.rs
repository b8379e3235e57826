// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Escaping rules shared by the property encoders.

use std::fmt::Write as _;

/// Whether `c` has to be Quoted-Printable encoded (RFC 1521).
///
/// Covers control characters, the characters that are not safe across
/// gateways (`!"#$@[\]^` and the backtick), `=` itself, and the range from
/// `{` up to U+00FF.
#[must_use]
pub fn should_be_quoted_printable_encoded(c: char) -> bool {
    matches!(
        c,
        '\0'..='\u{1f}'
            | '!'
            | '"'
            | '#'
            | '$'
            | '='
            | '@'
            | '['
            | '\\'
            | ']'
            | '^'
            | '`'
            | '{'..='\u{ff}'
    )
}

/// Quoted-Printable encodes `text`, replacing each character that needs it
/// with `=XX` (uppercase hex).
///
/// Returns `None` if nothing had to be encoded.
#[must_use]
pub fn quoted_printable_encode(text: &str) -> Option<String> {
    if !text.chars().any(should_be_quoted_printable_encoded) {
        return None;
    }

    let mut encoded = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        if should_be_quoted_printable_encoded(c) {
            // infallible when writing to a String
            let _ = write!(encoded, "={:02X}", u32::from(c));
        } else {
            encoded.push(c);
        }
    }
    Some(encoded)
}

/// Prefixes every occurrence of `separator` with a backslash.
#[must_use]
pub fn escape_separator(text: &str, separator: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == separator {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Backslash escapes text for the 3.0 formats: `\`, `;` and `,` get a
/// leading backslash and every line break (CRLF, CR or LF) becomes `\n`.
#[must_use]
pub fn backslash_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' | ';' | ',' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\r' => {
                chars.next_if_eq(&'\n');
                escaped.push_str("\\n");
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Quotes a parameter value if it contains characters that are not allowed
/// in a bare parameter value.
#[must_use]
pub fn quote_if_needed(s: &str) -> String {
    let needs_quoting = s
        .chars()
        .any(|c| c.is_ascii_control() || c == '"' || c == ';' || c == ':' || c == '\\' || c == ',');

    if needs_quoting {
        let s = s.replace('\\', r"\\").replace('"', r#"\""#);
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

/// Maps each byte to the character with the same value (ISO-8859-1), so the
/// bytes can travel through the text path unchanged.
#[must_use]
pub fn bytes_as_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
