// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Character codecs used to turn text into output bytes.
//!
//! The writer only needs to know whether a codec can represent some text,
//! how to encode it, and a name to tell the Unicode multi-byte families
//! apart. Legacy charset tables come from `encoding_rs`; ISO-8859-1 and the
//! UTF-16 and UTF-32 families, which `encoding_rs` does not encode to, are
//! implemented here.

use std::fmt;

use encoding_rs::Encoding;

/// A named character codec.
pub trait Codec: fmt::Debug {
    /// Canonical name of the codec, e.g. `UTF-8` or `windows-1252`.
    fn name(&self) -> &str;

    /// Whether every character of `text` can be represented.
    fn can_encode(&self, text: &str) -> bool;

    /// Encodes `text`. Characters that cannot be represented are replaced in
    /// a codec-specific way.
    fn encode(&self, text: &str) -> Vec<u8>;

    /// Byte order mark written once at the start of the output.
    fn byte_order_mark(&self) -> &'static [u8] {
        &[]
    }

    /// Whether ASCII characters are encoded as the same single bytes as in
    /// ASCII. This is false only for the UTF-16 and UTF-32 families.
    fn is_ascii_compatible(&self) -> bool {
        let name = self.name().to_ascii_uppercase();
        !(name.starts_with("UTF-16") || name.starts_with("UTF-32"))
    }
}

/// The Unicode encoding forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnicodeCodec {
    /// UTF-8, without byte order mark.
    Utf8,
    /// UTF-16, big endian, with byte order mark.
    Utf16,
    /// UTF-16 little endian, no byte order mark.
    Utf16Le,
    /// UTF-16 big endian, no byte order mark.
    Utf16Be,
    /// UTF-32, big endian, with byte order mark.
    Utf32,
    /// UTF-32 little endian, no byte order mark.
    Utf32Le,
    /// UTF-32 big endian, no byte order mark.
    Utf32Be,
}

/// Shared UTF-8 codec, used whenever a value is forced to `CHARSET=UTF-8`.
pub static UTF_8: UnicodeCodec = UnicodeCodec::Utf8;

impl Codec for UnicodeCodec {
    fn name(&self) -> &str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf32 => "UTF-32",
            Self::Utf32Le => "UTF-32LE",
            Self::Utf32Be => "UTF-32BE",
        }
    }

    fn can_encode(&self, _text: &str) -> bool {
        true
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16 | Self::Utf16Be => {
                text.encode_utf16().flat_map(u16::to_be_bytes).collect()
            }
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf32 | Self::Utf32Be => text
                .chars()
                .flat_map(|c| u32::from(c).to_be_bytes())
                .collect(),
            Self::Utf32Le => text
                .chars()
                .flat_map(|c| u32::from(c).to_le_bytes())
                .collect(),
        }
    }

    fn byte_order_mark(&self) -> &'static [u8] {
        match self {
            Self::Utf16 => &[0xFE, 0xFF],
            Self::Utf32 => &[0x00, 0x00, 0xFE, 0xFF],
            _ => &[],
        }
    }
}

/// A single- or multi-byte legacy charset backed by `encoding_rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyCodec {
    encoding: &'static Encoding,
}

impl LegacyCodec {
    /// Wraps an `encoding_rs` encoding.
    ///
    /// Returns `None` for encodings `encoding_rs` cannot encode into, namely
    /// UTF-16 and the replacement encoding.
    #[must_use]
    pub fn new(encoding: &'static Encoding) -> Option<Self> {
        (encoding.output_encoding() == encoding).then_some(Self { encoding })
    }

}

impl Codec for LegacyCodec {
    fn name(&self) -> &str {
        self.encoding.name()
    }

    fn can_encode(&self, text: &str) -> bool {
        let (_, _, had_unmappable) = self.encoding.encode(text);
        !had_unmappable
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        self.encoding.encode(text).0.into_owned()
    }
}

/// ISO-8859-1: every code point up to U+00FF as a single byte.
///
/// `encoding_rs` maps this label to windows-1252, which also accepts
/// characters such as `€`, so it is kept separate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Latin1Codec;

impl Codec for Latin1Codec {
    fn name(&self) -> &str {
        "ISO-8859-1"
    }

    fn can_encode(&self, text: &str) -> bool {
        text.chars().all(|c| u32::from(c) <= 0xFF)
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|c| u8::try_from(c).unwrap_or(b'?'))
            .collect()
    }
}

/// Looks up a codec by charset label, e.g. `utf-8`, `UTF-16LE`, `latin1`,
/// `Shift_JIS`.
#[must_use]
pub fn codec_for_label(label: &str) -> Option<Box<dyn Codec>> {
    let normalized = label.trim().to_ascii_uppercase();
    let unicode = match normalized.as_str() {
        "UTF-8" | "UTF8" => Some(UnicodeCodec::Utf8),
        "UTF-16" | "UTF16" => Some(UnicodeCodec::Utf16),
        "UTF-16LE" => Some(UnicodeCodec::Utf16Le),
        "UTF-16BE" => Some(UnicodeCodec::Utf16Be),
        "UTF-32" | "UTF32" => Some(UnicodeCodec::Utf32),
        "UTF-32LE" => Some(UnicodeCodec::Utf32Le),
        "UTF-32BE" => Some(UnicodeCodec::Utf32Be),
        _ => None,
    };
    if let Some(codec) = unicode {
        return Some(Box::new(codec));
    }
    if matches!(
        normalized.as_str(),
        "ISO-8859-1" | "ISO8859-1" | "ISO_8859-1" | "LATIN1" | "L1" | "CP819" | "IBM819"
    ) {
        return Some(Box::new(Latin1Codec));
    }

    let encoding = Encoding::for_label(normalized.as_bytes())?;
    let codec: Box<dyn Codec> = Box::new(LegacyCodec::new(encoding)?);
    Some(codec)
}

/// Whether `label` names plain 7-bit ASCII.
///
/// Charset tables treat these labels as windows-1252, so the writer has to be
/// told separately that only ASCII is acceptable.
#[must_use]
pub fn is_ascii_label(label: &str) -> bool {
    matches!(
        label.trim().to_ascii_uppercase().as_str(),
        "ASCII" | "US-ASCII" | "ANSI_X3.4-1968" | "ISO646-US" | "US"
    )
}
