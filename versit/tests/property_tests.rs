// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for folding and value encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use proptest::prelude::*;
use versit::formatter::{DocumentWriter, backslash_escape, quoted_printable_encode};
use versit::{Codec, UTF_8, UnicodeCodec, VersitDocument, VersitProperty, VersitType};

fn encode(codec: &dyn Codec, versit_type: VersitType, property: VersitProperty) -> Vec<u8> {
    let document = VersitDocument::new("VCARD").with_property(property);
    let mut writer = DocumentWriter::new(Vec::new(), codec, versit_type);
    assert!(writer.encode_document(&document, false));
    writer.into_inner()
}

/// The property lines between `BEGIN` and `END`.
fn property_text(output: &str) -> &str {
    output
        .strip_prefix("BEGIN:VCARD\r\n")
        .and_then(|s| s.strip_suffix("END:VCARD\r\n"))
        .unwrap()
}

fn decode_utf16le(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).unwrap()
}

proptest! {
    #[test]
    fn prop_plain_text_unfolds_to_value(value in "[a-zA-Z0-9 .]{0,300}") {
        let output = encode(&UTF_8, VersitType::VCard21, VersitProperty::text("NOTE", value.clone()));
        let output = String::from_utf8(output).unwrap();
        let text = property_text(&output);

        for line in text.trim_end_matches("\r\n").split("\r\n") {
            prop_assert!(line.chars().count() <= 76);
        }
        prop_assert_eq!(text.replace("\r\n ", ""), format!("NOTE:{value}\r\n"));
    }

    #[test]
    fn prop_quoted_printable_never_splits_escape(value in "=[a-z=!\t]{0,200}") {
        let output = encode(&UTF_8, VersitType::VCard21, VersitProperty::text("NOTE", value.clone()));
        let output = String::from_utf8(output).unwrap();
        let text = property_text(&output).trim_end_matches("\r\n");

        for line in text.split("\r\n") {
            prop_assert!(line.chars().count() <= 76);
        }

        let (head, encoded) = text.split_once(':').unwrap();
        prop_assert_eq!(head, "NOTE;ENCODING=QUOTED-PRINTABLE");
        let segments: Vec<&str> = encoded.split("=\r\n").collect();
        if let Some((_, broken)) = segments.split_last() {
            for segment in broken {
                let tail: Vec<char> = segment.chars().rev().take(2).collect();
                prop_assert!(!tail.contains(&'='), "escape split after {:?}", segment);
            }
        }
        prop_assert_eq!(encoded.replace("=\r\n", ""), quoted_printable_encode(&value).unwrap());
    }

    #[test]
    fn prop_base64_through_utf16_needs_no_escaping(data in prop::collection::vec(any::<u8>(), 1..200)) {
        let codec = UnicodeCodec::Utf16Le;
        let output = encode(&codec, VersitType::VCard21, VersitProperty::binary("PHOTO", data.clone()));
        let output = decode_utf16le(&output);
        let text = property_text(&output);

        prop_assert!(!text.contains("CHARSET"));
        prop_assert!(!text.contains("QUOTED-PRINTABLE"));

        let (head, body) = text.split_once(":\r\n ").unwrap();
        prop_assert_eq!(head, "PHOTO;ENCODING=BASE64");
        let body = body.trim_end_matches("\r\n").replace("\r\n ", "");
        prop_assert_eq!(body, STANDARD.encode(&data));
    }

    #[test]
    fn prop_backslash_escaped_text_unfolds(value in "[ -~]{0,200}") {
        let output = encode(&UTF_8, VersitType::VCard30, VersitProperty::text("NOTE", value.clone()));
        let output = String::from_utf8(output).unwrap();
        let text = property_text(&output);
        prop_assert_eq!(
            text.replace("\r\n ", ""),
            format!("NOTE:{}\r\n", backslash_escape(&value))
        );
    }
}
