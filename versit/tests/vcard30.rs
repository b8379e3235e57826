// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for vCard 3.0, vCard 4.0 and iCalendar output.

use versit::{VersitDocument, VersitProperty, VersitType, VersitWriter, format_to_string};

#[test]
fn test_format_vcard30() {
    let document = VersitDocument::new("VCARD")
        .with_property(VersitProperty::text("FN", "Doe, John"))
        .with_property(VersitProperty::compound("N", ["Doe", "John", "", "", ""]))
        .with_property(
            VersitProperty::text("TEL", "+1 555 0100")
                .with_parameter("TYPE", "VOICE")
                .with_parameter("TYPE", "WORK"),
        )
        .with_property(VersitProperty::text("X-NICKNAME", "Johnny"))
        .with_property(VersitProperty::text("NOTE", "line one\nline two"));

    assert_eq!(
        format_to_string(&document, VersitType::VCard30).unwrap(),
        "BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Doe\\, John\r\n\
N:Doe;John;;;\r\n\
TEL;TYPE=WORK,VOICE:+1 555 0100\r\n\
NICKNAME:Johnny\r\n\
NOTE:line one\\nline two\r\n\
END:VCARD\r\n"
    );
}

#[test]
fn test_format_icalendar() {
    let event = VersitDocument::new("VEVENT")
        .with_property(VersitProperty::text("UID", "1@example.com"))
        .with_property(VersitProperty::text("SUMMARY", "Review; planning"))
        .with_property(VersitProperty::list("CATEGORIES", ["WORK", "", "MEETING"]))
        .with_property(VersitProperty::binary("ATTACH", b"hi".to_vec()));
    let calendar = VersitDocument::new("VCALENDAR")
        .with_type(VersitType::ICalendar20)
        .with_property(VersitProperty::text("PRODID", "-//versit//EN"))
        .with_sub_document(event);

    let mut writer = VersitWriter::new(Vec::new());
    writer.write_document(&calendar).unwrap();
    let output = String::from_utf8(writer.into_inner()).unwrap();

    assert_eq!(
        output,
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//versit//EN\r\n\
BEGIN:VEVENT\r\n\
UID:1@example.com\r\n\
SUMMARY:Review\\; planning\r\n\
CATEGORIES:WORK,MEETING\r\n\
ATTACH;ENCODING=BASE64;VALUE=BINARY:aGk=\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
    );
}

#[test]
fn test_long_value_is_folded() {
    let value = "word ".repeat(40);
    let document = VersitDocument::new("VCARD").with_property(VersitProperty::text("NOTE", value.clone()));
    let output = format_to_string(&document, VersitType::VCard40).unwrap();

    for line in output.split("\r\n") {
        assert!(line.chars().count() <= 76, "{line:?}");
    }
    assert!(output.replace("\r\n ", "").contains(&format!("NOTE:{value}\r\n")));
}

#[test]
fn test_embedded_agent_is_escaped_text() {
    let agent = VersitDocument::new("VCARD")
        .with_property(VersitProperty::text("FN", "Agent"))
        .with_property(VersitProperty::text("NOTE", "a,b"));
    let document = VersitDocument::new("VCARD").with_property(VersitProperty::document("AGENT", agent));

    let output = format_to_string(&document, VersitType::VCard30).unwrap();
    assert!(output.contains(
        "\r\nAGENT:BEGIN:VCARD\\nFN:Agent\\nNOTE:a\\\\\\,b\\nEND:VCARD\\n\r\n"
    ));
}
