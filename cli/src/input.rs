// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! TOML description of the documents to write.
//!
//! ```toml
//! [[document]]
//! component = "VCARD"
//! type = "3.0"
//!
//! [[document.property]]
//! name = "FN"
//! value = "John Doe"
//!
//! [[document.property]]
//! name = "TEL"
//! params = { TYPE = ["WORK", "CELL"] }
//! value = "+1 555 0100"
//! ```
//!
//! Every property carries exactly one of `value`, `preformatted`,
//! `compound`, `list`, `base64`, `file` or `document`.

use std::{
    collections::BTreeMap,
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use versit::{VersitDocument, VersitProperty, VersitType};

/// Parses the TOML description in `content`.
///
/// Relative `file` paths are resolved against `base_dir`.
///
/// # Errors
///
/// Returns an error if the TOML is malformed, a property does not carry
/// exactly one value, or a referenced file cannot be read.
pub fn parse_documents(
    content: &str,
    base_dir: &Path,
) -> Result<Vec<VersitDocument>, Box<dyn Error>> {
    let input: InputRaw = toml::from_str(content)?;
    input
        .documents
        .into_iter()
        .map(|document| document.into_document(base_dir))
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputRaw {
    #[serde(default, rename = "document")]
    documents: Vec<DocumentRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentRaw {
    #[serde(default)]
    component: String,

    #[serde(rename = "type")]
    versit_type: Option<String>,

    #[serde(default, rename = "property")]
    properties: Vec<PropertyRaw>,

    #[serde(default, rename = "document")]
    documents: Vec<DocumentRaw>,
}

impl DocumentRaw {
    fn into_document(self, base_dir: &Path) -> Result<VersitDocument, Box<dyn Error>> {
        let mut document = VersitDocument::new(self.component);
        if let Some(versit_type) = self.versit_type {
            let versit_type: VersitType = versit_type
                .parse()
                .map_err(|_| format!("Unknown document type: {versit_type}"))?;
            document = document.with_type(versit_type);
        }
        for property in self.properties {
            document = document.with_property(property.into_property(base_dir)?);
        }
        for sub_document in self.documents {
            document = document.with_sub_document(sub_document.into_document(base_dir)?);
        }
        Ok(document)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyRaw {
    name: String,

    /// Dot-separated group path, e.g. `item1`.
    group: Option<String>,

    #[serde(default)]
    params: BTreeMap<String, ParamValues>,

    value: Option<String>,
    preformatted: Option<String>,
    compound: Option<Vec<String>>,
    list: Option<Vec<String>>,
    base64: Option<String>,
    file: Option<PathBuf>,
    document: Option<DocumentRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ParamValues {
    One(String),
    Many(Vec<String>),
}

impl PropertyRaw {
    fn into_property(self, base_dir: &Path) -> Result<VersitProperty, Box<dyn Error>> {
        let kinds = [
            self.value.is_some(),
            self.preformatted.is_some(),
            self.compound.is_some(),
            self.list.is_some(),
            self.base64.is_some(),
            self.file.is_some(),
            self.document.is_some(),
        ];
        let count = kinds.iter().filter(|&&set| set).count();
        if count != 1 {
            return Err(format!(
                "Property '{}' must have exactly one of value, preformatted, compound, list, base64, file or document, found {count}",
                self.name
            )
            .into());
        }

        let name = self.name;
        let mut property = if let Some(value) = self.value {
            VersitProperty::text(name, value)
        } else if let Some(value) = self.preformatted {
            VersitProperty::preformatted(name, value)
        } else if let Some(values) = self.compound {
            VersitProperty::compound(name, values)
        } else if let Some(values) = self.list {
            VersitProperty::list(name, values)
        } else if let Some(encoded) = self.base64 {
            let data = STANDARD
                .decode(encoded.trim())
                .map_err(|e| format!("Invalid base64 in property '{name}': {e}"))?;
            VersitProperty::binary(name, data)
        } else if let Some(path) = self.file {
            let path = base_dir.join(path);
            let data = fs::read(&path)
                .map_err(|e| format!("Failed to read file at {}: {}", path.display(), e))?;
            VersitProperty::binary(name, data)
        } else if let Some(document) = self.document {
            VersitProperty::document(name, document.into_document(base_dir)?)
        } else {
            return Err(format!("Property '{name}' has no value").into());
        };

        if let Some(group) = self.group {
            for segment in group.split('.').filter(|s| !s.is_empty()) {
                property = property.with_group(segment);
            }
        }
        for (param, values) in self.params {
            match values {
                ParamValues::One(value) => property = property.with_parameter(param, value),
                ParamValues::Many(values) => {
                    for value in values {
                        property = property.with_parameter(param.clone(), value);
                    }
                }
            }
        }
        Ok(property)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use versit::{PropertyValue, ValueType};

    use super::*;

    fn parse(content: &str) -> Result<Vec<VersitDocument>, Box<dyn Error>> {
        parse_documents(content, Path::new("."))
    }

    #[test]
    fn test_parse_card() {
        let documents = parse(
            r#"
[[document]]
component = "VCARD"
type = "2.1"

[[document.property]]
name = "FN"
value = "John Doe"

[[document.property]]
name = "TEL"
group = "home.item1"
params = { TYPE = ["WORK", "CELL"], X-PREF = "1" }
value = "+1 555 0100"

[[document.property]]
name = "N"
compound = ["Doe", "John", ""]
"#,
        )
        .unwrap();

        assert_eq!(documents.len(), 1);
        let card = &documents[0];
        assert_eq!(card.component_type, "VCARD");
        assert_eq!(card.versit_type, Some(VersitType::VCard21));
        assert_eq!(card.properties.len(), 3);

        let tel = &card.properties[1];
        assert_eq!(tel.groups, ["home", "item1"]);
        assert_eq!(tel.parameters.get("TYPE"), ["WORK", "CELL"]);
        assert_eq!(tel.parameters.get("X-PREF"), ["1"]);

        let n = &card.properties[2];
        assert_eq!(n.value_type, ValueType::Compound);
        assert_eq!(
            n.value,
            PropertyValue::TextList(vec!["Doe".into(), "John".into(), String::new()])
        );
    }

    #[test]
    fn test_parse_nested_documents() {
        let documents = parse(
            r#"
[[document]]
component = "VCALENDAR"
type = "ical"

[[document.document]]
component = "VEVENT"

[[document.document.property]]
name = "SUMMARY"
value = "Meeting"

[[document]]
[[document.property]]
name = "AGENT"
document = { component = "VCARD", property = [{ name = "FN", value = "Agent" }] }
"#,
        )
        .unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].sub_documents.len(), 1);
        assert_eq!(documents[0].sub_documents[0].component_type, "VEVENT");
        assert_eq!(documents[1].component_type, "");
        assert_eq!(documents[1].properties[0].value_type, ValueType::Document);
    }

    #[test]
    fn test_parse_binary_values() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("photo.bin"), [0xFF, 0x00, 0x7F]).unwrap();

        let documents = parse_documents(
            r#"
[[document]]
component = "VCARD"

[[document.property]]
name = "PHOTO"
file = "photo.bin"

[[document.property]]
name = "KEY"
base64 = "aGVsbG8="
"#,
            temp_dir.path(),
        )
        .unwrap();

        let properties = &documents[0].properties;
        assert_eq!(properties[0].value, PropertyValue::Binary(vec![0xFF, 0x00, 0x7F]));
        assert_eq!(properties[1].value, PropertyValue::Binary(b"hello".to_vec()));
    }

    #[test]
    fn test_property_needs_exactly_one_value() {
        let none = "[[document]]\n[[document.property]]\nname = \"FN\"\n";
        assert!(parse(none).unwrap_err().to_string().contains("found 0"));

        let two = "[[document]]\n[[document.property]]\nname = \"FN\"\nvalue = \"a\"\nlist = [\"b\"]\n";
        assert!(parse(two).unwrap_err().to_string().contains("found 2"));
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse("[[document]]\ntype = \"9.9\"\n").is_err());
        assert!(parse("[[document]]\ncolour = \"red\"\n").is_err());
        assert!(parse("[[document]]\n[[document.property]]\nname = \"K\"\nbase64 = \"!\"\n").is_err());
        assert!(parse("[[document]]\n[[document.property]]\nname = \"P\"\nfile = \"missing.bin\"\n").is_err());
    }
}
