// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords used by the versit formats (RFC 2425, RFC 2426, vCard 2.1).

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";
pub const KW_VERSION: &str = "VERSION";

/// Component type written when a document has none.
pub const KW_VCARD: &str = "VCARD";

// Versions printed on the VERSION line
pub const KW_VERSION_21: &str = "2.1";
pub const KW_VERSION_30: &str = "3.0";
pub const KW_VERSION_40: &str = "4.0";
pub const KW_VERSION_ICAL: &str = "2.0";

// Parameters
pub const KW_CHARSET: &str = "CHARSET";
pub const KW_ENCODING: &str = "ENCODING";
pub const KW_TYPE: &str = "TYPE";
pub const KW_VALUE: &str = "VALUE";

// Parameter values
pub const KW_CHARSET_UTF8: &str = "UTF-8";
pub const KW_ENCODING_BASE64: &str = "BASE64";
pub const KW_ENCODING_B: &str = "b";
pub const KW_ENCODING_QP: &str = "QUOTED-PRINTABLE";
pub const KW_VALUE_BINARY: &str = "BINARY";

pub const KW_TYPE_CELL: &str = "CELL";
pub const KW_TYPE_FAX: &str = "FAX";
pub const KW_TYPE_HOME: &str = "HOME";
pub const KW_TYPE_WORK: &str = "WORK";

// Property names renamed by the 3.0 ruleset
pub const KW_X_NICKNAME: &str = "X-NICKNAME";
pub const KW_NICKNAME: &str = "NICKNAME";
pub const KW_X_IMPP: &str = "X-IMPP";
pub const KW_IMPP: &str = "IMPP";
