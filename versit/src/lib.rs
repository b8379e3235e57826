// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Write vCard and iCalendar documents in the versit line format.
//!
//! Documents are built from [`VersitDocument`] and [`VersitProperty`] values
//! and written with a [`VersitWriter`], or one at a time with
//! [`formatter::encode_document`]. vCard 2.1 output follows the
//! `CHARSET`/Quoted-Printable rules of that format; vCard 3.0, vCard 4.0 and
//! iCalendar output use backslash escaping.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::module_name_repetitions, clippy::struct_field_names)]

pub mod codec;
pub mod document;
pub mod formatter;
mod keyword;
pub mod parameter;
pub mod property;
pub mod writer;

pub use crate::codec::{
    Codec, Latin1Codec, LegacyCodec, UTF_8, UnicodeCodec, codec_for_label, is_ascii_label,
};
pub use crate::document::{VersitDocument, VersitType};
pub use crate::formatter::{DocumentWriter, FormatOptions, Formatter, Ruleset, encode_document};
pub use crate::parameter::Parameters;
pub use crate::property::{PropertyValue, ValueType, VersitProperty};
pub use crate::writer::{VersitWriter, WriterError, format_to_string};
