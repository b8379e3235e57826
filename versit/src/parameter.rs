// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters.
//!
//! Parameters form a multi-map: a name may carry several values. Names are
//! kept sorted so the output order never depends on insertion order, while
//! the values of one name keep the order they were inserted in.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::keyword::{KW_TYPE, KW_TYPE_CELL, KW_TYPE_FAX, KW_TYPE_HOME, KW_TYPE_WORK};

/// Multi-map from parameter name to parameter values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: BTreeMap<String, Vec<String>>,
}

impl Parameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, keeping any value already stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Replaces every value stored under `name` with the single `value`.
    pub fn replace(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), vec![value.into()]);
    }

    /// Values stored under `name`, in insertion order.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.entries.get(name).map_or(&[], Vec::as_slice)
    }

    /// Whether `name` carries exactly the value `value` among its values.
    #[must_use]
    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.get(name).iter().any(|v| v == value)
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the parameter names in sorted order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Iterates in output order: names sorted, `TYPE` values ranked by
    /// [`type_value_rank`].
    pub fn iter_for_output(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.iter().map(|(name, values)| {
            let mut values: Vec<&str> = values.iter().map(String::as_str).collect();
            if name == KW_TYPE {
                sort_type_values(&mut values);
            }
            (name, values)
        })
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Importance of a `TYPE` value: `CELL` and `FAX` first, then `HOME` and
/// `WORK`, then everything else.
///
/// Some parsers only look at the first `TYPE`, so the most specific ones go
/// to the front.
#[must_use]
pub fn type_value_rank(value: &str) -> u8 {
    match value {
        KW_TYPE_CELL | KW_TYPE_FAX => 0,
        KW_TYPE_HOME | KW_TYPE_WORK => 1,
        _ => 2,
    }
}

/// Stable sort of `TYPE` values by [`type_value_rank`].
pub fn sort_type_values(values: &mut [&str]) {
    values.sort_by_key(|v| type_value_rank(v));
}
