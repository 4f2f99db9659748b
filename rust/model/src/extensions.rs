// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opaque extension attributes carried by envelope objects.
//!
//! Energy and certification metadata travel with a surface as a typed
//! key-value bag. The merge engine never interprets it; it only copies it by
//! value onto whatever surface replaces the original.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A typed value stored in an extension bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    List(Vec<ExtValue>),
    Map(FxHashMap<String, ExtValue>),
}

/// Extension attributes keyed by name (e.g. `"energy"`, `"ph"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extensions(FxHashMap<String, ExtValue>);

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, replacing any existing one.
    pub fn insert(&mut self, key: impl Into<String>, value: ExtValue) -> Option<ExtValue> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&ExtValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExtValue)> {
        self.0.iter()
    }
}
