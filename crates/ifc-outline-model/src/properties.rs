// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property views attached to resolved records

use crate::Record;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single resolved property with optional unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name
    pub name: String,
    /// Property value as formatted string
    pub value: String,
    /// Unit of measurement (if applicable)
    pub unit: Option<String>,
}

impl Property {
    /// Create a new property
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: None,
        }
    }

    /// Create a property with unit
    pub fn with_unit(
        name: impl Into<String>,
        value: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: Some(unit.into()),
        }
    }
}

/// A record together with its resolved properties
///
/// Built functionally by the engine when a record is selected; the underlying
/// record is never mutated.
#[derive(Clone, Debug)]
pub struct RecordDetails {
    /// The selected record
    pub record: Arc<Record>,
    /// Properties attached directly or via the record's type
    pub properties: Vec<Property>,
}

impl RecordDetails {
    /// Create details for a record
    pub fn new(record: Arc<Record>, properties: Vec<Property>) -> Self {
        Self { record, properties }
    }

    /// Get a property by name
    ///
    /// When the same name was contributed both directly and via type, the
    /// first (direct-source) entry wins here; all entries remain in
    /// [`RecordDetails::properties`].
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}
