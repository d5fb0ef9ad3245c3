// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record-to-tree projection for the detail panel
//!
//! Turns a selected record and its resolved properties into a generic
//! display tree: one node per named field, nested values expanded
//! recursively. Node ids here are minted by the projector, not taken from
//! the model; the counter lives on the projector so concurrent projections
//! stay independent.

use crate::decode::decode;
use ifc_outline_model::{DisplayNode, FieldValue, Property, Record, RecordDetails, RecordId};

/// Display-tree projector with its own id counter
#[derive(Default)]
pub struct TreeProjector {
    next_id: u32,
}

impl TreeProjector {
    /// Create a projector minting ids from 1
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId(self.next_id)
    }

    /// Project a record's named fields, sorted by field name
    pub fn project_record(&mut self, record: &Record) -> Vec<DisplayNode> {
        let mut fields: Vec<_> = record.fields().collect();
        fields.sort_by_key(|(name, _)| *name);

        fields
            .into_iter()
            .map(|(name, value)| DisplayNode {
                id: self.mint(),
                text: name.to_string(),
                children: self.project_value(value),
            })
            .collect()
    }

    /// Project one field value
    ///
    /// Scalars become single leaf nodes, lists concatenate their entries,
    /// embedded records expand into their fields and nulls vanish.
    pub fn project_value(&mut self, value: &FieldValue) -> Vec<DisplayNode> {
        match value {
            FieldValue::Null => Vec::new(),
            FieldValue::Text(s) => vec![self.leaf(decode(s).into_owned())],
            FieldValue::Number(n) => vec![self.leaf(n.to_string())],
            FieldValue::Bool(b) => vec![self.leaf(b.to_string())],
            FieldValue::Enum(e) => vec![self.leaf(e.clone())],
            FieldValue::Ref(r) => match r.as_direct() {
                Some(record) => {
                    let id = self.mint();
                    vec![DisplayNode {
                        id,
                        text: record.class.name().to_string(),
                        children: self.project_record(record),
                    }]
                }
                None => vec![self.leaf(r.id().to_string())],
            },
            FieldValue::List(values) => values
                .iter()
                .flat_map(|v| self.project_value(v))
                .collect(),
        }
    }

    /// Project a record together with its resolved properties
    ///
    /// Field nodes come first; the properties follow under one
    /// `Properties` entry.
    pub fn project_details(&mut self, details: &RecordDetails) -> Vec<DisplayNode> {
        let mut nodes = self.project_record(&details.record);
        if !details.properties.is_empty() {
            let id = self.mint();
            let children = details
                .properties
                .iter()
                .map(|p| self.property_node(p))
                .collect();
            nodes.push(DisplayNode {
                id,
                text: "Properties".to_string(),
                children,
            });
        }
        nodes
    }

    fn property_node(&mut self, property: &Property) -> DisplayNode {
        let id = self.mint();
        let value = match &property.unit {
            Some(unit) => format!("{} {}", property.value, unit),
            None => property.value.clone(),
        };
        DisplayNode {
            id,
            text: property.name.clone(),
            children: vec![self.leaf(value)],
        }
    }

    fn leaf(&mut self, text: String) -> DisplayNode {
        DisplayNode::new(self.mint(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_outline_model::IfcClass;
    use std::sync::Arc;

    #[test]
    fn test_scalar_values() {
        let mut projector = TreeProjector::new();
        assert!(projector.project_value(&FieldValue::Null).is_empty());

        let nodes = projector.project_value(&FieldValue::Number(42.0));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text, "42");
    }

    #[test]
    fn test_record_fields_sorted() {
        let record = Record::new(1, IfcClass::IfcSite)
            .with("Name", "Site")
            .with("Description", "Main plot");

        let nodes = TreeProjector::new().project_record(&record);
        let labels: Vec<&str> = nodes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(labels, vec!["Description", "Name"]);
        assert_eq!(nodes[1].children[0].text, "Site");
    }

    #[test]
    fn test_minted_ids_are_unique_and_reentrant() {
        let record = Record::new(1, IfcClass::IfcSite).with("Name", "Site");

        let first = TreeProjector::new().project_record(&record);
        let second = TreeProjector::new().project_record(&record);

        // Independent projectors mint from the same starting point
        assert_eq!(first, second);
        let mut ids: Vec<u32> = first
            .iter()
            .flat_map(|n| n.iter())
            .map(|n| n.id.0)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_embedded_record_expands() {
        let inner = Record::new(2, IfcClass::IfcBuilding).with("Name", "B");
        let record = Record::new(1, IfcClass::IfcSite).with("Decomposes", inner);

        let nodes = TreeProjector::new().project_record(&record);
        assert_eq!(nodes[0].text, "Decomposes");
        assert_eq!(nodes[0].children[0].text, "IFCBUILDING");
        assert_eq!(nodes[0].children[0].children[0].text, "Name");
    }

    #[test]
    fn test_details_append_properties() {
        let record = Arc::new(Record::new(1, IfcClass::IfcSpace).with("Name", "Room"));
        let details = RecordDetails::new(
            record,
            vec![Property::with_unit("NetArea", "12.5", "m\u{b2}")],
        );

        let nodes = TreeProjector::new().project_details(&details);
        let properties = nodes.last().unwrap();
        assert_eq!(properties.text, "Properties");
        assert_eq!(properties.children[0].text, "NetArea");
        assert_eq!(properties.children[0].children[0].text, "12.5 m\u{b2}");
    }
}
