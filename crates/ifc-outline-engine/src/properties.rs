// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property resolution
//!
//! Properties reach an entity through two routes: directly, via a
//! defines-by-properties relationship, or indirectly, via a defines-by-type
//! relationship to a shared type entity that owns property sets of its own.
//! Both routes feed one candidate-set list; each candidate then contributes
//! its property or quantity leaves.

use crate::decode::decode;
use crate::relations::{relating_ids, DEFINES_BY_PROPERTIES, DEFINES_BY_TYPE};
use crate::resolve::resolve;
use ifc_outline_model::{
    FieldValue, IfcClass, ModelId, Property, Record, RecordId, RecordStore,
};
use std::sync::Arc;

/// Candidate property-set ids for an entity, direct sources first
///
/// Direct: the relating property definition of every defines-by-properties
/// relationship listing the entity. Via type: for every defines-by-type
/// relationship listing the entity, the property sets the type entity owns
/// in its `HasPropertySets` field.
pub fn property_set_ids(
    store: &dyn RecordStore,
    model: ModelId,
    subject: RecordId,
) -> Vec<RecordId> {
    let mut ids = relating_ids(store, model, &DEFINES_BY_PROPERTIES, subject);

    for type_id in relating_ids(store, model, &DEFINES_BY_TYPE, subject) {
        if let Some(type_record) = store.record(model, type_id, false) {
            ids.extend(type_record.reference_ids("HasPropertySets"));
        }
    }

    ids
}

/// All property and quantity leaf records attached to an entity
///
/// For each candidate set id: a property set emits its `HasProperties`
/// entries, a quantity set its `Quantities` entries, any other class at that
/// id contributes nothing. Entries are handle-resolved; dangling ones are
/// omitted. Order is candidate-id order, then in-set order. Duplicated names
/// across sets are all retained.
pub fn properties_of(
    store: &dyn RecordStore,
    model: ModelId,
    subject: RecordId,
) -> Vec<Arc<Record>> {
    let mut properties = Vec::new();

    for set_id in property_set_ids(store, model, subject) {
        let set = match store.record(model, set_id, false) {
            Some(set) => set,
            None => continue,
        };
        let items_field = match set.class {
            IfcClass::IfcPropertySet => "HasProperties",
            IfcClass::IfcElementQuantity => "Quantities",
            _ => continue,
        };
        for item in set.references(items_field) {
            if let Some(record) = resolve(store, model, item) {
                properties.push(record);
            }
        }
    }

    properties
}

/// Resolved display views of an entity's properties
pub fn resolved_properties(
    store: &dyn RecordStore,
    model: ModelId,
    subject: RecordId,
) -> Vec<Property> {
    properties_of(store, model, subject)
        .iter()
        .filter_map(|record| extract_property(record))
        .collect()
}

/// Extract a display view from one property or quantity leaf record
///
/// Unrecognized leaf classes yield `None` and are skipped.
pub fn extract_property(record: &Record) -> Option<Property> {
    let name = decode(record.text("Name")?).into_owned();

    match record.class {
        IfcClass::IfcPropertySingleValue => {
            let value = format_value(record.field("NominalValue")?);
            Some(Property::new(name, value))
        }
        IfcClass::IfcPropertyEnumeratedValue => {
            let values = record.field("EnumerationValues")?.as_list()?;
            Some(Property::new(name, join_values(values)))
        }
        IfcClass::IfcPropertyListValue => {
            let values = record.field("ListValues")?.as_list()?;
            Some(Property::new(name, join_values(values)))
        }
        IfcClass::IfcPropertyBoundedValue => {
            let upper = record.field("UpperBoundValue").map(format_value);
            let lower = record.field("LowerBoundValue").map(format_value);
            let value = match (lower, upper) {
                (Some(l), Some(u)) => format!("{} - {}", l, u),
                (Some(l), None) => format!(">= {}", l),
                (None, Some(u)) => format!("<= {}", u),
                (None, None) => return None,
            };
            Some(Property::new(name, value))
        }
        IfcClass::IfcQuantityLength => quantity(record, name, "LengthValue", "m"),
        IfcClass::IfcQuantityArea => quantity(record, name, "AreaValue", "m\u{b2}"),
        IfcClass::IfcQuantityVolume => quantity(record, name, "VolumeValue", "m\u{b3}"),
        IfcClass::IfcQuantityCount => quantity(record, name, "CountValue", ""),
        IfcClass::IfcQuantityWeight => quantity(record, name, "WeightValue", "kg"),
        IfcClass::IfcQuantityTime => quantity(record, name, "TimeValue", "s"),
        _ => None,
    }
}

fn quantity(record: &Record, name: String, value_field: &str, unit: &str) -> Option<Property> {
    let value = format_number(record.number(value_field)?);
    if unit.is_empty() {
        Some(Property::new(name, value))
    } else {
        Some(Property::with_unit(name, value, unit))
    }
}

/// Format a field value as a display string
fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => decode(s).into_owned(),
        FieldValue::Number(n) => format_number(*n),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Enum(e) => e.clone(),
        FieldValue::Ref(r) => r.id().to_string(),
        FieldValue::List(values) => join_values(values),
        FieldValue::Null => String::new(),
    }
}

fn join_values(values: &[FieldValue]) -> String {
    values
        .iter()
        .map(format_value)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_number(n: f64) -> String {
    format!("{:.6}", n)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::RelationshipKind;
    use ifc_outline_model::MemoryStore;

    fn defines(id: u32, kind: &RelationshipKind, relating: u32, related: &[u32]) -> Record {
        Record::new(id, kind.class.clone())
            .with(kind.relating_field, RecordId(relating))
            .with(
                kind.related_field,
                FieldValue::id_list(related.iter().copied()),
            )
    }

    fn single_value(id: u32, name: &str, value: &str) -> Record {
        Record::new(id, IfcClass::IfcPropertySingleValue)
            .with("Name", name)
            .with("NominalValue", value)
    }

    /// Entity 5 with a direct set (FireRating) and a type-owned set (Material)
    fn typed_entity_model(store: &mut MemoryStore) -> ModelId {
        store.add_model([
            defines(100, &DEFINES_BY_PROPERTIES, 20, &[5]),
            Record::new(20, IfcClass::IfcPropertySet)
                .with("Name", "Pset_Common")
                .with("HasProperties", FieldValue::id_list([21])),
            single_value(21, "FireRating", "A"),
            defines(101, &DEFINES_BY_TYPE, 9, &[5]),
            Record::new(9, IfcClass::IfcSpaceType)
                .with("HasPropertySets", FieldValue::id_list([10])),
            Record::new(10, IfcClass::IfcPropertySet)
                .with("Name", "Pset_Type")
                .with("HasProperties", FieldValue::id_list([11])),
            single_value(11, "Material", "Concrete"),
        ])
    }

    #[test]
    fn test_direct_precedes_type_sourced() {
        let mut store = MemoryStore::new();
        let model = typed_entity_model(&mut store);

        let names: Vec<String> = resolved_properties(&store, model, RecordId(5))
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["FireRating", "Material"]);
    }

    #[test]
    fn test_candidate_set_ids() {
        let mut store = MemoryStore::new();
        let model = typed_entity_model(&mut store);

        assert_eq!(
            property_set_ids(&store, model, RecordId(5)),
            vec![RecordId(20), RecordId(10)]
        );
        assert!(property_set_ids(&store, model, RecordId(6)).is_empty());
    }

    #[test]
    fn test_unrecognized_set_class_contributes_nothing() {
        let mut store = MemoryStore::new();
        let model = store.add_model([
            defines(100, &DEFINES_BY_PROPERTIES, 20, &[5]),
            // Not a property or quantity set
            Record::new(20, IfcClass::IfcBuilding).with("Name", "oops"),
        ]);

        assert!(properties_of(&store, model, RecordId(5)).is_empty());
    }

    #[test]
    fn test_quantity_set() {
        let mut store = MemoryStore::new();
        let model = store.add_model([
            defines(100, &DEFINES_BY_PROPERTIES, 30, &[5]),
            Record::new(30, IfcClass::IfcElementQuantity)
                .with("Name", "BaseQuantities")
                .with("Quantities", FieldValue::id_list([31, 32])),
            Record::new(31, IfcClass::IfcQuantityArea)
                .with("Name", "NetArea")
                .with("AreaValue", 12.5),
            Record::new(32, IfcClass::IfcQuantityCount)
                .with("Name", "Doors")
                .with("CountValue", 3.0),
        ]);

        let props = resolved_properties(&store, model, RecordId(5));
        assert_eq!(props.len(), 2);
        assert_eq!(props[0], Property::with_unit("NetArea", "12.5", "m\u{b2}"));
        assert_eq!(props[1], Property::new("Doors", "3"));
    }

    #[test]
    fn test_duplicate_names_are_retained() {
        let mut store = MemoryStore::new();
        let model = store.add_model([
            defines(100, &DEFINES_BY_PROPERTIES, 20, &[5]),
            Record::new(20, IfcClass::IfcPropertySet)
                .with("Name", "Direct")
                .with("HasProperties", FieldValue::id_list([21])),
            single_value(21, "FireRating", "A"),
            defines(101, &DEFINES_BY_TYPE, 9, &[5]),
            Record::new(9, IfcClass::IfcSpaceType)
                .with("HasPropertySets", FieldValue::id_list([10])),
            Record::new(10, IfcClass::IfcPropertySet)
                .with("Name", "Typed")
                .with("HasProperties", FieldValue::id_list([11])),
            single_value(11, "FireRating", "B"),
        ]);

        let props = resolved_properties(&store, model, RecordId(5));
        let values: Vec<&str> = props.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["A", "B"]);
    }

    #[test]
    fn test_dangling_property_entry_is_omitted() {
        let mut store = MemoryStore::new();
        let model = store.add_model([
            defines(100, &DEFINES_BY_PROPERTIES, 20, &[5]),
            Record::new(20, IfcClass::IfcPropertySet)
                .with("Name", "Pset")
                .with("HasProperties", FieldValue::id_list([21, 99])),
            single_value(21, "FireRating", "A"),
        ]);

        let props = properties_of(&store, model, RecordId(5));
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].id, RecordId(21));
    }

    #[test]
    fn test_extract_escaped_text() {
        let prop = single_value(1, r"Libell\X2\00E9\X0\", r"Caf\X2\00E9\X0\");
        let view = extract_property(&prop).unwrap();
        assert_eq!(view.name, "Libell\u{e9}");
        assert_eq!(view.value, "Caf\u{e9}");
    }

    #[test]
    fn test_extract_enumerated_and_bounded() {
        let enumerated = Record::new(1, IfcClass::IfcPropertyEnumeratedValue)
            .with("Name", "Acoustic")
            .with(
                "EnumerationValues",
                FieldValue::List(vec!["LOW".into(), "HIGH".into()]),
            );
        assert_eq!(
            extract_property(&enumerated).unwrap().value,
            "LOW, HIGH"
        );

        let bounded = Record::new(2, IfcClass::IfcPropertyBoundedValue)
            .with("Name", "Width")
            .with("LowerBoundValue", 0.2)
            .with("UpperBoundValue", 0.4);
        assert_eq!(extract_property(&bounded).unwrap().value, "0.2 - 0.4");
    }
}
