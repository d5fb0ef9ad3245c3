// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relationship index and children resolution
//!
//! Relationship records link one "relating" anchor to a list of "related"
//! subjects. The functions here filter a full class listing by either side;
//! no index is retained between calls, every query walks the store fresh.

use ifc_outline_model::{IfcClass, ModelId, RecordId, RecordStore};

/// Shape of one relationship class: which fields carry the two sides
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationshipKind {
    /// Class of the relationship records
    pub class: IfcClass,
    /// Field holding the single relating side (parent/owner)
    pub relating_field: &'static str,
    /// Field holding the related-side list (children/subjects)
    pub related_field: &'static str,
}

/// Logical parent -> children composition
pub const AGGREGATES: RelationshipKind = RelationshipKind {
    class: IfcClass::IfcRelAggregates,
    relating_field: "RelatingObject",
    related_field: "RelatedObjects",
};

/// Spatial structure -> contained elements
pub const CONTAINED_IN_STRUCTURE: RelationshipKind = RelationshipKind {
    class: IfcClass::IfcRelContainedInSpatialStructure,
    relating_field: "RelatingStructure",
    related_field: "RelatedElements",
};

/// Subject entities -> property definition
pub const DEFINES_BY_PROPERTIES: RelationshipKind = RelationshipKind {
    class: IfcClass::IfcRelDefinesByProperties,
    relating_field: "RelatingPropertyDefinition",
    related_field: "RelatedObjects",
};

/// Subject entities -> shared type entity
pub const DEFINES_BY_TYPE: RelationshipKind = RelationshipKind {
    class: IfcClass::IfcRelDefinesByType,
    relating_field: "RelatingType",
    related_field: "RelatedObjects",
};

/// Ids related to `anchor` through relationships of `kind`
///
/// Keeps every relationship record whose relating side points at `anchor`
/// (the side may be embedded or indirect, both compare by id) and flattens
/// their related lists into one sequence, record order preserved. A class
/// may contribute several matching records for the same anchor.
pub fn related_ids(
    store: &dyn RecordStore,
    model: ModelId,
    kind: &RelationshipKind,
    anchor: RecordId,
) -> Vec<RecordId> {
    let mut ids = Vec::new();
    for rel in store.records_of_class(model, &kind.class) {
        if rel.reference_id(kind.relating_field) != Some(anchor) {
            continue;
        }
        ids.extend(rel.reference_ids(kind.related_field));
    }
    ids
}

/// Relating-side ids of every `kind` relationship whose related list
/// contains `subject`
///
/// The inverse direction of [`related_ids`], used to walk from a subject
/// entity to its property definitions and type entities.
pub fn relating_ids(
    store: &dyn RecordStore,
    model: ModelId,
    kind: &RelationshipKind,
    subject: RecordId,
) -> Vec<RecordId> {
    let mut ids = Vec::new();
    for rel in store.records_of_class(model, &kind.class) {
        let is_subject = rel
            .reference_ids(kind.related_field)
            .contains(&subject);
        if !is_subject {
            continue;
        }
        if let Some(relating) = rel.reference_id(kind.relating_field) {
            ids.push(relating);
        }
    }
    ids
}

/// All children of an entity: aggregation children first, then spatially
/// contained elements
///
/// Within each group the relationship storage order is preserved. An id
/// appearing in both groups is kept twice; de-duplication is left to the
/// presentation layer.
pub fn children_of(store: &dyn RecordStore, model: ModelId, id: RecordId) -> Vec<RecordId> {
    let mut children = related_ids(store, model, &AGGREGATES, id);
    children.extend(related_ids(store, model, &CONTAINED_IN_STRUCTURE, id));
    children
}
