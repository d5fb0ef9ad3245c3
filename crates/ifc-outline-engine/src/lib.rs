// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Outline Engine - Hierarchy and property resolution
//!
//! This crate turns the flat record graph behind a [`RecordStore`] into the
//! two views a model browser needs:
//!
//! - **Display hierarchy** - a rooted tree of id/name/children nodes, built
//!   by combining logical aggregation and spatial containment relationships
//! - **Resolved properties** - the complete property set of an entity,
//!   including properties attached indirectly through a shared type entity
//!
//! plus the legacy escaped-unicode decoding embedded in names and textual
//! property values.
//!
//! The engine is synchronous and stateless: every resolution walks the
//! store fresh, nothing is cached across invocations, and records are never
//! mutated.
//!
//! # Example
//!
//! ```ignore
//! use ifc_outline_engine::load_hierarchy;
//!
//! let (roots, model) = load_hierarchy(&store, &bytes);
//! if model.is_valid() {
//!     for root in &roots {
//!         println!("{}", root.text);
//!     }
//! }
//! ```

pub mod decode;
pub mod hierarchy;
pub mod project;
pub mod properties;
pub mod relations;
pub mod resolve;

pub use decode::{decode, decode_opt};
pub use hierarchy::{build_hierarchy, HierarchyBuilder};
pub use project::TreeProjector;
pub use properties::{extract_property, properties_of, property_set_ids, resolved_properties};
pub use relations::{
    children_of, related_ids, relating_ids, RelationshipKind, AGGREGATES,
    CONTAINED_IN_STRUCTURE, DEFINES_BY_PROPERTIES, DEFINES_BY_TYPE,
};
pub use resolve::resolve;

use ifc_outline_model::{
    DisplayNode, IfcClass, ModelId, RecordDetails, RecordId, RecordStore,
};

/// Open a model and build its display hierarchy
///
/// The root is the model's site record, located by its unique class. Load
/// failure is surfaced as an empty list and [`ModelId::INVALID`] rather than
/// an error, so a host can show a message and keep running; a model without
/// a site record yields an empty list with the valid model id.
pub fn load_hierarchy(store: &dyn RecordStore, bytes: &[u8]) -> (Vec<DisplayNode>, ModelId) {
    let model = match store.open_model(bytes) {
        Ok(model) => model,
        Err(err) => {
            log::warn!("could not load model: {err}");
            return (Vec::new(), ModelId::INVALID);
        }
    };
    log::info!("{model} loaded");

    let site = store.exclusive_record(model, &IfcClass::IfcSite);
    if site.is_none() {
        log::warn!("{model} has no site record");
    }

    let roots = HierarchyBuilder::new(store, model)
        .build(site)
        .into_iter()
        .collect();
    (roots, model)
}

/// Fetch a record together with its resolved properties
///
/// Used when an entity is selected in the hierarchy. Returns `None` for a
/// dangling id.
pub fn load_record_details(
    store: &dyn RecordStore,
    model: ModelId,
    id: RecordId,
) -> Option<RecordDetails> {
    let record = store.record(model, id, true)?;
    let properties = resolved_properties(store, model, id);
    Some(RecordDetails::new(record, properties))
}
