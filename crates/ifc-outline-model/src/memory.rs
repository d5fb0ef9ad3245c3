// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory record store
//!
//! Reference `RecordStore` implementation backed by plain maps. Models are
//! staged up front; `open_model` then hands them out in staging order. Used
//! as the test fixture throughout the workspace.

use crate::{IfcClass, ModelId, OutlineError, Record, RecordId, RecordStore, Result};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One staged model's records and class index
#[derive(Default)]
struct ModelData {
    /// Record id -> record
    records: FxHashMap<u32, Arc<Record>>,
    /// Class -> record ids, in insertion order
    class_index: FxHashMap<IfcClass, Vec<RecordId>>,
}

/// In-memory `RecordStore` implementation
///
/// # Example
///
/// ```ignore
/// use ifc_outline_model::{MemoryStore, Record, IfcClass};
///
/// let mut store = MemoryStore::new();
/// let model = store.add_model([Record::new(1, IfcClass::IfcSite).with("Name", "Site")]);
/// assert!(store.record(model, 1.into(), false).is_some());
/// ```
#[derive(Default)]
pub struct MemoryStore {
    models: Vec<ModelData>,
    /// Number of models already handed out by `open_model`
    opened: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a model from its records
    ///
    /// Records keep their staging order in the class index, which is the
    /// order class listings are returned in.
    pub fn add_model(&mut self, records: impl IntoIterator<Item = Record>) -> ModelId {
        let mut data = ModelData::default();
        for record in records {
            let id = record.id;
            data.class_index
                .entry(record.class.clone())
                .or_default()
                .push(id);
            data.records.insert(id.0, Arc::new(record));
        }
        self.models.push(data);
        ModelId(self.models.len() as i32 - 1)
    }

    fn model(&self, model: ModelId) -> Option<&ModelData> {
        usize::try_from(model.0).ok().and_then(|i| self.models.get(i))
    }
}

impl RecordStore for MemoryStore {
    fn open_model(&self, _bytes: &[u8]) -> Result<ModelId> {
        let next = self.opened.fetch_add(1, Ordering::SeqCst);
        if next < self.models.len() {
            Ok(ModelId(next as i32))
        } else {
            Err(OutlineError::load("no staged model left to open"))
        }
    }

    fn record(&self, model: ModelId, id: RecordId, _flatten: bool) -> Option<Arc<Record>> {
        // Staged records are fully materialized, flatten is a no-op here
        self.model(model)?.records.get(&id.0).cloned()
    }

    fn ids_of_class(&self, model: ModelId, class: &IfcClass) -> Vec<RecordId> {
        self.model(model)
            .and_then(|m| m.class_index.get(class).cloned())
            .unwrap_or_default()
    }
}
