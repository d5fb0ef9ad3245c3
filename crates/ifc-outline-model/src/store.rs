// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record store trait - the external model-access collaborator

use crate::{IfcClass, ModelId, Record, RecordId, Result};
use std::sync::Arc;

/// External record-access collaborator
///
/// The resolution engine consumes exactly these operations and nothing else.
/// Implementations own the model byte format, the record storage and any
/// caching; the engine only reads through this interface.
///
/// # Example
///
/// ```ignore
/// use ifc_outline_model::{RecordStore, IfcClass, ModelId};
///
/// fn count_sites(store: &dyn RecordStore, model: ModelId) -> usize {
///     store.ids_of_class(model, &IfcClass::IfcSite).len()
/// }
/// ```
pub trait RecordStore: Send + Sync {
    /// Open a model from raw bytes
    ///
    /// # Arguments
    /// * `bytes` - The model file content
    ///
    /// # Returns
    /// The id of the opened model, or `OutlineError::LoadFailed`
    fn open_model(&self, bytes: &[u8]) -> Result<ModelId>;

    /// Get a record by id
    ///
    /// # Arguments
    /// * `model` - The model to look in
    /// * `id` - The record id to look up
    /// * `flatten` - Whether nested references in the returned record should
    ///   be pre-resolved into embedded records. Stores whose records are
    ///   already fully materialized may ignore this.
    ///
    /// # Returns
    /// `Some(Arc<Record>)` if found, `None` for a dangling id
    fn record(&self, model: ModelId, id: RecordId, flatten: bool) -> Option<Arc<Record>>;

    /// Get all record ids of a class, in model storage order
    ///
    /// # Arguments
    /// * `model` - The model to look in
    /// * `class` - The class to filter by
    ///
    /// # Returns
    /// A vector of record ids (empty if the class does not occur)
    fn ids_of_class(&self, model: ModelId, class: &IfcClass) -> Vec<RecordId>;

    /// Get all records of a class
    ///
    /// Convenience composition of [`RecordStore::ids_of_class`] and
    /// [`RecordStore::record`]. Ids without a backing record are skipped.
    fn records_of_class(&self, model: ModelId, class: &IfcClass) -> Vec<Arc<Record>> {
        self.ids_of_class(model, class)
            .into_iter()
            .filter_map(|id| self.record(model, id, false))
            .collect()
    }

    /// Get the record of a class expected to occur once in the model
    ///
    /// Used for classes like the site root. If several records of the class
    /// exist, the first in storage order wins.
    fn exclusive_record(&self, model: ModelId, class: &IfcClass) -> Option<Arc<Record>> {
        let id = self.ids_of_class(model, class).into_iter().next()?;
        self.record(model, id, true)
    }
}
