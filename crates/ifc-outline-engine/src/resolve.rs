// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle resolution - the single point where indirect references become records

use ifc_outline_model::{ModelId, Record, RecordStore, Ref};
use std::sync::Arc;

/// Resolve a possibly-indirect reference into the full record
///
/// A `Direct` reference already embeds the record and is returned as-is, so
/// resolving twice is a no-op. An `Indirect` handle is fetched from the
/// store; a dangling id yields `None` and the caller omits that entry.
pub fn resolve(store: &dyn RecordStore, model: ModelId, r: &Ref) -> Option<Arc<Record>> {
    match r {
        Ref::Direct(record) => Some(Arc::clone(record)),
        Ref::Indirect(id) => store.record(model, *id, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_outline_model::{IfcClass, MemoryStore, RecordId};

    #[test]
    fn test_indirect_is_fetched() {
        let mut store = MemoryStore::new();
        let model = store.add_model([Record::new(3, IfcClass::IfcBuilding).with("Name", "B")]);

        let record = resolve(&store, model, &Ref::Indirect(RecordId(3))).unwrap();
        assert_eq!(record.text("Name"), Some("B"));
    }

    #[test]
    fn test_direct_is_identity() {
        let store = MemoryStore::new();
        let embedded = Arc::new(Record::new(4, IfcClass::IfcSpace));
        let r = Ref::Direct(Arc::clone(&embedded));

        // The store knows nothing about #4; the embedded record is returned as-is
        let once = resolve(&store, ModelId(0), &r).unwrap();
        assert!(Arc::ptr_eq(&once, &embedded));

        let twice = resolve(&store, ModelId(0), &Ref::Direct(once)).unwrap();
        assert!(Arc::ptr_eq(&twice, &embedded));
    }

    #[test]
    fn test_dangling_id_yields_none() {
        let mut store = MemoryStore::new();
        let model = store.add_model([]);
        assert!(resolve(&store, model, &Ref::Indirect(RecordId(99))).is_none());
    }
}
