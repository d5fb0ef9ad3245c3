// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hierarchy building
//!
//! Recursively walks the children resolver from a root record and produces
//! the display tree. The walk carries the set of ids on the current path;
//! revisiting one (malformed, cyclic input) short-circuits to a childless
//! marker node instead of diverging.

use crate::decode::decode;
use crate::relations::children_of;
use ifc_outline_model::{DisplayNode, ModelId, Record, RecordId, RecordStore};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Recursive display-tree builder for one model
///
/// Holds no state between [`HierarchyBuilder::build`] invocations apart from
/// the store handle; each build walks the store fresh.
pub struct HierarchyBuilder<'a> {
    store: &'a dyn RecordStore,
    model: ModelId,
    /// Ids on the path currently being expanded
    visiting: FxHashSet<RecordId>,
}

impl<'a> HierarchyBuilder<'a> {
    /// Create a builder for one model
    pub fn new(store: &'a dyn RecordStore, model: ModelId) -> Self {
        Self {
            store,
            model,
            visiting: FxHashSet::default(),
        }
    }

    /// Build the display tree rooted at a record
    ///
    /// An absent root terminates the recursion with `None`, so a dangling
    /// child reference drops that child without affecting its siblings. A
    /// root with no children yields a node with an empty children list.
    pub fn build(&mut self, root: Option<Arc<Record>>) -> Option<DisplayNode> {
        let record = root?;
        let text = decode(record.text("Name").unwrap_or("")).into_owned();
        let mut node = DisplayNode::new(record.id, text);

        if !self.visiting.insert(record.id) {
            // Already on this path: break the cycle with a childless marker
            return Some(node);
        }

        for child_id in children_of(self.store, self.model, record.id) {
            let child = self.store.record(self.model, child_id, false);
            if let Some(child_node) = self.build(child) {
                node.add_child(child_node);
            }
        }

        self.visiting.remove(&record.id);
        Some(node)
    }

    /// Build the display tree rooted at an id
    pub fn build_from_id(&mut self, root: RecordId) -> Option<DisplayNode> {
        let record = self.store.record(self.model, root, false);
        self.build(record)
    }
}

/// Convenience wrapper building one tree from a root id
pub fn build_hierarchy(
    store: &dyn RecordStore,
    model: ModelId,
    root: RecordId,
) -> Option<DisplayNode> {
    HierarchyBuilder::new(store, model).build_from_id(root)
}
