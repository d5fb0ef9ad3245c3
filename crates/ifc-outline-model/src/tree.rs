// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display tree nodes produced by hierarchy resolution

use crate::RecordId;
use serde::{Deserialize, Serialize};

/// Node in the resolved display hierarchy
///
/// Created fresh per root-entity request and never persisted. The children
/// list is ordered: aggregation-derived children precede containment-derived
/// children, each group in relationship storage order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayNode {
    /// Record id of the underlying entity
    pub id: RecordId,
    /// Decoded display name
    pub text: String,
    /// Child nodes, possibly empty
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    /// Create a leaf node
    pub fn new(id: impl Into<RecordId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node
    pub fn add_child(&mut self, child: DisplayNode) {
        self.children.push(child);
    }

    /// Find a node by id (depth-first)
    pub fn find(&self, id: RecordId) -> Option<&DisplayNode> {
        self.iter().find(|n| n.id == id)
    }

    /// Iterate all nodes (depth-first)
    pub fn iter(&self) -> DisplayNodeIter<'_> {
        DisplayNodeIter { stack: vec![self] }
    }

    /// Total node count including this node
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }
}

/// Iterator over display nodes (depth-first)
pub struct DisplayNodeIter<'a> {
    stack: Vec<&'a DisplayNode>,
}

impl<'a> Iterator for DisplayNodeIter<'a> {
    type Item = &'a DisplayNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse so the first child is visited first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DisplayNode {
        let mut root = DisplayNode::new(1u32, "Site");
        let mut building = DisplayNode::new(2u32, "Building");
        building.add_child(DisplayNode::new(3u32, "Level 1"));
        building.add_child(DisplayNode::new(4u32, "Level 2"));
        root.add_child(building);
        root
    }

    #[test]
    fn test_find() {
        let tree = sample_tree();
        assert_eq!(tree.find(RecordId(3)).unwrap().text, "Level 1");
        assert!(tree.find(RecordId(99)).is_none());
    }

    #[test]
    fn test_iter_depth_first() {
        let tree = sample_tree();
        let ids: Vec<u32> = tree.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(tree.node_count(), 4);
    }
}
