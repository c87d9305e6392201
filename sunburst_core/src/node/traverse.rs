// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, NodeId};
use super::store::NodeStore;

/// An iterator over the direct children of a node, in caller order.
///
/// Created by [`NodeStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a NodeStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a NodeStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(NodeId {
            idx,
            generation: self.store.generation[idx as usize],
        })
    }
}

/// An iterator over the raw slot indices of a node's children.
#[derive(Debug)]
pub(crate) struct ChildSlots<'a> {
    next_sibling: &'a [u32],
    current: u32,
}

impl<'a> ChildSlots<'a> {
    pub(crate) fn new(store: &'a NodeStore, idx: u32) -> Self {
        Self {
            next_sibling: &store.next_sibling,
            current: store.first_child[idx as usize],
        }
    }
}

impl Iterator for ChildSlots<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.next_sibling[idx as usize];
        Some(idx)
    }
}
