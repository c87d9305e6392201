// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc building: sibling order, angular widths, and focus.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::f64::consts::TAU;

use super::tree::ArcTree;
use crate::config::NodesSort;
use crate::node::{ChildSlots, NodeId, NodeStore};

/// Builds the arc tree from a resolved node store.
///
/// Without focus every width is measured against the chart total. With a
/// focused node, only the focused subtree gets angular space: the focused
/// arc spans the full circle and its descendants are measured against its
/// weight, while every arc outside that subtree (including its ancestors)
/// gets zero width.
#[derive(Debug)]
pub(crate) struct ArcBuilder<'a> {
    store: &'a NodeStore,
    sort: NodesSort,
    focused: Option<NodeId>,
    pass: u64,
    focused_level: u32,
    visited: u32,
}

impl<'a> ArcBuilder<'a> {
    pub(crate) fn new(
        store: &'a NodeStore,
        sort: NodesSort,
        focused: Option<NodeId>,
        pass: u64,
    ) -> Self {
        Self {
            store,
            sort,
            focused,
            pass,
            focused_level: 0,
            visited: 0,
        }
    }

    /// Builds every arc reachable from the store's roots and evicts the rest.
    ///
    /// Returns the number of arcs built.
    pub(crate) fn build(mut self, tree: &mut ArcTree, total_value: f64) -> u32 {
        let roots = self.store.roots.clone();
        let roots = self.build_level(tree, roots, total_value, 1, false);
        tree.finish_build(self.pass, roots, self.focused_level, total_value);
        self.visited
    }

    fn build_level(
        &mut self,
        tree: &mut ArcTree,
        mut slots: Vec<u32>,
        total: f64,
        level: u32,
        found: bool,
    ) -> Vec<NodeId> {
        self.sort_siblings(&mut slots);

        // Until the focused node is found, nothing gets angular space.
        let use_total = self.focused.is_none() || found;

        let mut ids = Vec::with_capacity(slots.len());
        for idx in slots {
            let store = self.store;
            let id = store.handle(idx);
            let i = idx as usize;

            let mut found_here = found;
            let mut display_total = if use_total { total } else { 0.0 };
            if !found && self.focused == Some(id) {
                found_here = true;
                display_total = store.computed_value[i];
                self.focused_level = level;
            }

            let width = if display_total > 0.0 {
                store.computed_value[i] / display_total * TAU
            } else {
                0.0
            };

            let child_slots: Vec<u32> = ChildSlots::new(store, idx).collect();
            let children = if child_slots.is_empty() {
                Vec::new()
            } else {
                self.build_level(tree, child_slots, display_total, level + 1, found_here)
            };

            let arc = tree.visit(self.pass, id);
            arc.level = level;
            arc.width = width;
            arc.background_color = store.computed_background_color[i];
            arc.is_text_hidden = !store.show_name[i];
            arc.children = children;
            self.visited += 1;

            ids.push(id);
        }
        ids
    }

    fn sort_siblings(&self, slots: &mut [u32]) {
        let store = self.store;
        let key = |idx: u32| {
            (
                store.computed_value[idx as usize],
                store.value[idx as usize].unwrap_or(0.0),
            )
        };
        let ascending = |a: &u32, b: &u32| -> Ordering {
            let (ca, va) = key(*a);
            let (cb, vb) = key(*b);
            ca.total_cmp(&cb).then(va.total_cmp(&vb))
        };
        match self.sort {
            NodesSort::None => {}
            NodesSort::Ascending => slots.sort_by(ascending),
            NodesSort::Descending => slots.sort_by(|a, b| ascending(b, a)),
        }
    }
}
