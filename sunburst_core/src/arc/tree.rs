// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-keyed arc storage with in-place reuse across passes.

use alloc::vec::Vec;

use super::Arc;
use crate::colors::Color;
use crate::evaluate::ArcChanges;
use crate::node::NodeId;

/// The comparable state of an arc at the start of a pass.
#[derive(Clone, Copy, Debug)]
struct Snapshot {
    id: NodeId,
    level: u32,
    width: f64,
    start: f64,
    end: f64,
    inner_radius: f64,
    outer_radius: f64,
    inner_margin: f64,
    outer_margin: f64,
    background_color: Color,
    is_text_hidden: bool,
    is_label_visible: bool,
}

impl Snapshot {
    fn of(arc: &Arc) -> Self {
        Self {
            id: arc.id,
            level: arc.level,
            width: arc.width,
            start: arc.start,
            end: arc.end,
            inner_radius: arc.inner_radius,
            outer_radius: arc.outer_radius,
            inner_margin: arc.inner_margin,
            outer_margin: arc.outer_margin,
            background_color: arc.background_color,
            is_text_hidden: arc.is_text_hidden,
            is_label_visible: arc.is_label_visible,
        }
    }

    fn resized(&self, arc: &Arc) -> bool {
        self.level != arc.level
            || self.width != arc.width
            || self.start != arc.start
            || self.end != arc.end
            || self.inner_radius != arc.inner_radius
            || self.outer_radius != arc.outer_radius
            || self.inner_margin != arc.inner_margin
            || self.outer_margin != arc.outer_margin
    }

    fn restyled(&self, arc: &Arc) -> bool {
        self.background_color != arc.background_color
            || self.is_text_hidden != arc.is_text_hidden
            || self.is_label_visible != arc.is_label_visible
    }
}

/// The arcs produced by the last successful evaluation.
///
/// Arcs live in slots parallel to the node store's slots. When a node is
/// visited again its arc is updated in place; an arc whose node was not
/// visited by a build is evicted.
#[derive(Debug, Default)]
pub struct ArcTree {
    slots: Vec<Option<Arc>>,
    stamp: Vec<u64>,
    prior: Vec<Option<Snapshot>>,
    roots: Vec<NodeId>,
    focused_level: u32,
    total_value: f64,
    len: usize,
}

impl ArcTree {
    /// Creates an empty arc tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root arcs' ids in display order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the arc for `id`, if the node was laid out.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Arc> {
        self.slots
            .get(id.idx as usize)
            .and_then(Option::as_ref)
            .filter(|arc| arc.id == id)
    }

    /// Returns the child arcs of `id` in display order.
    ///
    /// Empty when `id` has no arc or no children.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Arc> + '_ {
        self.get(id)
            .map(|arc| arc.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&child| self.get(child))
    }

    /// Returns a depth-first, pre-order iterator over all arcs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        let mut stack: Vec<NodeId> = self.roots.clone();
        stack.reverse();
        Iter { tree: self, stack }
    }

    /// Returns the number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the tree has no arcs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the level of the focused arc, or 0 without focus.
    #[must_use]
    pub fn focused_level(&self) -> u32 {
        self.focused_level
    }

    /// Returns the denominator used for angular widths.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    // -- Pass API --

    /// Records the comparable state of every arc before a pass mutates them.
    pub(crate) fn begin_pass(&mut self) {
        self.prior.clear();
        self.prior
            .extend(self.slots.iter().map(|slot| slot.as_ref().map(Snapshot::of)));
    }

    /// Returns the arc for `id`, creating it (or replacing a previous
    /// occupant of the slot) if needed, and stamps it as visited in `pass`.
    pub(crate) fn visit(&mut self, pass: u64, id: NodeId) -> &mut Arc {
        let i = id.idx as usize;
        if i >= self.slots.len() {
            self.slots.resize_with(i + 1, || None);
            self.stamp.resize(i + 1, 0);
        }
        self.stamp[i] = pass;
        let slot = &mut self.slots[i];
        if slot.as_ref().is_some_and(|arc| arc.id != id) {
            *slot = None;
        }
        slot.get_or_insert_with(|| Arc::new(id))
    }

    /// Stores the results of a build and evicts arcs not visited in `pass`.
    pub(crate) fn finish_build(
        &mut self,
        pass: u64,
        roots: Vec<NodeId>,
        focused_level: u32,
        total_value: f64,
    ) {
        self.roots = roots;
        self.focused_level = focused_level;
        self.total_value = total_value;
        for (slot, &stamp) in self.slots.iter_mut().zip(&self.stamp) {
            if stamp != pass {
                *slot = None;
            }
        }
        self.len = self.slots.iter().filter(|slot| slot.is_some()).count();
    }

    /// Compares every slot against the state recorded by
    /// [`begin_pass`](Self::begin_pass) and reports the differences.
    pub(crate) fn diff_into(&self, changes: &mut ArcChanges) {
        for (i, slot) in self.slots.iter().enumerate() {
            let before = self.prior.get(i).copied().flatten();
            match (before, slot) {
                (None, None) => {}
                (None, Some(arc)) => changes.added.push(arc.id),
                (Some(old), None) => changes.removed.push(old.id),
                (Some(old), Some(arc)) if old.id != arc.id => {
                    changes.removed.push(old.id);
                    changes.added.push(arc.id);
                }
                (Some(old), Some(arc)) => {
                    if old.resized(arc) {
                        changes.resized.push(arc.id);
                    }
                    if old.restyled(arc) {
                        changes.restyled.push(arc.id);
                    }
                }
            }
        }
    }

    /// Takes the root list out so layout can walk it while mutating arcs.
    pub(crate) fn take_roots(&mut self) -> Vec<NodeId> {
        core::mem::take(&mut self.roots)
    }

    pub(crate) fn restore_roots(&mut self, roots: Vec<NodeId>) {
        self.roots = roots;
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Arc> {
        self.slots
            .get_mut(id.idx as usize)
            .and_then(Option::as_mut)
            .filter(|arc| arc.id == id)
    }
}

impl<'a> IntoIterator for &'a ArcTree {
    type Item = &'a Arc;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Depth-first, pre-order iterator over an [`ArcTree`].
///
/// Created by [`ArcTree::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    tree: &'a ArcTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Arc;

    fn next(&mut self) -> Option<&'a Arc> {
        while let Some(id) = self.stack.pop() {
            if let Some(arc) = self.tree.get(id) {
                self.stack.extend(arc.children.iter().rev());
                return Some(arc);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::node::NodeStore;

    #[test]
    fn visit_reuses_matching_arc() {
        let mut store = NodeStore::new();
        let id = store.create_node("a");
        let mut tree = ArcTree::new();

        tree.visit(1, id).width = 1.5;
        tree.finish_build(1, vec![id], 0, 1.0);
        assert_eq!(tree.get(id).map(|a| a.width), Some(1.5));

        // Same node: updated in place, not reset.
        assert_eq!(tree.visit(2, id).width, 1.5);
    }

    #[test]
    fn unvisited_arcs_are_evicted() {
        let mut store = NodeStore::new();
        let a = store.create_node("a");
        let b = store.create_node("b");
        let mut tree = ArcTree::new();

        tree.visit(1, a);
        tree.visit(1, b);
        tree.finish_build(1, vec![a, b], 0, 0.0);
        assert_eq!(tree.len(), 2);

        let mut changes = ArcChanges::default();
        tree.begin_pass();
        tree.visit(2, a);
        tree.finish_build(2, vec![a], 0, 0.0);
        tree.diff_into(&mut changes);

        assert_eq!(tree.len(), 1);
        assert!(tree.get(b).is_none());
        assert_eq!(changes.removed, vec![b]);
        assert!(changes.added.is_empty());
    }

    #[test]
    fn reused_slot_reports_remove_and_add() {
        let mut store = NodeStore::new();
        let old = store.create_node("old");
        let mut tree = ArcTree::new();
        tree.visit(1, old);
        tree.finish_build(1, vec![old], 0, 0.0);

        store.destroy_node(old);
        let new = store.create_node("new");
        assert_eq!(old.index(), new.index());

        let mut changes = ArcChanges::default();
        tree.begin_pass();
        tree.visit(2, new);
        tree.finish_build(2, vec![new], 0, 0.0);
        tree.diff_into(&mut changes);

        assert!(tree.get(old).is_none());
        assert!(tree.get(new).is_some());
        assert_eq!(changes.removed, vec![old]);
        assert_eq!(changes.added, vec![new]);
    }

    #[test]
    fn iter_is_depth_first_preorder() {
        let mut store = NodeStore::new();
        let r = store.create_node("r");
        let a = store.create_node("a");
        let a1 = store.create_node("a1");
        let b = store.create_node("b");
        let mut tree = ArcTree::new();

        tree.visit(1, r).children = vec![a, b];
        tree.visit(1, a).children = vec![a1];
        tree.visit(1, a1);
        tree.visit(1, b);
        tree.finish_build(1, vec![r], 0, 0.0);

        let order: Vec<_> = tree.iter().map(|arc| arc.id).collect();
        assert_eq!(order, vec![r, a, a1, b]);
        let kids: Vec<_> = tree.children(r).map(|arc| arc.id).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(tree.children(b).count(), 0);
    }
}
