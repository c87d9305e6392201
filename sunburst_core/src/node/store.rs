// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::string::String;
use alloc::vec::Vec;

use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use super::desc::Node;
use super::id::{INVALID, ImageId, NodeId};
use super::traverse::Children;
use crate::colors::{Color, DEFAULT_BACKGROUND};
use crate::dirty;

/// Struct-of-arrays storage for all nodes of one chart.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// Caller-supplied properties (name, value, colors, ...) are only ever written
/// through the setters below. Computed properties (`computed_value`,
/// `computed_background_color`) are written by evaluation and never mark
/// anything dirty.
#[derive(Debug)]
pub struct NodeStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,
    pub(crate) roots: Vec<u32>,

    // -- Caller properties --
    pub(crate) name: Vec<String>,
    pub(crate) value: Vec<Option<f64>>,
    pub(crate) show_name: Vec<bool>,
    pub(crate) image: Vec<Option<ImageId>>,
    pub(crate) background_color: Vec<Option<Color>>,

    // -- Computed properties (written by evaluate) --
    pub(crate) computed_value: Vec<f64>,
    pub(crate) computed_background_color: Vec<Color>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) pending: bool,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates an empty node store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            roots: Vec::new(),
            name: Vec::new(),
            value: Vec::new(),
            show_name: Vec::new(),
            image: Vec::new(),
            background_color: Vec::new(),
            computed_value: Vec::new(),
            computed_background_color: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending: false,
        }
    }

    // -- Allocation API --

    /// Creates a new detached node and returns its handle.
    ///
    /// The node starts with no value, `show_name = true`, no image, no
    /// background color, no parent, and is not a root.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let name = name.into();
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.name[i] = name;
            self.value[i] = None;
            self.show_name[i] = true;
            self.image[i] = None;
            self.background_color[i] = None;
            self.computed_value[i] = 0.0;
            self.computed_background_color[i] = DEFAULT_BACKGROUND;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.name.push(name);
            self.value.push(None);
            self.show_name.push(true);
            self.image.push(None);
            self.background_color.push(None);
            self.computed_value.push(0.0);
            self.computed_background_color.push(DEFAULT_BACKGROUND);
            self.generation.push(0);
            idx
        };

        self.mark(idx, dirty::TOPOLOGY);

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Materializes a node description and its whole subtree.
    ///
    /// Returns the handle of the new (detached) subtree root; attach it with
    /// [`add_root`](Self::add_root) or [`add_child`](Self::add_child).
    pub fn insert(&mut self, node: Node) -> NodeId {
        let Node {
            name,
            value,
            show_name,
            image,
            background_color,
            children,
        } = node;

        let id = self.create_node(name);
        let i = id.idx as usize;
        self.value[i] = value;
        self.show_name[i] = show_name;
        self.image[i] = image;
        self.background_color[i] = background_color;

        for child in children {
            let child_id = self.insert(child);
            self.add_child(id, child_id);
        }
        id
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// A root is removed from the root list first; an attached node is
    /// unlinked from its parent.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove them first, or use
    /// [`destroy_subtree`](Self::destroy_subtree)) or if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy node with children"
        );

        if self.parent[idx as usize] != INVALID {
            let p = self.parent[idx as usize];
            self.unlink_from_parent(idx);
            self.mark(p, dirty::TOPOLOGY);
        } else if let Some(pos) = self.roots.iter().position(|&r| r == idx) {
            self.roots.remove(pos);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.name[idx as usize].clear();

        self.free_list.push(idx);
        self.mark(dirty::CHART, dirty::TOPOLOGY);
    }

    /// Destroys a node and all of its descendants.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_subtree(&mut self, id: NodeId) {
        self.validate(id);
        while self.first_child[id.idx as usize] != INVALID {
            let child = self.first_child[id.idx as usize];
            let child_id = NodeId {
                idx: child,
                generation: self.generation[child as usize],
            };
            self.destroy_subtree(child_id);
        }
        self.destroy_node(id);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Appends a detached node to the ordered list of roots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, or if the node already has a parent or
    /// is already a root.
    pub fn add_root(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.parent[idx as usize] == INVALID,
            "node already has a parent"
        );
        assert!(!self.roots.contains(&idx), "node is already a root");
        self.roots.push(idx);
        self.mark(dirty::CHART, dirty::TOPOLOGY);
    }

    /// Removes a node from the root list, leaving it detached.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node is not a root.
    pub fn remove_root(&mut self, id: NodeId) {
        self.validate(id);
        let pos = self
            .roots
            .iter()
            .position(|&r| r == id.idx)
            .expect("node is not a root");
        self.roots.remove(pos);
        self.mark(dirty::CHART, dirty::TOPOLOGY);
    }

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent or
    /// is a root, or if `parent` lies inside `child`'s subtree.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        assert!(!self.roots.contains(&c), "child is a root");
        assert!(p != c, "node cannot be its own child");
        assert!(
            !self.is_ancestor(c, p),
            "node cannot be attached inside its own subtree"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        self.mark(p, dirty::TOPOLOGY);
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// `child` must be detached. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` is attached, `sibling` has no
    /// parent, or `sibling` lies inside `child`'s subtree.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        assert!(!self.roots.contains(&c), "child is a root");
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        assert!(
            p != c && !self.is_ancestor(c, p),
            "node cannot be attached inside its own subtree"
        );

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        self.mark(p, dirty::TOPOLOGY);
    }

    /// Returns whether `ancestor` is on the parent chain of `idx`.
    fn is_ancestor(&self, ancestor: u32, idx: u32) -> bool {
        let mut cur = self.parent[idx as usize];
        while cur != INVALID {
            if cur == ancestor {
                return true;
            }
            cur = self.parent[cur as usize];
        }
        false
    }

    /// Removes `child` from its current parent, leaving it detached.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "node has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.validate(id);
        self.first_child[id.idx as usize] == INVALID
    }

    /// Returns the root nodes in display order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.roots.iter().map(|&idx| self.handle(idx)).collect()
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the display name of a node.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        self.validate(id);
        &self.name[id.idx as usize]
    }

    /// Returns the caller-supplied value of a node.
    #[must_use]
    pub fn value(&self, id: NodeId) -> Option<f64> {
        self.validate(id);
        self.value[id.idx as usize]
    }

    /// Returns whether the node's name is drawn.
    #[must_use]
    pub fn show_name(&self, id: NodeId) -> bool {
        self.validate(id);
        self.show_name[id.idx as usize]
    }

    /// Returns the image of a node.
    #[must_use]
    pub fn image(&self, id: NodeId) -> Option<ImageId> {
        self.validate(id);
        self.image[id.idx as usize]
    }

    /// Returns the caller-supplied background color of a node.
    #[must_use]
    pub fn background_color(&self, id: NodeId) -> Option<Color> {
        self.validate(id);
        self.background_color[id.idx as usize]
    }

    /// Returns the weight computed for the node by the last evaluation.
    ///
    /// Only valid after [`Sunburst::evaluate`](crate::Sunburst::evaluate) has
    /// been called.
    #[must_use]
    pub fn computed_value(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.computed_value[id.idx as usize]
    }

    /// Returns the background color resolved by the last evaluation.
    ///
    /// Only valid after [`Sunburst::evaluate`](crate::Sunburst::evaluate) has
    /// been called.
    #[must_use]
    pub fn computed_background_color(&self, id: NodeId) -> Color {
        self.validate(id);
        self.computed_background_color[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the display name of a node.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        self.validate(id);
        self.name[id.idx as usize] = name.into();
        self.mark(id.idx, dirty::CONTENT);
    }

    /// Sets the value of a node.
    pub fn set_value(&mut self, id: NodeId, value: Option<f64>) {
        self.validate(id);
        self.value[id.idx as usize] = value;
        self.mark(id.idx, dirty::VALUES);
    }

    /// Sets whether the node's name is drawn.
    pub fn set_show_name(&mut self, id: NodeId, show_name: bool) {
        self.validate(id);
        self.show_name[id.idx as usize] = show_name;
        self.mark(id.idx, dirty::CONTENT);
    }

    /// Sets the image of a node.
    pub fn set_image(&mut self, id: NodeId, image: Option<ImageId>) {
        self.validate(id);
        self.image[id.idx as usize] = image;
        self.mark(id.idx, dirty::CONTENT);
    }

    /// Sets the background color of a node.
    pub fn set_background_color(&mut self, id: NodeId, color: Option<Color>) {
        self.validate(id);
        self.background_color[id.idx as usize] = color;
        self.mark(id.idx, dirty::COLORS);
    }

    // -- Crate-internal helpers --

    /// Marks `key` dirty on `channel` and records that a pass is pending.
    pub(crate) fn mark(&mut self, key: u32, channel: Channel) {
        self.dirty.mark(key, channel);
        self.pending = true;
    }

    /// Drains the keys marked on `channel` since the last drain.
    pub(crate) fn drain(&mut self, channel: Channel) -> Vec<u32> {
        self.dirty.drain(channel).deterministic().run().collect()
    }

    /// Builds a handle for a live raw slot.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Builds a handle for a raw slot if it holds a live node.
    pub(crate) fn live_handle(&self, idx: u32) -> Option<NodeId> {
        let id = NodeId {
            idx,
            generation: *self.generation.get(idx as usize)?,
        };
        self.is_alive(id).then_some(id)
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            self.is_alive(id),
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = NodeStore::new();
        let id = store.create_node("a");
        assert!(store.is_alive(id));
        store.destroy_node(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = NodeStore::new();
        let id1 = store.create_node("first");
        store.destroy_node(id1);
        let id2 = store.create_node("second");
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        assert_eq!(store.value(id2), None);
    }

    #[test]
    fn equal_names_are_distinct_nodes() {
        let mut store = NodeStore::new();
        let a = store.create_node("Home");
        let b = store.create_node("Home");
        assert_ne!(a, b);
    }

    #[test]
    fn insert_materializes_subtree_in_order() {
        let mut store = NodeStore::new();
        let root = store.insert(
            Node::new("root")
                .with_value(3.0)
                .with_show_name(false)
                .with_children([Node::new("a").with_value(1.0), Node::new("b")]),
        );

        assert_eq!(store.name(root), "root");
        assert_eq!(store.value(root), Some(3.0));
        assert!(!store.show_name(root));

        let kids: Vec<_> = store.children(root).collect();
        assert_eq!(kids.len(), 2);
        assert_eq!(store.name(kids[0]), "a");
        assert_eq!(store.value(kids[0]), Some(1.0));
        assert_eq!(store.name(kids[1]), "b");
        assert!(store.is_leaf(kids[1]));
        assert_eq!(store.parent(kids[0]), Some(root));
        // Inserted subtrees are detached until added as a root.
        assert!(store.roots().is_empty());
    }

    #[test]
    fn roots_keep_insertion_order() {
        let mut store = NodeStore::new();
        let a = store.create_node("a");
        let b = store.create_node("b");
        let c = store.create_node("c");
        store.add_root(b);
        store.add_root(a);
        store.add_root(c);
        assert_eq!(store.roots(), vec![b, a, c]);

        store.remove_root(a);
        assert_eq!(store.roots(), vec![b, c]);
    }

    #[test]
    fn insert_before_works() {
        let mut store = NodeStore::new();
        let parent = store.create_node("p");
        let a = store.create_node("a");
        let b = store.create_node("b");
        let c = store.create_node("c");

        store.add_child(parent, a);
        store.add_child(parent, c);
        store.insert_before(b, c);

        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    fn remove_from_parent_works() {
        let mut store = NodeStore::new();
        let parent = store.create_node("p");
        let child = store.create_node("c");

        store.add_child(parent, child);
        store.remove_from_parent(child);
        assert_eq!(store.parent(child), None);
        assert!(store.children(parent).next().is_none());
    }

    #[test]
    fn destroy_subtree_frees_descendants() {
        let mut store = NodeStore::new();
        let root = store.insert(Node::new("r").with_children([
            Node::new("a").with_children([Node::new("a1")]),
            Node::new("b"),
        ]));
        store.add_root(root);
        assert_eq!(store.node_count(), 4);

        store.destroy_subtree(root);
        assert_eq!(store.node_count(), 0);
        assert!(store.roots().is_empty());
    }

    #[test]
    fn setters_mark_pending() {
        let mut store = NodeStore::new();
        let id = store.create_node("a");
        store.pending = false;

        store.set_value(id, Some(4.0));
        assert!(store.pending);
        assert_eq!(store.drain(dirty::VALUES), vec![id.idx]);
        assert!(store.drain(dirty::VALUES).is_empty());
    }

    #[test]
    fn property_channels_are_separate() {
        let mut store = NodeStore::new();
        let id = store.create_node("a");
        let _ = store.drain(dirty::TOPOLOGY);

        store.set_background_color(id, Some(color::palette::css::TOMATO));
        store.set_show_name(id, false);
        assert_eq!(store.drain(dirty::COLORS), vec![id.idx]);
        assert_eq!(store.drain(dirty::CONTENT), vec![id.idx]);
        assert!(store.drain(dirty::VALUES).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot destroy node with children")]
    fn destroy_with_children_panics() {
        let mut store = NodeStore::new();
        let parent = store.create_node("p");
        let child = store.create_node("c");
        store.add_child(parent, child);
        store.destroy_node(parent);
    }

    #[test]
    #[should_panic(expected = "child is a root")]
    fn root_cannot_become_child() {
        let mut store = NodeStore::new();
        let parent = store.create_node("p");
        let child = store.create_node("c");
        store.add_root(child);
        store.add_child(parent, child);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_value() {
        let mut store = NodeStore::new();
        let id = store.create_node("a");
        store.destroy_node(id);
        let _ = store.value(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_add_child() {
        let mut store = NodeStore::new();
        let root = store.create_node("r");
        let id = store.create_node("a");
        store.destroy_node(id);
        store.add_child(root, id);
    }

    #[test]
    #[should_panic(expected = "node cannot be attached inside its own subtree")]
    fn subtree_cannot_be_attached_under_its_descendant() {
        let mut store = NodeStore::new();
        let top = store.create_node("top");
        let mid = store.create_node("mid");
        let low = store.create_node("low");
        store.add_child(top, mid);
        store.add_child(mid, low);
        store.add_child(low, top);
    }

    #[test]
    #[should_panic(expected = "node cannot be attached inside its own subtree")]
    fn subtree_cannot_be_inserted_beside_its_descendant() {
        let mut store = NodeStore::new();
        let top = store.create_node("top");
        let mid = store.create_node("mid");
        let low = store.create_node("low");
        store.add_child(top, mid);
        store.add_child(mid, low);
        store.insert_before(top, low);
    }

    #[test]
    fn detached_subtree_can_move_under_an_unrelated_node() {
        let mut store = NodeStore::new();
        let top = store.create_node("top");
        let mid = store.create_node("mid");
        let other = store.create_node("other");
        store.add_child(top, mid);
        store.add_child(other, top);
        assert_eq!(store.parent(top), Some(other));
        store.destroy_subtree(other);
        assert!(!store.is_alive(mid));
    }
}
