// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background color resolution.

use color::{AlphaColor, Srgb};

use crate::node::{INVALID, NodeStore};

/// The color type used for arc fills.
pub type Color = AlphaColor<Srgb>;

/// Fill used for nodes that do not specify a background color.
pub const DEFAULT_BACKGROUND: Color = color::palette::css::GRAY;

/// Resolves `computed_background_color` for every node reachable from a root.
///
/// A node's own color wins; anything else falls back to
/// [`DEFAULT_BACKGROUND`]. Colors are not inherited from parents.
///
/// Returns the number of nodes visited.
pub(crate) fn resolve(store: &mut NodeStore) -> u32 {
    let mut visited = 0;
    for i in 0..store.roots.len() {
        let root = store.roots[i];
        visited += resolve_subtree(store, root);
    }
    visited
}

fn resolve_subtree(store: &mut NodeStore, idx: u32) -> u32 {
    let i = idx as usize;
    store.computed_background_color[i] = store.background_color[i].unwrap_or(DEFAULT_BACKGROUND);

    let mut visited = 1;
    let mut child = store.first_child[i];
    while child != INVALID {
        visited += resolve_subtree(store, child);
        child = store.next_sibling[child as usize];
    }
    visited
}

#[cfg(test)]
mod tests {
    use color::palette::css;

    use super::*;
    use crate::node::Node;

    #[test]
    fn own_color_wins_and_gray_is_the_fallback() {
        let mut store = NodeStore::new();
        let root = store.insert(
            Node::new("root")
                .with_background_color(css::TOMATO)
                .with_children([Node::new("plain"), Node::new("blue").with_background_color(css::BLUE)]),
        );
        store.add_root(root);

        assert_eq!(resolve(&mut store), 3);

        let kids: alloc::vec::Vec<_> = store.children(root).collect();
        assert_eq!(store.computed_background_color(root), css::TOMATO);
        // Colors are not inherited.
        assert_eq!(store.computed_background_color(kids[0]), DEFAULT_BACKGROUND);
        assert_eq!(store.computed_background_color(kids[1]), css::BLUE);
    }

    #[test]
    fn detached_nodes_are_not_visited() {
        let mut store = NodeStore::new();
        let loose = store.insert(Node::new("loose").with_background_color(css::BLUE));
        assert_eq!(resolve(&mut store), 0);
        assert_eq!(store.computed_background_color(loose), DEFAULT_BACKGROUND);
    }
}
