// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and focus.
//!
//! Taps drive a small state machine over the selected and focused nodes:
//!
//! ```text
//!   Idle ──tap N──► Selected(N) ──tap N──► Selected(N) + Focused(N)
//!                                                │
//!                        tap N: focus moves to N's parent (or clears)
//! ```
//!
//! Tapping any other node selects it. Focus only affects layout while
//! [`allows_selection`](crate::SunburstConfig::allows_selection) is set.

use crate::chart::Sunburst;
use crate::dirty;
use crate::node::NodeId;
use crate::trace::{TapEvent, Tracer};

/// What a tap did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Selection is disabled or the node no longer exists.
    Ignored,
    /// The node became the selection.
    Selected(NodeId),
    /// The selected node became the focus.
    Focused(NodeId),
    /// The focused node was tapped again; focus moved to its parent, or was
    /// cleared for a root.
    FocusedParent(Option<NodeId>),
}

impl Sunburst {
    /// Handles a tap on the arc of `id`.
    pub fn tap(&mut self, id: NodeId) -> TapOutcome {
        self.tap_traced(id, &mut Tracer::none())
    }

    /// Like [`tap`](Self::tap), reporting the outcome to `tracer`.
    pub fn tap_traced(&mut self, id: NodeId, tracer: &mut Tracer<'_>) -> TapOutcome {
        let outcome = if !self.config.allows_selection || !self.nodes.is_alive(id) {
            TapOutcome::Ignored
        } else if self.selected == Some(id) && self.focused == Some(id) {
            let parent = self.nodes.parent(id);
            self.focused = parent;
            self.nodes.mark(dirty::CHART, dirty::ARCS);
            TapOutcome::FocusedParent(parent)
        } else if self.selected == Some(id) {
            self.focused = Some(id);
            self.nodes.mark(dirty::CHART, dirty::ARCS);
            TapOutcome::Focused(id)
        } else {
            self.selected = Some(id);
            self.nodes.mark(dirty::CHART, dirty::SELECTION);
            TapOutcome::Selected(id)
        };
        tracer.tap(&TapEvent {
            node: id,
            outcome,
        });
        outcome
    }

    /// Returns the selected node.
    #[must_use]
    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected
    }

    /// Returns the focused node.
    #[must_use]
    pub fn focused_node(&self) -> Option<NodeId> {
        self.focused
    }

    /// Selects `id`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn select(&mut self, id: NodeId) {
        self.nodes.validate(id);
        self.selected = Some(id);
        self.nodes.mark(dirty::CHART, dirty::SELECTION);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.nodes.mark(dirty::CHART, dirty::SELECTION);
    }

    /// Focuses `id`, so its subtree fills the circle.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn focus(&mut self, id: NodeId) {
        self.nodes.validate(id);
        self.focused = Some(id);
        self.nodes.mark(dirty::CHART, dirty::ARCS);
    }

    /// Clears the focus.
    pub fn clear_focus(&mut self) {
        self.focused = None;
        self.nodes.mark(dirty::CHART, dirty::ARCS);
    }

    /// Returns the parent of `id`, or `None` for a root.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.parent(id)
    }
}
