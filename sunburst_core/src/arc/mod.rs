// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arcs: the positioned, styled output of an evaluation pass.
//!
//! Each live node reachable from a root is mirrored by exactly one [`Arc`],
//! keyed by the node's [`NodeId`]. Arcs are kept in an [`ArcTree`] that is
//! updated in place from pass to pass, so an arc's identity is stable for as
//! long as its node lives.
//!
//! Derivation happens in two stages:
//!
//! 1. **Build** — sorts siblings, computes angular widths (taking focus into
//!    account), levels, colors, and text visibility.
//! 2. **Layout** — walks the built tree assigning absolute angles, ring radii,
//!    angular margins, and label visibility.

mod build;
mod layout;
mod tree;

use alloc::vec::Vec;

use crate::colors::Color;
use crate::node::NodeId;

pub(crate) use build::ArcBuilder;
pub(crate) use layout::layout;
pub use layout::{ring_radii, side_margin};
pub use tree::{ArcTree, Iter};

/// One rendered annular sector.
///
/// Angles are in radians in the mathematical convention (0 points along +x,
/// increasing toward +y). Every numeric field is finite after a successful
/// evaluation, so consumers may interpolate between passes.
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    /// The node this arc mirrors.
    pub id: NodeId,
    /// Ring depth; roots are level 1.
    pub level: u32,
    /// Angular extent in radians.
    pub width: f64,
    /// Absolute start angle.
    pub start: f64,
    /// Absolute end angle (`start + width`).
    pub end: f64,
    /// Distance from the center to the inner edge.
    pub inner_radius: f64,
    /// Distance from the center to the outer edge.
    pub outer_radius: f64,
    /// Angle trimmed from each end of the inner edge.
    pub inner_margin: f64,
    /// Angle trimmed from each end of the outer edge.
    pub outer_margin: f64,
    /// Fill color.
    pub background_color: Color,
    /// Whether the node's name is omitted from the label.
    pub is_text_hidden: bool,
    /// Whether a label should be drawn at all.
    pub is_label_visible: bool,
    /// Child arcs in display order.
    pub children: Vec<NodeId>,
}

impl Arc {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            level: 0,
            width: 0.0,
            start: 0.0,
            end: 0.0,
            inner_radius: 0.0,
            outer_radius: 0.0,
            inner_margin: 0.0,
            outer_margin: 0.0,
            background_color: crate::colors::DEFAULT_BACKGROUND,
            is_text_hidden: false,
            is_label_visible: false,
            children: Vec::new(),
        }
    }

    /// Returns `outer_radius - inner_radius`.
    #[inline]
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}
