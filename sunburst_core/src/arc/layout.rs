// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring layout: absolute angles, radii, margins, and label visibility.
//!
//! The focused arc and its ancestors (`level <= focused_level`) collapse into
//! the central disc. Every other arc sits on a ring whose *displayed level*
//! is `level - focused_level - 1`:
//!
//! - Displayed levels below `maximum_expanded_rings_shown_count` use the
//!   expanded thickness; later ones use the collapsed thickness.
//! - Displayed levels at or past `maximum_rings_shown_count` have zero
//!   thickness and sit just outside the last visible ring.

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_2;

use super::tree::ArcTree;
use crate::config::SunburstConfig;
use crate::node::NodeId;

/// Positions every arc in `tree` according to `config`.
///
/// Siblings are laid out consecutively from the starting angle. Children are
/// placed from the cursor position at which their parent starts, so a parent
/// and its children share the same starting edge.
pub(crate) fn layout(tree: &mut ArcTree, config: &SunburstConfig) -> u32 {
    let start = -FRAC_PI_2 + config.starting_angle.to_radians();
    let focused_level = tree.focused_level();
    let roots = tree.take_roots();
    let visited = layout_level(tree, &roots, start, focused_level, config);
    tree.restore_roots(roots);
    visited
}

fn layout_level(
    tree: &mut ArcTree,
    ids: &[NodeId],
    mut cursor: f64,
    focused_level: u32,
    config: &SunburstConfig,
) -> u32 {
    let mut visited = 0;
    for &id in ids {
        let Some(arc) = tree.get_mut(id) else {
            continue;
        };
        let children: Vec<NodeId> = core::mem::take(&mut arc.children);
        if !children.is_empty() {
            visited += layout_level(tree, &children, cursor, focused_level, config);
        }
        let Some(arc) = tree.get_mut(id) else {
            continue;
        };
        arc.children = children;

        arc.start = cursor;
        cursor += arc.width;
        arc.end = cursor;

        let (inner, outer) = ring_radii(arc.level, focused_level, config);
        arc.inner_radius = inner;
        arc.outer_radius = outer;

        if arc.level > focused_level {
            let margin = config.margin_between_arcs;
            arc.inner_margin = side_margin(arc.width, margin, inner);
            arc.outer_margin = side_margin(arc.width, margin, outer);
        } else {
            arc.inner_margin = 0.0;
            arc.outer_margin = 0.0;
        }

        arc.is_label_visible = label_visible(arc.width, arc.level, focused_level, config);
        visited += 1;
    }
    visited
}

/// Returns the `(inner, outer)` radii of an arc at `level`.
///
/// Arcs at or above `focused_level` form the central disc.
#[must_use]
pub fn ring_radii(level: u32, focused_level: u32, config: &SunburstConfig) -> (f64, f64) {
    let margin = config.margin_between_arcs;
    if level <= focused_level {
        return (0.0, (config.inner_radius - margin).max(0.0));
    }

    let displayed = level - focused_level - 1;
    let capped = match config.maximum_rings_shown_count {
        Some(max) if displayed >= max => max,
        _ => displayed,
    };

    let inner = match config.maximum_expanded_rings_shown_count {
        Some(expanded) if capped >= expanded => {
            f64::from(expanded) * (config.expanded_arc_thickness + margin)
                + f64::from(capped - expanded) * (config.collapsed_arc_thickness + margin)
                + config.inner_radius
        }
        _ => f64::from(capped) * (config.expanded_arc_thickness + margin) + config.inner_radius,
    };

    let hidden = config
        .maximum_rings_shown_count
        .is_some_and(|max| displayed >= max);
    let expanded = config
        .maximum_expanded_rings_shown_count
        .is_none_or(|max| displayed < max);
    let thickness = if hidden {
        0.0
    } else if expanded {
        config.expanded_arc_thickness
    } else {
        config.collapsed_arc_thickness
    };

    (inner, inner + thickness)
}

/// Converts half of `margin` (a length) into an angle at `radius`.
///
/// The result never exceeds half of `width`, so a very thin arc cannot be
/// inverted by its own margins. A zero radius yields that upper bound.
#[must_use]
pub fn side_margin(width: f64, margin: f64, radius: f64) -> f64 {
    let limit = (width / 2.0 - f64::EPSILON).max(0.0);
    if radius > 0.0 {
        (margin / 2.0 / radius).min(limit)
    } else {
        limit
    }
}

/// Ring caps count rings outside the central disc. The disc itself is always
/// drawn and stacks the focused arc over its ancestors, so only the focused
/// arc labels it.
fn label_visible(width: f64, level: u32, focused_level: u32, config: &SunburstConfig) -> bool {
    if width <= 0.0 {
        return false;
    }
    if level <= focused_level {
        return level == focused_level;
    }
    let displayed = level - focused_level - 1;
    config
        .maximum_rings_shown_count
        .is_none_or(|max| displayed < max)
        && config
            .maximum_expanded_rings_shown_count
            .is_none_or(|max| displayed < max)
}
