// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presenter contract for rendering integrations.
//!
//! The core produces numbers, not pixels. A *presenter* owns whatever the
//! host draws with (a retained scene, a canvas, native shapes) and keeps it
//! in sync with the chart by consuming [`ArcChanges`] after each pass:
//!
//! - **Added / removed** — create or drop the drawable for an arc.
//! - **Resized** — re-read angles, radii, and margins; a presenter that
//!   animates interpolates from the previous values, which are always finite.
//! - **Restyled / content** — update fill, label text, or image.
//! - **Selection / focus** — update highlight state.
//!
//! Sector outlines and label anchors are available from
//! [`Arc::to_path`](crate::arc::Arc::to_path) and
//! [`Arc::label_anchor`](crate::arc::Arc::label_anchor).

use crate::chart::Sunburst;
use crate::evaluate::ArcChanges;

/// Applies evaluated arc changes to a host presentation.
///
/// # Update loop pseudocode
///
/// ```rust,ignore
/// fn on_input(event: Event) {
///     // Mutate: any number of node, config, or interaction changes
///     if let Event::Tap(id) = event {
///         chart.tap(id);
///     }
///
///     // Evaluate: coalesce everything pending into one pass
///     let changes = chart.evaluate()?;
///
///     // Present: apply incremental changes to the host scene
///     presenter.apply(&chart, &changes);
/// }
/// ```
pub trait ArcPresenter {
    /// Applies the given [`ArcChanges`], reading current arc values from
    /// `chart` as needed.
    fn apply(&mut self, chart: &Sunburst, changes: &ArcChanges);
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use super::*;
    use crate::config::SunburstConfig;
    use crate::node::{Node, NodeId};

    /// Mirrors the arc tree as `id -> (start, end)`.
    #[derive(Default)]
    struct Mirror {
        spans: BTreeMap<NodeId, (f64, f64)>,
        selected: Option<NodeId>,
    }

    impl ArcPresenter for Mirror {
        fn apply(&mut self, chart: &Sunburst, changes: &ArcChanges) {
            for id in &changes.removed {
                self.spans.remove(id);
            }
            for id in changes.added.iter().chain(&changes.resized) {
                if let Some(arc) = chart.arc_tree().get(*id) {
                    self.spans.insert(*id, (arc.start, arc.end));
                }
            }
            if changes.selection_changed {
                self.selected = chart.selected_node();
            }
        }
    }

    #[test]
    fn incremental_updates_match_the_tree() {
        let mut chart = Sunburst::with_nodes(
            [Node::new("a"), Node::new("b").with_children([Node::new("b1")])],
            SunburstConfig::default(),
        );
        let mut mirror = Mirror::default();
        let changes = chart.evaluate().unwrap();
        mirror.apply(&chart, &changes);
        assert_eq!(mirror.spans.len(), 3);

        let a = chart.nodes().roots()[0];
        chart.nodes_mut().destroy_node(a);
        let c = chart.add_root_node(Node::new("c"));
        chart.tap(c);
        let changes = chart.evaluate().unwrap();
        mirror.apply(&chart, &changes);

        assert_eq!(mirror.selected, Some(c));
        assert_eq!(mirror.spans.len(), chart.arc_tree().len());
        for arc in chart.arc_tree() {
            assert_eq!(mirror.spans[&arc.id], (arc.start, arc.end));
        }
    }
}
