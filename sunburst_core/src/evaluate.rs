// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pass evaluation and change tracking.
//!
//! Evaluation drains every dirty channel and runs the derivation pipeline
//! from the earliest stage any drained channel invalidates:
//!
//! 1. **Values** — validate the forest and compute node weights.
//! 2. **Colors** — resolve background colors.
//! 3. **Arcs** — sort siblings, compute widths under focus, update the arc
//!    cache, and evict arcs whose nodes are gone.
//! 4. **Layout** — assign angles, radii, margins, and label visibility.
//!
//! The arc tree is diffed against its state at the start of the pass to
//! produce [`ArcChanges`].

use alloc::vec::Vec;

use crate::arc::{ArcBuilder, layout};
use crate::chart::Sunburst;
use crate::dirty;
use crate::error::ConfigurationError;
use crate::node::NodeId;
use crate::trace::{
    PassBeginEvent, PassSummary, StageBeginEvent, StageEndEvent, Tracer, ValidationFailedEvent,
};
use crate::{colors, value};

/// A derivation stage, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Weight computation and validation.
    Values,
    /// Background color resolution.
    Colors,
    /// Arc building (order, widths, focus).
    Arcs,
    /// Ring layout.
    Layout,
}

impl Stage {
    /// Returns a short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Values => "values",
            Self::Colors => "colors",
            Self::Arcs => "arcs",
            Self::Layout => "layout",
        }
    }
}

/// The set of changes produced by a single [`Sunburst::evaluate`] call.
///
/// Presenters use these to apply incremental updates; current values are
/// read from [`Sunburst::arc_tree`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArcChanges {
    /// Arcs created this pass.
    pub added: Vec<NodeId>,
    /// Arcs evicted this pass.
    pub removed: Vec<NodeId>,
    /// Arcs whose level, angles, radii, or margins changed.
    pub resized: Vec<NodeId>,
    /// Arcs whose color, text visibility, or label visibility changed.
    pub restyled: Vec<NodeId>,
    /// Nodes whose name, image, or `show_name` changed.
    pub content: Vec<NodeId>,
    /// Whether the selected node changed.
    pub selection_changed: bool,
    /// Whether the focus honored by layout changed.
    pub focus_changed: bool,
    /// The earliest derivation stage that ran, if any.
    pub derived: Option<Stage>,
}

impl ArcChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.resized.clear();
        self.restyled.clear();
        self.content.clear();
        self.selection_changed = false;
        self.focus_changed = false;
        self.derived = None;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.resized.is_empty()
            && self.restyled.is_empty()
            && self.content.is_empty()
            && !self.selection_changed
            && !self.focus_changed
    }
}

impl Sunburst {
    /// Runs a pass if anything is pending and returns what changed.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the node tree does not satisfy the
    /// calculation mode. The previous arcs are kept and later passes keep
    /// failing until the input is fixed.
    pub fn evaluate(&mut self) -> Result<ArcChanges, ConfigurationError> {
        let mut changes = ArcChanges::default();
        self.evaluate_into(&mut changes, &mut Tracer::none())?;
        Ok(changes)
    }

    /// Like [`evaluate`](Self::evaluate), but reuses `changes` and reports
    /// progress to `tracer`.
    ///
    /// `changes` is cleared first. On error it is left empty.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](Self::evaluate).
    pub fn evaluate_into(
        &mut self,
        changes: &mut ArcChanges,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), ConfigurationError> {
        changes.clear();
        if !self.nodes.pending {
            return Ok(());
        }
        self.nodes.pending = false;
        self.pass += 1;
        let pass = self.pass;

        let topology = self.nodes.drain(dirty::TOPOLOGY);
        let values = self.nodes.drain(dirty::VALUES);
        let colors = self.nodes.drain(dirty::COLORS);
        let content = self.nodes.drain(dirty::CONTENT);
        let arcs = self.nodes.drain(dirty::ARCS);
        let geometry = self.nodes.drain(dirty::GEOMETRY);
        // Selection is reported by comparing against the last pass; the
        // channel only schedules the pass.
        let _ = self.nodes.drain(dirty::SELECTION);

        // Handles destroyed since the last pass.
        if self.selected.is_some_and(|id| !self.nodes.is_alive(id)) {
            self.selected = None;
        }
        if self.focused.is_some_and(|id| !self.nodes.is_alive(id)) {
            self.focused = None;
        }
        let focus = self.effective_focus();

        let first_stage = if !topology.is_empty() || !values.is_empty() {
            Some(Stage::Values)
        } else if !colors.is_empty() {
            Some(Stage::Colors)
        } else if !content.is_empty() || !arcs.is_empty() || focus != self.reported_focus {
            Some(Stage::Arcs)
        } else if !geometry.is_empty() {
            Some(Stage::Layout)
        } else {
            None
        };

        tracer.pass_begin(&PassBeginEvent {
            pass,
            first_stage,
            node_count: u32::try_from(self.nodes.node_count()).unwrap_or(u32::MAX),
        });

        self.arcs.begin_pass();
        if let Some(first) = first_stage
            && let Err(error) = self.run_stages(first, pass, focus, tracer)
        {
            tracer.validation_failed(&ValidationFailedEvent { pass, error });
            // Keep failing until the input changes, and keep the content
            // marks so they are reported by the pass that succeeds.
            self.nodes.mark(dirty::CHART, dirty::VALUES);
            for &idx in &content {
                if self.nodes.live_handle(idx).is_some() {
                    self.nodes.mark(idx, dirty::CONTENT);
                }
            }
            return Err(error);
        }

        self.arcs.diff_into(changes);
        changes
            .content
            .extend(content.iter().filter_map(|&idx| self.nodes.live_handle(idx)));
        changes.selection_changed = self.selected != self.reported_selection;
        changes.focus_changed = focus != self.reported_focus;
        changes.derived = first_stage;
        self.reported_selection = self.selected;
        self.reported_focus = focus;

        tracer.pass_summary(&PassSummary::new(pass, self.arcs.len(), changes));
        #[cfg(feature = "trace-rich")]
        if tracer.is_active() {
            let mut records = Vec::new();
            crate::trace::ArcChange::collect(changes, &mut records);
            tracer.arc_changes(pass, &records);
        }

        Ok(())
    }

    fn run_stages(
        &mut self,
        first: Stage,
        pass: u64,
        focus: Option<NodeId>,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), ConfigurationError> {
        let mode = self.config.calculation_mode;

        let total = if first <= Stage::Values {
            tracer.stage_begin(&StageBeginEvent {
                pass,
                stage: Stage::Values,
            });
            let total = value::resolve(&mut self.nodes, &mode)?;
            tracer.stage_end(&StageEndEvent {
                pass,
                stage: Stage::Values,
                visited: u32::try_from(self.nodes.node_count()).unwrap_or(u32::MAX),
            });
            total
        } else {
            value::total_nodes_value(&self.nodes, &mode)
        };

        if first <= Stage::Colors {
            tracer.stage_begin(&StageBeginEvent {
                pass,
                stage: Stage::Colors,
            });
            let visited = colors::resolve(&mut self.nodes);
            tracer.stage_end(&StageEndEvent {
                pass,
                stage: Stage::Colors,
                visited,
            });
        }

        if first <= Stage::Arcs {
            tracer.stage_begin(&StageBeginEvent {
                pass,
                stage: Stage::Arcs,
            });
            let visited = ArcBuilder::new(&self.nodes, self.config.nodes_sort, focus, pass)
                .build(&mut self.arcs, total);
            tracer.stage_end(&StageEndEvent {
                pass,
                stage: Stage::Arcs,
                visited,
            });
        }

        tracer.stage_begin(&StageBeginEvent {
            pass,
            stage: Stage::Layout,
        });
        let visited = layout(&mut self.arcs, &self.config);
        tracer.stage_end(&StageEndEvent {
            pass,
            stage: Stage::Layout,
            visited,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use core::f64::consts::TAU;

    use color::palette::css;

    use super::*;
    use crate::config::{CalculationMode, NodesSort, SunburstConfig};
    use crate::node::Node;

    const EPS: f64 = 1e-9;

    fn value_config() -> SunburstConfig {
        SunburstConfig {
            calculation_mode: CalculationMode::ParentDependent { total_value: None },
            ..SunburstConfig::default()
        }
    }

    fn activity() -> Sunburst {
        Sunburst::with_nodes(
            [
                Node::new("Walking").with_value(10.0),
                Node::new("Restaurant").with_value(30.0),
                Node::new("Home").with_value(75.0),
            ],
            value_config(),
        )
    }

    #[test]
    fn first_pass_adds_every_arc() {
        let mut chart = activity();
        let changes = chart.evaluate().unwrap();
        assert_eq!(changes.added.len(), 3);
        assert_eq!(changes.derived, Some(Stage::Values));
        assert_eq!(chart.total_nodes_value(), 115.0);

        let tree = chart.arc_tree();
        let sum: f64 = tree.iter().map(|arc| arc.width).sum();
        assert!((sum - TAU).abs() < EPS);
        let home = tree.get(chart.nodes().roots()[2]).unwrap();
        assert!((home.width - 75.0 / 115.0 * TAU).abs() < EPS);
    }

    #[test]
    fn declared_total_above_the_sum_leaves_a_gap() {
        let mut chart = activity();
        chart.set_calculation_mode(CalculationMode::ParentDependent {
            total_value: Some(230.0),
        });
        chart.evaluate().unwrap();
        assert_eq!(chart.total_nodes_value(), 230.0);

        let tree = chart.arc_tree();
        let sum: f64 = tree.iter().map(|arc| arc.width).sum();
        assert!((sum - TAU * 115.0 / 230.0).abs() < EPS);
        let last = tree.get(chart.nodes().roots()[2]).unwrap();
        assert!((last.end - last.start - TAU * 75.0 / 230.0).abs() < EPS);
    }

    #[test]
    fn rejected_total_keeps_weights_and_arcs_in_agreement() {
        let mut chart = activity();
        chart.set_calculation_mode(CalculationMode::ParentDependent {
            total_value: Some(120.0),
        });
        chart.evaluate().unwrap();
        let walking = chart.nodes().roots()[0];
        let width = chart.arc_tree().get(walking).unwrap().width;

        chart.nodes_mut().set_value(walking, Some(40.0));
        assert_eq!(
            chart.evaluate().unwrap_err(),
            ConfigurationError::TotalValueExceeded {
                total: 120.0,
                sum: 145.0
            }
        );
        assert_eq!(chart.nodes().computed_value(walking), 10.0);
        assert_eq!(chart.arc_tree().get(walking).unwrap().width, width);
        assert!((width - TAU * 10.0 / 120.0).abs() < EPS);
    }

    #[test]
    fn nothing_pending_means_no_pass() {
        let mut chart = activity();
        chart.evaluate().unwrap();
        let changes = chart.evaluate().unwrap();
        assert!(changes.is_empty());
        assert_eq!(changes.derived, None);
    }

    #[test]
    fn mutations_are_coalesced_into_one_pass() {
        let mut chart = activity();
        chart.evaluate().unwrap();
        let pass = chart.pass;

        let walking = chart.nodes().roots()[0];
        chart.nodes_mut().set_value(walking, Some(20.0));
        chart.set_inner_radius(80.0);
        chart.set_margin_between_arcs(4.0);
        chart.evaluate().unwrap();

        assert_eq!(chart.pass, pass + 1);
        assert_eq!(chart.arc_tree().get(walking).unwrap().inner_radius, 80.0);
    }

    #[test]
    fn margin_change_keeps_identity_and_unrelated_fields() {
        let mut chart = activity();
        chart.evaluate().unwrap();
        let before: Vec<_> = chart.arc_tree().iter().cloned().collect();

        chart.set_margin_between_arcs(6.0);
        let changes = chart.evaluate().unwrap();
        assert_eq!(changes.derived, Some(Stage::Layout));
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
        assert!(changes.restyled.is_empty());

        for old in &before {
            let new = chart.arc_tree().get(old.id).unwrap();
            assert_eq!(new.id, old.id);
            assert_eq!(new.start, old.start);
            assert_eq!(new.end, old.end);
            assert_eq!(new.background_color, old.background_color);
            assert_ne!(new.inner_margin, old.inner_margin);
        }
    }

    #[test]
    fn color_change_restyles_only_that_arc() {
        let mut chart = activity();
        chart.evaluate().unwrap();
        let home = chart.nodes().roots()[2];

        chart.nodes_mut().set_background_color(home, Some(css::TEAL));
        let changes = chart.evaluate().unwrap();
        assert_eq!(changes.derived, Some(Stage::Colors));
        assert_eq!(changes.restyled, vec![home]);
        assert!(changes.resized.is_empty());
        assert_eq!(chart.arc_tree().get(home).unwrap().background_color, css::TEAL);
    }

    #[test]
    fn content_change_is_reported() {
        let mut chart = activity();
        chart.evaluate().unwrap();
        let walking = chart.nodes().roots()[0];

        chart.nodes_mut().set_name(walking, "Strolling");
        let changes = chart.evaluate().unwrap();
        assert_eq!(changes.content, vec![walking]);
        assert!(changes.restyled.is_empty());

        chart.nodes_mut().set_show_name(walking, false);
        let changes = chart.evaluate().unwrap();
        assert_eq!(changes.content, vec![walking]);
        assert_eq!(changes.restyled, vec![walking]);
        assert!(chart.arc_tree().get(walking).unwrap().is_text_hidden);
    }

    #[test]
    fn sort_change_reorders_roots() {
        let mut chart = activity();
        chart.evaluate().unwrap();
        chart.set_nodes_sort(NodesSort::Descending);
        let changes = chart.evaluate().unwrap();
        assert_eq!(changes.derived, Some(Stage::Arcs));

        let names: Vec<&str> = chart
            .arc_tree()
            .roots()
            .iter()
            .map(|&id| chart.nodes().name(id))
            .collect();
        assert_eq!(names, ["Home", "Restaurant", "Walking"]);
        assert!(!changes.resized.is_empty());
    }

    #[test]
    fn validation_error_keeps_previous_arcs_and_repeats() {
        let mut chart = activity();
        chart.evaluate().unwrap();
        let before: Vec<_> = chart.arc_tree().iter().cloned().collect();

        let bad = chart.add_root_node(Node::new("Unknown"));
        let err = chart.evaluate().unwrap_err();
        assert_eq!(err, ConfigurationError::MissingValue { node: bad });
        let after: Vec<_> = chart.arc_tree().iter().cloned().collect();
        assert_eq!(before, after);

        // Still failing without changes to the input.
        assert!(chart.has_pending_changes());
        assert!(chart.evaluate().is_err());
        assert!(chart.arcs().is_err());

        chart.nodes_mut().set_value(bad, Some(5.0));
        let changes = chart.evaluate().unwrap();
        assert_eq!(changes.added, vec![bad]);
        assert_eq!(chart.arc_tree().len(), 4);
    }

    #[test]
    fn destroyed_nodes_are_evicted() {
        let mut chart = Sunburst::with_nodes(
            [Node::new("a").with_children([Node::new("a1"), Node::new("a2")])],
            SunburstConfig::default(),
        );
        chart.evaluate().unwrap();
        let a = chart.nodes().roots()[0];
        let a2 = chart.nodes().children(a).nth(1).unwrap();

        chart.nodes_mut().destroy_node(a2);
        let changes = chart.evaluate().unwrap();
        assert_eq!(changes.removed, vec![a2]);
        assert_eq!(chart.arc_tree().len(), 2);
        assert_eq!(chart.arc_tree().get(a).unwrap().children.len(), 1);
    }

    #[test]
    fn empty_chart_and_zero_total_are_safe() {
        let mut chart = Sunburst::new(value_config());
        assert!(chart.arcs().unwrap().is_empty());
        assert_eq!(chart.total_nodes_value(), 0.0);

        let mut chart = Sunburst::with_nodes(
            [Node::new("a").with_value(0.0).with_children([Node::new("b").with_value(0.0)])],
            value_config(),
        );
        for arc in chart.arcs().unwrap().iter() {
            assert_eq!(arc.width, 0.0);
            assert!(arc.inner_margin.is_finite());
            assert!(arc.outer_margin.is_finite());
            assert!(!arc.is_label_visible);
        }
    }

    #[test]
    fn ring_cap_gives_deep_arcs_zero_thickness() {
        let mut chart = Sunburst::with_nodes(
            [Node::new("1").with_children([Node::new("2").with_children([Node::new("3")
                .with_children([Node::new("4")])])])],
            SunburstConfig {
                maximum_rings_shown_count: Some(2),
                ..SunburstConfig::default()
            },
        );
        let tree = chart.arcs().unwrap();
        let deepest = tree.iter().find(|arc| arc.level == 4).unwrap();
        assert_eq!(deepest.thickness(), 0.0);
        assert!(!deepest.is_label_visible);
        let shallow = tree.iter().find(|arc| arc.level == 2).unwrap();
        assert_eq!(shallow.thickness(), 60.0);
    }

    #[test]
    fn every_field_is_finite() {
        let mut chart = Sunburst::with_nodes(
            [
                Node::new("a").with_children([Node::new("a1"), Node::new("a2")]),
                Node::new("b"),
            ],
            SunburstConfig {
                inner_radius: 0.0,
                margin_between_arcs: 0.0,
                ..SunburstConfig::default()
            },
        );
        for arc in chart.arcs().unwrap().iter() {
            for v in [
                arc.width,
                arc.start,
                arc.end,
                arc.inner_radius,
                arc.outer_radius,
                arc.inner_margin,
                arc.outer_margin,
            ] {
                assert!(v.is_finite());
            }
        }
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_sees_stages_from_the_restart_point() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Stages(Vec<Stage>);
        impl TraceSink for Stages {
            fn on_stage_begin(&mut self, e: &StageBeginEvent) {
                self.0.push(e.stage);
            }
        }

        let mut chart = activity();
        let mut sink = Stages::default();
        let mut changes = ArcChanges::default();
        chart
            .evaluate_into(&mut changes, &mut Tracer::new(&mut sink))
            .unwrap();
        assert_eq!(
            sink.0,
            [Stage::Values, Stage::Colors, Stage::Arcs, Stage::Layout]
        );

        sink.0.clear();
        chart.set_starting_angle(45.0);
        chart
            .evaluate_into(&mut changes, &mut Tracer::new(&mut sink))
            .unwrap();
        assert_eq!(sink.0, [Stage::Layout]);
    }
}
