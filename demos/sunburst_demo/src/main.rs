// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walkthrough of the sunburst pipeline.
//!
//! Builds a day-of-activities chart, evaluates it, drives a few taps
//! (select, focus, focus parent), edits a value, and trips a validation
//! error, tracing every pass to a
//! [`PrettyPrintSink`](sunburst_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](sunburst_debug::recorder::RecorderSink). A text presenter
//! prints each arc change; the final arcs are written as JSON.
//!
//! Run with: `cargo run -p sunburst_demo [snapshot.json]`

use std::fs::File;
use std::io::BufWriter;

use color::palette::css;
use kurbo::{Point, Shape};

use sunburst_core::node::{ImageId, Node, NodeId};
use sunburst_core::presenter::ArcPresenter;
use sunburst_core::trace::{
    ArcChange, PassBeginEvent, PassSummary, StageBeginEvent, StageEndEvent, TapEvent, TraceSink,
    Tracer, ValidationFailedEvent,
};
use sunburst_core::{ArcChanges, CalculationMode, NodesSort, Sunburst, SunburstConfig};

use sunburst_debug::pretty::PrettyPrintSink;
use sunburst_debug::recorder::{RecordedEvent, RecorderSink, decode};
use sunburst_debug::snapshot;

/// Where the chart is drawn, in a 400×400 view.
const CENTER: Point = Point::new(200.0, 200.0);
/// Flattening tolerance for sector outlines.
const TOLERANCE: f64 = 0.1;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.a.on_pass_begin(e);
        self.b.on_pass_begin(e);
    }

    fn on_stage_begin(&mut self, e: &StageBeginEvent) {
        self.a.on_stage_begin(e);
        self.b.on_stage_begin(e);
    }

    fn on_stage_end(&mut self, e: &StageEndEvent) {
        self.a.on_stage_end(e);
        self.b.on_stage_end(e);
    }

    fn on_validation_failed(&mut self, e: &ValidationFailedEvent) {
        self.a.on_validation_failed(e);
        self.b.on_validation_failed(e);
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        self.a.on_pass_summary(s);
        self.b.on_pass_summary(s);
    }

    fn on_tap(&mut self, e: &TapEvent) {
        self.a.on_tap(e);
        self.b.on_tap(e);
    }

    fn on_arc_changes(&mut self, pass: u64, changes: &[ArcChange]) {
        self.a.on_arc_changes(pass, changes);
        self.b.on_arc_changes(pass, changes);
    }
}

/// Prints what a drawing backend would do with each change.
#[derive(Debug, Default)]
struct TextPresenter {
    drawn: usize,
}

impl ArcPresenter for TextPresenter {
    fn apply(&mut self, chart: &Sunburst, changes: &ArcChanges) {
        let tree = chart.arc_tree();
        for &id in &changes.removed {
            self.drawn = self.drawn.saturating_sub(1);
            println!("  - drop {id}");
        }
        for &id in changes.added.iter().chain(&changes.resized) {
            let Some(arc) = tree.get(id) else { continue };
            if changes.added.contains(&id) {
                self.drawn += 1;
            }
            let bounds = arc.to_path(CENTER, TOLERANCE).bounding_box();
            let label = if arc.is_label_visible && !arc.is_text_hidden {
                chart.nodes().name(id)
            } else {
                ""
            };
            println!(
                "  * {id} level={} {:>6.1}°..{:>6.1}° r={:.0}..{:.0} bounds={:.0}x{:.0} {label}",
                arc.level,
                arc.start.to_degrees(),
                arc.end.to_degrees(),
                arc.inner_radius,
                arc.outer_radius,
                bounds.width(),
                bounds.height(),
            );
        }
        if !changes.restyled.is_empty() {
            println!("  ~ restyled {}", changes.restyled.len());
        }
        if changes.selection_changed {
            match chart.selected_node() {
                Some(id) => println!("  ! highlight {}", chart.nodes().name(id)),
                None => println!("  ! clear highlight"),
            }
        }
        println!("  = {} arcs drawn", self.drawn);
    }
}

fn activities() -> Vec<Node> {
    let leaf = |name: &str, value| Node::new(name).with_value(value);
    // Top-level activities are drawn as icons instead of text.
    let with_image = |node: Node, n| node.with_image(ImageId(n)).with_show_name(false);
    vec![
        with_image(leaf("Walking", 10.0), 0).with_background_color(css::ROYAL_BLUE),
        with_image(leaf("Restaurant", 30.0), 1)
            .with_background_color(css::CRIMSON)
            .with_children([
                with_image(leaf("Dessert", 10.0), 2)
                    .with_background_color(css::GOLD)
                    .with_children([
                        leaf("Creme Brulee", 3.0),
                        leaf("Crepes", 6.0).with_children([leaf("Nutella Crepe", 4.0)]),
                    ]),
                with_image(leaf("Dinner", 5.0), 3)
                    .with_background_color(css::DARK_ORANGE)
                    .with_children([leaf("Pizza", 4.0)]),
            ]),
        with_image(leaf("Transport", 10.0), 4).with_background_color(css::MEDIUM_PURPLE),
        with_image(leaf("Home", 45.0), 5)
            .with_background_color(css::TEAL)
            .with_children([
                leaf("San Francisco", 15.0).with_children([
                    leaf("Twin Peaks", 3.0),
                    leaf("Hayes Valley", 1.5),
                    leaf("Nob Hill", 8.0),
                ]),
                leaf("Lyon", 6.0),
            ]),
    ]
}

fn find(chart: &Sunburst, name: &str) -> Option<NodeId> {
    chart
        .arc_tree()
        .iter()
        .map(|arc| arc.id)
        .find(|&id| chart.nodes().name(id) == name)
}

fn step(
    title: &str,
    chart: &mut Sunburst,
    presenter: &mut TextPresenter,
    changes: &mut ArcChanges,
    tracer: &mut Tracer<'_>,
) {
    println!("== {title}");
    match chart.evaluate_into(changes, tracer) {
        Ok(()) => presenter.apply(chart, changes),
        Err(error) => println!("  x rejected: {error}"),
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::stderr();
    let mut recorder = RecorderSink::new();

    // -- chart -------------------------------------------------------------
    let mut chart = Sunburst::with_nodes(
        activities(),
        SunburstConfig {
            calculation_mode: CalculationMode::ParentDependent { total_value: None },
            nodes_sort: NodesSort::Descending,
            maximum_expanded_rings_shown_count: Some(2),
            ..SunburstConfig::default()
        },
    );
    let mut presenter = TextPresenter::default();
    let mut changes = ArcChanges::default();

    {
        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);

        step(
            "initial layout",
            &mut chart,
            &mut presenter,
            &mut changes,
            &mut tracer,
        );

        if let Some(restaurant) = find(&chart, "Restaurant") {
            chart.tap_traced(restaurant, &mut tracer);
            step(
                "select Restaurant",
                &mut chart,
                &mut presenter,
                &mut changes,
                &mut tracer,
            );
            chart.tap_traced(restaurant, &mut tracer);
            step(
                "focus Restaurant",
                &mut chart,
                &mut presenter,
                &mut changes,
                &mut tracer,
            );
            chart.tap_traced(restaurant, &mut tracer);
            step(
                "back to the whole day",
                &mut chart,
                &mut presenter,
                &mut changes,
                &mut tracer,
            );
        }

        if let Some(lyon) = find(&chart, "Lyon") {
            chart.nodes_mut().set_value(lyon, Some(20.0));
            step(
                "Lyon grows",
                &mut chart,
                &mut presenter,
                &mut changes,
                &mut tracer,
            );
        }

        chart.set_calculation_mode(CalculationMode::ParentDependent {
            total_value: Some(50.0),
        });
        step(
            "declared total too small",
            &mut chart,
            &mut presenter,
            &mut changes,
            &mut tracer,
        );

        chart.set_calculation_mode(CalculationMode::OrdinalFromLeaves);
        step(
            "ordinal from leaves",
            &mut chart,
            &mut presenter,
            &mut changes,
            &mut tracer,
        );
    }

    // -- recording ---------------------------------------------------------
    let passes = decode(recorder.as_bytes())
        .filter(|event| matches!(event, RecordedEvent::PassSummary(_)))
        .count();
    println!(
        "recorded {} bytes, {passes} successful passes",
        recorder.as_bytes().len()
    );

    // -- snapshot ----------------------------------------------------------
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::create(&path).expect("failed to create snapshot file");
            let mut writer = BufWriter::new(file);
            snapshot::export(&chart, &mut writer).expect("failed to write snapshot");
            eprintln!("Wrote arc snapshot to {path}");
        }
        None => {
            snapshot::export(&chart, &mut std::io::stdout()).expect("failed to write snapshot");
        }
    }
}
