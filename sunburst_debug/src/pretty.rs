// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use sunburst_core::TapOutcome;
use sunburst_core::evaluate::Stage;
use sunburst_core::trace::{
    ArcChange, ArcField, PassBeginEvent, PassSummary, StageBeginEvent, StageEndEvent, TapEvent,
    TraceSink, ValidationFailedEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn stage_name(stage: Option<Stage>) -> &'static str {
    stage.map_or("none", Stage::name)
}

fn field_name(field: ArcField) -> &'static str {
    match field {
        ArcField::Added => "added",
        ArcField::Removed => "removed",
        ArcField::Geometry => "geometry",
        ArcField::Style => "style",
        ArcField::Content => "content",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass] pass={} from={} nodes={}",
            e.pass,
            stage_name(e.first_stage),
            e.node_count,
        );
    }

    fn on_stage_begin(&mut self, e: &StageBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[stage:begin] pass={} {}",
            e.pass,
            e.stage.name(),
        );
    }

    fn on_stage_end(&mut self, e: &StageEndEvent) {
        let _ = writeln!(
            self.writer,
            "[stage:end] pass={} {} visited={}",
            e.pass,
            e.stage.name(),
            e.visited,
        );
    }

    fn on_validation_failed(&mut self, e: &ValidationFailedEvent) {
        let _ = writeln!(self.writer, "[invalid] pass={} {}", e.pass, e.error);
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] pass={} from={} arcs={} +{} -{} resized={} restyled={} \
             content={} selection={} focus={}",
            s.pass,
            stage_name(s.first_stage),
            s.arc_count,
            s.added,
            s.removed,
            s.resized,
            s.restyled,
            s.content,
            if s.selection_changed { "changed" } else { "same" },
            if s.focus_changed { "changed" } else { "same" },
        );
    }

    fn on_tap(&mut self, e: &TapEvent) {
        let outcome = match e.outcome {
            TapOutcome::Ignored => "ignored".to_owned(),
            TapOutcome::Selected(id) => format!("selected {id}"),
            TapOutcome::Focused(id) => format!("focused {id}"),
            TapOutcome::FocusedParent(Some(id)) => format!("focused parent {id}"),
            TapOutcome::FocusedParent(None) => "cleared focus".to_owned(),
        };
        let _ = writeln!(self.writer, "[tap] node={} {outcome}", e.node);
    }

    fn on_arc_changes(&mut self, pass: u64, changes: &[ArcChange]) {
        let mut counts = [0_usize; 5];
        for change in changes {
            counts[change.field as usize] += 1;
        }
        let _ = write!(self.writer, "[arcs] pass={pass} changes={}", changes.len());
        for (field, count) in [
            ArcField::Added,
            ArcField::Removed,
            ArcField::Geometry,
            ArcField::Style,
            ArcField::Content,
        ]
        .into_iter()
        .zip(counts)
        {
            if count > 0 {
                let _ = write!(self.writer, " {}={count}", field_name(field));
            }
        }
        let _ = writeln!(self.writer);
    }
}
