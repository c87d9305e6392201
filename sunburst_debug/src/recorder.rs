// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Node handles are stored as their raw index and generation. Rich events
//! ([`on_arc_changes`](TraceSink::on_arc_changes)) store only the count.

use sunburst_core::evaluate::Stage;
use sunburst_core::node::NodeId;
use sunburst_core::trace::{
    ArcChange, PassBeginEvent, PassSummary, StageBeginEvent, StageEndEvent, TapEvent, TraceSink,
    ValidationFailedEvent,
};
use sunburst_core::{ConfigurationError, TapOutcome};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PASS_BEGIN: u8 = 1;
const TAG_STAGE_BEGIN: u8 = 2;
const TAG_STAGE_END: u8 = 3;
const TAG_VALIDATION_FAILED: u8 = 4;
const TAG_PASS_SUMMARY: u8 = 5;
const TAG_TAP: u8 = 6;
const TAG_ARC_CHANGES_COUNT: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_node(&mut self, id: NodeId) {
        self.write_u32(id.index());
        self.write_u32(id.generation());
    }

    fn write_option_node(&mut self, id: Option<NodeId>) {
        match id {
            Some(id) => {
                self.write_u8(1);
                self.write_node(id);
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
                self.write_u32(0);
            }
        }
    }

    fn write_stage(&mut self, stage: Stage) {
        self.write_u8(match stage {
            Stage::Values => 0,
            Stage::Colors => 1,
            Stage::Arcs => 2,
            Stage::Layout => 3,
        });
    }

    fn write_option_stage(&mut self, stage: Option<Stage>) {
        match stage {
            Some(stage) => {
                self.write_u8(1);
                self.write_stage(stage);
            }
            None => {
                self.write_u8(0);
                self.write_u8(0);
            }
        }
    }

    fn write_error(&mut self, error: ConfigurationError) {
        // kind, node, two numbers
        match error {
            ConfigurationError::MissingValue { node } => {
                self.write_u8(0);
                self.write_option_node(Some(node));
                self.write_f64(0.0);
                self.write_f64(0.0);
            }
            ConfigurationError::MissingLeafValue { node } => {
                self.write_u8(1);
                self.write_option_node(Some(node));
                self.write_f64(0.0);
                self.write_f64(0.0);
            }
            ConfigurationError::TotalValueExceeded { total, sum } => {
                self.write_u8(2);
                self.write_option_node(None);
                self.write_f64(total);
                self.write_f64(sum);
            }
            ConfigurationError::InvalidValue { node, value } => {
                self.write_u8(3);
                self.write_option_node(Some(node));
                self.write_f64(value);
                self.write_f64(0.0);
            }
        }
    }

    fn write_outcome(&mut self, outcome: TapOutcome) {
        let (kind, target) = match outcome {
            TapOutcome::Ignored => (0, None),
            TapOutcome::Selected(id) => (1, Some(id)),
            TapOutcome::Focused(id) => (2, Some(id)),
            TapOutcome::FocusedParent(parent) => (3, parent),
        };
        self.write_u8(kind);
        self.write_option_node(target);
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.pass);
        self.write_option_stage(e.first_stage);
        self.write_u32(e.node_count);
    }

    fn on_stage_begin(&mut self, e: &StageBeginEvent) {
        self.write_u8(TAG_STAGE_BEGIN);
        self.write_u64(e.pass);
        self.write_stage(e.stage);
    }

    fn on_stage_end(&mut self, e: &StageEndEvent) {
        self.write_u8(TAG_STAGE_END);
        self.write_u64(e.pass);
        self.write_stage(e.stage);
        self.write_u32(e.visited);
    }

    fn on_validation_failed(&mut self, e: &ValidationFailedEvent) {
        self.write_u8(TAG_VALIDATION_FAILED);
        self.write_u64(e.pass);
        self.write_error(e.error);
    }

    fn on_pass_summary(&mut self, s: &PassSummary) {
        self.write_u8(TAG_PASS_SUMMARY);
        self.write_u64(s.pass);
        self.write_option_stage(s.first_stage);
        self.write_u32(s.arc_count);
        self.write_u32(s.added);
        self.write_u32(s.removed);
        self.write_u32(s.resized);
        self.write_u32(s.restyled);
        self.write_u32(s.content);
        self.write_bool(s.selection_changed);
        self.write_bool(s.focus_changed);
    }

    fn on_tap(&mut self, e: &TapEvent) {
        self.write_u8(TAG_TAP);
        self.write_node(e.node);
        self.write_outcome(e.outcome);
    }

    fn on_arc_changes(&mut self, pass: u64, changes: &[ArcChange]) {
        self.write_u8(TAG_ARC_CHANGES_COUNT);
        self.write_u64(pass);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "arc change count capped at u32::MAX for recording"
        )]
        self.write_u32(changes.len().min(u32::MAX as usize) as u32);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// A [`StageBeginEvent`].
    StageBegin(StageBeginEvent),
    /// A [`StageEndEvent`].
    StageEnd(StageEndEvent),
    /// A [`ValidationFailedEvent`].
    ValidationFailed(ValidationFailedEvent),
    /// A [`PassSummary`].
    PassSummary(PassSummary),
    /// A [`TapEvent`].
    Tap(TapEvent),
    /// Arc-change count for a pass.
    ArcChangesCount {
        /// Pass counter.
        pass: u64,
        /// Number of arc changes.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_node(&mut self) -> Option<NodeId> {
        let index = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(NodeId::from_raw_parts(index, generation))
    }

    fn read_option_node(&mut self) -> Option<Option<NodeId>> {
        let present = self.read_u8()?;
        let node = self.read_node()?;
        Some((present != 0).then_some(node))
    }

    fn read_stage(&mut self) -> Option<Stage> {
        Some(match self.read_u8()? {
            0 => Stage::Values,
            1 => Stage::Colors,
            2 => Stage::Arcs,
            _ => Stage::Layout,
        })
    }

    fn read_option_stage(&mut self) -> Option<Option<Stage>> {
        let present = self.read_u8()?;
        let stage = self.read_stage()?;
        Some((present != 0).then_some(stage))
    }

    fn read_error(&mut self) -> Option<ConfigurationError> {
        let kind = self.read_u8()?;
        let node = self.read_option_node()?;
        let a = self.read_f64()?;
        let b = self.read_f64()?;
        Some(match kind {
            0 => ConfigurationError::MissingValue { node: node? },
            1 => ConfigurationError::MissingLeafValue { node: node? },
            2 => ConfigurationError::TotalValueExceeded { total: a, sum: b },
            _ => ConfigurationError::InvalidValue {
                node: node?,
                value: a,
            },
        })
    }

    fn read_outcome(&mut self) -> Option<TapOutcome> {
        let kind = self.read_u8()?;
        let target = self.read_option_node()?;
        Some(match kind {
            0 => TapOutcome::Ignored,
            1 => TapOutcome::Selected(target?),
            2 => TapOutcome::Focused(target?),
            _ => TapOutcome::FocusedParent(target),
        })
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin(PassBeginEvent {
            pass: self.read_u64()?,
            first_stage: self.read_option_stage()?,
            node_count: self.read_u32()?,
        }))
    }

    fn decode_stage_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::StageBegin(StageBeginEvent {
            pass: self.read_u64()?,
            stage: self.read_stage()?,
        }))
    }

    fn decode_stage_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::StageEnd(StageEndEvent {
            pass: self.read_u64()?,
            stage: self.read_stage()?,
            visited: self.read_u32()?,
        }))
    }

    fn decode_validation_failed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ValidationFailed(ValidationFailedEvent {
            pass: self.read_u64()?,
            error: self.read_error()?,
        }))
    }

    fn decode_pass_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassSummary(PassSummary {
            pass: self.read_u64()?,
            first_stage: self.read_option_stage()?,
            arc_count: self.read_u32()?,
            added: self.read_u32()?,
            removed: self.read_u32()?,
            resized: self.read_u32()?,
            restyled: self.read_u32()?,
            content: self.read_u32()?,
            selection_changed: self.read_bool()?,
            focus_changed: self.read_bool()?,
        }))
    }

    fn decode_tap(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Tap(TapEvent {
            node: self.read_node()?,
            outcome: self.read_outcome()?,
        }))
    }

    fn decode_arc_changes_count(&mut self) -> Option<RecordedEvent> {
        let pass = self.read_u64()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::ArcChangesCount { pass, count })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_STAGE_BEGIN => self.decode_stage_begin(),
            TAG_STAGE_END => self.decode_stage_end(),
            TAG_VALIDATION_FAILED => self.decode_validation_failed(),
            TAG_PASS_SUMMARY => self.decode_pass_summary(),
            TAG_TAP => self.decode_tap(),
            TAG_ARC_CHANGES_COUNT => self.decode_arc_changes_count(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use sunburst_core::node::Node;
    use sunburst_core::trace::Tracer;
    use sunburst_core::{ArcChanges, CalculationMode, Sunburst, SunburstConfig};

    fn record(f: impl FnOnce(&mut Tracer<'_>)) -> Vec<RecordedEvent> {
        let mut rec = RecorderSink::new();
        f(&mut Tracer::new(&mut rec));
        decode(rec.as_bytes()).collect()
    }

    #[test]
    fn records_a_full_pass_in_order() {
        let mut chart = Sunburst::with_nodes(
            [Node::new("a").with_children([Node::new("a1")]), Node::new("b")],
            SunburstConfig::default(),
        );
        let events = record(|tracer| {
            let mut changes = ArcChanges::default();
            chart.evaluate_into(&mut changes, tracer).unwrap();
        });

        // begin, 4 × (stage begin, stage end), summary, arc changes
        assert_eq!(events.len(), 11);
        match &events[0] {
            RecordedEvent::PassBegin(e) => {
                assert_eq!(e.pass, 1);
                assert_eq!(e.first_stage, Some(Stage::Values));
                assert_eq!(e.node_count, 3);
            }
            other => panic!("expected PassBegin, got {other:?}"),
        }
        let stages: Vec<Stage> = events
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::StageEnd(e) => Some(e.stage),
                _ => None,
            })
            .collect();
        assert_eq!(
            stages,
            [Stage::Values, Stage::Colors, Stage::Arcs, Stage::Layout]
        );
        match &events[9] {
            RecordedEvent::PassSummary(s) => {
                assert_eq!(s.arc_count, 3);
                assert_eq!(s.added, 3);
                assert_eq!(s.removed, 0);
                assert!(!s.selection_changed);
            }
            other => panic!("expected PassSummary, got {other:?}"),
        }
        assert!(matches!(
            events[10],
            RecordedEvent::ArcChangesCount { pass: 1, count: 3 }
        ));
    }

    #[test]
    fn records_validation_failures() {
        let mut chart = Sunburst::with_nodes(
            [Node::new("a").with_value(60.0), Node::new("b").with_value(50.0)],
            SunburstConfig {
                calculation_mode: CalculationMode::ParentDependent {
                    total_value: Some(100.0),
                },
                ..SunburstConfig::default()
            },
        );
        let events = record(|tracer| {
            let mut changes = ArcChanges::default();
            assert!(chart.evaluate_into(&mut changes, tracer).is_err());
        });

        let failure = events.iter().find_map(|event| match event {
            RecordedEvent::ValidationFailed(e) => Some(e.error),
            _ => None,
        });
        assert_eq!(
            failure,
            Some(ConfigurationError::TotalValueExceeded {
                total: 100.0,
                sum: 110.0,
            })
        );
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, RecordedEvent::PassSummary(_)))
        );
    }

    #[test]
    fn records_taps_with_node_handles() {
        let mut chart = Sunburst::with_nodes(
            [Node::new("a").with_children([Node::new("a1")])],
            SunburstConfig::default(),
        );
        let a = chart.nodes().roots()[0];
        let a1 = chart.nodes().children(a).next().unwrap();
        let events = record(|tracer| {
            chart.tap_traced(a1, tracer);
            chart.tap_traced(a1, tracer);
            chart.tap_traced(a1, tracer);
        });

        let outcomes: Vec<TapOutcome> = events
            .iter()
            .map(|event| match event {
                RecordedEvent::Tap(e) => {
                    assert_eq!(e.node, a1);
                    e.outcome
                }
                other => panic!("expected Tap, got {other:?}"),
            })
            .collect();
        assert_eq!(
            outcomes,
            [
                TapOutcome::Selected(a1),
                TapOutcome::Focused(a1),
                TapOutcome::FocusedParent(Some(a)),
            ]
        );
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_record_stops_decoding() {
        let mut rec = RecorderSink::new();
        rec.on_stage_end(&StageEndEvent {
            pass: 2,
            stage: Stage::Layout,
            visited: 9,
        });
        let bytes = rec.into_bytes();
        assert_eq!(decode(&bytes).count(), 1);
        assert_eq!(decode(&bytes[..bytes.len() - 1]).count(), 0);
    }
}
