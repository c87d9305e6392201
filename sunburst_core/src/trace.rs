// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for evaluation passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! evaluation and interaction call at each step. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`ArcChange`] events and the
//!   corresponding `TraceSink` method.

use crate::error::ConfigurationError;
use crate::evaluate::{ArcChanges, Stage};
use crate::interaction::TapOutcome;
use crate::node::NodeId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happened to an arc during a pass.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArcField {
    /// The arc was created.
    Added,
    /// The arc was evicted.
    Removed,
    /// Angles, radii, margins, or level changed.
    Geometry,
    /// Color, text, or label visibility changed.
    Style,
    /// The node's name or image changed.
    Content,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an evaluation pass starts.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Monotonic pass counter.
    pub pass: u64,
    /// Earliest stage that will run, or `None` if only selection changed.
    pub first_stage: Option<Stage>,
    /// Number of live nodes.
    pub node_count: u32,
}

/// Marks the beginning of a derivation stage.
#[derive(Clone, Copy, Debug)]
pub struct StageBeginEvent {
    /// Pass counter.
    pub pass: u64,
    /// Which stage is starting.
    pub stage: Stage,
}

/// Marks the end of a derivation stage.
#[derive(Clone, Copy, Debug)]
pub struct StageEndEvent {
    /// Pass counter.
    pub pass: u64,
    /// Which stage ended.
    pub stage: Stage,
    /// Nodes or arcs the stage touched.
    pub visited: u32,
}

/// Emitted when the value resolver rejects the input and the pass aborts.
#[derive(Clone, Copy, Debug)]
pub struct ValidationFailedEvent {
    /// Pass counter.
    pub pass: u64,
    /// The rejection.
    pub error: ConfigurationError,
}

/// Emitted when a tap is handled.
#[derive(Clone, Copy, Debug)]
pub struct TapEvent {
    /// The tapped node.
    pub node: NodeId,
    /// What the tap did.
    pub outcome: TapOutcome,
}

/// Per-pass summary emitted after a successful pass.
#[derive(Clone, Copy, Debug)]
pub struct PassSummary {
    /// Pass counter.
    pub pass: u64,
    /// Earliest stage that ran.
    pub first_stage: Option<Stage>,
    /// Arcs in the tree after the pass.
    pub arc_count: u32,
    /// Arcs created.
    pub added: u32,
    /// Arcs evicted.
    pub removed: u32,
    /// Arcs whose geometry changed.
    pub resized: u32,
    /// Arcs whose style changed.
    pub restyled: u32,
    /// Nodes whose content changed.
    pub content: u32,
    /// Whether the selection changed.
    pub selection_changed: bool,
    /// Whether the effective focus changed.
    pub focus_changed: bool,
}

impl PassSummary {
    /// Summarizes `changes` for pass `pass`.
    #[must_use]
    pub fn new(pass: u64, arc_count: usize, changes: &ArcChanges) -> Self {
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Self {
            pass,
            first_stage: changes.derived,
            arc_count: count(arc_count),
            added: count(changes.added.len()),
            removed: count(changes.removed.len()),
            resized: count(changes.resized.len()),
            restyled: count(changes.restyled.len()),
            content: count(changes.content.len()),
            selection_changed: changes.selection_changed,
            focus_changed: changes.focus_changed,
        }
    }
}

/// A per-pass arc change record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcChange {
    /// Slot index of the arc's node.
    pub node_index: u32,
    /// What changed.
    pub field: ArcField,
}

#[cfg(feature = "trace-rich")]
impl ArcChange {
    /// Flattens `changes` into per-arc records, appending to `out`.
    pub fn collect(changes: &ArcChanges, out: &mut alloc::vec::Vec<Self>) {
        let lists: [(&[NodeId], ArcField); 5] = [
            (changes.added.as_slice(), ArcField::Added),
            (changes.removed.as_slice(), ArcField::Removed),
            (changes.resized.as_slice(), ArcField::Geometry),
            (changes.restyled.as_slice(), ArcField::Style),
            (changes.content.as_slice(), ArcField::Content),
        ];
        for (ids, field) in lists {
            out.extend(ids.iter().map(|id| Self {
                node_index: id.index(),
                field,
            }));
        }
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from evaluation and interaction.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an evaluation pass starts.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called at the beginning of a derivation stage.
    fn on_stage_begin(&mut self, e: &StageBeginEvent) {
        _ = e;
    }

    /// Called at the end of a derivation stage.
    fn on_stage_end(&mut self, e: &StageEndEvent) {
        _ = e;
    }

    /// Called when validation aborts a pass.
    fn on_validation_failed(&mut self, e: &ValidationFailedEvent) {
        _ = e;
    }

    /// Called with the summary of a successful pass.
    fn on_pass_summary(&mut self, s: &PassSummary) {
        _ = s;
    }

    /// Called when a tap is handled.
    fn on_tap(&mut self, e: &TapEvent) {
        _ = e;
    }

    /// Called with per-pass arc changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_arc_changes(&mut self, pass: u64, changes: &[ArcChange]) {
        _ = (pass, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StageBeginEvent`].
    #[inline]
    pub fn stage_begin(&mut self, e: &StageBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stage_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StageEndEvent`].
    #[inline]
    pub fn stage_end(&mut self, e: &StageEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stage_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ValidationFailedEvent`].
    #[inline]
    pub fn validation_failed(&mut self, e: &ValidationFailedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_validation_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassSummary`].
    #[inline]
    pub fn pass_summary(&mut self, s: &PassSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_pass_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`TapEvent`].
    #[inline]
    pub fn tap(&mut self, e: &TapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits arc changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn arc_changes(&mut self, pass: u64, changes: &[ArcChange]) {
        if let Some(s) = &mut self.sink {
            s.on_arc_changes(pass, changes);
        }
    }

    /// Returns whether events reach a sink.
    ///
    /// Lets callers skip building event payloads nobody will see.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
