// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, recording, and JSON snapshot export for sunburst
//! diagnostics.
//!
//! This crate provides [`TraceSink`](sunburst_core::trace::TraceSink)
//! implementations and export helpers for development and post-mortem
//! analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`snapshot::export`] — writes the current arc tree as JSON.

pub mod pretty;
pub mod recorder;
pub mod snapshot;
