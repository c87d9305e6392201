// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine for hierarchical sunburst (multilevel ring) charts.
//!
//! `sunburst_core` turns a tree of weighted nodes plus a configuration into a
//! tree of positioned, styled annular sectors ("arcs"). It is `no_std`
//! compatible (with `alloc`), uses struct-of-arrays storage with generational
//! handles for the node tree, and re-derives incrementally: mutations mark
//! dirty channels, and a single evaluation pass re-runs only the stages they
//! invalidate.
//!
//! # Architecture
//!
//! ```text
//!   NodeStore / SunburstConfig mutations ──► dirty channels
//!                                                │
//!                 ┌──────────────────────────────┘
//!                 ▼
//!   Sunburst::evaluate()
//!       values ──► colors ──► arcs ──► layout
//!                                        │
//!                 ┌──────────────────────┘
//!                 ▼
//!   ArcTree + ArcChanges ──► ArcPresenter::apply()
//!                                 │
//!                 ┌───────────────┘
//!                 ▼
//!   Sunburst::tap() ──► selection / focus ──► dirty channels
//! ```
//!
//! **[`node`]** — Struct-of-arrays node tree with generational handles.
//! Names, values, colors, and content are set by the caller; computed
//! weights and colors are written by evaluation.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//! Every mutation marks the earliest derivation stage it invalidates.
//!
//! **[`config`]** — Calculation modes, sibling order, ring geometry, and
//! display caps.
//!
//! **[`value`]** — The four weight calculation modes and their validation.
//!
//! **[`colors`]** — Background color resolution.
//!
//! **[`arc`]** — The arc tree: building under focus, ring layout, and the
//! slot-keyed cache that keeps arc identity stable across passes.
//!
//! **[`evaluate`]** — The pass driver and [`ArcChanges`].
//!
//! **[`interaction`]** — Tap-driven select/focus state machine.
//!
//! **[`geometry`]** — Sector paths and label anchors via `kurbo`.
//!
//! **[`presenter`]** — The [`ArcPresenter`](presenter::ArcPresenter) trait
//! that rendering integrations implement.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! pass instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-arc
//!   change events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod arc;
pub mod chart;
pub mod colors;
pub mod config;
pub mod dirty;
pub mod error;
pub mod evaluate;
pub mod geometry;
pub mod interaction;
pub mod node;
pub mod presenter;
pub mod trace;
pub mod value;

pub use chart::Sunburst;
pub use config::{ArcMinimumAngle, CalculationMode, NodesSort, SunburstConfig};
pub use error::ConfigurationError;
pub use evaluate::{ArcChanges, Stage};
pub use interaction::TapOutcome;
