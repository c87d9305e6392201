// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Sunburst uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! coalesce any number of node and configuration mutations into a single
//! derivation pass. Each channel names the earliest derivation stage a
//! mutation invalidates.
//!
//! # Stage restart rules
//!
//! Derivation runs as a fixed pipeline: values → colors → arcs → layout.
//! [`Sunburst::evaluate`](crate::Sunburst::evaluate) drains every channel and
//! restarts the pipeline at the earliest stage any drained channel names:
//!
//! - [`TOPOLOGY`] / [`VALUES`] — values (a child added or removed changes
//!   leaf counts and parent sums just like a value edit does).
//! - [`COLORS`] — colors.
//! - [`CONTENT`] / [`ARCS`] — arc builder (sorting, focus, text visibility).
//! - [`GEOMETRY`] — ring layout only.
//! - [`SELECTION`] — nothing is recomputed; the change is only reported.
//!
//! Later stages always follow an earlier one, so a partial restart produces
//! exactly the arcs a full pass would.
//!
//! # Keys
//!
//! Node-level mutations are marked under the node's raw slot index.
//! Chart-level configuration changes are marked under [`CHART`], which can
//! never collide with a slot index.

use understory_dirty::Channel;

/// Key used for chart-level (non-node) configuration marks.
pub const CHART: u32 = u32::MAX - 1;

/// Tree topology changed (node created, destroyed, attached, or detached).
pub const TOPOLOGY: Channel = Channel::new(0);

/// A node value or the calculation mode changed.
pub const VALUES: Channel = Channel::new(1);

/// A node background color changed.
pub const COLORS: Channel = Channel::new(2);

/// A node's name, image, or `show_name` flag changed.
pub const CONTENT: Channel = Channel::new(3);

/// Sorting, focus, or selection allowance changed.
pub const ARCS: Channel = Channel::new(4);

/// Ring geometry parameters changed (radii, thickness, margins, angles, caps).
pub const GEOMETRY: Channel = Channel::new(5);

/// The selected node changed.
pub const SELECTION: Channel = Channel::new(6);
