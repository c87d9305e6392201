// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input node tree.
//!
//! Callers describe their hierarchy with [`Node`] values and hand them to a
//! [`NodeStore`], which owns the live tree from then on. Every live node is
//! addressed by a generational [`NodeId`].

mod desc;
mod id;
mod store;
mod traverse;

pub use desc::Node;
pub use id::{INVALID, ImageId, NodeId};
pub use store::NodeStore;
pub(crate) use traverse::ChildSlots;
pub use traverse::Children;
