// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-facing node descriptions.

use alloc::string::String;
use alloc::vec::Vec;

use super::id::ImageId;
use crate::colors::Color;

/// An immutable description of one entry in the input hierarchy.
///
/// `Node` is what callers build; [`NodeStore::insert`](super::NodeStore::insert)
/// turns a description (and its whole subtree) into live nodes and hands back
/// the [`NodeId`](super::NodeId) that identifies it from then on.
///
/// ```
/// use sunburst_core::node::Node;
///
/// let home = Node::new("Home")
///     .with_value(75.0)
///     .with_children([Node::new("Kitchen").with_value(20.0)]);
/// assert_eq!(home.children.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Display name.
    pub name: String,
    /// Optional weight; required by the value-based calculation modes.
    pub value: Option<f64>,
    /// Whether the name is drawn in the arc's label.
    pub show_name: bool,
    /// Optional image drawn in the arc's label.
    pub image: Option<ImageId>,
    /// Optional fill color; a neutral gray is used when absent.
    pub background_color: Option<Color>,
    /// Children in caller order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a leaf description with the given name and no value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            show_name: true,
            image: None,
            background_color: None,
            children: Vec::new(),
        }
    }

    /// Sets the value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets whether the name is drawn.
    #[must_use]
    pub fn with_show_name(mut self, show_name: bool) -> Self {
        self.show_name = show_name;
        self
    }

    /// Sets the image.
    #[must_use]
    pub fn with_image(mut self, image: ImageId) -> Self {
        self.image = Some(image);
        self
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Appends children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }
}
