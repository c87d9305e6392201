// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshot of a chart's arcs.
//!
//! [`to_json`] captures the arc tree of the last successful evaluation,
//! nested the way it is drawn, together with the selection and focus.
//! [`export`] writes the same document to a writer. Angles are in radians,
//! colors are `#rrggbbaa`.

use std::io::{self, Write};

use serde_json::{Value, json};

use sunburst_core::Sunburst;
use sunburst_core::arc::Arc;
use sunburst_core::colors::Color;
use sunburst_core::node::NodeId;

/// Builds a JSON document describing the chart's current arcs.
///
/// Does not evaluate; pending mutations are not reflected.
#[must_use]
pub fn to_json(chart: &Sunburst) -> Value {
    let tree = chart.arc_tree();
    let arcs: Vec<Value> = tree
        .roots()
        .iter()
        .filter_map(|&id| tree.get(id))
        .map(|arc| arc_json(chart, arc))
        .collect();
    json!({
        "total_value": tree.total_value(),
        "focused_level": tree.focused_level(),
        "selected": chart.selected_node().map(node_json),
        "focused": chart.focused_node().map(node_json),
        "arcs": arcs,
    })
}

/// Writes the [`to_json`] document, pretty-printed, to `writer`.
pub fn export(chart: &Sunburst, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &to_json(chart))?;
    writeln!(writer)
}

fn arc_json(chart: &Sunburst, arc: &Arc) -> Value {
    let nodes = chart.nodes();
    // Nodes destroyed since the last pass have no name or image left.
    let (name, image) = if nodes.is_alive(arc.id) {
        (Some(nodes.name(arc.id)), nodes.image(arc.id).map(|image| image.0))
    } else {
        (None, None)
    };
    let children: Vec<Value> = chart
        .arc_tree()
        .children(arc.id)
        .map(|child| arc_json(chart, child))
        .collect();
    json!({
        "node": node_json(arc.id),
        "name": name,
        "image": image,
        "level": arc.level,
        "width": arc.width,
        "start": arc.start,
        "end": arc.end,
        "inner_radius": arc.inner_radius,
        "outer_radius": arc.outer_radius,
        "inner_margin": arc.inner_margin,
        "outer_margin": arc.outer_margin,
        "background_color": color_hex(arc.background_color),
        "is_text_hidden": arc.is_text_hidden,
        "is_label_visible": arc.is_label_visible,
        "children": children,
    })
}

fn node_json(id: NodeId) -> String {
    id.to_string()
}

fn color_hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        rgba.r, rgba.g, rgba.b, rgba.a
    )
}
