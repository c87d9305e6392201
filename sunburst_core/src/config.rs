// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.

/// How each node's weight (and therefore its angular width) is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CalculationMode {
    /// Values are ignored. Roots split the circle equally, and every node's
    /// children split their parent's share equally.
    #[default]
    OrdinalFromRoot,
    /// Values are ignored. Every leaf in the forest gets the same share; a
    /// parent's share is the sum of its leaves.
    OrdinalFromLeaves,
    /// Every node must have a value, which is used as-is. A parent may be
    /// larger than the sum of its children (incomplete data).
    ParentDependent {
        /// Optional upper bound for the sum of the root values; when set it
        /// is also the denominator for angular widths.
        total_value: Option<f64>,
    },
    /// Every leaf must have a value; a parent's weight is the sum of its
    /// children.
    ParentIndependent {
        /// Optional upper bound for the sum of the root values; when set it
        /// is also the denominator for angular widths.
        total_value: Option<f64>,
    },
}

impl CalculationMode {
    /// Returns the declared total for the value-based modes.
    #[must_use]
    pub const fn total_value(&self) -> Option<f64> {
        match *self {
            Self::ParentDependent { total_value } | Self::ParentIndependent { total_value } => {
                total_value
            }
            Self::OrdinalFromRoot | Self::OrdinalFromLeaves => None,
        }
    }
}

/// Sibling ordering applied by the arc builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodesSort {
    /// Keep caller order.
    #[default]
    None,
    /// Smaller weights first.
    Ascending,
    /// Larger weights first.
    Descending,
}

/// Treatment of arcs below a minimum angle.
///
/// Only [`ShowAll`](Self::ShowAll) affects layout today; the other variants
/// are stored and reported but do not group or hide anything.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ArcMinimumAngle {
    /// Show every arc.
    #[default]
    ShowAll,
    /// Group sibling arcs narrower than the threshold (degrees).
    Group {
        /// Threshold in degrees.
        if_less_than: f64,
    },
    /// Hide arcs narrower than the threshold (degrees).
    Hide {
        /// Threshold in degrees.
        if_less_than: f64,
    },
}

/// Display and layout parameters for one chart.
///
/// Lengths are in the host's drawing units. Every field has a matching setter
/// on [`Sunburst`](crate::Sunburst) that schedules only the work the change
/// requires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunburstConfig {
    /// Weight computation.
    pub calculation_mode: CalculationMode,
    /// Sibling ordering.
    pub nodes_sort: NodesSort,
    /// Gap between neighboring rings and between sibling arcs.
    pub margin_between_arcs: f64,
    /// Thickness of rings past the expanded cap.
    pub collapsed_arc_thickness: f64,
    /// Thickness of expanded rings.
    pub expanded_arc_thickness: f64,
    /// Radius of the central disc; the first ring starts here.
    pub inner_radius: f64,
    /// Degrees, measured clockwise from the top.
    pub starting_angle: f64,
    /// Minimum-angle policy.
    pub minimum_arc_angle_shown: ArcMinimumAngle,
    /// Rings at or past this displayed depth have zero thickness.
    pub maximum_rings_shown_count: Option<u32>,
    /// Rings at or past this displayed depth use the collapsed thickness.
    pub maximum_expanded_rings_shown_count: Option<u32>,
    /// Whether taps select and focus nodes. Focus only applies while this is
    /// set.
    pub allows_selection: bool,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            calculation_mode: CalculationMode::OrdinalFromRoot,
            nodes_sort: NodesSort::None,
            margin_between_arcs: 1.0,
            collapsed_arc_thickness: 8.0,
            expanded_arc_thickness: 60.0,
            inner_radius: 60.0,
            starting_angle: 0.0,
            minimum_arc_angle_shown: ArcMinimumAngle::ShowAll,
            maximum_rings_shown_count: None,
            maximum_expanded_rings_shown_count: None,
            allows_selection: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SunburstConfig::default();
        assert_eq!(config.calculation_mode, CalculationMode::OrdinalFromRoot);
        assert_eq!(config.nodes_sort, NodesSort::None);
        assert_eq!(config.margin_between_arcs, 1.0);
        assert_eq!(config.collapsed_arc_thickness, 8.0);
        assert_eq!(config.expanded_arc_thickness, 60.0);
        assert_eq!(config.inner_radius, 60.0);
        assert_eq!(config.maximum_rings_shown_count, None);
        assert!(config.allows_selection);
    }

    #[test]
    fn total_value_only_for_value_modes() {
        assert_eq!(CalculationMode::OrdinalFromLeaves.total_value(), None);
        assert_eq!(
            CalculationMode::ParentIndependent {
                total_value: Some(30.0)
            }
            .total_value(),
            Some(30.0)
        );
    }
}
