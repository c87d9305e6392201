// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart: node store, configuration, interaction state, and arcs.

use crate::arc::ArcTree;
use crate::config::{ArcMinimumAngle, CalculationMode, NodesSort, SunburstConfig};
use crate::dirty;
use crate::error::ConfigurationError;
use crate::node::{Node, NodeId, NodeStore};

/// A sunburst chart.
///
/// `Sunburst` owns the node tree, the configuration, the selection and focus
/// state, and the arcs produced by the last evaluation. Mutations (through
/// the setters here or through [`nodes_mut`](Self::nodes_mut)) only mark
/// work as pending; [`evaluate`](Self::evaluate) coalesces everything marked
/// since the previous pass into a single derivation.
///
/// ```
/// use sunburst_core::node::Node;
/// use sunburst_core::{CalculationMode, Sunburst, SunburstConfig};
///
/// let mut chart = Sunburst::new(SunburstConfig {
///     calculation_mode: CalculationMode::ParentIndependent { total_value: None },
///     ..SunburstConfig::default()
/// });
/// chart.add_root_node(Node::new("Walking").with_value(10.0));
/// chart.add_root_node(Node::new("Home").with_value(30.0));
///
/// let arcs = chart.arcs().unwrap();
/// assert_eq!(arcs.len(), 2);
/// ```
#[derive(Debug)]
pub struct Sunburst {
    pub(crate) nodes: NodeStore,
    pub(crate) config: SunburstConfig,
    pub(crate) selected: Option<NodeId>,
    pub(crate) focused: Option<NodeId>,
    pub(crate) arcs: ArcTree,
    pub(crate) pass: u64,
    /// Selection as of the last successful pass.
    pub(crate) reported_selection: Option<NodeId>,
    /// Effective focus as of the last successful pass.
    pub(crate) reported_focus: Option<NodeId>,
}

impl Default for Sunburst {
    fn default() -> Self {
        Self::new(SunburstConfig::default())
    }
}

impl Sunburst {
    /// Creates an empty chart with the given configuration.
    #[must_use]
    pub fn new(config: SunburstConfig) -> Self {
        let mut nodes = NodeStore::new();
        nodes.mark(dirty::CHART, dirty::VALUES);
        Self {
            nodes,
            config,
            selected: None,
            focused: None,
            arcs: ArcTree::new(),
            pass: 0,
            reported_selection: None,
            reported_focus: None,
        }
    }

    /// Creates a chart whose roots are the given node descriptions.
    #[must_use]
    pub fn with_nodes(nodes: impl IntoIterator<Item = Node>, config: SunburstConfig) -> Self {
        let mut chart = Self::new(config);
        for node in nodes {
            chart.add_root_node(node);
        }
        chart
    }

    /// Materializes `node` and appends it as the last root.
    pub fn add_root_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.insert(node);
        self.nodes.add_root(id);
        id
    }

    /// Returns the node store.
    #[must_use]
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    /// Returns the node store for mutation.
    ///
    /// Every store mutation marks the work it requires.
    pub fn nodes_mut(&mut self) -> &mut NodeStore {
        &mut self.nodes
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SunburstConfig {
        &self.config
    }

    /// Replaces the whole configuration and schedules a full pass.
    pub fn set_config(&mut self, config: SunburstConfig) {
        self.config = config;
        self.nodes.mark(dirty::CHART, dirty::VALUES);
    }

    /// Returns whether mutations are waiting for an evaluation.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.nodes.pending
    }

    /// Returns the arcs, evaluating first if mutations are pending.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigurationError`] of the pending pass, if it fails.
    pub fn arcs(&mut self) -> Result<&ArcTree, ConfigurationError> {
        if self.nodes.pending {
            self.evaluate()?;
        }
        Ok(&self.arcs)
    }

    /// Returns the arcs of the last successful evaluation without deriving.
    #[must_use]
    pub fn arc_tree(&self) -> &ArcTree {
        &self.arcs
    }

    /// Returns the total used as the denominator for angular widths.
    ///
    /// Only valid after a successful evaluation.
    #[must_use]
    pub fn total_nodes_value(&self) -> f64 {
        self.arcs.total_value()
    }

    // -- Configuration setters --

    /// Sets the calculation mode.
    pub fn set_calculation_mode(&mut self, mode: CalculationMode) {
        self.config.calculation_mode = mode;
        self.nodes.mark(dirty::CHART, dirty::VALUES);
    }

    /// Sets the sibling order.
    pub fn set_nodes_sort(&mut self, sort: NodesSort) {
        self.config.nodes_sort = sort;
        self.nodes.mark(dirty::CHART, dirty::ARCS);
    }

    /// Sets the gap between rings and sibling arcs.
    pub fn set_margin_between_arcs(&mut self, margin: f64) {
        self.config.margin_between_arcs = margin;
        self.nodes.mark(dirty::CHART, dirty::GEOMETRY);
    }

    /// Sets the thickness of collapsed rings.
    pub fn set_collapsed_arc_thickness(&mut self, thickness: f64) {
        self.config.collapsed_arc_thickness = thickness;
        self.nodes.mark(dirty::CHART, dirty::GEOMETRY);
    }

    /// Sets the thickness of expanded rings.
    pub fn set_expanded_arc_thickness(&mut self, thickness: f64) {
        self.config.expanded_arc_thickness = thickness;
        self.nodes.mark(dirty::CHART, dirty::GEOMETRY);
    }

    /// Sets the radius of the central disc.
    pub fn set_inner_radius(&mut self, radius: f64) {
        self.config.inner_radius = radius;
        self.nodes.mark(dirty::CHART, dirty::GEOMETRY);
    }

    /// Sets the starting angle in degrees, clockwise from the top.
    pub fn set_starting_angle(&mut self, degrees: f64) {
        self.config.starting_angle = degrees;
        self.nodes.mark(dirty::CHART, dirty::GEOMETRY);
    }

    /// Sets the minimum-angle policy.
    pub fn set_minimum_arc_angle_shown(&mut self, policy: ArcMinimumAngle) {
        self.config.minimum_arc_angle_shown = policy;
        self.nodes.mark(dirty::CHART, dirty::GEOMETRY);
    }

    /// Sets the displayed depth at which rings get zero thickness.
    pub fn set_maximum_rings_shown_count(&mut self, count: Option<u32>) {
        self.config.maximum_rings_shown_count = count;
        self.nodes.mark(dirty::CHART, dirty::GEOMETRY);
    }

    /// Sets the displayed depth at which rings collapse.
    pub fn set_maximum_expanded_rings_shown_count(&mut self, count: Option<u32>) {
        self.config.maximum_expanded_rings_shown_count = count;
        self.nodes.mark(dirty::CHART, dirty::GEOMETRY);
    }

    /// Enables or disables selection and focus.
    ///
    /// Selection and focus are remembered while disabled but focus has no
    /// effect on layout until re-enabled.
    pub fn set_allows_selection(&mut self, allows: bool) {
        self.config.allows_selection = allows;
        self.nodes.mark(dirty::CHART, dirty::ARCS);
    }

    /// Returns the focus that layout honors: the focused node while
    /// selection is allowed.
    pub(crate) fn effective_focus(&self) -> Option<NodeId> {
        self.focused.filter(|_| self.config.allows_selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chart_has_a_pending_pass() {
        let mut chart = Sunburst::default();
        assert!(chart.has_pending_changes());
        let changes = chart.evaluate().unwrap();
        assert!(changes.derived.is_some());
        assert!(!chart.has_pending_changes());
        assert!(chart.arc_tree().is_empty());
    }

    #[test]
    fn setters_mark_pending() {
        let mut chart = Sunburst::default();
        chart.evaluate().unwrap();

        chart.set_inner_radius(10.0);
        assert!(chart.has_pending_changes());
        assert_eq!(chart.config().inner_radius, 10.0);
        chart.evaluate().unwrap();

        chart.set_nodes_sort(NodesSort::Descending);
        assert!(chart.has_pending_changes());
    }

    #[test]
    fn with_nodes_keeps_root_order() {
        let chart = Sunburst::with_nodes(
            [Node::new("a"), Node::new("b"), Node::new("c")],
            SunburstConfig::default(),
        );
        let names: alloc::vec::Vec<&str> = chart
            .nodes()
            .roots()
            .into_iter()
            .map(|id| chart.nodes().name(id))
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn arcs_evaluates_lazily() {
        let mut chart = Sunburst::with_nodes([Node::new("a")], SunburstConfig::default());
        assert!(chart.arc_tree().is_empty());
        assert_eq!(chart.arcs().unwrap().len(), 1);
        assert!(!chart.has_pending_changes());
    }
}
