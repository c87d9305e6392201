// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration validation errors.

use core::fmt;

use crate::node::NodeId;

/// Errors reported by [`Sunburst::evaluate`](crate::Sunburst::evaluate) when
/// the node tree and the calculation mode disagree.
///
/// These indicate inconsistent input rather than a runtime condition: the
/// pass is aborted, the previously evaluated arcs are kept, and every later
/// evaluation reports the same error until the input is fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigurationError {
    /// A node has no value under
    /// [`ParentDependent`](crate::CalculationMode::ParentDependent).
    MissingValue {
        /// The first offending node, in depth-first order.
        node: NodeId,
    },
    /// A leaf has no value under
    /// [`ParentIndependent`](crate::CalculationMode::ParentIndependent).
    MissingLeafValue {
        /// The first offending leaf, in depth-first order.
        node: NodeId,
    },
    /// The sum of the root values exceeds the declared total.
    TotalValueExceeded {
        /// The declared total.
        total: f64,
        /// The sum of the root values.
        sum: f64,
    },
    /// A value used by the calculation mode is negative, infinite, or NaN.
    InvalidValue {
        /// The offending node.
        node: NodeId,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue { node } => {
                write!(f, "node {node} has no value (required for every node)")
            }
            Self::MissingLeafValue { node } => {
                write!(f, "leaf {node} has no value (required for every leaf)")
            }
            Self::TotalValueExceeded { total, sum } => {
                write!(f, "root values sum to {sum}, exceeding the total of {total}")
            }
            Self::InvalidValue { node, value } => {
                write!(f, "node {node} has invalid value {value}")
            }
        }
    }
}

impl core::error::Error for ConfigurationError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::node::NodeStore;

    #[test]
    fn display_names_the_node() {
        let mut store = NodeStore::new();
        let id = store.create_node("a");
        let msg = ConfigurationError::MissingLeafValue { node: id }.to_string();
        assert_eq!(msg, "leaf #0.0 has no value (required for every leaf)");
    }

    #[test]
    fn display_total_exceeded() {
        let msg = ConfigurationError::TotalValueExceeded {
            total: 100.0,
            sum: 115.0,
        }
        .to_string();
        assert_eq!(msg, "root values sum to 115, exceeding the total of 100");
    }
}
