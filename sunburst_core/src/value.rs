// Copyright 2026 the Sunburst Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node weight resolution.
//!
//! Every node reachable from a root gets a `computed_value` according to the
//! chart's [`CalculationMode`]. Validation runs over the whole forest before
//! anything is written, so a failed pass leaves the previous weights intact.

use crate::config::CalculationMode;
use crate::error::ConfigurationError;
use crate::node::{INVALID, NodeStore};

/// Share of the circle handed out by the ordinal modes.
pub const ORDINAL_TOTAL: f64 = 100.0;

/// Validates the forest against `mode` and writes `computed_value` for every
/// reachable node.
///
/// Returns the total used as the denominator for angular widths: the
/// declared total for the value-based modes when one is set, otherwise the
/// sum of the root weights.
pub(crate) fn resolve(
    store: &mut NodeStore,
    mode: &CalculationMode,
) -> Result<f64, ConfigurationError> {
    match *mode {
        CalculationMode::OrdinalFromRoot => {
            let count = store.roots.len();
            if count > 0 {
                let share = ORDINAL_TOTAL / count as f64;
                for i in 0..count {
                    let root = store.roots[i];
                    split_from_root(store, root, share);
                }
            }
        }
        CalculationMode::OrdinalFromLeaves => {
            let leaves: u32 = store
                .roots
                .iter()
                .map(|&root| count_leaves(store, root))
                .sum();
            if leaves > 0 {
                let share = ORDINAL_TOTAL / f64::from(leaves);
                for i in 0..store.roots.len() {
                    let root = store.roots[i];
                    sum_leaf_shares(store, root, share);
                }
            }
        }
        CalculationMode::ParentDependent { total_value } => {
            for &root in &store.roots {
                validate_every_node(store, root)?;
            }
            let sum: f64 = store
                .roots
                .iter()
                .map(|&root| store.value[root as usize].unwrap_or(0.0))
                .sum();
            check_total(total_value, sum)?;
            for i in 0..store.roots.len() {
                let root = store.roots[i];
                copy_values(store, root);
            }
        }
        CalculationMode::ParentIndependent { total_value } => {
            for &root in &store.roots {
                validate_leaves(store, root)?;
            }
            let sum: f64 = store
                .roots
                .iter()
                .map(|&root| leaf_value_sum(store, root))
                .sum();
            check_total(total_value, sum)?;
            for i in 0..store.roots.len() {
                let root = store.roots[i];
                sum_leaf_values(store, root);
            }
        }
    }

    Ok(total_nodes_value(store, mode))
}

/// Returns the denominator for angular widths under `mode`.
///
/// Only meaningful after [`resolve`] succeeded for the same mode.
pub(crate) fn total_nodes_value(store: &NodeStore, mode: &CalculationMode) -> f64 {
    mode.total_value().unwrap_or_else(|| root_sum(store))
}

fn root_sum(store: &NodeStore) -> f64 {
    store
        .roots
        .iter()
        .map(|&root| store.computed_value[root as usize])
        .sum()
}

/// Rejects a root sum above the declared total, before any weight is written.
fn check_total(total: Option<f64>, sum: f64) -> Result<(), ConfigurationError> {
    if let Some(total) = total {
        if sum > total {
            return Err(ConfigurationError::TotalValueExceeded { total, sum });
        }
    }
    Ok(())
}

fn check_value(store: &NodeStore, idx: u32, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidValue {
            node: store.handle(idx),
            value,
        })
    }
}

// -- Ordinal modes --

fn split_from_root(store: &mut NodeStore, idx: u32, share: f64) {
    store.computed_value[idx as usize] = share;

    let count = child_count(store, idx);
    if count == 0 {
        return;
    }
    let child_share = share / count as f64;
    let mut child = store.first_child[idx as usize];
    while child != INVALID {
        split_from_root(store, child, child_share);
        child = store.next_sibling[child as usize];
    }
}

fn count_leaves(store: &NodeStore, idx: u32) -> u32 {
    let mut child = store.first_child[idx as usize];
    if child == INVALID {
        return 1;
    }
    let mut leaves = 0;
    while child != INVALID {
        leaves += count_leaves(store, child);
        child = store.next_sibling[child as usize];
    }
    leaves
}

fn sum_leaf_shares(store: &mut NodeStore, idx: u32, share: f64) -> f64 {
    let mut child = store.first_child[idx as usize];
    let value = if child == INVALID {
        share
    } else {
        let mut sum = 0.0;
        while child != INVALID {
            sum += sum_leaf_shares(store, child, share);
            child = store.next_sibling[child as usize];
        }
        sum
    };
    store.computed_value[idx as usize] = value;
    value
}

// -- Value-based modes --

fn validate_every_node(store: &NodeStore, idx: u32) -> Result<(), ConfigurationError> {
    match store.value[idx as usize] {
        Some(value) => check_value(store, idx, value)?,
        None => {
            return Err(ConfigurationError::MissingValue {
                node: store.handle(idx),
            });
        }
    }
    let mut child = store.first_child[idx as usize];
    while child != INVALID {
        validate_every_node(store, child)?;
        child = store.next_sibling[child as usize];
    }
    Ok(())
}

fn validate_leaves(store: &NodeStore, idx: u32) -> Result<(), ConfigurationError> {
    let mut child = store.first_child[idx as usize];
    if child == INVALID {
        return match store.value[idx as usize] {
            Some(value) => check_value(store, idx, value),
            None => Err(ConfigurationError::MissingLeafValue {
                node: store.handle(idx),
            }),
        };
    }
    while child != INVALID {
        validate_leaves(store, child)?;
        child = store.next_sibling[child as usize];
    }
    Ok(())
}

fn copy_values(store: &mut NodeStore, idx: u32) {
    store.computed_value[idx as usize] = store.value[idx as usize].unwrap_or(0.0);
    let mut child = store.first_child[idx as usize];
    while child != INVALID {
        copy_values(store, child);
        child = store.next_sibling[child as usize];
    }
}

/// Read-only counterpart of [`sum_leaf_values`].
fn leaf_value_sum(store: &NodeStore, idx: u32) -> f64 {
    let mut child = store.first_child[idx as usize];
    if child == INVALID {
        return store.value[idx as usize].unwrap_or(0.0);
    }
    let mut sum = 0.0;
    while child != INVALID {
        sum += leaf_value_sum(store, child);
        child = store.next_sibling[child as usize];
    }
    sum
}

fn sum_leaf_values(store: &mut NodeStore, idx: u32) -> f64 {
    let mut child = store.first_child[idx as usize];
    let value = if child == INVALID {
        store.value[idx as usize].unwrap_or(0.0)
    } else {
        let mut sum = 0.0;
        while child != INVALID {
            sum += sum_leaf_values(store, child);
            child = store.next_sibling[child as usize];
        }
        sum
    };
    store.computed_value[idx as usize] = value;
    value
}

fn child_count(store: &NodeStore, idx: u32) -> usize {
    let mut count = 0;
    let mut child = store.first_child[idx as usize];
    while child != INVALID {
        count += 1;
        child = store.next_sibling[child as usize];
    }
    count
}
