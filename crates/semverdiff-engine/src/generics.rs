//! Generic type parameter and constraint comparison
//!
//! Constraints are compared positionally, never by name: renaming a
//! parameter while keeping the same per-position constraints is not a
//! change.

use crate::context::CompareContext;
use semverdiff_core::{
    ComparisonResult, GenericConstraint, ItemRef, MessageEvent, Severity,
};
use std::collections::BTreeSet;

/// Compare the generic surface of a matched pair
///
/// Produces at most one result: an arity change is a single breaking
/// result, otherwise constraint additions and removals across all positions
/// aggregate into one result with the "added" wording dominant.
pub fn compare_generics(
    old_item: &ItemRef,
    new_item: &ItemRef,
    old_parameters: &[String],
    old_constraints: &[GenericConstraint],
    new_parameters: &[String],
    new_constraints: &[GenericConstraint],
    ctx: &CompareContext,
) -> Option<ComparisonResult> {
    if old_parameters.len() != new_parameters.len() {
        let detail = if new_parameters.len() > old_parameters.len() {
            let added: Vec<&str> = new_parameters
                .iter()
                .skip(old_parameters.len())
                .map(String::as_str)
                .collect();
            format!("has added the generic type parameters {}", added.join(", "))
        } else {
            let removed: Vec<&str> = old_parameters
                .iter()
                .skip(new_parameters.len())
                .map(String::as_str)
                .collect();
            format!("has removed the generic type parameters {}", removed.join(", "))
        };

        let message = ctx.format(new_item, MessageEvent::Changed, &detail);
        return Some(ComparisonResult::of(
            Severity::Breaking,
            old_item.clone(),
            new_item.clone(),
            message,
        ));
    }

    let mut added_tokens: BTreeSet<String> = BTreeSet::new();
    let mut removed_tokens: BTreeSet<String> = BTreeSet::new();

    for position in 0..old_parameters.len() {
        let old_set = constraints_at(old_constraints, position);
        let new_set = constraints_at(new_constraints, position);

        added_tokens.extend(new_set.difference(&old_set).cloned());
        removed_tokens.extend(old_set.difference(&new_set).cloned());
    }

    if !added_tokens.is_empty() {
        let detail = format!(
            "has added the generic constraints {}",
            added_tokens.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        let message = ctx.format(new_item, MessageEvent::Changed, &detail);
        return Some(ComparisonResult::of(
            Severity::Breaking,
            old_item.clone(),
            new_item.clone(),
            message,
        ));
    }

    if !removed_tokens.is_empty() {
        let detail = format!(
            "has removed the generic constraints {}",
            removed_tokens.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        let message = ctx.format(new_item, MessageEvent::Changed, &detail);
        return Some(ComparisonResult::of(
            Severity::Feature,
            old_item.clone(),
            new_item.clone(),
            message,
        ));
    }

    None
}

fn constraints_at(constraints: &[GenericConstraint], position: usize) -> BTreeSet<String> {
    constraints
        .iter()
        .find(|c| c.parameter_position == position)
        .map(|c| c.constraints.clone())
        .unwrap_or_default()
}
