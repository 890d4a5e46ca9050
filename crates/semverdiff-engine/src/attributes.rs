//! Attribute usage diffing
//!
//! Ordinal arguments are an ordered sequence: any length or positional value
//! mismatch is breaking. Named arguments are a name-keyed mapping: a changed
//! value or a name dropped from the new version is breaking, while names
//! that only exist in the new version are not flagged. The two categories
//! are detected independently.

use crate::context::CompareContext;
use crate::evaluators::match_attributes;
use semverdiff_core::{
    ArgumentDefinition, ArgumentType, AttributeDefinition, ComparisonResult, Element, ItemKind,
    ItemRef, MessageEvent, Severity,
};

/// Diff the attribute collections of a matched element pair
pub fn compare_attribute_collections(
    old: &[AttributeDefinition],
    new: &[AttributeDefinition],
    owner: &ItemRef,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let old_selected: Vec<AttributeDefinition> = old
        .iter()
        .filter(|a| ctx.attribute_selected(a))
        .cloned()
        .collect();
    let new_selected: Vec<AttributeDefinition> = new
        .iter()
        .filter(|a| ctx.attribute_selected(a))
        .cloned()
        .collect();

    let mut results = Vec::new();
    let matches = match_attributes(&old_selected, &new_selected);

    for attribute in &matches.items_added {
        let item = attribute.item_ref();
        let detail = format!("has been added to {owner}");
        let message = ctx.format(&item, MessageEvent::Added, &detail);
        results.push(ComparisonResult::added(Severity::Feature, item, message));
    }

    for attribute in &matches.items_removed {
        let item = attribute.item_ref();
        let detail = format!("has been removed from {owner}");
        let message = ctx.format(&item, MessageEvent::Removed, &detail);
        results.push(ComparisonResult::removed(Severity::Breaking, item, message));
    }

    for pair in &matches.matching_items {
        results.extend(compare_arguments(pair.old_item, pair.new_item, owner, ctx));
    }

    results
}

fn compare_arguments(
    old: &AttributeDefinition,
    new: &AttributeDefinition,
    owner: &ItemRef,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let mut results = Vec::new();

    let old_ordinal: Vec<&ArgumentDefinition> = ordinal_arguments(old);
    let new_ordinal: Vec<&ArgumentDefinition> = ordinal_arguments(new);

    if old_ordinal.len() != new_ordinal.len() {
        let item = new.item_ref();
        let detail = format!(
            "on {owner} has changed the number of ordinal arguments from {} to {}",
            old_ordinal.len(),
            new_ordinal.len()
        );
        let message = ctx.format(&item, MessageEvent::Changed, &detail);
        results.push(ComparisonResult::of(
            Severity::Breaking,
            old.item_ref(),
            new.item_ref(),
            message,
        ));
    } else {
        for (old_arg, new_arg) in old_ordinal.iter().zip(&new_ordinal) {
            if old_arg.value != new_arg.value {
                let item = argument_ref(new_arg);
                let detail = format!(
                    "of {} on {owner} has changed the value from {} to {}",
                    new.name, old_arg.value, new_arg.value
                );
                let message = ctx.format(&item, MessageEvent::Changed, &detail);
                results.push(ComparisonResult::of(
                    Severity::Breaking,
                    argument_ref(old_arg),
                    item,
                    message,
                ));
            }
        }
    }

    for old_arg in named_arguments(old) {
        let name = old_arg.parameter_name.as_deref().unwrap_or_default();
        match named_arguments(new).into_iter().find(|a| a.parameter_name.as_deref() == Some(name)) {
            Some(new_arg) => {
                if old_arg.value != new_arg.value {
                    let item = argument_ref(new_arg);
                    let detail = format!(
                        "of {} on {owner} has changed the value from {} to {}",
                        new.name, old_arg.value, new_arg.value
                    );
                    let message = ctx.format(&item, MessageEvent::Changed, &detail);
                    results.push(ComparisonResult::of(
                        Severity::Breaking,
                        argument_ref(old_arg),
                        item,
                        message,
                    ));
                }
            }
            None => {
                let item = argument_ref(old_arg);
                let detail = format!("of {} on {owner} has been removed", old.name);
                let message = ctx.format(&item, MessageEvent::Removed, &detail);
                results.push(ComparisonResult::removed(Severity::Breaking, item, message));
            }
        }
    }

    results
}

fn ordinal_arguments(attribute: &AttributeDefinition) -> Vec<&ArgumentDefinition> {
    attribute
        .arguments
        .iter()
        .filter(|a| a.argument_type == ArgumentType::Ordinal)
        .collect()
}

fn named_arguments(attribute: &AttributeDefinition) -> Vec<&ArgumentDefinition> {
    attribute
        .arguments
        .iter()
        .filter(|a| a.argument_type == ArgumentType::Named)
        .collect()
}

fn argument_ref(argument: &ArgumentDefinition) -> ItemRef {
    let name = argument
        .parameter_name
        .clone()
        .unwrap_or_else(|| format!("argument {}", argument.ordinal_index));
    ItemRef::new(ItemKind::Argument, name.clone(), name)
}
