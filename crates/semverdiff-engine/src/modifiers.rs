//! Modifier-set comparison over authored change tables
//!
//! The table decides the severity; the declared-modifier token text decides
//! the wording. Tokens outside the family (for example `sealed` when the
//! access family is being compared) never leak into the message.

use crate::change_tables::ChangeTable;
use crate::context::CompareContext;
use semverdiff_core::{ComparisonResult, ItemRef, MessageEvent, Severity};

/// Compare one modifier family on a matched pair
///
/// Returns `None` when the table classifies the transition as no change.
pub fn compare_modifiers<M: Copy>(
    old_item: &ItemRef,
    new_item: &ItemRef,
    old_value: M,
    new_value: M,
    old_declared: &str,
    new_declared: &str,
    table: &ChangeTable<M>,
    ctx: &CompareContext,
) -> Option<ComparisonResult> {
    let severity = table.severity(old_value, new_value);
    if severity == Severity::None {
        return None;
    }

    let old_tokens = project(old_declared, table.tokens);
    let new_tokens = project(new_declared, table.tokens);

    let added: Vec<&str> = new_tokens
        .iter()
        .filter(|t| !old_tokens.contains(t))
        .copied()
        .collect();
    let removed: Vec<&str> = old_tokens
        .iter()
        .filter(|t| !new_tokens.contains(t))
        .copied()
        .collect();

    let detail = if removed.is_empty() && !added.is_empty() {
        format!(
            "has added the {} {}",
            pluralize(table.label, added.len()),
            added.join(" ")
        )
    } else if added.is_empty() && !removed.is_empty() {
        format!(
            "has removed the {} {}",
            pluralize(table.label, removed.len()),
            removed.join(" ")
        )
    } else if !added.is_empty() || !removed.is_empty() {
        format!(
            "has changed the {} from {} to {}",
            pluralize(table.label, added.len() + removed.len()),
            old_tokens.join(" "),
            new_tokens.join(" ")
        )
    } else {
        // Table flagged a transition the raw text does not spell out
        format!("has changed the {}", table.label)
    };

    let message = ctx.format(new_item, MessageEvent::Changed, &detail);

    Some(ComparisonResult::of(
        severity,
        old_item.clone(),
        new_item.clone(),
        message,
    ))
}

/// Project declared modifier text onto the tokens a family owns
fn project<'a>(declared: &'a str, tokens: &[&'static str]) -> Vec<&'a str> {
    declared
        .split_whitespace()
        .filter(|word| tokens.contains(word))
        .collect()
}

fn pluralize(label: &str, count: usize) -> String {
    if count > 1 {
        format!("{label}s")
    } else {
        label.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_tables;
    use semverdiff_core::{
        AccessModifiers, ComparerOptions, Element, FieldDefinition, FieldModifiers,
    };

    fn ctx() -> CompareContext {
        CompareContext::new(ComparerOptions::default()).unwrap()
    }

    fn compare_access(
        old: &FieldDefinition,
        new: &FieldDefinition,
    ) -> Option<ComparisonResult> {
        compare_modifiers(
            &old.item_ref(),
            &new.item_ref(),
            old.access_modifiers,
            new.access_modifiers,
            &old.declared_modifiers,
            &new.declared_modifiers,
            &change_tables::access(),
            &ctx(),
        )
    }

    #[test]
    fn identical_modifiers_produce_nothing() {
        let old = FieldDefinition::new("Count", "int");
        let new = FieldDefinition::new("Count", "int");
        assert!(compare_access(&old, &new).is_none());
    }

    #[test]
    fn replacement_wording() {
        let old = FieldDefinition::new("Count", "int").with_access(AccessModifiers::Public);
        let new = FieldDefinition::new("Count", "int").with_access(AccessModifiers::Internal);

        let result = compare_access(&old, &new).unwrap();
        assert_eq!(result.change_type, Severity::Breaking);
        assert!(result.message.contains("has changed the access modifier from public to internal"));
    }

    #[test]
    fn irrelevant_tokens_are_projected_away() {
        let old = FieldDefinition::new("Count", "int")
            .with_access(AccessModifiers::Public)
            .with_declared_modifiers("public static");
        let new = FieldDefinition::new("Count", "int")
            .with_access(AccessModifiers::Internal)
            .with_declared_modifiers("internal static");

        let result = compare_access(&old, &new).unwrap();
        assert!(!result.message.contains("static"));
    }

    #[test]
    fn added_wording_and_pluralization() {
        let old = FieldDefinition::new("Count", "int").with_declared_modifiers("public");
        let new =
            FieldDefinition::new("Count", "int").with_declared_modifiers("public static readonly");

        let result = compare_modifiers(
            &old.item_ref(),
            &new.item_ref(),
            FieldModifiers::None,
            FieldModifiers::StaticReadOnly,
            &old.declared_modifiers,
            &new.declared_modifiers,
            &change_tables::field_modifiers(),
            &ctx(),
        )
        .unwrap();

        assert_eq!(result.change_type, Severity::Breaking);
        assert!(result.message.contains("has added the modifiers static readonly"));
    }

    #[test]
    fn removed_wording() {
        let old = FieldDefinition::new("Count", "int").with_declared_modifiers("public readonly");
        let new = FieldDefinition::new("Count", "int").with_declared_modifiers("public");

        let result = compare_modifiers(
            &old.item_ref(),
            &new.item_ref(),
            FieldModifiers::ReadOnly,
            FieldModifiers::None,
            &old.declared_modifiers,
            &new.declared_modifiers,
            &change_tables::field_modifiers(),
            &ctx(),
        )
        .unwrap();

        assert_eq!(result.change_type, Severity::Feature);
        assert!(result.message.contains("has removed the modifier readonly"));
    }
}
