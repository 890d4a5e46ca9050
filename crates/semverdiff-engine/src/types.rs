//! Type-level comparers: the aggregate family (class / interface / struct)
//! and the enum comparer

use std::collections::BTreeSet;

use crate::attributes::compare_attribute_collections;
use crate::change_tables;
use crate::context::CompareContext;
use crate::error::CompareError;
use crate::evaluators::match_enum_members;
use crate::generics::compare_generics;
use crate::modifiers::compare_modifiers;
use semverdiff_core::{
    ComparisonResult, Element, EnumMemberDefinition, ItemKind, ItemRef, MessageEvent, Severity,
    TypeDefinition, TypeKind,
};

/// What a type-level comparison produced, and whether the caller should
/// descend into the pair's member and child-type collections
#[derive(Debug)]
pub struct TypeComparison {
    pub results: Vec<ComparisonResult>,
    pub descend: bool,
}

impl TypeComparison {
    fn stop(results: Vec<ComparisonResult>) -> Self {
        Self { results, descend: false }
    }

    fn descend(results: Vec<ComparisonResult>) -> Self {
        Self { results, descend: true }
    }
}

/// Compare a matched pair from the aggregate family
///
/// Enums never arrive here through normal matching; a direct call with one
/// is a caller bug and fails fast.
pub fn compare_aggregate_pair(
    old: &TypeDefinition,
    new: &TypeDefinition,
    ctx: &CompareContext,
) -> Result<TypeComparison, CompareError> {
    for side in [old, new] {
        if !side.kind.is_aggregate() {
            return Err(CompareError::UnsupportedKind {
                kind: side.kind.item_kind(),
                full_name: side.full_name.clone(),
            });
        }
    }

    match (old.is_visible, new.is_visible) {
        (false, false) => return Ok(TypeComparison::stop(Vec::new())),
        (true, false) => {
            let message = ctx.format(
                &new.item_ref(),
                MessageEvent::Changed,
                "is no longer visible",
            );
            return Ok(TypeComparison::stop(vec![ComparisonResult::of(
                Severity::Breaking,
                old.item_ref(),
                new.item_ref(),
                message,
            )]));
        }
        (false, true) => {
            let message = ctx.format(&new.item_ref(), MessageEvent::Changed, "is now visible");
            return Ok(TypeComparison::stop(vec![ComparisonResult::of(
                Severity::Feature,
                old.item_ref(),
                new.item_ref(),
                message,
            )]));
        }
        (true, true) => {}
    }

    let mut results =
        compare_attribute_collections(&old.attributes, &new.attributes, &new.item_ref(), ctx);

    if old.kind != new.kind {
        let detail = format!(
            "has changed the kind from {} to {}",
            old.kind.item_kind(),
            new.kind.item_kind()
        );
        let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
        results.push(ComparisonResult::of(
            Severity::Breaking,
            old.item_ref(),
            new.item_ref(),
            message,
        ));
        // A kind change invalidates every member comparison below it
        return Ok(TypeComparison::stop(results));
    }

    results.extend(compare_modifiers(
        &old.item_ref(),
        &new.item_ref(),
        old.access_modifiers,
        new.access_modifiers,
        &old.declared_modifiers,
        &new.declared_modifiers,
        &change_tables::access(),
        ctx,
    ));

    match old.kind {
        TypeKind::Class => {
            results.extend(compare_modifiers(
                &old.item_ref(),
                &new.item_ref(),
                old.class_modifiers,
                new.class_modifiers,
                &old.declared_modifiers,
                &new.declared_modifiers,
                &change_tables::class_modifiers(),
                ctx,
            ));
        }
        TypeKind::Struct => {
            results.extend(compare_modifiers(
                &old.item_ref(),
                &new.item_ref(),
                old.struct_modifiers,
                new.struct_modifiers,
                &old.declared_modifiers,
                &new.declared_modifiers,
                &change_tables::struct_modifiers(),
                ctx,
            ));
        }
        TypeKind::Interface | TypeKind::Enum => {}
    }

    results.extend(compare_generics(
        &old.item_ref(),
        &new.item_ref(),
        &old.generic_type_parameters,
        &old.generic_constraints,
        &new.generic_type_parameters,
        &new.generic_constraints,
        ctx,
    ));
    results.extend(compare_implemented_types(old, new, ctx));

    Ok(TypeComparison::descend(results))
}

/// Diff the implemented/inherited type lists of a matched pair
///
/// A new entry on an interface forces work onto every implementer, so it is
/// breaking there and a feature everywhere else.
fn compare_implemented_types(
    old: &TypeDefinition,
    new: &TypeDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let mut results = Vec::new();

    let added: BTreeSet<&String> = new.implemented_types.difference(&old.implemented_types).collect();
    let removed: BTreeSet<&String> = old.implemented_types.difference(&new.implemented_types).collect();

    let added_severity = match new.kind {
        TypeKind::Interface => Severity::Breaking,
        _ => Severity::Feature,
    };

    for name in added {
        let detail = format!("has added the implemented type {name}");
        let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
        results.push(ComparisonResult::of(
            added_severity,
            old.item_ref(),
            new.item_ref(),
            message,
        ));
    }
    for name in removed {
        let detail = format!("has removed the implemented type {name}");
        let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
        results.push(ComparisonResult::of(
            Severity::Breaking,
            old.item_ref(),
            new.item_ref(),
            message,
        ));
    }

    results
}

/// Compare a matched enum pair
pub fn compare_enum_pair(
    old: &TypeDefinition,
    new: &TypeDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    match (old.is_visible, new.is_visible) {
        (false, false) => return Vec::new(),
        (true, false) => {
            let message = ctx.format(
                &new.item_ref(),
                MessageEvent::Changed,
                "is no longer visible",
            );
            return vec![ComparisonResult::of(
                Severity::Breaking,
                old.item_ref(),
                new.item_ref(),
                message,
            )];
        }
        (false, true) => {
            let message = ctx.format(&new.item_ref(), MessageEvent::Changed, "is now visible");
            return vec![ComparisonResult::of(
                Severity::Feature,
                old.item_ref(),
                new.item_ref(),
                message,
            )];
        }
        (true, true) => {}
    }

    let mut results =
        compare_attribute_collections(&old.attributes, &new.attributes, &new.item_ref(), ctx);

    results.extend(compare_modifiers(
        &old.item_ref(),
        &new.item_ref(),
        old.access_modifiers,
        new.access_modifiers,
        &old.declared_modifiers,
        &new.declared_modifiers,
        &change_tables::enum_access(),
        ctx,
    ));

    if old.underlying_type != new.underlying_type {
        let detail = format!(
            "has changed the underlying type from {} to {}",
            old.underlying_type.as_deref().unwrap_or("int"),
            new.underlying_type.as_deref().unwrap_or("int"),
        );
        let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
        results.push(ComparisonResult::of(
            Severity::Breaking,
            old.item_ref(),
            new.item_ref(),
            message,
        ));
    }

    results.extend(compare_enum_members(old, new, ctx));
    results
}

fn compare_enum_members(
    old: &TypeDefinition,
    new: &TypeDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let mut results = Vec::new();
    let matches = match_enum_members(&old.enum_members, &new.enum_members);

    for member in &matches.items_added {
        let detail = format!("has been added to {}", new.item_ref());
        let message = ctx.format(&member_ref(new, member), MessageEvent::Added, &detail);
        results.push(ComparisonResult::added(
            Severity::Feature,
            member_ref(new, member),
            message,
        ));
    }
    for member in &matches.items_removed {
        let detail = format!("has been removed from {}", new.item_ref());
        let message = ctx.format(&member_ref(old, member), MessageEvent::Removed, &detail);
        results.push(ComparisonResult::removed(
            Severity::Breaking,
            member_ref(old, member),
            message,
        ));
    }

    for pair in &matches.matching_items {
        results.extend(compare_enum_member_pair(old, new, pair.old_item, pair.new_item, ctx));
    }

    results
}

fn compare_enum_member_pair(
    old_owner: &TypeDefinition,
    new_owner: &TypeDefinition,
    old: &EnumMemberDefinition,
    new: &EnumMemberDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let mut results = Vec::new();

    if old.name != new.name {
        let detail = format!("has been renamed from {} to {}", old.name, new.name);
        let message = ctx.format(&member_ref(new_owner, new), MessageEvent::Changed, &detail);
        results.push(ComparisonResult::of(
            Severity::Breaking,
            member_ref(old_owner, old),
            member_ref(new_owner, new),
            message,
        ));
    }

    match (old.is_implicit(), new.is_implicit()) {
        (true, true) => {
            // Implicit values are assigned by position, so the position is
            // the value
            if old.index != new.index {
                let detail = format!(
                    "has moved from position {} to position {}",
                    old.index, new.index
                );
                let message =
                    ctx.format(&member_ref(new_owner, new), MessageEvent::Changed, &detail);
                results.push(ComparisonResult::of(
                    Severity::Breaking,
                    member_ref(old_owner, old),
                    member_ref(new_owner, new),
                    message,
                ));
            }
        }
        (false, false) => {
            if !flag_values_equivalent(&old.value, &new.value) {
                let detail = format!(
                    "has changed the value from {} to {}",
                    old.value, new.value
                );
                let message =
                    ctx.format(&member_ref(new_owner, new), MessageEvent::Changed, &detail);
                results.push(ComparisonResult::of(
                    Severity::Breaking,
                    member_ref(old_owner, old),
                    member_ref(new_owner, new),
                    message,
                ));
            }
        }
        _ => {
            let detail = if new.is_implicit() {
                format!("has dropped the explicit value {}", old.value)
            } else {
                format!("has gained the explicit value {}", new.value)
            };
            let message = ctx.format(&member_ref(new_owner, new), MessageEvent::Changed, &detail);
            results.push(ComparisonResult::of(
                Severity::Breaking,
                member_ref(old_owner, old),
                member_ref(new_owner, new),
                message,
            ));
        }
    }

    results
}

/// Explicit enum values are compared as flag sets: `A | B` and `B|A` are the
/// same value
fn flag_values_equivalent(old: &str, new: &str) -> bool {
    let tokens = |value: &str| -> BTreeSet<String> {
        value.split('|').map(|t| t.trim().to_owned()).collect()
    };
    tokens(old) == tokens(new)
}

fn member_ref(owner: &TypeDefinition, member: &EnumMemberDefinition) -> ItemRef {
    ItemRef::new(
        ItemKind::EnumMember,
        &member.name,
        format!("{}.{}", owner.full_name, member.name),
    )
}
