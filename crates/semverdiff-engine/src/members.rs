//! Per-kind member comparers
//!
//! Every element comparison runs the same pipeline: visibility gate, then
//! attribute diff plus the kind-specific stage. The stages are composed
//! functions, not an inheritance chain, so each is testable on its own.

use crate::attributes::compare_attribute_collections;
use crate::change_tables;
use crate::context::CompareContext;
use crate::evaluators::match_parameters;
use crate::generics::compare_generics;
use crate::modifiers::compare_modifiers;
use semverdiff_core::{
    AccessorType, ComparisonResult, ConstructorDefinition, Element, FieldDefinition, ItemKind,
    ItemRef, MessageEvent, MethodDefinition, ParameterDefinition, PropertyAccessorDefinition,
    PropertyDefinition, Severity,
};

/// Outcome of the visibility gate
enum Gate {
    /// Both sides invisible: nothing to report
    Skip,

    /// Exactly one side visible: this single result, no sub-comparisons
    Single(ComparisonResult),

    /// Both visible: run the full pipeline
    Proceed,
}

fn visibility_gate<T: Element>(old: &T, new: &T, ctx: &CompareContext) -> Gate {
    match (old.is_visible(), new.is_visible()) {
        (false, false) => Gate::Skip,
        (true, false) => {
            let message = ctx.format(
                &new.item_ref(),
                MessageEvent::Changed,
                "is no longer visible",
            );
            Gate::Single(ComparisonResult::of(
                Severity::Breaking,
                old.item_ref(),
                new.item_ref(),
                message,
            ))
        }
        (false, true) => {
            let message = ctx.format(&new.item_ref(), MessageEvent::Changed, "is now visible");
            Gate::Single(ComparisonResult::of(
                Severity::Feature,
                old.item_ref(),
                new.item_ref(),
                message,
            ))
        }
        (true, true) => Gate::Proceed,
    }
}

/// Run the standard element pipeline around a kind-specific stage
pub(crate) fn compare_element<T: Element>(
    old: &T,
    new: &T,
    ctx: &CompareContext,
    stage: impl FnOnce(&T, &T, &CompareContext) -> Vec<ComparisonResult>,
) -> Vec<ComparisonResult> {
    match visibility_gate(old, new, ctx) {
        Gate::Skip => Vec::new(),
        Gate::Single(result) => vec![result],
        Gate::Proceed => {
            let mut results = compare_attribute_collections(
                old.attributes(),
                new.attributes(),
                &new.item_ref(),
                ctx,
            );
            results.extend(stage(old, new, ctx));
            results
        }
    }
}

/// Compare a matched field pair
pub fn compare_field_pair(
    old: &FieldDefinition,
    new: &FieldDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    compare_element(old, new, ctx, |old, new, ctx| {
        let mut results = Vec::new();

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
        results.extend(compare_modifiers(
            &old.item_ref(),
            &new.item_ref(),
            old.modifiers,
            new.modifiers,
            &old.declared_modifiers,
            &new.declared_modifiers,
            &change_tables::field_modifiers(),
            ctx,
        ));
        results.extend(compare_return_type(
            &old.item_ref(),
            &new.item_ref(),
            &old.return_type,
            &new.return_type,
            ctx,
        ));

        results
    })
}

/// Compare a matched property pair, including its accessors
pub fn compare_property_pair(
    old: &PropertyDefinition,
    new: &PropertyDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    compare_element(old, new, ctx, |old, new, ctx| {
        let mut results = Vec::new();

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
        results.extend(compare_modifiers(
            &old.item_ref(),
            &new.item_ref(),
            old.modifiers,
            new.modifiers,
            &old.declared_modifiers,
            &new.declared_modifiers,
            &change_tables::property_modifiers(),
            ctx,
        ));
        results.extend(compare_return_type(
            &old.item_ref(),
            &new.item_ref(),
            &old.return_type,
            &new.return_type,
            ctx,
        ));

        results.extend(compare_accessor_slot(
            new,
            old.get_accessor.as_ref(),
            new.get_accessor.as_ref(),
            ctx,
        ));
        results.extend(compare_accessor_slot(
            new,
            old.set_accessor.as_ref(),
            new.set_accessor.as_ref(),
            ctx,
        ));

        results
    })
}

/// Compare one accessor slot (read or write) of a matched property pair
fn compare_accessor_slot(
    property: &PropertyDefinition,
    old: Option<&PropertyAccessorDefinition>,
    new: Option<&PropertyAccessorDefinition>,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let property_ref = property.item_ref();

    match (old, new) {
        (None, None) => Vec::new(),
        (Some(old_acc), None) => {
            if !old_acc.is_visible {
                return Vec::new();
            }
            let detail = format!("has removed the {} accessor", old_acc.accessor_type);
            let message = ctx.format(&property_ref, MessageEvent::Changed, &detail);
            vec![ComparisonResult::removed(
                Severity::Breaking,
                accessor_ref(property, old_acc),
                message,
            )]
        }
        (None, Some(new_acc)) => {
            if !new_acc.is_visible {
                return Vec::new();
            }
            let detail = format!("has added the {} accessor", new_acc.accessor_type);
            let message = ctx.format(&property_ref, MessageEvent::Changed, &detail);
            vec![ComparisonResult::added(
                Severity::Feature,
                accessor_ref(property, new_acc),
                message,
            )]
        }
        (Some(old_acc), Some(new_acc)) => {
            compare_accessor_pair(property, old_acc, new_acc, ctx)
        }
    }
}

fn compare_accessor_pair(
    property: &PropertyDefinition,
    old: &PropertyAccessorDefinition,
    new: &PropertyAccessorDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    match (old.is_visible, new.is_visible) {
        (false, false) => Vec::new(),
        (true, false) => {
            let message = ctx.format(
                &accessor_ref(property, new),
                MessageEvent::Changed,
                "is no longer visible",
            );
            vec![ComparisonResult::of(
                Severity::Breaking,
                accessor_ref(property, old),
                accessor_ref(property, new),
                message,
            )]
        }
        (false, true) => {
            let message = ctx.format(
                &accessor_ref(property, new),
                MessageEvent::Changed,
                "is now visible",
            );
            vec![ComparisonResult::of(
                Severity::Feature,
                accessor_ref(property, old),
                accessor_ref(property, new),
                message,
            )]
        }
        (true, true) => {
            let mut results = Vec::new();

            results.extend(compare_modifiers(
                &accessor_ref(property, old),
                &accessor_ref(property, new),
                old.access_modifiers,
                new.access_modifiers,
                &old.declared_modifiers,
                &new.declared_modifiers,
                &change_tables::accessor_access(),
                ctx,
            ));

            // Set <-> init: same purpose, different contract for callers
            if old.accessor_type != new.accessor_type {
                let severity = match (old.accessor_type, new.accessor_type) {
                    (AccessorType::Set, AccessorType::Init) => Severity::Breaking,
                    (AccessorType::Init, AccessorType::Set) => Severity::Feature,
                    _ => Severity::Breaking,
                };
                let detail = format!(
                    "has changed the write accessor from {} to {}",
                    old.accessor_type, new.accessor_type
                );
                let message = ctx.format(&property.item_ref(), MessageEvent::Changed, &detail);
                results.push(ComparisonResult::of(
                    severity,
                    accessor_ref(property, old),
                    accessor_ref(property, new),
                    message,
                ));
            }

            results
        }
    }
}

fn accessor_ref(property: &PropertyDefinition, accessor: &PropertyAccessorDefinition) -> ItemRef {
    ItemRef::new(
        ItemKind::PropertyAccessor,
        accessor.accessor_type.as_str(),
        format!("{}.{}", property.full_name, accessor.accessor_type),
    )
}

/// Compare a matched method pair
pub fn compare_method_pair(
    old: &MethodDefinition,
    new: &MethodDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    compare_element(old, new, ctx, |old, new, ctx| {
        let mut results = Vec::new();

        if old.name != new.name {
            let detail = format!("has been renamed from {} to {}", old.name, new.name);
            let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
            results.push(ComparisonResult::of(
                Severity::Breaking,
                old.item_ref(),
                new.item_ref(),
                message,
            ));
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
        results.extend(compare_modifiers(
            &old.item_ref(),
            &new.item_ref(),
            old.modifiers,
            new.modifiers,
            &old.declared_modifiers,
            &new.declared_modifiers,
            &change_tables::method_modifiers(),
            ctx,
        ));
        results.extend(compare_return_type(
            &old.item_ref(),
            &new.item_ref(),
            &old.return_type,
            &new.return_type,
            ctx,
        ));
        results.extend(compare_generics(
            &old.item_ref(),
            &new.item_ref(),
            &old.generic_type_parameters,
            &old.generic_constraints,
            &new.generic_type_parameters,
            &new.generic_constraints,
            ctx,
        ));
        results.extend(compare_parameter_lists(
            &new.item_ref(),
            &old.parameters,
            &new.parameters,
            ctx,
        ));

        results
    })
}

/// Compare a matched constructor pair
pub fn compare_constructor_pair(
    old: &ConstructorDefinition,
    new: &ConstructorDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    compare_element(old, new, ctx, |old, new, ctx| {
        compare_parameter_lists(&new.item_ref(), &old.parameters, &new.parameters, ctx)
    })
}

/// Match and compare two parameter lists
///
/// Any added parameter is breaking: every existing call site names or
/// positions too few arguments.
pub fn compare_parameter_lists(
    owner: &ItemRef,
    old: &[ParameterDefinition],
    new: &[ParameterDefinition],
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let mut results = Vec::new();
    let matches = match_parameters(old, new);

    for parameter in &matches.items_added {
        let detail = format!("has been added to {owner}");
        let message = ctx.format(&parameter.item_ref(), MessageEvent::Added, &detail);
        results.push(ComparisonResult::added(
            Severity::Breaking,
            parameter.item_ref(),
            message,
        ));
    }

    for parameter in &matches.items_removed {
        let detail = format!("has been removed from {owner}");
        let message = ctx.format(&parameter.item_ref(), MessageEvent::Removed, &detail);
        results.push(ComparisonResult::removed(
            Severity::Breaking,
            parameter.item_ref(),
            message,
        ));
    }

    for pair in &matches.matching_items {
        results.extend(compare_parameter_pair(owner, pair.old_item, pair.new_item, ctx));
    }

    results
}

fn compare_parameter_pair(
    owner: &ItemRef,
    old: &ParameterDefinition,
    new: &ParameterDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    compare_element(old, new, ctx, |old, new, ctx| {
        let mut results = Vec::new();

        if old.parameter_type != new.parameter_type {
            let detail = format!(
                "on {owner} has changed the declared type from {} to {}",
                old.parameter_type, new.parameter_type
            );
            let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
            results.push(ComparisonResult::of(
                Severity::Breaking,
                old.item_ref(),
                new.item_ref(),
                message,
            ));
        }

        // Renames break call sites that pass arguments by name
        if old.name != new.name {
            let detail = format!("on {owner} has been renamed from {} to {}", old.name, new.name);
            let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
            results.push(ComparisonResult::of(
                Severity::Breaking,
                old.item_ref(),
                new.item_ref(),
                message,
            ));
        }

        results.extend(compare_modifiers(
            &old.item_ref(),
            &new.item_ref(),
            old.modifiers,
            new.modifiers,
            &modifier_text(old.modifiers),
            &modifier_text(new.modifiers),
            &change_tables::parameter_modifiers(),
            ctx,
        ));

        match (&old.default_value, &new.default_value) {
            (None, Some(value)) => {
                let detail = format!("on {owner} has added the default value {value}");
                let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
                results.push(ComparisonResult::of(
                    Severity::Feature,
                    old.item_ref(),
                    new.item_ref(),
                    message,
                ));
            }
            (Some(value), None) => {
                let detail = format!("on {owner} has removed the default value {value}");
                let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
                results.push(ComparisonResult::of(
                    Severity::Breaking,
                    old.item_ref(),
                    new.item_ref(),
                    message,
                ));
            }
            (Some(old_value), Some(new_value)) if old_value != new_value => {
                let detail = format!(
                    "on {owner} has changed the default value from {old_value} to {new_value}"
                );
                let message = ctx.format(&new.item_ref(), MessageEvent::Changed, &detail);
                results.push(ComparisonResult::of(
                    Severity::Feature,
                    old.item_ref(),
                    new.item_ref(),
                    message,
                ));
            }
            _ => {}
        }

        results
    })
}

/// Parameter modifiers carry no declared text of their own in the model
fn modifier_text(modifiers: semverdiff_core::ParameterModifiers) -> String {
    use semverdiff_core::ParameterModifiers as P;
    match modifiers {
        P::None => String::new(),
        P::Ref => "ref".to_owned(),
        P::Out => "out".to_owned(),
        P::In => "in".to_owned(),
        P::Params => "params".to_owned(),
        P::This => "this".to_owned(),
    }
}

/// Shared return-type stage
fn compare_return_type(
    old_item: &ItemRef,
    new_item: &ItemRef,
    old_type: &str,
    new_type: &str,
    ctx: &CompareContext,
) -> Option<ComparisonResult> {
    if old_type == new_type {
        return None;
    }

    let detail = format!("has changed the return type from {old_type} to {new_type}");
    let message = ctx.format(new_item, MessageEvent::Changed, &detail);
    Some(ComparisonResult::of(
        Severity::Breaking,
        old_item.clone(),
        new_item.clone(),
        message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use semverdiff_core::{
        AccessModifiers, ComparerOptions, FieldModifiers, MemberModifiers, ParameterModifiers,
    };

    fn ctx() -> CompareContext {
        CompareContext::new(ComparerOptions::default()).unwrap()
    }

    #[test]
    fn identical_fields_produce_nothing() {
        let field = FieldDefinition::new("Count", "int");
        assert!(compare_field_pair(&field, &field.clone(), &ctx()).is_empty());
    }

    #[test]
    fn both_invisible_produces_nothing() {
        let old = FieldDefinition::new("Count", "int").with_access(AccessModifiers::Private);
        let new = FieldDefinition::new("Count", "long").with_access(AccessModifiers::Internal);

        assert!(compare_field_pair(&old, &new, &ctx()).is_empty());
    }

    #[test]
    fn visibility_lost_is_a_single_breaking_result() {
        let old = FieldDefinition::new("Count", "int").with_access(AccessModifiers::Public);
        // Type also changed, but the gate stops all sub-comparisons
        let new = FieldDefinition::new("Count", "long").with_access(AccessModifiers::Private);

        let results = compare_field_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Breaking);
        assert!(results[0].message.contains("is no longer visible"));
    }

    #[test]
    fn visibility_gained_is_a_single_feature_result() {
        let old = FieldDefinition::new("Count", "int").with_access(AccessModifiers::Private);
        let new = FieldDefinition::new("Count", "int").with_access(AccessModifiers::Public);

        let results = compare_field_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Feature);
    }

    #[test]
    fn field_modifier_scenarios() {
        let old = FieldDefinition::new("Count", "int").with_declared_modifiers("public");
        let new = FieldDefinition::new("Count", "int")
            .with_modifiers(FieldModifiers::ReadOnly)
            .with_declared_modifiers("public readonly");

        let results = compare_field_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Breaking);

        let results = compare_field_pair(&new, &old, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Feature);
    }

    #[test]
    fn field_type_change_is_breaking() {
        let old = FieldDefinition::new("Count", "int");
        let new = FieldDefinition::new("Count", "long");

        let results = compare_field_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("from int to long"));
    }

    #[test]
    fn set_to_init_is_breaking() {
        let old = PropertyDefinition::new("Name", "string");
        let new = PropertyDefinition::new("Name", "string").with_accessors(
            Some(PropertyAccessorDefinition::new(AccessorType::Get)),
            Some(PropertyAccessorDefinition::new(AccessorType::Init)),
        );

        let results = compare_property_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Breaking);
        assert!(results[0].message.contains("write accessor from set to init"));
    }

    #[test]
    fn init_to_set_is_a_feature() {
        let old = PropertyDefinition::new("Name", "string").with_accessors(
            Some(PropertyAccessorDefinition::new(AccessorType::Get)),
            Some(PropertyAccessorDefinition::new(AccessorType::Init)),
        );
        let new = PropertyDefinition::new("Name", "string");

        let results = compare_property_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Feature);
    }

    #[test]
    fn removed_setter_is_breaking() {
        let old = PropertyDefinition::new("Name", "string");
        let new = PropertyDefinition::new("Name", "string")
            .with_accessors(Some(PropertyAccessorDefinition::new(AccessorType::Get)), None);

        let results = compare_property_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Breaking);
        assert!(results[0].message.contains("has removed the set accessor"));
    }

    #[test]
    fn added_setter_is_a_feature() {
        let old = PropertyDefinition::new("Name", "string")
            .with_accessors(Some(PropertyAccessorDefinition::new(AccessorType::Get)), None);
        let new = PropertyDefinition::new("Name", "string");

        let results = compare_property_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Feature);
    }

    #[test]
    fn invisible_setter_narrowing_is_gated() {
        let old = PropertyDefinition::new("Name", "string");
        let narrowed = PropertyAccessorDefinition::new(AccessorType::Set)
            .with_access(AccessModifiers::Private);
        let new = PropertyDefinition::new("Name", "string").with_accessors(
            Some(PropertyAccessorDefinition::new(AccessorType::Get)),
            Some(narrowed),
        );

        let results = compare_property_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Breaking);
        assert!(results[0].message.contains("is no longer visible"));
    }

    #[test]
    fn method_virtual_added_is_a_feature() {
        let old = MethodDefinition::new("Run", "void").with_declared_modifiers("public");
        let new = MethodDefinition::new("Run", "void")
            .with_modifiers(MemberModifiers::Virtual)
            .with_declared_modifiers("public virtual");

        let results = compare_method_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Feature);
        assert!(results[0].message.contains("has added the modifier virtual"));
    }

    #[test]
    fn renamed_method_is_breaking() {
        let old = MethodDefinition::new("OldName", "void");
        let new = MethodDefinition::new("NewName", "void");

        let results = compare_method_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("renamed from OldName to NewName"));
    }

    #[test]
    fn added_parameter_is_breaking() {
        let owner = ItemRef::new(ItemKind::Method, "Run", "MyLib.Runner.Run");
        let old: Vec<ParameterDefinition> = Vec::new();
        let new = vec![ParameterDefinition::new("count", "int", 0)];

        let results = compare_parameter_lists(&owner, &old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Breaking);
        assert!(results[0].message.contains("has been added"));
    }

    #[test]
    fn parameter_type_change_is_breaking() {
        let owner = ItemRef::new(ItemKind::Method, "Run", "MyLib.Runner.Run");
        let old = vec![ParameterDefinition::new("count", "int", 0)];
        let new = vec![ParameterDefinition::new("count", "long", 0)];

        let results = compare_parameter_lists(&owner, &old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("from int to long"));
    }

    #[test]
    fn parameter_default_value_rules() {
        let owner = ItemRef::new(ItemKind::Method, "Run", "MyLib.Runner.Run");
        let plain = vec![ParameterDefinition::new("count", "int", 0)];
        let defaulted = vec![ParameterDefinition::new("count", "int", 0).with_default_value("1")];

        let results = compare_parameter_lists(&owner, &plain, &defaulted, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Feature);

        let results = compare_parameter_lists(&owner, &defaulted, &plain, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Breaking);
    }

    #[test]
    fn parameter_params_modifier_is_a_feature() {
        let owner = ItemRef::new(ItemKind::Method, "Run", "MyLib.Runner.Run");
        let old = vec![ParameterDefinition::new("values", "int[]", 0)];
        let new = vec![ParameterDefinition::new("values", "int[]", 0)
            .with_modifiers(ParameterModifiers::Params)];

        let results = compare_parameter_lists(&owner, &old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Feature);
    }

    #[test]
    fn constructor_parameter_change_is_reported() {
        let old = ConstructorDefinition::new("Runner")
            .with_parameters(vec![ParameterDefinition::new("count", "int", 0)]);
        let new = ConstructorDefinition::new("Runner")
            .with_parameters(vec![ParameterDefinition::new("count", "long", 0)]);

        let results = compare_constructor_pair(&old, &new, &ctx());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].change_type, Severity::Breaking);
    }
}
