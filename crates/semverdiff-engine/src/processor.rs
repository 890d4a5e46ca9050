//! Collection drivers and the public calculator entry point

use std::collections::BTreeMap;

use tracing::debug;

use crate::context::CompareContext;
use crate::error::CompareError;
use crate::evaluators::{
    match_constructors, match_fields, match_methods, match_properties, match_types,
};
use crate::members::{
    compare_constructor_pair, compare_field_pair, compare_method_pair, compare_property_pair,
};
use crate::types::{compare_aggregate_pair, compare_enum_pair};
use semverdiff_core::{
    ComparerOptions, ComparisonOutcome, ComparisonResult, Element, MemberModifiers, MessageEvent,
    Severity, TypeDefinition, TypeKind,
};

/// Classifies the changes between two versions of a definition model
///
/// The calculator is pure: it holds only validated options and never
/// mutates its inputs.
#[derive(Debug)]
pub struct ChangeCalculator {
    ctx: CompareContext,
}

impl ChangeCalculator {
    /// Validate options and build a calculator
    pub fn new(options: ComparerOptions) -> Result<Self, CompareError> {
        Ok(Self {
            ctx: CompareContext::new(options)?,
        })
    }

    /// Compare two versions of a model and classify every change
    pub fn calculate(
        &self,
        old: &[TypeDefinition],
        new: &[TypeDefinition],
    ) -> Result<ComparisonOutcome, CompareError> {
        let results = compare_type_collections(old, new, &self.ctx)?;
        Ok(ComparisonOutcome::from_results(results))
    }
}

impl Default for ChangeCalculator {
    fn default() -> Self {
        // Default options always validate
        Self {
            ctx: CompareContext::new(ComparerOptions::default())
                .unwrap_or_else(|_| unreachable!("default options are valid")),
        }
    }
}

/// Fold partial declarations of the same type into one definition
///
/// Keyed by kind and full name; member collections concatenate, implemented
/// types union, child types merge recursively. The first declaration's
/// access and modifier flags win, matching how a compiler sees the merged
/// type.
pub fn merge_partial_types(types: &[TypeDefinition]) -> Vec<TypeDefinition> {
    let mut merged: Vec<TypeDefinition> = Vec::new();
    let mut index: BTreeMap<(TypeKind, String), usize> = BTreeMap::new();

    for declaration in types {
        let key = (declaration.kind, declaration.full_name.clone());
        match index.get(&key) {
            None => {
                index.insert(key, merged.len());
                merged.push(declaration.clone());
            }
            Some(&slot) => {
                let target = &mut merged[slot];
                target.fields.extend(declaration.fields.iter().cloned());
                target.properties.extend(declaration.properties.iter().cloned());
                target.methods.extend(declaration.methods.iter().cloned());
                target
                    .constructors
                    .extend(declaration.constructors.iter().cloned());
                target
                    .enum_members
                    .extend(declaration.enum_members.iter().cloned());
                target.attributes.extend(declaration.attributes.iter().cloned());
                target
                    .implemented_types
                    .extend(declaration.implemented_types.iter().cloned());
                target.child_types.extend(declaration.child_types.iter().cloned());
            }
        }
    }

    for declaration in &mut merged {
        declaration.child_types = merge_partial_types(&declaration.child_types);
    }

    merged
}

/// Match and compare one level of type collections
///
/// Aggregates and enums are separate matching families; a class and an enum
/// sharing a full name never pair.
fn compare_type_collections(
    old: &[TypeDefinition],
    new: &[TypeDefinition],
    ctx: &CompareContext,
) -> Result<Vec<ComparisonResult>, CompareError> {
    let old = merge_partial_types(old);
    let new = merge_partial_types(new);

    let family = |types: &[TypeDefinition], aggregate: bool| -> Vec<TypeDefinition> {
        types
            .iter()
            .filter(|t| t.kind.is_aggregate() == aggregate)
            .cloned()
            .collect()
    };

    let mut results = Vec::new();

    let old_aggregates = family(&old, true);
    let new_aggregates = family(&new, true);
    let matches = match_types(&old_aggregates, &new_aggregates);
    results.extend(report_unmatched(
        &matches.items_added,
        &matches.items_removed,
        |_| Severity::Feature,
        ctx,
    ));
    for pair in &matches.matching_items {
        let comparison = compare_aggregate_pair(pair.old_item, pair.new_item, ctx)?;
        results.extend(comparison.results);
        if comparison.descend {
            results.extend(compare_member_collections(pair.old_item, pair.new_item, ctx));
            results.extend(compare_type_collections(
                &pair.old_item.child_types,
                &pair.new_item.child_types,
                ctx,
            )?);
        }
    }

    let old_enums = family(&old, false);
    let new_enums = family(&new, false);
    let matches = match_types(&old_enums, &new_enums);
    results.extend(report_unmatched(
        &matches.items_added,
        &matches.items_removed,
        |_| Severity::Feature,
        ctx,
    ));
    for pair in &matches.matching_items {
        results.extend(compare_enum_pair(pair.old_item, pair.new_item, ctx));
    }

    Ok(results)
}

/// Compare every member collection of a matched aggregate pair
fn compare_member_collections(
    old: &TypeDefinition,
    new: &TypeDefinition,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let interface = new.kind == TypeKind::Interface;
    let mut results = Vec::new();

    let matches = match_fields(&old.fields, &new.fields);
    results.extend(report_unmatched(
        &matches.items_added,
        &matches.items_removed,
        |_| member_added_severity(interface, false),
        ctx,
    ));
    for pair in &matches.matching_items {
        results.extend(compare_field_pair(pair.old_item, pair.new_item, ctx));
    }

    let matches = match_properties(&old.properties, &new.properties);
    results.extend(report_unmatched(
        &matches.items_added,
        &matches.items_removed,
        |p| member_added_severity(interface, p.modifiers == MemberModifiers::Abstract),
        ctx,
    ));
    for pair in &matches.matching_items {
        results.extend(compare_property_pair(pair.old_item, pair.new_item, ctx));
    }

    let matches = match_methods(&old.methods, &new.methods);
    results.extend(report_unmatched(
        &matches.items_added,
        &matches.items_removed,
        |_| member_added_severity(interface, false),
        ctx,
    ));
    for pair in &matches.matching_items {
        results.extend(compare_method_pair(pair.old_item, pair.new_item, ctx));
    }

    let matches = match_constructors(&old.constructors, &new.constructors);
    results.extend(report_unmatched(
        &matches.items_added,
        &matches.items_removed,
        |_| Severity::Feature,
        ctx,
    ));
    for pair in &matches.matching_items {
        results.extend(compare_constructor_pair(pair.old_item, pair.new_item, ctx));
    }

    results
}

/// An addition a consumer must act on is breaking, not a feature: new
/// interface members and new abstract properties force implementers.
fn member_added_severity(interface_owner: bool, abstract_member: bool) -> Severity {
    if interface_owner || abstract_member {
        Severity::Breaking
    } else {
        Severity::Feature
    }
}

/// Emit results for unmatched items, gating on visibility
fn report_unmatched<T: Element>(
    added: &[&T],
    removed: &[&T],
    added_severity: impl Fn(&T) -> Severity,
    ctx: &CompareContext,
) -> Vec<ComparisonResult> {
    let mut results = Vec::new();

    for item in added {
        if !item.is_visible() {
            debug!(item = %item.item_ref(), "skipping invisible added item");
            continue;
        }
        let message = ctx.format(&item.item_ref(), MessageEvent::Added, "has been added");
        results.push(ComparisonResult::added(
            added_severity(item),
            item.item_ref(),
            message,
        ));
    }
    for item in removed {
        if !item.is_visible() {
            debug!(item = %item.item_ref(), "skipping invisible removed item");
            continue;
        }
        let message = ctx.format(&item.item_ref(), MessageEvent::Removed, "has been removed");
        results.push(ComparisonResult::removed(
            Severity::Breaking,
            item.item_ref(),
            message,
        ));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use semverdiff_core::{
        AccessModifiers, AttributeCompareMode, FieldDefinition, MethodDefinition,
        PropertyDefinition,
    };

    fn calculator() -> ChangeCalculator {
        ChangeCalculator::new(ComparerOptions::default()).unwrap()
    }

    fn class(name: &str) -> TypeDefinition {
        TypeDefinition::new(TypeKind::Class, "MyLib", name)
    }

    #[test]
    fn identical_models_produce_an_empty_outcome() {
        let model = vec![
            class("Widget")
                .with_fields(vec![FieldDefinition::new("Count", "int")])
                .with_methods(vec![MethodDefinition::new("Run", "void")]),
            TypeDefinition::new(TypeKind::Enum, "MyLib", "Color")
                .with_enum_members(vec![semverdiff_core::EnumMemberDefinition::new(
                    "Red", "1", 0,
                )]),
        ];

        let outcome = calculator().calculate(&model, &model).unwrap();
        assert_eq!(outcome.change_type, Severity::None);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn added_visible_type_is_a_feature() {
        let old = vec![class("Widget")];
        let new = vec![class("Widget"), class("Gadget")];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Feature);
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn removed_visible_type_is_breaking() {
        let old = vec![class("Widget"), class("Gadget")];
        let new = vec![class("Widget")];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Breaking);
    }

    #[test]
    fn invisible_additions_and_removals_are_dropped() {
        let old = vec![class("Hidden").with_access(AccessModifiers::Internal)];
        let new = vec![class("AlsoHidden").with_access(AccessModifiers::Internal)];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::None);
    }

    #[test]
    fn class_and_enum_of_the_same_name_never_pair() {
        let old = vec![class("Color")];
        let new = vec![TypeDefinition::new(TypeKind::Enum, "MyLib", "Color")];

        let outcome = calculator().calculate(&old, &new).unwrap();
        // One removal plus one addition, never a kind-change pair
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.change_type, Severity::Breaking);
    }

    #[test]
    fn added_interface_member_is_breaking() {
        let old = vec![TypeDefinition::new(TypeKind::Interface, "MyLib", "IWidget")];
        let new = vec![TypeDefinition::new(TypeKind::Interface, "MyLib", "IWidget")
            .with_methods(vec![MethodDefinition::new("Run", "void")])];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Breaking);
    }

    #[test]
    fn added_abstract_property_is_breaking() {
        let old = vec![class("Widget")];
        let new = vec![class("Widget").with_properties(vec![PropertyDefinition::new(
            "Name", "string",
        )
        .with_modifiers(MemberModifiers::Abstract)])];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Breaking);
    }

    #[test]
    fn added_class_method_is_a_feature() {
        let old = vec![class("Widget")];
        let new = vec![class("Widget").with_methods(vec![MethodDefinition::new("Run", "void")])];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Feature);
    }

    #[test]
    fn removed_visible_member_is_breaking() {
        let old = vec![class("Widget").with_methods(vec![MethodDefinition::new("Run", "void")])];
        let new = vec![class("Widget")];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Breaking);
    }

    #[test]
    fn overall_severity_is_the_maximum() {
        let old = vec![class("Widget")];
        let new = vec![
            class("Widget").with_methods(vec![MethodDefinition::new("Run", "void")]),
            class("Gadget"),
        ];
        // Two features
        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Feature);

        let new = vec![class("Widget").with_access(AccessModifiers::Internal)];
        // Feature additions would not mask this
        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Breaking);
    }

    #[test]
    fn partial_declarations_merge_before_matching() {
        let old = vec![class("Widget")
            .with_fields(vec![FieldDefinition::new("Count", "int")])
            .with_methods(vec![MethodDefinition::new("Run", "void")])];
        let new = vec![
            class("Widget").with_fields(vec![FieldDefinition::new("Count", "int")]),
            class("Widget").with_methods(vec![MethodDefinition::new("Run", "void")]),
        ];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::None);
    }

    #[test]
    fn merge_concatenates_members_and_unions_interfaces() {
        let declarations = vec![
            class("Widget")
                .with_fields(vec![FieldDefinition::new("Count", "int")])
                .with_implemented_types(["IDisposable"]),
            class("Widget")
                .with_methods(vec![MethodDefinition::new("Run", "void")])
                .with_implemented_types(["IDisposable", "ICloneable"]),
        ];

        let merged = merge_partial_types(&declarations);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].fields.len(), 1);
        assert_eq!(merged[0].methods.len(), 1);
        assert_eq!(merged[0].implemented_types.len(), 2);
    }

    #[test]
    fn nested_types_are_compared_within_their_parent() {
        let old = vec![class("Outer")
            .with_child_type(TypeDefinition::new(TypeKind::Class, "MyLib", "Inner"))];
        let new = vec![class("Outer").with_child_type(
            TypeDefinition::new(TypeKind::Class, "MyLib", "Inner")
                .with_methods(vec![MethodDefinition::new("Run", "void")]),
        )];

        let outcome = calculator().calculate(&old, &new).unwrap();
        assert_eq!(outcome.change_type, Severity::Feature);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].new_item.as_ref().unwrap().name, "Run");
    }

    #[test]
    fn kind_change_suppresses_member_comparisons() {
        let old = vec![class("Shape").with_methods(vec![MethodDefinition::new("Area", "double")])];
        let new = vec![TypeDefinition::new(TypeKind::Interface, "MyLib", "Shape")];

        let outcome = calculator().calculate(&old, &new).unwrap();
        // Only the kind change, never the method removal
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.change_type, Severity::Breaking);
    }

    #[test]
    fn invalid_options_fail_construction() {
        let options = ComparerOptions {
            compare_attributes: AttributeCompareMode::ByExpression,
            attribute_names_to_compare: Vec::new(),
            ..ComparerOptions::default()
        };

        let error = ChangeCalculator::new(options).unwrap_err();
        assert!(matches!(error, CompareError::InvalidArgument(_)));
    }
}
