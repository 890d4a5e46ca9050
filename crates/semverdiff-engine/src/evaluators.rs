//! Identity policies: how each element kind is paired across versions
//!
//! Each evaluator applies its matching tiers in priority order; every tier
//! operates on the remainder left by the previous one.

use crate::match_agent::{MatchAgent, MatchResults};
use semverdiff_core::{
    AttributeDefinition, ConstructorDefinition, ConstructorModifiers, EnumMemberDefinition,
    FieldDefinition, MethodDefinition, ParameterDefinition, PropertyDefinition, TypeDefinition,
};

/// Match attributes by name, blind to the conventional "Attribute" suffix
pub fn match_attributes<'a>(
    old: &'a [AttributeDefinition],
    new: &'a [AttributeDefinition],
) -> MatchResults<'a, AttributeDefinition> {
    let mut agent = MatchAgent::new(old, new);
    agent.match_on(|o, n| o.bare_name() == n.bare_name());
    agent.into_results()
}

/// Match fields by exact name
pub fn match_fields<'a>(
    old: &'a [FieldDefinition],
    new: &'a [FieldDefinition],
) -> MatchResults<'a, FieldDefinition> {
    let mut agent = MatchAgent::new(old, new);
    agent.match_on(|o, n| o.name == n.name);
    agent.into_results()
}

/// Match properties by exact name
pub fn match_properties<'a>(
    old: &'a [PropertyDefinition],
    new: &'a [PropertyDefinition],
) -> MatchResults<'a, PropertyDefinition> {
    let mut agent = MatchAgent::new(old, new);
    agent.match_on(|o, n| o.name == n.name);
    agent.into_results()
}

/// Match parameters by name, then by declared position
pub fn match_parameters<'a>(
    old: &'a [ParameterDefinition],
    new: &'a [ParameterDefinition],
) -> MatchResults<'a, ParameterDefinition> {
    let mut agent = MatchAgent::new(old, new);
    agent.match_on(|o, n| o.name == n.name);
    agent.match_on(|o, n| o.declared_index == n.declared_index);
    agent.into_results()
}

/// Match enum members by index, then name, then raw value text
pub fn match_enum_members<'a>(
    old: &'a [EnumMemberDefinition],
    new: &'a [EnumMemberDefinition],
) -> MatchResults<'a, EnumMemberDefinition> {
    let mut agent = MatchAgent::new(old, new);
    agent.match_on(|o, n| o.index == n.index);
    agent.match_on(|o, n| o.name == n.name);
    agent.match_on(|o, n| !o.value.is_empty() && o.value == n.value);
    agent.into_results()
}

/// Match methods across three tiers of decreasing strictness
///
/// 1. name + generic arity + exact parameter types (disambiguates overloads)
/// 2. name + generic arity + parameter count (type change on an otherwise
///    unique overload)
/// 3. generic arity + exact parameter types ignoring the name (rename -
///    only fires when unambiguous on both sides)
pub fn match_methods<'a>(
    old: &'a [MethodDefinition],
    new: &'a [MethodDefinition],
) -> MatchResults<'a, MethodDefinition> {
    let mut agent = MatchAgent::new(old, new);
    agent.match_on(|o, n| {
        o.name == n.name
            && o.generic_arity() == n.generic_arity()
            && o.parameter_types() == n.parameter_types()
    });
    agent.match_on(|o, n| {
        o.name == n.name
            && o.generic_arity() == n.generic_arity()
            && o.parameters.len() == n.parameters.len()
    });
    agent.match_on(|o, n| {
        o.generic_arity() == n.generic_arity() && o.parameter_types() == n.parameter_types()
    });
    agent.into_results()
}

/// Match constructors by modifier kind and parameter shape
///
/// Constructors carry no usable name, so identity is the static/instance
/// split plus the parameter list. Every type implicitly has a parameterless
/// constructor, so one that appears or disappears alone - with no sibling of
/// the same modifier kind changing in parallel - is not reported at all.
pub fn match_constructors<'a>(
    old: &'a [ConstructorDefinition],
    new: &'a [ConstructorDefinition],
) -> MatchResults<'a, ConstructorDefinition> {
    let mut agent = MatchAgent::new(old, new);
    agent.match_on(|o, n| o.modifiers == n.modifiers && o.parameter_types() == n.parameter_types());
    agent.match_on(|o, n| o.modifiers == n.modifiers && o.parameters.len() == n.parameters.len());

    let mut results = agent.into_results();
    suppress_implicit_constructor(&mut results, ConstructorModifiers::None);
    suppress_implicit_constructor(&mut results, ConstructorModifiers::Static);
    results
}

fn suppress_implicit_constructor(
    results: &mut MatchResults<'_, ConstructorDefinition>,
    kind: ConstructorModifiers,
) {
    let added_of_kind: Vec<usize> = results
        .items_added
        .iter()
        .enumerate()
        .filter(|(_, c)| c.modifiers == kind)
        .map(|(i, _)| i)
        .collect();
    let removed_of_kind: Vec<usize> = results
        .items_removed
        .iter()
        .enumerate()
        .filter(|(_, c)| c.modifiers == kind)
        .map(|(i, _)| i)
        .collect();

    if removed_of_kind.is_empty() {
        if let &[idx] = added_of_kind.as_slice() {
            if results.items_added[idx].is_parameterless() {
                results.items_added.remove(idx);
            }
        }
    } else if added_of_kind.is_empty() {
        if let &[idx] = removed_of_kind.as_slice() {
            if results.items_removed[idx].is_parameterless() {
                results.items_removed.remove(idx);
            }
        }
    }
}

/// Match types at one nesting level by qualified name and generic arity
///
/// Kind-agnostic within the aggregate family, so a class renamed to an
/// interface of the same name pairs up and is classified as a kind change
/// downstream. The declaring-type chain is part of the full name, and
/// nested levels are only ever matched inside an already-matched parent
/// pair, so movement across nesting depth never pairs.
pub fn match_types<'a>(
    old: &'a [TypeDefinition],
    new: &'a [TypeDefinition],
) -> MatchResults<'a, TypeDefinition> {
    let mut agent = MatchAgent::new(old, new);
    agent.match_on(|o, n| {
        o.full_name == n.full_name && o.generic_arity() == n.generic_arity()
    });
    agent.into_results()
}

#[cfg(test)]
mod tests {
    use super::*;
    use semverdiff_core::TypeKind;

    #[test]
    fn attribute_suffix_is_ignored() {
        let old = vec![AttributeDefinition::new("ObsoleteAttribute")];
        let new = vec![AttributeDefinition::new("Obsolete")];

        let results = match_attributes(&old, &new);
        assert_eq!(results.matching_items.len(), 1);
    }

    #[test]
    fn parameters_fall_back_to_position() {
        let old = vec![
            ParameterDefinition::new("first", "int", 0),
            ParameterDefinition::new("second", "string", 1),
        ];
        let new = vec![
            ParameterDefinition::new("renamed", "int", 0),
            ParameterDefinition::new("second", "string", 1),
        ];

        let results = match_parameters(&old, &new);
        assert_eq!(results.matching_items.len(), 2);
        assert!(results.items_added.is_empty());
        assert!(results.items_removed.is_empty());
    }

    #[test]
    fn enum_members_match_by_value_when_renamed_and_moved() {
        let old = vec![
            EnumMemberDefinition::new("First", "1", 0),
            EnumMemberDefinition::new("Second", "2", 1),
        ];
        let new = vec![
            EnumMemberDefinition::new("Renamed", "2", 0),
            EnumMemberDefinition::new("Primary", "1", 1),
        ];

        // Index tier is ambiguous only per-pair; both pairs disagree on name
        // and value, so index matching pairs (First, Renamed) and
        // (Second, Primary) - value tier never fires.
        let results = match_enum_members(&old, &new);
        assert_eq!(results.matching_items.len(), 2);
    }

    #[test]
    fn implicit_values_never_match_by_value_text() {
        let old = vec![EnumMemberDefinition::new("First", "", 0)];
        let new = vec![EnumMemberDefinition::new("Second", "", 1)];

        let results = match_enum_members(&old, &new);
        assert!(results.matching_items.is_empty());
    }

    #[test]
    fn method_overloads_are_disambiguated_by_signature() {
        let old = vec![
            MethodDefinition::new("Run", "void")
                .with_parameters(vec![ParameterDefinition::new("count", "int", 0)]),
            MethodDefinition::new("Run", "void")
                .with_parameters(vec![ParameterDefinition::new("name", "string", 0)]),
        ];
        let new = old.clone();

        let results = match_methods(&old, &new);
        assert_eq!(results.matching_items.len(), 2);
        for pair in &results.matching_items {
            assert_eq!(pair.old_item.parameter_types(), pair.new_item.parameter_types());
        }
    }

    #[test]
    fn renamed_method_matches_by_signature() {
        let old = vec![MethodDefinition::new("OldName", "void")
            .with_parameters(vec![ParameterDefinition::new("count", "int", 0)])];
        let new = vec![MethodDefinition::new("NewName", "void")
            .with_parameters(vec![ParameterDefinition::new("count", "int", 0)])];

        let results = match_methods(&old, &new);
        assert_eq!(results.matching_items.len(), 1);
        assert_eq!(results.matching_items[0].old_item.name, "OldName");
        assert_eq!(results.matching_items[0].new_item.name, "NewName");
    }

    #[test]
    fn rename_tier_requires_unambiguity() {
        let old = vec![MethodDefinition::new("OldName", "void")];
        let new = vec![
            MethodDefinition::new("CandidateA", "void"),
            MethodDefinition::new("CandidateB", "void"),
        ];

        let results = match_methods(&old, &new);
        assert!(results.matching_items.is_empty());
        assert_eq!(results.items_removed.len(), 1);
        assert_eq!(results.items_added.len(), 2);
    }

    #[test]
    fn lone_added_parameterless_constructor_is_suppressed() {
        let old: Vec<ConstructorDefinition> = Vec::new();
        let new = vec![ConstructorDefinition::new("Runner")];

        let results = match_constructors(&old, &new);
        assert!(results.items_added.is_empty());
        assert!(results.items_removed.is_empty());
    }

    #[test]
    fn lone_removed_parameterless_constructor_is_suppressed() {
        let old = vec![ConstructorDefinition::new("Runner")];
        let new: Vec<ConstructorDefinition> = Vec::new();

        let results = match_constructors(&old, &new);
        assert!(results.items_removed.is_empty());
    }

    #[test]
    fn parameterless_constructor_with_changing_siblings_is_reported() {
        let old = vec![ConstructorDefinition::new("Runner")];
        let new = vec![ConstructorDefinition::new("Runner")
            .with_parameters(vec![ParameterDefinition::new("count", "int", 0)])];

        // The parameterless removal has a sibling addition of the same
        // modifier kind... except count-based tier pairs nothing here, so
        // both remain and neither is suppressed.
        let results = match_constructors(&old, &new);
        assert_eq!(results.items_removed.len(), 1);
        assert_eq!(results.items_added.len(), 1);
    }

    #[test]
    fn static_and_instance_constructors_never_pair() {
        let old = vec![ConstructorDefinition::new("Runner")
            .with_modifiers(ConstructorModifiers::Static)];
        let new = vec![ConstructorDefinition::new("Runner")];

        let results = match_constructors(&old, &new);
        assert!(results.matching_items.is_empty());
        // Each side is a lone parameterless constructor of its own kind
        assert!(results.items_added.is_empty());
        assert!(results.items_removed.is_empty());
    }

    #[test]
    fn class_renamed_to_interface_still_matches() {
        let old = vec![TypeDefinition::new(TypeKind::Class, "MyLib", "Shape")];
        let new = vec![TypeDefinition::new(TypeKind::Interface, "MyLib", "Shape")];

        let results = match_types(&old, &new);
        assert_eq!(results.matching_items.len(), 1);
    }

    #[test]
    fn generic_arity_splits_type_identity() {
        let old = vec![TypeDefinition::new(TypeKind::Class, "MyLib", "Container")];
        let new = vec![TypeDefinition::new(TypeKind::Class, "MyLib", "Container")
            .with_generics(vec!["T".to_owned()], Vec::new())];

        let results = match_types(&old, &new);
        assert!(results.matching_items.is_empty());
        assert_eq!(results.items_removed.len(), 1);
        assert_eq!(results.items_added.len(), 1);
    }
}
