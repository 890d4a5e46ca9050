//! Authored change tables: (old modifier, new modifier) -> severity
//!
//! Each table is a total, constant function over its modifier family.
//! Discipline throughout: widening access or dropping a restriction is a
//! `Feature`, narrowing or adding a restriction is `Breaking`, lateral moves
//! are `Breaking`, and `table(m, m)` is always `None`.

use semverdiff_core::{
    AccessModifiers, ClassModifiers, FieldModifiers, MemberModifiers, ParameterModifiers,
    Severity, StructModifiers,
};

/// A change table for one modifier family
///
/// Carries the authored lookup plus the bits the modifier-set comparer needs
/// to word its messages: the family label and the declared-modifier tokens
/// the family owns.
pub struct ChangeTable<M> {
    /// Label used in messages, e.g. "access modifier"
    pub label: &'static str,

    /// Declared-modifier tokens relevant to this family
    pub tokens: &'static [&'static str],

    lookup: fn(M, M) -> Severity,
}

impl<M: Copy> ChangeTable<M> {
    /// Classify a modifier transition
    pub fn severity(&self, old: M, new: M) -> Severity {
        (self.lookup)(old, new)
    }
}

/// Access modifiers on types and members
pub fn access() -> ChangeTable<AccessModifiers> {
    ChangeTable {
        label: "access modifier",
        tokens: &["public", "internal", "protected", "private"],
        lookup: access_lookup,
    }
}

/// Access modifiers on enums
pub fn enum_access() -> ChangeTable<AccessModifiers> {
    ChangeTable {
        label: "access modifier",
        tokens: &["public", "internal", "protected", "private"],
        lookup: access_lookup,
    }
}

/// Access modifiers on property accessors
pub fn accessor_access() -> ChangeTable<AccessModifiers> {
    ChangeTable {
        label: "access modifier",
        tokens: &["public", "internal", "protected", "private"],
        lookup: access_lookup,
    }
}

/// Class modifier flags
pub fn class_modifiers() -> ChangeTable<ClassModifiers> {
    ChangeTable {
        label: "modifier",
        tokens: &["abstract", "sealed", "static", "partial"],
        lookup: class_lookup,
    }
}

/// Struct modifier flags
pub fn struct_modifiers() -> ChangeTable<StructModifiers> {
    ChangeTable {
        label: "modifier",
        tokens: &["readonly", "partial"],
        lookup: struct_lookup,
    }
}

/// Field modifier flags
pub fn field_modifiers() -> ChangeTable<FieldModifiers> {
    ChangeTable {
        label: "modifier",
        tokens: &["static", "readonly"],
        lookup: field_lookup,
    }
}

/// Method modifier flags (shared member table)
pub fn method_modifiers() -> ChangeTable<MemberModifiers> {
    ChangeTable {
        label: "modifier",
        tokens: &["abstract", "new", "override", "sealed", "static", "virtual"],
        lookup: member_lookup,
    }
}

/// Property modifier flags (shared member table)
pub fn property_modifiers() -> ChangeTable<MemberModifiers> {
    ChangeTable {
        label: "modifier",
        tokens: &["abstract", "new", "override", "sealed", "static", "virtual"],
        lookup: member_lookup,
    }
}

/// Parameter modifier flags
pub fn parameter_modifiers() -> ChangeTable<ParameterModifiers> {
    ChangeTable {
        label: "modifier",
        tokens: &["ref", "out", "in", "params", "this"],
        lookup: parameter_lookup,
    }
}

/// Exposure ordering: Private < PrivateProtected < Internal < Protected <
/// ProtectedInternal < Public. Protected outranks Internal because only
/// protected members are part of the published inheritance surface.
fn access_lookup(old: AccessModifiers, new: AccessModifiers) -> Severity {
    use AccessModifiers as A;
    use Severity::{Breaking, Feature, None};

    match (old, new) {
        (a, b) if a == b => None,
        (A::Private, _) => Feature,
        (_, A::Private) => Breaking,
        (A::PrivateProtected, _) => Feature,
        (_, A::PrivateProtected) => Breaking,
        (A::Internal, _) => Feature,
        (_, A::Internal) => Breaking,
        (A::Protected, _) => Feature,
        (_, A::Protected) => Breaking,
        (A::ProtectedInternal, _) => Feature,
        (A::Public, _) => Breaking,
    }
}

fn class_lookup(old: ClassModifiers, new: ClassModifiers) -> Severity {
    use Severity::{Breaking, Feature, None};

    // `partial` is a source-organization detail with no compatibility impact
    let old = class_component(old);
    let new = class_component(new);

    match (old, new) {
        (a, b) if a == b => None,
        (ClassComponent::None, _) => Breaking,
        (ClassComponent::Abstract, ClassComponent::None) => Feature,
        (ClassComponent::Abstract, _) => Breaking,
        (ClassComponent::Sealed, ClassComponent::None) => Feature,
        (ClassComponent::Sealed, _) => Breaking,
        (ClassComponent::Static, _) => Breaking,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ClassComponent {
    None,
    Abstract,
    Sealed,
    Static,
}

fn class_component(modifiers: ClassModifiers) -> ClassComponent {
    match modifiers {
        ClassModifiers::None | ClassModifiers::Partial => ClassComponent::None,
        ClassModifiers::Abstract | ClassModifiers::AbstractPartial => ClassComponent::Abstract,
        ClassModifiers::Sealed | ClassModifiers::SealedPartial => ClassComponent::Sealed,
        ClassModifiers::Static | ClassModifiers::StaticPartial => ClassComponent::Static,
    }
}

fn struct_lookup(old: StructModifiers, new: StructModifiers) -> Severity {
    use Severity::{Breaking, Feature, None};

    let old_readonly = matches!(old, StructModifiers::ReadOnly | StructModifiers::ReadOnlyPartial);
    let new_readonly = matches!(new, StructModifiers::ReadOnly | StructModifiers::ReadOnlyPartial);

    match (old_readonly, new_readonly) {
        (a, b) if a == b => None,
        (false, true) => Breaking,
        _ => Feature,
    }
}

fn field_lookup(old: FieldModifiers, new: FieldModifiers) -> Severity {
    use FieldModifiers as F;
    use Severity::{Breaking, Feature, None};

    match (old, new) {
        (F::None, F::None) => None,
        (F::None, F::ReadOnly) => Breaking,
        (F::None, F::Static) => Breaking,
        (F::None, F::StaticReadOnly) => Breaking,
        (F::ReadOnly, F::None) => Feature,
        (F::ReadOnly, F::ReadOnly) => None,
        (F::ReadOnly, F::Static) => Breaking,
        (F::ReadOnly, F::StaticReadOnly) => Breaking,
        (F::Static, F::None) => Breaking,
        (F::Static, F::ReadOnly) => Breaking,
        (F::Static, F::Static) => None,
        (F::Static, F::StaticReadOnly) => Breaking,
        (F::StaticReadOnly, F::None) => Breaking,
        (F::StaticReadOnly, F::ReadOnly) => Breaking,
        (F::StaticReadOnly, F::Static) => Feature,
        (F::StaticReadOnly, F::StaticReadOnly) => None,
    }
}

fn member_lookup(old: MemberModifiers, new: MemberModifiers) -> Severity {
    use MemberModifiers as M;
    use Severity::{Breaking, Feature, None};

    match (old, new) {
        (a, b) if a == b => None,

        // `new` only shadows; it behaves like no modifier at all
        (M::None, M::New) | (M::New, M::None) => None,
        (M::None | M::New, M::Override) => None,
        (M::None | M::New, M::Virtual) => Feature,
        (M::None | M::New, _) => Breaking,

        (M::Abstract, M::Virtual) => Feature,
        (M::Abstract, _) => Breaking,

        (M::Override, M::Virtual) => None,
        (M::Override, _) => Breaking,

        // Dropping `sealed` restores overridability
        (M::SealedOverride, M::Override) => Feature,
        (M::SealedOverride, M::Virtual) => Feature,
        (M::SealedOverride, _) => Breaking,

        (M::Static, _) => Breaking,

        (M::Virtual, _) => Breaking,
    }
}

fn parameter_lookup(old: ParameterModifiers, new: ParameterModifiers) -> Severity {
    use ParameterModifiers as P;
    use Severity::{Breaking, Feature, None};

    match (old, new) {
        (a, b) if a == b => None,

        // `params` and `this` add call forms without removing any
        (P::None, P::Params) => Feature,
        (P::None, P::This) => Feature,
        (P::Params, P::None) => Breaking,
        (P::This, P::None) => Breaking,

        // Everything touching ref/out/in changes the call syntax
        _ => Breaking,
    }
}
