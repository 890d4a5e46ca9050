//! Definition model: immutable snapshots of declared code elements
//!
//! Instances are produced by an external parser, one snapshot per version,
//! and never mutated by the engine. The model captures declared signatures,
//! modifiers and attributes only - it knows nothing about code bodies.

use crate::severity::{ItemKind, ItemRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Access modifier lattice
///
/// Ordering here is declaration order, not exposure: exposure comparisons
/// are authored as change tables, not derived from this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessModifiers {
    Private,
    PrivateProtected,
    Internal,
    Protected,
    ProtectedInternal,
    Public,
}

impl AccessModifiers {
    /// Whether this access level is part of the published API surface
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Public | Self::Protected | Self::ProtectedInternal)
    }

    /// The declared keyword sequence for this access level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PrivateProtected => "private protected",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::ProtectedInternal => "protected internal",
            Self::Public => "public",
        }
    }
}

impl std::fmt::Display for AccessModifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a type definition (subset of [`ItemKind`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
}

impl TypeKind {
    /// The corresponding item kind
    pub fn item_kind(&self) -> ItemKind {
        match self {
            Self::Class => ItemKind::Class,
            Self::Interface => ItemKind::Interface,
            Self::Struct => ItemKind::Struct,
            Self::Enum => ItemKind::Enum,
        }
    }

    /// Whether this kind participates in aggregate (class-like) comparison
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Struct)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.item_kind())
    }
}

/// Class modifier flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassModifiers {
    #[default]
    None,
    Abstract,
    AbstractPartial,
    Partial,
    Sealed,
    SealedPartial,
    Static,
    StaticPartial,
}

/// Struct modifier flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StructModifiers {
    #[default]
    None,
    Partial,
    ReadOnly,
    ReadOnlyPartial,
}

/// Field modifier flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldModifiers {
    #[default]
    None,
    ReadOnly,
    Static,
    StaticReadOnly,
}

/// Modifier flag set shared by methods and properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberModifiers {
    #[default]
    None,
    Abstract,
    New,
    Override,
    SealedOverride,
    Static,
    Virtual,
}

/// Parameter modifier flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterModifiers {
    #[default]
    None,
    Ref,
    Out,
    In,
    Params,
    This,
}

/// Constructor modifier flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConstructorModifiers {
    #[default]
    None,
    Static,
}

/// Property accessor kind as declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorType {
    Get,
    Set,
    Init,
}

impl AccessorType {
    /// The direction this accessor serves
    pub fn purpose(&self) -> AccessorPurpose {
        match self {
            Self::Get => AccessorPurpose::Read,
            Self::Set | Self::Init => AccessorPurpose::Write,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Init => "init",
        }
    }
}

impl std::fmt::Display for AccessorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an accessor reads or writes the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorPurpose {
    Read,
    Write,
}

/// Constraints declared for one generic type parameter
///
/// Aligned positionally: renaming a parameter while keeping the same
/// per-position constraints is not a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericConstraint {
    /// Zero-based position of the constrained parameter
    pub parameter_position: usize,

    /// Constraint tokens (e.g. "class", "new()", "IComparable<T>")
    pub constraints: BTreeSet<String>,
}

impl GenericConstraint {
    pub fn new(parameter_position: usize, constraints: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            parameter_position,
            constraints: constraints.into_iter().map(Into::into).collect(),
        }
    }
}

/// A single argument in an attribute usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    /// Ordinal (positional) or named
    pub argument_type: ArgumentType,

    /// Parameter name, for named arguments
    pub parameter_name: Option<String>,

    /// Raw declared value text
    pub value: String,

    /// Position among the ordinal arguments (0 for named arguments)
    pub ordinal_index: usize,
}

impl ArgumentDefinition {
    /// Create an ordinal argument
    pub fn ordinal(value: impl Into<String>, ordinal_index: usize) -> Self {
        Self {
            argument_type: ArgumentType::Ordinal,
            parameter_name: None,
            value: value.into(),
            ordinal_index,
        }
    }

    /// Create a named argument
    pub fn named(parameter_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            argument_type: ArgumentType::Named,
            parameter_name: Some(parameter_name.into()),
            value: value.into(),
            ordinal_index: 0,
        }
    }
}

/// How an attribute argument is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    Ordinal,
    Named,
}

/// An attribute applied to an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Declared name, possibly carrying the conventional "Attribute" suffix
    pub name: String,

    /// Arguments in declaration order
    pub arguments: Vec<ArgumentDefinition>,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<ArgumentDefinition>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Name with any trailing "Attribute" suffix removed
    pub fn bare_name(&self) -> &str {
        self.name.strip_suffix("Attribute").unwrap_or(&self.name)
    }
}

/// A declared parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,

    /// Declared type name
    pub parameter_type: String,

    /// Zero-based position in the declaration
    pub declared_index: usize,

    /// Declared default value text, if any
    pub default_value: Option<String>,

    pub modifiers: ParameterModifiers,

    /// Attributes applied to the parameter
    pub attributes: Vec<AttributeDefinition>,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>, parameter_type: impl Into<String>, declared_index: usize) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
            declared_index,
            default_value: None,
            modifiers: ParameterModifiers::None,
            attributes: Vec::new(),
        }
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: ParameterModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub full_name: String,
    pub is_visible: bool,
    pub access_modifiers: AccessModifiers,

    /// Raw modifier keyword text as written in source
    pub declared_modifiers: String,

    pub modifiers: FieldModifiers,

    /// Declared type of the field
    pub return_type: String,

    pub attributes: Vec<AttributeDefinition>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            is_visible: true,
            access_modifiers: AccessModifiers::Public,
            declared_modifiers: "public".to_owned(),
            modifiers: FieldModifiers::None,
            return_type: return_type.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: AccessModifiers) -> Self {
        self.access_modifiers = access;
        self.is_visible = access.is_visible();
        self.declared_modifiers = access.as_str().to_owned();
        self
    }

    pub fn with_modifiers(mut self, modifiers: FieldModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_declared_modifiers(mut self, declared: impl Into<String>) -> Self {
        self.declared_modifiers = declared.into();
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<AttributeDefinition>) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A property accessor (get / set / init)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAccessorDefinition {
    pub accessor_type: AccessorType,
    pub access_modifiers: AccessModifiers,
    pub is_visible: bool,

    /// Raw modifier keyword text as written in source
    pub declared_modifiers: String,

    pub attributes: Vec<AttributeDefinition>,
}

impl PropertyAccessorDefinition {
    pub fn new(accessor_type: AccessorType) -> Self {
        Self {
            accessor_type,
            access_modifiers: AccessModifiers::Public,
            is_visible: true,
            declared_modifiers: String::new(),
            attributes: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: AccessModifiers) -> Self {
        self.access_modifiers = access;
        self.is_visible = access.is_visible();
        self.declared_modifiers = access.as_str().to_owned();
        self
    }

    /// The direction this accessor serves
    pub fn purpose(&self) -> AccessorPurpose {
        self.accessor_type.purpose()
    }
}

/// A declared property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    pub full_name: String,
    pub is_visible: bool,
    pub access_modifiers: AccessModifiers,
    pub declared_modifiers: String,
    pub modifiers: MemberModifiers,
    pub return_type: String,

    /// Read accessor, if declared
    pub get_accessor: Option<PropertyAccessorDefinition>,

    /// Write accessor (set or init), if declared
    pub set_accessor: Option<PropertyAccessorDefinition>,

    pub attributes: Vec<AttributeDefinition>,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            is_visible: true,
            access_modifiers: AccessModifiers::Public,
            declared_modifiers: "public".to_owned(),
            modifiers: MemberModifiers::None,
            return_type: return_type.into(),
            get_accessor: Some(PropertyAccessorDefinition::new(AccessorType::Get)),
            set_accessor: Some(PropertyAccessorDefinition::new(AccessorType::Set)),
            attributes: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: AccessModifiers) -> Self {
        self.access_modifiers = access;
        self.is_visible = access.is_visible();
        self.declared_modifiers = access.as_str().to_owned();
        self
    }

    pub fn with_modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_declared_modifiers(mut self, declared: impl Into<String>) -> Self {
        self.declared_modifiers = declared.into();
        self
    }

    pub fn with_accessors(
        mut self,
        get: Option<PropertyAccessorDefinition>,
        set: Option<PropertyAccessorDefinition>,
    ) -> Self {
        self.get_accessor = get;
        self.set_accessor = set;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<AttributeDefinition>) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    pub full_name: String,
    pub is_visible: bool,
    pub access_modifiers: AccessModifiers,
    pub declared_modifiers: String,
    pub modifiers: MemberModifiers,
    pub return_type: String,

    /// Generic type parameter names, in declaration order
    pub generic_type_parameters: Vec<String>,

    /// Per-position generic constraints
    pub generic_constraints: Vec<GenericConstraint>,

    pub parameters: Vec<ParameterDefinition>,
    pub attributes: Vec<AttributeDefinition>,
}

impl MethodDefinition {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            is_visible: true,
            access_modifiers: AccessModifiers::Public,
            declared_modifiers: "public".to_owned(),
            modifiers: MemberModifiers::None,
            return_type: return_type.into(),
            generic_type_parameters: Vec::new(),
            generic_constraints: Vec::new(),
            parameters: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: AccessModifiers) -> Self {
        self.access_modifiers = access;
        self.is_visible = access.is_visible();
        self.declared_modifiers = access.as_str().to_owned();
        self
    }

    pub fn with_modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_declared_modifiers(mut self, declared: impl Into<String>) -> Self {
        self.declared_modifiers = declared.into();
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterDefinition>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_generics(
        mut self,
        parameters: Vec<String>,
        constraints: Vec<GenericConstraint>,
    ) -> Self {
        self.generic_type_parameters = parameters;
        self.generic_constraints = constraints;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<AttributeDefinition>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Number of generic type parameters
    pub fn generic_arity(&self) -> usize {
        self.generic_type_parameters.len()
    }

    /// Declared parameter types, in order
    pub fn parameter_types(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.parameter_type.as_str()).collect()
    }
}

/// A declared constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDefinition {
    pub name: String,
    pub full_name: String,
    pub is_visible: bool,
    pub modifiers: ConstructorModifiers,
    pub parameters: Vec<ParameterDefinition>,
    pub attributes: Vec<AttributeDefinition>,
}

impl ConstructorDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            is_visible: true,
            modifiers: ConstructorModifiers::None,
            parameters: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: ConstructorModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterDefinition>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Declared parameter types, in order
    pub fn parameter_types(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.parameter_type.as_str()).collect()
    }

    /// Whether this constructor takes no parameters
    pub fn is_parameterless(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// A declared enum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMemberDefinition {
    pub name: String,
    pub full_name: String,

    /// Raw declared value text; empty means the value is implicit
    pub value: String,

    /// Zero-based declaration position
    pub index: usize,

    pub attributes: Vec<AttributeDefinition>,
}

impl EnumMemberDefinition {
    pub fn new(name: impl Into<String>, value: impl Into<String>, index: usize) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            value: value.into(),
            index,
            attributes: Vec::new(),
        }
    }

    /// Whether the value is implicit (assigned by declaration order)
    pub fn is_implicit(&self) -> bool {
        self.value.is_empty()
    }
}

/// A declared type: class, interface, struct or enum
///
/// Child types are owned and recursive; the declaring type is referenced
/// back by full name only, so the tree has a single owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub kind: TypeKind,

    /// Raw declared name, without namespace or declaring type
    pub name: String,

    /// Namespace + declaring-type chain + name
    pub full_name: String,

    pub namespace: String,

    /// Full name of the declaring type, for nested types
    pub declaring_type: Option<String>,

    pub is_visible: bool,
    pub access_modifiers: AccessModifiers,

    /// Raw modifier keyword text as written in source
    pub declared_modifiers: String,

    pub class_modifiers: ClassModifiers,
    pub struct_modifiers: StructModifiers,

    pub generic_type_parameters: Vec<String>,
    pub generic_constraints: Vec<GenericConstraint>,

    /// Names of implemented/inherited types
    pub implemented_types: BTreeSet<String>,

    /// Nested types, owned
    pub child_types: Vec<TypeDefinition>,

    pub fields: Vec<FieldDefinition>,
    pub properties: Vec<PropertyDefinition>,
    pub methods: Vec<MethodDefinition>,
    pub constructors: Vec<ConstructorDefinition>,

    /// Enum underlying type, for enums
    pub underlying_type: Option<String>,

    /// Enum members, for enums
    pub enum_members: Vec<EnumMemberDefinition>,

    pub attributes: Vec<AttributeDefinition>,
}

impl TypeDefinition {
    pub fn new(kind: TypeKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        let full_name = if namespace.is_empty() {
            name.clone()
        } else {
            format!("{namespace}.{name}")
        };

        Self {
            kind,
            name,
            full_name,
            namespace,
            declaring_type: None,
            is_visible: true,
            access_modifiers: AccessModifiers::Public,
            declared_modifiers: "public".to_owned(),
            class_modifiers: ClassModifiers::None,
            struct_modifiers: StructModifiers::None,
            generic_type_parameters: Vec::new(),
            generic_constraints: Vec::new(),
            implemented_types: BTreeSet::new(),
            child_types: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            underlying_type: None,
            enum_members: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: AccessModifiers) -> Self {
        self.access_modifiers = access;
        self.is_visible = access.is_visible();
        self.declared_modifiers = access.as_str().to_owned();
        self
    }

    pub fn with_class_modifiers(mut self, modifiers: ClassModifiers) -> Self {
        self.class_modifiers = modifiers;
        self
    }

    pub fn with_struct_modifiers(mut self, modifiers: StructModifiers) -> Self {
        self.struct_modifiers = modifiers;
        self
    }

    pub fn with_declared_modifiers(mut self, declared: impl Into<String>) -> Self {
        self.declared_modifiers = declared.into();
        self
    }

    pub fn with_generics(
        mut self,
        parameters: Vec<String>,
        constraints: Vec<GenericConstraint>,
    ) -> Self {
        self.generic_type_parameters = parameters;
        self.generic_constraints = constraints;
        self
    }

    pub fn with_implemented_types(
        mut self,
        types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.implemented_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_properties(mut self, properties: Vec<PropertyDefinition>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_methods(mut self, methods: Vec<MethodDefinition>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_constructors(mut self, constructors: Vec<ConstructorDefinition>) -> Self {
        self.constructors = constructors;
        self
    }

    pub fn with_underlying_type(mut self, underlying: impl Into<String>) -> Self {
        self.underlying_type = Some(underlying.into());
        self
    }

    pub fn with_enum_members(mut self, members: Vec<EnumMemberDefinition>) -> Self {
        self.enum_members = members;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<AttributeDefinition>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Attach a nested type, rewriting its full name and back-reference
    pub fn with_child_type(mut self, mut child: TypeDefinition) -> Self {
        child.declaring_type = Some(self.full_name.clone());
        child.namespace = self.namespace.clone();
        child.full_name = format!("{}+{}", self.full_name, child.name);
        self.child_types.push(child);
        self
    }

    /// Number of generic type parameters
    pub fn generic_arity(&self) -> usize {
        self.generic_type_parameters.len()
    }
}

/// Common surface shared by every definition in the model
///
/// Evaluators and comparers are generic over this trait rather than over
/// concrete definition structs.
pub trait Element {
    fn kind(&self) -> ItemKind;
    fn name(&self) -> &str;
    fn full_name(&self) -> &str;
    fn is_visible(&self) -> bool;
    fn attributes(&self) -> &[AttributeDefinition];

    /// Lightweight reference for embedding in results
    fn item_ref(&self) -> ItemRef {
        ItemRef::new(self.kind(), self.name(), self.full_name())
    }
}

impl Element for TypeDefinition {
    fn kind(&self) -> ItemKind {
        self.kind.item_kind()
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn full_name(&self) -> &str {
        &self.full_name
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

impl Element for FieldDefinition {
    fn kind(&self) -> ItemKind {
        ItemKind::Field
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn full_name(&self) -> &str {
        &self.full_name
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

impl Element for PropertyDefinition {
    fn kind(&self) -> ItemKind {
        ItemKind::Property
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn full_name(&self) -> &str {
        &self.full_name
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

impl Element for PropertyAccessorDefinition {
    fn kind(&self) -> ItemKind {
        ItemKind::PropertyAccessor
    }
    fn name(&self) -> &str {
        self.accessor_type.as_str()
    }
    fn full_name(&self) -> &str {
        self.accessor_type.as_str()
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

impl Element for MethodDefinition {
    fn kind(&self) -> ItemKind {
        ItemKind::Method
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn full_name(&self) -> &str {
        &self.full_name
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

impl Element for ConstructorDefinition {
    fn kind(&self) -> ItemKind {
        ItemKind::Constructor
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn full_name(&self) -> &str {
        &self.full_name
    }
    fn is_visible(&self) -> bool {
        self.is_visible
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

impl Element for ParameterDefinition {
    fn kind(&self) -> ItemKind {
        ItemKind::Parameter
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn full_name(&self) -> &str {
        &self.name
    }
    fn is_visible(&self) -> bool {
        true
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

impl Element for EnumMemberDefinition {
    fn kind(&self) -> ItemKind {
        ItemKind::EnumMember
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn full_name(&self) -> &str {
        &self.full_name
    }
    fn is_visible(&self) -> bool {
        true
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }
}

impl Element for AttributeDefinition {
    fn kind(&self) -> ItemKind {
        ItemKind::Attribute
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn full_name(&self) -> &str {
        &self.name
    }
    fn is_visible(&self) -> bool {
        true
    }
    fn attributes(&self) -> &[AttributeDefinition] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_type_full_name() {
        let parent = TypeDefinition::new(TypeKind::Class, "MyLib", "Outer")
            .with_child_type(TypeDefinition::new(TypeKind::Class, "", "Inner"));

        let child = &parent.child_types[0];
        assert_eq!(child.full_name, "MyLib.Outer+Inner");
        assert_eq!(child.declaring_type.as_deref(), Some("MyLib.Outer"));
        assert_eq!(child.namespace, "MyLib");
    }

    #[test]
    fn access_controls_visibility() {
        let field = FieldDefinition::new("Count", "int").with_access(AccessModifiers::Internal);
        assert!(!field.is_visible);

        let field = field.with_access(AccessModifiers::Protected);
        assert!(field.is_visible);
    }

    #[test]
    fn accessor_purpose() {
        assert_eq!(AccessorType::Get.purpose(), AccessorPurpose::Read);
        assert_eq!(AccessorType::Set.purpose(), AccessorPurpose::Write);
        assert_eq!(AccessorType::Init.purpose(), AccessorPurpose::Write);
    }

    #[test]
    fn attribute_bare_name() {
        assert_eq!(AttributeDefinition::new("ObsoleteAttribute").bare_name(), "Obsolete");
        assert_eq!(AttributeDefinition::new("Obsolete").bare_name(), "Obsolete");
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let ty = TypeDefinition::new(TypeKind::Class, "MyLib", "Runner")
            .with_methods(vec![MethodDefinition::new("Run", "void").with_parameters(vec![
                ParameterDefinition::new("count", "int", 0).with_default_value("1"),
            ])]);

        let json = serde_json::to_string(&ty).unwrap();
        let back: TypeDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(ty, back);
    }
}
