//! semverdiff core
//!
//! Stable domain model for the semantic-versioning impact engine: the
//! definition model produced by external parsers, severity and result types,
//! comparison options and the versioned report schema.

pub mod config;
pub mod model;
pub mod options;
pub mod report;
pub mod severity;

pub use config::{Config, ConfigError};
pub use model::{
    AccessModifiers, AccessorPurpose, AccessorType, ArgumentDefinition, ArgumentType,
    AttributeDefinition, ClassModifiers, ConstructorDefinition, ConstructorModifiers, Element,
    EnumMemberDefinition, FieldDefinition, FieldModifiers, GenericConstraint, MemberModifiers,
    MethodDefinition, ParameterDefinition, ParameterModifiers, PropertyAccessorDefinition,
    PropertyDefinition, StructModifiers, TypeDefinition, TypeKind,
};
pub use options::{
    AttributeCompareMode, ComparerOptions, DefaultMessageFormatter, MessageEvent, MessageFormatter,
};
pub use report::{Report, ReportVersion};
pub use severity::{ComparisonOutcome, ComparisonResult, ItemKind, ItemRef, Severity};
