//! Severity levels and comparison results
//!
//! IMPORTANT: `Severity` and `ItemKind` identifiers are stable.
//! NEVER rename or remove variants - they are part of the public API.
//! Add new variants with new names only.

use serde::{Deserialize, Serialize};

/// Semantic-versioning impact of a change
///
/// Ordered by impact: `None < Feature < Breaking`, so the overall
/// impact of a comparison is simply the maximum over all results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No observable change - patch release at most
    None,

    /// Backwards-compatible addition - minor release
    Feature,

    /// Backwards-incompatible change - major release
    Breaking,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Feature => write!(f, "feature"),
            Self::Breaking => write!(f, "breaking"),
        }
    }
}

/// Kind discriminant for every element in the definition model
///
/// A closed set: the type dispatcher matches exhaustively over it and
/// surfaces unsupported kinds as an explicit error, never a cast failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Class,
    Interface,
    Struct,
    Enum,
    Field,
    Property,
    PropertyAccessor,
    Method,
    Constructor,
    Parameter,
    Attribute,
    EnumMember,
    Argument,
}

impl ItemKind {
    /// Get the kind as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Field => "field",
            Self::Property => "property",
            Self::PropertyAccessor => "property accessor",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Parameter => "parameter",
            Self::Attribute => "attribute",
            Self::EnumMember => "enum member",
            Self::Argument => "argument",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lightweight reference to a definition carried inside results
///
/// Results never own whole definitions - a matched method would otherwise
/// drag its full parameter tree into every message about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    /// Kind of the referenced element
    pub kind: ItemKind,

    /// Simple name
    pub name: String,

    /// Fully qualified name (namespace + declaring-type chain + name)
    pub full_name: String,
}

impl ItemRef {
    /// Create a new item reference
    pub fn new(kind: ItemKind, name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            full_name: full_name.into(),
        }
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.full_name)
    }
}

/// A single classified change between two versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Impact of this change
    pub change_type: Severity,

    /// The element as it existed in the old version, if present
    pub old_item: Option<ItemRef>,

    /// The element as it exists in the new version, if present
    pub new_item: Option<ItemRef>,

    /// Human-readable justification
    pub message: String,
}

impl ComparisonResult {
    /// Create a result for a matched pair
    pub fn of(
        change_type: Severity,
        old_item: ItemRef,
        new_item: ItemRef,
        message: impl Into<String>,
    ) -> Self {
        Self {
            change_type,
            old_item: Some(old_item),
            new_item: Some(new_item),
            message: message.into(),
        }
    }

    /// Create a result for an element present only in the new version
    pub fn added(change_type: Severity, new_item: ItemRef, message: impl Into<String>) -> Self {
        Self {
            change_type,
            old_item: None,
            new_item: Some(new_item),
            message: message.into(),
        }
    }

    /// Create a result for an element present only in the old version
    pub fn removed(change_type: Severity, old_item: ItemRef, message: impl Into<String>) -> Self {
        Self {
            change_type,
            old_item: Some(old_item),
            new_item: None,
            message: message.into(),
        }
    }
}

/// Aggregate outcome of comparing two definition-model snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    /// Overall impact: maximum severity over all results, `None` if empty
    pub change_type: Severity,

    /// All classified changes, in discovery order
    pub results: Vec<ComparisonResult>,
}

impl ComparisonOutcome {
    /// Build an outcome from a result list, computing the overall severity
    pub fn from_results(results: Vec<ComparisonResult>) -> Self {
        let change_type = results
            .iter()
            .map(|r| r.change_type)
            .max()
            .unwrap_or(Severity::None);

        Self {
            change_type,
            results,
        }
    }

    /// Check if any result is breaking
    pub fn has_breaking(&self) -> bool {
        self.change_type == Severity::Breaking
    }

    /// Count results at a given severity
    pub fn count_at(&self, severity: Severity) -> usize {
        self.results
            .iter()
            .filter(|r| r.change_type == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::None < Severity::Feature);
        assert!(Severity::Feature < Severity::Breaking);
    }

    #[test]
    fn outcome_is_max_over_results() {
        let feature = ComparisonResult::added(
            Severity::Feature,
            ItemRef::new(ItemKind::Method, "Run", "MyLib.Runner.Run"),
            "has been added",
        );
        let breaking = ComparisonResult::removed(
            Severity::Breaking,
            ItemRef::new(ItemKind::Field, "Count", "MyLib.Runner.Count"),
            "has been removed",
        );

        let outcome = ComparisonOutcome::from_results(vec![feature, breaking]);
        assert_eq!(outcome.change_type, Severity::Breaking);
        assert_eq!(outcome.count_at(Severity::Feature), 1);
        assert_eq!(outcome.count_at(Severity::Breaking), 1);
    }

    #[test]
    fn empty_outcome_is_none() {
        let outcome = ComparisonOutcome::from_results(Vec::new());
        assert_eq!(outcome.change_type, Severity::None);
        assert!(!outcome.has_breaking());
    }

    #[test]
    fn severity_serialization() {
        let json = serde_json::to_string(&Severity::Breaking).unwrap();
        assert_eq!(json, "\"breaking\"");
    }
}
