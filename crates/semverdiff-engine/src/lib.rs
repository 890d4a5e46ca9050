//! Change classification engine
//!
//! Compares two versions of a definition model and classifies every
//! difference as breaking, a feature, or no impact. The model itself and
//! the report types live in `semverdiff-core`; parsing source into the
//! model is the caller's concern.
//!
//! The top-level entry point is [`ChangeCalculator`]:
//!
//! ```
//! use semverdiff_core::{ComparerOptions, TypeDefinition, TypeKind};
//! use semverdiff_engine::ChangeCalculator;
//!
//! let old = vec![TypeDefinition::new(TypeKind::Class, "MyLib", "Widget")];
//! let new = old.clone();
//!
//! let calculator = ChangeCalculator::new(ComparerOptions::default())?;
//! let outcome = calculator.calculate(&old, &new)?;
//! assert!(outcome.results.is_empty());
//! # Ok::<(), semverdiff_engine::CompareError>(())
//! ```

pub mod attributes;
pub mod change_tables;
mod context;
mod error;
pub mod evaluators;
pub mod generics;
pub mod match_agent;
pub mod members;
mod modifiers;
mod processor;
pub mod types;

pub use context::CompareContext;
pub use error::CompareError;
pub use match_agent::{ItemMatch, MatchAgent, MatchResults};
pub use processor::{merge_partial_types, ChangeCalculator};
pub use types::{compare_aggregate_pair, compare_enum_pair, TypeComparison};
