//! Engine errors

use semverdiff_core::ItemKind;

/// Fatal comparison failures
///
/// Classification disagreements (ambiguous matches, kind mismatches,
/// visibility transitions) are results, never errors. Errors are reserved
/// for caller mistakes and kinds the engine cannot compare.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// Caller-supplied options are unusable
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A type reached the aggregate comparer with a kind it cannot handle
    #[error("unsupported type kind '{kind}' for {full_name}")]
    UnsupportedKind { kind: ItemKind, full_name: String },
}
