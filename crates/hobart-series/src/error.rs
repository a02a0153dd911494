//! Error types for series alignment.

use thiserror::Error;

/// Result type for alignment operations.
pub type Result<T> = std::result::Result<T, AlignmentError>;

/// Errors that can occur while aligning input series.
///
/// `InsufficientData` is an expected, recoverable condition: the caller
/// supplied valid inputs whose common history is simply too short to
/// attribute. `MalformedInput` means an input cannot participate in
/// alignment at all and names the offending series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// The common date intersection is shorter than the required minimum.
    #[error("insufficient aligned history: {actual} common dates (minimum {required})")]
    InsufficientData {
        /// Minimum number of aligned dates required.
        required: usize,
        /// Number of aligned dates actually found.
        actual: usize,
    },

    /// An input series is structurally unusable.
    #[error("malformed {input} input: {reason}")]
    MalformedInput {
        /// Name of the offending input (`portfolio`, `returns`, or `weights`).
        input: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl AlignmentError {
    /// True when the error is the expected too-little-history condition.
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
