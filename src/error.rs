use thiserror::Error;

/// Configuration failures reported by [`SplitEngine`](crate::SplitEngine).
///
/// All algorithmic outcomes are expressed as
/// [`SplitSpecification`](crate::SplitSpecification) variants; only invalid
/// engine configuration surfaces as an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SplitError {
    /// An option was supplied that the engine does not recognize.
    #[error("'{0}' is not a recognized split option")]
    UnrecognizedOption(String),
}
