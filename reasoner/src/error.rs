//! I define the errors raised by an [`InferenceModel`](crate::InferenceModel).
use crate::rule::RuleError;
use crate::ruleset::RuleParseError;
use entail_api::statement::Statement;
use thiserror::Error;

/// An error raised by an [`InferenceModel`](crate::InferenceModel)
/// wrapping a store whose error type is `E`.
///
/// NB: errors are not rolled back:
/// the statements added or removed before the error remain so.
#[derive(Debug, Error)]
pub enum InferenceError<E: std::error::Error + 'static> {
    /// An attempt was made to add a statement that is not [valid](Statement::is_valid).
    #[error("Invalid statement: {0}")]
    InvalidStatement(Statement),
    /// A rule could not be applied.
    #[error(transparent)]
    Rule(#[from] RuleError),
    /// The store rejected the query compiled from a rule.
    #[error("Query rejected by the store: {query}")]
    QueryCompilation {
        /// the SPARQL query
        query: String,
        /// the error raised by the store
        #[source]
        source: E,
    },
    /// The underlying store failed.
    #[error("Store error: {0}")]
    Store(#[source] E),
    /// A rule file could not be parsed.
    #[error("Could not load rules: {0}")]
    UnknownRule(#[from] RuleParseError),
    /// An inference pass was interrupted by its [`CancellationFlag`](crate::CancellationFlag).
    #[error("Inference cancelled")]
    Cancelled,
}

/// Shortcut for results of [`InferenceModel`](crate::InferenceModel) operations.
pub type InferenceResult<T, E> = Result<T, InferenceError<E>>;
