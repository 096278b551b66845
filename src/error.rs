//! Error types for coreference resolution.

use thiserror::Error;

/// Errors raised while loading input or resolving coreference.
#[derive(Debug, Error)]
pub enum CorefError {
    /// A parse tree whose structure cannot be trusted (dangling links, cycles).
    #[error("malformed parse tree in sentence {sentence}: {message}")]
    MalformedTree { sentence: usize, message: String },

    /// A node lacks an attribute the analysis cannot proceed without.
    #[error("sentence {sentence}, node {node}: missing attribute `{attribute}`")]
    MissingAttribute {
        sentence: usize,
        node: usize,
        attribute: &'static str,
    },

    /// The merge primitive was asked to merge a mention with itself.
    #[error("attempted to merge mention {0} with itself")]
    SelfMerge(usize),

    /// A document or resource file could not be read or parsed.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A malformed line in a lexicon table.
    #[error("resource error at line {line}: {message}")]
    Resource { line: usize, message: String },
}

/// Result alias for coreference operations.
pub type CorefResult<T> = Result<T, CorefError>;
