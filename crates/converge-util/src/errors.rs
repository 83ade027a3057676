use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all converge operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ConvergeError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid rule configuration (malformed exclude pattern, bad descriptor).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check the [dependency-convergence] section and its exclude patterns"))]
    Config { message: String },

    /// The dependency tree could not be loaded or is not a tree.
    #[error("Could not build dependency tree: {message}")]
    Tree { message: String },

    /// Convergence violations were found and the rule is set to fail.
    #[error("{message}")]
    Convergence { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ConvergeResult<T> = miette::Result<T>;
