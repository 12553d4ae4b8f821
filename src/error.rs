//! Unified error types for classpath-tools.
//!
//! Fatal errors (bad configuration, unreadable roots, invalid dependency
//! trees) surface as [`AnalysisError`] values. Per-unit scan failures are
//! recorded in the scan outcome instead of aborting the run; they reuse the
//! same error values for classification before being flattened into
//! failure records.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for classpath-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    /// A structurally invalid compiled unit or archive container.
    #[error("Malformed unit at {location}: {source}")]
    MalformedUnit {
        location: String,
        #[source]
        source: UnitErrorKind,
    },

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Problems with the supplied dependency tree document
    #[error("Invalid dependency tree: {context}")]
    Tree {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors (unrecognized input format, bad flag combinations)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A required build output directory or file is absent
    #[error("Missing prerequisite: {path:?} does not exist; {hint}")]
    MissingPrerequisite { path: PathBuf, hint: String },
}

/// Specific malformed-unit kinds.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UnitErrorKind {
    #[error("bad magic number {found:#010x} (expected 0xCAFEBABE)")]
    BadMagic { found: u32 },

    #[error("truncated class file while reading {0}")]
    Truncated(&'static str),

    #[error("constant pool index {index} out of range (count {count})")]
    PoolIndexOutOfRange { index: u16, count: u16 },

    #[error("constant pool entry {index} has unknown tag {tag}")]
    UnknownPoolTag { index: u16, tag: u8 },

    #[error("constant pool entry {index} is not a {expected}")]
    WrongPoolKind { index: u16, expected: &'static str },

    #[error("constant pool entry {index} is not valid UTF-8")]
    InvalidUtf8 { index: u16 },

    #[error("not a readable archive: {0}")]
    UnreadableArchive(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for classpath-tools operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AnalysisError {
    /// Create a malformed-unit error at a location
    pub fn malformed(location: impl Into<String>, source: UnitErrorKind) -> Self {
        Self::MalformedUnit {
            location: location.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a missing-prerequisite error
    pub fn missing_prerequisite(path: impl Into<PathBuf>, hint: impl Into<String>) -> Self {
        Self::MissingPrerequisite {
            path: path.into(),
            hint: hint.into(),
        }
    }

    /// Create a dependency-tree error with context
    pub fn tree(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Tree {
            context: context.into(),
            source,
        }
    }

    /// Whether this error is fatal for a whole run, as opposed to a
    /// per-unit failure the scanner records and skips past.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::MissingPrerequisite { .. } | Self::Tree { .. }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        Self::tree("JSON deserialization", err)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// This trait provides methods to add context information to errors,
/// creating a chain of context that helps trace the source of problems.
///
/// # Example
///
/// ```ignore
/// use classpath_tools::error::ErrorContext;
///
/// fn load_tree(path: &Path) -> Result<DependencyNode> {
///     let content = std::fs::read_to_string(path)
///         .context("reading dependency tree")?;
///
///     parse_tree_str(&content)
///         .with_context(|| format!("parsing tree from {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context,
    /// creating a chain that shows the path through the code.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    ///
    /// The closure is only called if the result is an error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AnalysisError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: AnalysisError, new_ctx: &str) -> AnalysisError {
    match err {
        AnalysisError::MalformedUnit {
            location: existing,
            source,
        } => AnalysisError::MalformedUnit {
            location: chain_context(new_ctx, &existing),
            source,
        },
        AnalysisError::Io {
            path,
            message,
            source,
        } => AnalysisError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        AnalysisError::Tree {
            context: existing,
            source,
        } => AnalysisError::Tree {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AnalysisError::Config(msg) => AnalysisError::Config(chain_context(new_ctx, &msg)),
        AnalysisError::MissingPrerequisite { path, hint } => AnalysisError::MissingPrerequisite {
            path,
            hint: chain_context(new_ctx, &hint),
        },
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a configuration error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to a configuration error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AnalysisError::Config(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| AnalysisError::Config(f().into()))
    }
}
