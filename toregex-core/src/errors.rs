//! errors.rs - Custom error types for the toregex-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::options::Options;

/// This enum represents all possible error types in the `toregex-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ToRegexError {
    /// The pattern argument was missing, or was a list where only a single
    /// string or compiled pattern is accepted.
    #[error("expected a string")]
    InvalidInput,

    /// The assembled pattern text (or its flags) could not be compiled.
    #[error(transparent)]
    Compile(#[from] Box<CompileError>),
}

impl ToRegexError {
    /// Returns the compile failure details, if this is a compile error.
    pub fn as_compile_error(&self) -> Option<&CompileError> {
        match self {
            ToRegexError::Compile(err) => Some(err.as_ref()),
            ToRegexError::InvalidInput => None,
        }
    }
}

/// Everything known about a pattern that failed to compile.
#[derive(Error, Debug)]
#[error("Invalid regular expression: /{pattern}/{flags}: {source}")]
pub struct CompileError {
    /// The cache key derived from the pattern text and raw options.
    pub key: String,
    /// The final assembled pattern text, anchors and negation included.
    pub pattern: String,
    /// The flags string the pattern was compiled with.
    pub flags: String,
    /// The options exactly as the caller supplied them.
    pub original_options: Option<Options>,
    /// The effective options after resolution.
    pub created_options: Options,
    #[source]
    pub source: SyntaxError,
}

/// The underlying reason a pattern was rejected.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SyntaxError {
    #[error("Invalid flags supplied to RegExp constructor '{0}'")]
    InvalidFlags(String),

    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
}
