// toregex-core/src/lib.rs
//! # toregex Core Library
//!
//! `toregex-core` turns pattern strings into compiled regular expressions.
//! A pattern can be a single string, a list of strings and compiled patterns,
//! or an already compiled pattern (which is returned unchanged). A small set
//! of options controls anchoring, containment, negation, case-insensitivity
//! and flags, and every result is memoized by a key derived from the pattern
//! text and the raw options.
//!
//! ## Modules
//!
//! * `options`: The ordered option record, its typed builders and YAML/JSON loading.
//! * `resolver`: Derives the effective configuration from a raw option record.
//! * `negate`: Builds patterns that match everything another pattern does not.
//! * `flags`: Parses JavaScript-style flag strings.
//! * `pattern`: The `CompiledPattern` value type and its matcher.
//! * `cache`: Cache key derivation and the thread-safe `PatternCache`.
//! * `compiler`: The compile pipeline and the `PatternInput` union.
//! * `errors`: Error types.
//!
//! ## Public API
//!
//! * [`to_regex`]: Compiles a string, list or compiled pattern using the shared cache.
//! * [`make_re`]: Compiles a single string (no list handling) using the shared cache.
//! * [`PatternCache`]: An explicit cache for callers that want isolation.
//! * [`Options`]: The option record.
//! * [`CompiledPattern`]: The result, with its source, flags and cache metadata.
//!
//! ## Usage Example
//!
//! ```rust
//! use toregex_core::{to_regex, Options};
//!
//! fn main() -> Result<(), toregex_core::ToRegexError> {
//!     let exact = to_regex("foo", None)?;
//!     assert!(exact.is_match("foo"));
//!     assert!(!exact.is_match("foobar"));
//!
//!     let anywhere = to_regex("foo", Some(&Options::new().contains(true)))?;
//!     assert!(anywhere.is_match("a foo b"));
//!
//!     let not_foo = to_regex("foo", Some(&Options::new().negate(true)))?;
//!     assert!(not_foo.is_match("bar"));
//!     assert!(!not_foo.is_match("foo"));
//!
//!     let either = to_regex(["foo", "bar"], None)?;
//!     assert_eq!(either.source(), "^(?:(?:foo)|(?:bar))$");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Compile operations return [`ToRegexError`]. A missing pattern is always an
//! error; a pattern that does not compile is an error unless `strictErrors` is
//! `false`, in which case a pattern matching nothing is returned instead.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod cache;
pub mod compiler;
pub mod errors;
pub mod flags;
pub mod negate;
pub mod options;
pub mod pattern;
pub mod resolver;

use std::sync::Arc;

/// Re-exports the cache type and its key helpers.
pub use cache::{cache_enabled, cache_key, PatternCache};

/// Re-exports the pattern input union.
pub use compiler::{PatternInput, PatternItem};

/// Re-exports the error types.
pub use errors::{CompileError, SyntaxError, ToRegexError};

pub use flags::Flags;

/// Re-exports the option record.
pub use options::{OptionValue, Options};

/// Re-exports the compiled pattern and its metadata.
pub use pattern::{CacheMetadata, CompiledPattern};

pub use resolver::{resolve, ResolvedOptions};

/// Compiles `pattern` with the process-wide cache.
///
/// Accepts strings, compiled patterns, and lists of either. See
/// [`PatternCache::compile`].
pub fn to_regex(
    pattern: impl Into<PatternInput>,
    options: Option<&Options>,
) -> Result<Arc<CompiledPattern>, ToRegexError> {
    PatternCache::global().compile(pattern, options)
}

/// Compiles a single string with the process-wide cache.
///
/// See [`PatternCache::make_re`].
pub fn make_re(
    pattern: impl Into<PatternInput>,
    options: Option<&Options>,
) -> Result<Arc<CompiledPattern>, ToRegexError> {
    PatternCache::global().make_re(pattern, options)
}
