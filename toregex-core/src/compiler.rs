//! compiler.rs - Assembles, compiles and caches patterns.
//!
//! This module provides the two compile operations on [`PatternCache`]:
//!
//! * [`PatternCache::make_re`] compiles a single string (or passes an already
//!   compiled pattern straight through).
//! * [`PatternCache::compile`] additionally accepts a list of patterns, which
//!   it joins into one alternation before delegating to `make_re`.
//!
//! The whole lookup-compile-insert sequence runs under the cache lock, so a
//! key is compiled at most once per cache.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, trace, warn};
use std::sync::Arc;

use crate::cache::{cache_enabled, cache_key, PatternCache};
use crate::errors::{CompileError, ToRegexError};
use crate::negate;
use crate::options::{Options, WRAP};
use crate::pattern::{CacheMetadata, CompiledPattern};
use crate::resolver::resolve;

/// One element of a pattern list.
#[derive(Debug, Clone)]
pub enum PatternItem {
    Text(String),
    Compiled(Arc<CompiledPattern>),
}

impl PatternItem {
    /// The text this item contributes to the joined alternation.
    pub fn source_text(&self) -> &str {
        match self {
            PatternItem::Text(text) => text,
            PatternItem::Compiled(re) => re.source(),
        }
    }
}

impl From<&str> for PatternItem {
    fn from(text: &str) -> Self {
        PatternItem::Text(text.to_string())
    }
}

impl From<String> for PatternItem {
    fn from(text: String) -> Self {
        PatternItem::Text(text)
    }
}

impl From<Arc<CompiledPattern>> for PatternItem {
    fn from(re: Arc<CompiledPattern>) -> Self {
        PatternItem::Compiled(re)
    }
}

impl From<&Arc<CompiledPattern>> for PatternItem {
    fn from(re: &Arc<CompiledPattern>) -> Self {
        PatternItem::Compiled(Arc::clone(re))
    }
}

impl From<CompiledPattern> for PatternItem {
    fn from(re: CompiledPattern) -> Self {
        PatternItem::Compiled(Arc::new(re))
    }
}

/// Everything the compile operations accept.
#[derive(Debug, Clone)]
pub enum PatternInput {
    /// No pattern was supplied.
    Missing,
    Text(String),
    /// Returned unchanged.
    Compiled(Arc<CompiledPattern>),
    /// Only accepted by [`PatternCache::compile`].
    List(Vec<PatternItem>),
}

impl From<&str> for PatternInput {
    fn from(text: &str) -> Self {
        PatternInput::Text(text.to_string())
    }
}

impl From<String> for PatternInput {
    fn from(text: String) -> Self {
        PatternInput::Text(text)
    }
}

impl From<&String> for PatternInput {
    fn from(text: &String) -> Self {
        PatternInput::Text(text.clone())
    }
}

impl From<Arc<CompiledPattern>> for PatternInput {
    fn from(re: Arc<CompiledPattern>) -> Self {
        PatternInput::Compiled(re)
    }
}

impl From<&Arc<CompiledPattern>> for PatternInput {
    fn from(re: &Arc<CompiledPattern>) -> Self {
        PatternInput::Compiled(Arc::clone(re))
    }
}

impl From<CompiledPattern> for PatternInput {
    fn from(re: CompiledPattern) -> Self {
        PatternInput::Compiled(Arc::new(re))
    }
}

impl From<PatternItem> for PatternInput {
    fn from(item: PatternItem) -> Self {
        match item {
            PatternItem::Text(text) => PatternInput::Text(text),
            PatternItem::Compiled(re) => PatternInput::Compiled(re),
        }
    }
}

impl<T: Into<PatternItem>> From<Vec<T>> for PatternInput {
    fn from(items: Vec<T>) -> Self {
        PatternInput::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PatternItem>, const N: usize> From<[T; N]> for PatternInput {
    fn from(items: [T; N]) -> Self {
        PatternInput::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PatternInput>> From<Option<T>> for PatternInput {
    fn from(pattern: Option<T>) -> Self {
        pattern.map_or(PatternInput::Missing, Into::into)
    }
}

/// Joins list items into one alternation, wrapping each in a non-capturing
/// group when `wrap` is set.
fn join_items(items: &[PatternItem], wrap: bool) -> String {
    items
        .iter()
        .map(|item| {
            if wrap {
                format!("(?:{})", item.source_text())
            } else {
                item.source_text().to_string()
            }
        })
        .collect::<Vec<String>>()
        .join("|")
}

/// A freshly compiled pattern and the effective options behind it.
struct Fresh {
    compiled: CompiledPattern,
    effective: Options,
}

/// Resolves options, negates if asked, assembles and compiles `pattern`.
///
/// Returns `Ok(None)` when compilation failed and `strictErrors` is `false`.
fn compile_fresh(pattern: &str, key: &str, raw: Option<&Options>) -> Result<Option<Fresh>, ToRegexError> {
    let resolved = resolve(raw);

    let body = if resolved.negate {
        negate::create(pattern, &resolved.options)
    } else {
        pattern.to_string()
    };
    let assembled = format!("{}(?:{}){}", resolved.open, body, resolved.close);
    trace!("Assembled /{}/{} for key {:?}", assembled, resolved.flags, key);

    match CompiledPattern::new(&assembled, &resolved.flags) {
        Ok(compiled) => Ok(Some(Fresh {
            compiled,
            effective: resolved.options,
        })),
        Err(source) if resolved.strict_errors() => Err(Box::new(CompileError {
            key: key.to_string(),
            pattern: assembled,
            flags: resolved.flags,
            original_options: raw.cloned(),
            created_options: resolved.options,
            source,
        })
        .into()),
        Err(source) => {
            warn!(
                "Pattern /{}/{} failed to compile ({}); substituting the match-nothing pattern.",
                assembled, resolved.flags, source
            );
            Ok(None)
        }
    }
}

impl PatternCache {
    /// Compiles a string, a compiled pattern, or a list of either.
    ///
    /// List items are wrapped in non-capturing groups (unless `wrap` is
    /// `false`) and joined with `|` before compiling.
    pub fn compile(
        &self,
        pattern: impl Into<PatternInput>,
        options: Option<&Options>,
    ) -> Result<Arc<CompiledPattern>, ToRegexError> {
        match pattern.into() {
            PatternInput::List(items) => {
                let wrap = !options.is_some_and(|opts| opts.is_false(WRAP));
                let joined = join_items(&items, wrap);
                debug!("Joined {} pattern(s) into {:?}", items.len(), joined);
                self.make_re(joined, options)
            }
            other => self.make_re(other, options),
        }
    }

    /// Compiles a single string, or returns an already compiled pattern as-is.
    pub fn make_re(
        &self,
        pattern: impl Into<PatternInput>,
        options: Option<&Options>,
    ) -> Result<Arc<CompiledPattern>, ToRegexError> {
        let pattern = match pattern.into() {
            PatternInput::Compiled(re) => return Ok(re),
            PatternInput::Text(text) => text,
            PatternInput::Missing | PatternInput::List(_) => return Err(ToRegexError::InvalidInput),
        };

        let key = cache_key(&pattern, options);

        if !cache_enabled(options) {
            debug!("Caching disabled, compiling {:?} from scratch.", key);
            let fresh = compile_fresh(&pattern, &key, options)?;
            return Ok(fresh.map_or_else(CompiledPattern::match_nothing, |fresh| {
                Arc::new(fresh.compiled)
            }));
        }

        let mut entries = self.lock();
        if let Some(hit) = entries.get(&key) {
            debug!("Serving compiled pattern from cache for key: {:?}", key);
            return Ok(Arc::clone(hit));
        }

        debug!("Compiled pattern not found in cache. Compiling {:?} now.", key);
        let Some(Fresh { mut compiled, effective }) = compile_fresh(&pattern, &key, options)? else {
            return Ok(CompiledPattern::match_nothing());
        };

        compiled.annotate(CacheMetadata {
            cached: true,
            pattern: compiled.source().to_string(),
            options: effective,
            key: key.clone(),
        });
        let compiled = Arc::new(compiled);
        entries.insert(key, Arc::clone(&compiled));
        debug!("Cached compiled pattern {}", compiled);

        Ok(compiled)
    }
}
