//! cache.rs - Memoizes compiled patterns by pattern text and raw options.
//!
//! A [`PatternCache`] maps a derived key to a shared [`CompiledPattern`].
//! Entries are never evicted. The crate-level convenience functions share one
//! process-wide instance; callers that want isolation construct their own.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::options::{OptionValue, Options, CACHE};
use crate::pattern::CompiledPattern;

lazy_static! {
    /// The cache behind [`crate::to_regex`] and [`crate::make_re`].
    static ref GLOBAL_CACHE: PatternCache = PatternCache::new();
}

/// Derives the cache key: the pattern text followed by `; name=value` for
/// every raw option, in record order.
///
/// Every piece is length-prefixed (`3:foo`) and values carry a type tag
/// (`b`, `i`, `f` or `s`), so text inside a pattern, name or value can never
/// be read as a separator, and `"true"` never shares a key with `true`.
pub fn cache_key(pattern: &str, options: Option<&Options>) -> String {
    let mut key = String::new();
    push_piece(&mut key, pattern);
    if let Some(options) = options {
        for (name, value) in options.iter() {
            key.push_str("; ");
            push_piece(&mut key, name);
            key.push('=');
            key.push(value_tag(value));
            push_piece(&mut key, &value.to_string());
        }
    }
    key
}

fn push_piece(key: &mut String, piece: &str) {
    key.push_str(&piece.len().to_string());
    key.push(':');
    key.push_str(piece);
}

fn value_tag(value: &OptionValue) -> char {
    match value {
        OptionValue::Bool(_) => 'b',
        OptionValue::Int(_) => 'i',
        OptionValue::Float(_) => 'f',
        OptionValue::Str(_) => 's',
    }
}

/// Caching is on unless the raw options set `cache` to `false`.
pub fn cache_enabled(options: Option<&Options>) -> bool {
    !options.is_some_and(|opts| opts.is_false(CACHE))
}

/// A thread-safe store of compiled patterns.
#[derive(Debug, Default)]
pub struct PatternCache {
    entries: Mutex<HashMap<String, Arc<CompiledPattern>>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide shared cache.
    pub fn global() -> &'static PatternCache {
        &GLOBAL_CACHE
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    // The map is never left half-updated, so a poisoned lock is still usable.
    pub(crate) fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<CompiledPattern>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
