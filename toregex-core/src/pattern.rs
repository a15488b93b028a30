//! pattern.rs - The compiled pattern value returned by the compiler.
//!
//! A [`CompiledPattern`] owns its matcher together with the text and flags it
//! was built from. Patterns are compiled adaptively: the `regex` crate is
//! tried first, and only text it rejects (look-around, mostly) falls back to
//! the backtracking `fancy_regex` engine.
//!
//! License: MIT OR APACHE 2.0

use fancy_regex::RegexBuilder as FancyRegexBuilder;
use log::{trace, warn};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;

use crate::errors::SyntaxError;
use crate::flags::Flags;
use crate::options::Options;

/// Size limit for the compiled program of the non-backtracking engine.
const SIZE_LIMIT: usize = 10 * (1 << 20);

/// Step budget for one match attempt of the backtracking engine.
const BACKTRACK_LIMIT: usize = 1_000_000;

const MATCH_NOTHING_SOURCE: &str = ".^";

static MATCH_NOTHING: Lazy<Arc<CompiledPattern>> = Lazy::new(|| {
    Arc::new(CompiledPattern {
        source: MATCH_NOTHING_SOURCE.to_string(),
        flags: Flags::default(),
        matcher: Matcher::Basic(
            Regex::new(MATCH_NOTHING_SOURCE).expect("match-nothing sentinel must compile"),
        ),
        metadata: None,
    })
});

#[derive(Debug)]
enum Matcher {
    Basic(Regex),
    Fancy(fancy_regex::Regex),
}

/// Cache bookkeeping attached to patterns that went through the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheMetadata {
    /// Always `true` once a pattern has been stored.
    pub cached: bool,
    /// The final assembled pattern text.
    pub pattern: String,
    /// The effective options the pattern was built with.
    pub options: Options,
    /// The key the pattern is stored under.
    pub key: String,
}

#[derive(Debug)]
pub struct CompiledPattern {
    source: String,
    flags: Flags,
    matcher: Matcher,
    metadata: Option<CacheMetadata>,
}

impl CompiledPattern {
    /// Compiles `source` with a JavaScript-style flag string.
    pub fn new(source: &str, flags: &str) -> Result<Self, SyntaxError> {
        Self::with_flags(source, Flags::parse(flags)?)
    }

    pub fn with_flags(source: &str, flags: Flags) -> Result<Self, SyntaxError> {
        let text = format!("{}{}", flags.inline_prefix(), source);

        let matcher = match RegexBuilder::new(&text).size_limit(SIZE_LIMIT).build() {
            Ok(regex) => Matcher::Basic(regex),
            Err(err) => {
                trace!("Falling back to the backtracking engine for /{}/: {}", source, err);
                let regex = FancyRegexBuilder::new(&text)
                    .backtrack_limit(BACKTRACK_LIMIT)
                    .build()?;
                Matcher::Fancy(regex)
            }
        };

        Ok(Self {
            source: source.to_string(),
            flags,
            matcher,
            metadata: None,
        })
    }

    /// The shared pattern that matches no input at all.
    pub fn match_nothing() -> Arc<Self> {
        Arc::clone(&MATCH_NOTHING)
    }

    pub(crate) fn annotate(&mut self, metadata: CacheMetadata) {
        self.metadata = Some(metadata);
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn metadata(&self) -> Option<&CacheMetadata> {
        self.metadata.as_ref()
    }

    /// `true` if this pattern was stored in (and may be served from) a cache.
    pub fn is_cached(&self) -> bool {
        self.metadata.as_ref().is_some_and(|meta| meta.cached)
    }

    /// `true` if matching runs on the backtracking engine.
    pub fn is_backtracking(&self) -> bool {
        matches!(self.matcher, Matcher::Fancy(_))
    }

    /// Reports whether the pattern matches anywhere in `haystack`.
    ///
    /// A match attempt the backtracking engine gives up on counts as no match;
    /// use [`CompiledPattern::try_is_match`] to see those failures.
    pub fn is_match(&self, haystack: &str) -> bool {
        match self.try_is_match(haystack) {
            Ok(found) => found,
            Err(err) => {
                warn!("Match attempt for /{}/ aborted: {}", self.source, err);
                false
            }
        }
    }

    /// Alias of [`CompiledPattern::is_match`].
    ///
    /// Negated patterns run on the backtracking engine, which gives up on very
    /// long inputs; this returns `false` for those, which reads as "matches
    /// the original". Call [`CompiledPattern::try_is_match`] when inputs can
    /// be large.
    pub fn test(&self, haystack: &str) -> bool {
        self.is_match(haystack)
    }

    pub fn try_is_match(&self, haystack: &str) -> Result<bool, fancy_regex::Error> {
        match &self.matcher {
            Matcher::Basic(regex) => Ok(regex.is_match(haystack)),
            Matcher::Fancy(regex) => regex.is_match(haystack),
        }
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}
