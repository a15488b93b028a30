//! resolver.rs - Turns a raw option record into the effective configuration.
//!
//! Resolution is pure: the caller's record is shallow-copied first and never
//! modified. Implied options are written into the copy, so the effective
//! record stored in the cache metadata shows what was actually applied.
//!
//! License: MIT OR APACHE 2.0

use log::trace;

use crate::options::{
    Options, CONTAINS, FLAGS, NEGATE, NOCASE, STRICT, STRICT_CLOSE, STRICT_ERRORS, STRICT_NEGATE,
    STRICT_OPEN,
};

/// The effective configuration for one compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    /// The caller's options with implied entries written in.
    pub options: Options,
    /// `"^"` or the empty string.
    pub open: &'static str,
    /// `"$"` or the empty string.
    pub close: &'static str,
    /// Raw flags, with `i` appended when `nocase` asks for it.
    pub flags: String,
    /// Whether the pattern must be passed through the negation expansion.
    pub negate: bool,
}

impl ResolvedOptions {
    /// Compile failures are fatal unless `strictErrors` is explicitly `false`.
    pub fn strict_errors(&self) -> bool {
        !self.options.is_false(STRICT_ERRORS)
    }
}

/// Resolves `raw` into its effective configuration.
pub fn resolve(raw: Option<&Options>) -> ResolvedOptions {
    let mut opts = Options::new().extend(raw);

    if opts.is_true(CONTAINS) {
        if opts.is_true(NEGATE) {
            opts.set(STRICT_NEGATE, false);
        } else {
            opts.set(STRICT, false);
        }
    }

    if opts.is_false(STRICT) {
        opts.set(STRICT_OPEN, false);
        opts.set(STRICT_CLOSE, false);
    }

    let open = if opts.is_false(STRICT_OPEN) { "" } else { "^" };
    let close = if opts.is_false(STRICT_CLOSE) { "" } else { "$" };

    let mut flags = opts
        .get(FLAGS)
        .filter(|value| value.is_truthy())
        .map(ToString::to_string)
        .unwrap_or_default();
    if opts.is_true(NOCASE) && !flags.contains('i') {
        flags.push('i');
    }

    // A boolean strictNegate requests negation even when `negate` is unset.
    let negate = opts.is_truthy(NEGATE) || opts.get_bool(STRICT_NEGATE).is_some();

    trace!(
        "Resolved options: open={:?} close={:?} flags={:?} negate={}",
        open,
        close,
        flags,
        negate
    );

    ResolvedOptions {
        options: opts,
        open,
        close,
        flags,
        negate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fully_anchored() {
        let resolved = resolve(None);
        assert_eq!((resolved.open, resolved.close), ("^", "$"));
        assert_eq!(resolved.flags, "");
        assert!(!resolved.negate);
        assert!(resolved.strict_errors());
        assert!(resolved.options.is_empty());
    }

    #[test]
    fn test_contains_disables_anchors() {
        let resolved = resolve(Some(&Options::new().contains(true)));
        assert_eq!((resolved.open, resolved.close), ("", ""));
        assert!(resolved.options.is_false(STRICT));
        assert!(!resolved.negate);
    }

    #[test]
    fn test_contains_with_negate_loosens_negation_only() {
        let resolved = resolve(Some(&Options::new().contains(true).negate(true)));
        assert_eq!((resolved.open, resolved.close), ("^", "$"));
        assert!(resolved.options.is_false(STRICT_NEGATE));
        assert!(!resolved.options.contains_key(STRICT));
        assert!(resolved.negate);
    }

    #[test]
    fn test_strict_false_overrides_explicit_anchor_flags() {
        let raw = Options::new().strict_open(true).strict(false);
        let resolved = resolve(Some(&raw));
        assert_eq!((resolved.open, resolved.close), ("", ""));
    }

    #[test]
    fn test_single_anchor_flags() {
        let resolved = resolve(Some(&Options::new().strict_open(false)));
        assert_eq!((resolved.open, resolved.close), ("", "$"));

        let resolved = resolve(Some(&Options::new().strict_close(false)));
        assert_eq!((resolved.open, resolved.close), ("^", ""));
    }

    #[test]
    fn test_nocase_appends_flag_once() {
        assert_eq!(resolve(Some(&Options::new().nocase(true))).flags, "i");
        assert_eq!(resolve(Some(&Options::new().flags("gi").nocase(true))).flags, "gi");
        assert_eq!(resolve(Some(&Options::new().flags("g").nocase(true))).flags, "gi");
    }

    #[test]
    fn test_strict_negate_presence_requests_negation() {
        assert!(resolve(Some(&Options::new().strict_negate(false))).negate);
        assert!(resolve(Some(&Options::new().strict_negate(true))).negate);
        assert!(!resolve(Some(&Options::new().negate(false))).negate);
    }

    #[test]
    fn test_raw_options_are_not_mutated() {
        let raw = Options::new().contains(true);
        let _ = resolve(Some(&raw));
        assert_eq!(raw, Options::new().contains(true));
    }
}
