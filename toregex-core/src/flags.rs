//! flags.rs - JavaScript-style regex flag strings.
//!
//! Flags arrive as a string such as `"ig"`. Only `i`, `m` and `s` change how
//! a pattern matches; they are rendered as an inline group in front of the
//! compiled text. The remaining letters are accepted and recorded so they
//! survive into [`Flags`]'s `Display` output, but have no effect on matching.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use crate::errors::SyntaxError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    pub has_indices: bool,
    pub global: bool,
    pub ignore_case: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub unicode_sets: bool,
    pub sticky: bool,
}

impl Flags {
    /// Parses a flag string. Unknown or repeated letters are rejected, as is
    /// combining `u` with `v`.
    pub fn parse(flags: &str) -> Result<Self, SyntaxError> {
        let mut parsed = Flags::default();
        for letter in flags.chars() {
            let slot = match letter {
                'd' => &mut parsed.has_indices,
                'g' => &mut parsed.global,
                'i' => &mut parsed.ignore_case,
                'm' => &mut parsed.multi_line,
                's' => &mut parsed.dot_all,
                'u' => &mut parsed.unicode,
                'v' => &mut parsed.unicode_sets,
                'y' => &mut parsed.sticky,
                _ => return Err(SyntaxError::InvalidFlags(flags.to_string())),
            };
            if *slot {
                return Err(SyntaxError::InvalidFlags(flags.to_string()));
            }
            *slot = true;
        }

        if parsed.unicode && parsed.unicode_sets {
            return Err(SyntaxError::InvalidFlags(flags.to_string()));
        }
        Ok(parsed)
    }

    /// The inline flag group for the flags that affect matching, e.g. `(?im)`.
    pub fn inline_prefix(&self) -> String {
        let mut letters = String::new();
        if self.ignore_case {
            letters.push('i');
        }
        if self.multi_line {
            letters.push('m');
        }
        if self.dot_all {
            letters.push('s');
        }

        if letters.is_empty() {
            letters
        } else {
            format!("(?{letters})")
        }
    }
}

/// Canonical order, matching `RegExp.prototype.flags`.
impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = [
            (self.has_indices, 'd'),
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.unicode_sets, 'v'),
            (self.sticky, 'y'),
        ];
        for (set, letter) in letters {
            if set {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}
