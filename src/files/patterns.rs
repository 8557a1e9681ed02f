//! Filename pattern matching
//!
//! A pattern is one of:
//! - empty: matches every filename
//! - a glob containing `*` or `?` (`**/` also matches zero leading segments)
//! - an extension starting with `.`, matched as a suffix
//! - anything else, matched exactly
//!
//! Globs are case-insensitive and anchored at both ends. Extension and exact
//! patterns are case-sensitive.

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

/// A pattern compiled once and applied to every filename in a batch
#[derive(Debug, Clone)]
pub enum PatternMatcher {
    All,
    Glob(Regex),
    /// Glob that failed to compile; matched by substring containment
    Contains(String),
    Extension(String),
    Exact(String),
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Self {
        if pattern.is_empty() {
            return PatternMatcher::All;
        }

        if is_glob(pattern) {
            return match compile_glob(pattern) {
                Ok(regex) => PatternMatcher::Glob(regex),
                Err(e) => {
                    warn!("Glob {:?} failed to compile ({}), using substring match", pattern, e);
                    PatternMatcher::Contains(pattern.to_string())
                }
            };
        }

        if pattern.starts_with('.') {
            PatternMatcher::Extension(pattern.to_string())
        } else {
            PatternMatcher::Exact(pattern.to_string())
        }
    }

    pub fn matches(&self, filename: &str) -> bool {
        match self {
            PatternMatcher::All => true,
            PatternMatcher::Glob(regex) => regex.is_match(filename),
            PatternMatcher::Contains(pattern) => filename.contains(pattern.as_str()),
            PatternMatcher::Extension(ext) => filename.ends_with(ext.as_str()),
            PatternMatcher::Exact(name) => filename == name,
        }
    }
}

/// Check whether a filename matches a pattern
pub fn matches_pattern(filename: &str, pattern: &str) -> bool {
    PatternMatcher::new(pattern).matches(filename)
}

/// Check whether a filename matches a glob pattern
pub fn matches_glob_pattern(filename: &str, pattern: &str) -> bool {
    match compile_glob(pattern) {
        Ok(regex) => regex.is_match(filename),
        Err(_) => filename.contains(pattern),
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Translate a glob into an anchored regular expression.
///
/// `**/` becomes an optional run of leading segments, `**` and `*` become
/// `.*`, `?` becomes `.`, everything else is literal.
pub fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    regex.push('^');

    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    regex.push_str("(?:.*/)?");
                } else {
                    regex.push_str(".*");
                }
            }
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            _ => {
                let mut buf = [0u8; 4];
                regex.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
            }
        }
    }

    regex.push('$');
    regex
}

fn compile_glob(pattern: &str) -> Result<Regex, regex::Error> {
    let translated = glob_to_regex(pattern);
    debug!("Glob {:?} translated to {:?}", pattern, translated);
    RegexBuilder::new(&translated)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}
