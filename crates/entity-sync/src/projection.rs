//! Search and Sort Projection
//!
//! Pure transform from a collection to the ordered, filtered view of it.
//! Recomputed on every render; nothing here is stored.

use std::cmp::Ordering;

use log::debug;
use regex::{Regex, RegexBuilder};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Upper bound on compiled pattern size; user input is untrusted
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Anything with a display name to sort and search by
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

/// A parsed search query.
///
/// The query is a case-insensitive regular expression. Syntax errors fail
/// closed: the pattern matches nothing.
#[derive(Debug, Clone)]
pub enum SearchPattern {
    Any,
    Regex(Regex),
    Invalid { source: String, reason: String },
}

impl SearchPattern {
    pub fn parse(query: &str) -> Self {
        if query.is_empty() {
            return SearchPattern::Any;
        }
        match RegexBuilder::new(query)
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
        {
            Ok(re) => SearchPattern::Regex(re),
            Err(e) => {
                debug!("invalid search pattern {:?}: {}", query, e);
                SearchPattern::Invalid {
                    source: query.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            SearchPattern::Any => true,
            SearchPattern::Regex(re) => re.is_match(name),
            SearchPattern::Invalid { .. } => false,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, SearchPattern::Invalid { .. })
    }

    /// Error message for an invalid pattern
    pub fn reason(&self) -> Option<&str> {
        match self {
            SearchPattern::Invalid { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl Default for SearchPattern {
    fn default() -> Self {
        SearchPattern::Any
    }
}

/// Locale-style name ordering: accent- and case-insensitive first, then
/// lowercase before uppercase, then raw code points
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

/// Base letters only: NFD with combining marks dropped, lowercased
fn primary_key(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Sort by name, then keep the entries the pattern matches
pub fn project<'a, T: Named>(items: &'a [T], pattern: &SearchPattern) -> Vec<&'a T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| compare_names(a.name(), b.name()));
    sorted.retain(|item| pattern.matches(item.name()));
    sorted
}
