//! Fuzzy title matching for the search box
//!
//! Scores are on a 0-100 scale. The weighted score takes the best of several
//! views of the two strings:
//! - plain similarity of the normalized strings
//! - similarity after sorting words (word order ignored)
//! - similarity of shared words against the remainder (extra words ignored)
//! - best-window similarity when one string is much shorter than the other,
//!   so a partial title like "knight" still finds "The Dark Knight"

use std::collections::BTreeSet;
use strsim::normalized_damerau_levenshtein;

/// Default minimum score for a match
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Default maximum number of matches
pub const DEFAULT_LIMIT: usize = 10;

/// A title that matched the search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub title: String,
    pub score: u8,
}

/// Lowercase, map punctuation to spaces and collapse whitespace
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_damerau_levenshtein(a, b) * 100.0
}

/// Best ratio of the shorter string against equally long windows of the longer
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let short_len = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();
    if short_len == 0 {
        return 0.0;
    }

    (0..=long_chars.len() - short_len)
        .map(|start| {
            let window: String = long_chars[start..start + short_len].iter().collect();
            ratio(short, &window)
        })
        .fold(0.0, f64::max)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let intersection = join(tokens_a.intersection(&tokens_b).copied().collect());
    let only_a = join(tokens_a.difference(&tokens_b).copied().collect());
    let only_b = join(tokens_b.difference(&tokens_a).copied().collect());

    let combine = |rest: &str| {
        [intersection.as_str(), rest]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    };
    let with_a = combine(&only_a);
    let with_b = combine(&only_b);

    [
        ratio(&intersection, &with_a),
        ratio(&intersection, &with_b),
        ratio(&with_a, &with_b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Weighted similarity of `term` and `candidate` in [0, 100]
pub fn score(term: &str, candidate: &str) -> u8 {
    let a = normalize(term);
    let b = normalize(candidate);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let base = ratio(&a, &b);
    let (len_a, len_b) = (a.chars().count() as f64, b.chars().count() as f64);
    let length_ratio = len_a.max(len_b) / len_a.min(len_b);

    let best = if length_ratio < 1.5 {
        base.max(token_sort_ratio(&a, &b) * 0.95)
            .max(token_set_ratio(&a, &b) * 0.95)
    } else {
        let partial_scale = if length_ratio < 8.0 { 0.9 } else { 0.6 };
        base.max(partial_ratio(&a, &b) * partial_scale)
            .max(token_set_ratio(&a, &b) * 0.95 * partial_scale)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// Search-box filter over a category's titles
#[derive(Debug, Clone, Copy)]
pub struct FuzzyFilter {
    threshold: u8,
    limit: usize,
}

impl Default for FuzzyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_LIMIT)
    }
}

impl FuzzyFilter {
    pub fn new(threshold: u8, limit: usize) -> Self {
        Self { threshold, limit }
    }

    /// Titles scoring at least the threshold, best first
    ///
    /// Ties keep the order of `titles`; at most `limit` matches are returned.
    pub fn search(&self, term: &str, titles: &[String]) -> Vec<FuzzyMatch> {
        let mut matches: Vec<FuzzyMatch> = titles
            .iter()
            .map(|title| FuzzyMatch {
                title: title.clone(),
                score: score(term, title),
            })
            .filter(|m| m.score >= self.threshold)
            .collect();

        // Stable sort keeps original order among equal scores
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(self.limit);

        tracing::debug!(term = %term, matches = matches.len(), "Fuzzy search completed");

        matches
    }
}
