//! Fuzzy name resolution using Levenshtein distance
//!
//! Resolves noisy transcriptions ("open yuotube") to known registry names.
//! Matching is tried strictest-first: an exact or token hit always beats an
//! approximate one, and substring containment is the last resort.

use crate::registry::{Registry, RegistryEntry};

/// Minimum normalized similarity for an approximate match.
const SIMILARITY_CUTOFF: f32 = 0.6;

/// Resolve a candidate phrase to the best matching registry entry.
///
/// Precedence: exact name, any whitespace token equal to a name, closest
/// name with similarity at or above the cutoff, then substring containment
/// in either direction. Empty phrases never match.
pub fn resolve<'a>(phrase: &str, registry: &'a Registry) -> Option<&'a RegistryEntry> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return None;
    }

    if let Some(entry) = registry.entries().find(|e| e.name == phrase) {
        return Some(entry);
    }

    for token in phrase.split_whitespace() {
        if let Some(entry) = registry.entries().find(|e| e.name == token) {
            return Some(entry);
        }
    }

    // Closest name overall; ties keep the earlier entry
    let mut best: Option<(&RegistryEntry, f32)> = None;
    for entry in registry.entries() {
        let score = similarity(phrase, &entry.name);
        if score >= SIMILARITY_CUTOFF && best.map_or(true, |(_, s)| score > s) {
            best = Some((entry, score));
        }
    }
    if let Some((entry, _)) = best {
        return Some(entry);
    }

    registry
        .entries()
        .find(|e| phrase.contains(&e.name) || e.name.contains(phrase))
}

/// Normalized similarity on 0.0..=1.0, where 1.0 means identical.
pub fn similarity(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f32 / max_len as f32
}

/// Calculate Levenshtein distance between two strings
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0; b.len() + 1]; a.len() + 1];

    for i in 0..=a.len() {
        dp[i][0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}
