//! Transcript normalization
//!
//! STT providers disagree on casing and punctuation, so everything funnels
//! through one normalization step before classification. Internal hyphens
//! are preserved so "uh-huh," stays a single token.

/// Lowercase, strip punctuation (keeping internal hyphens), collapse
/// whitespace, and split into tokens.
///
/// Empty or whitespace-only input yields an empty vec. Total over any
/// input, no errors.
pub fn normalize(raw: &str) -> Vec<String> {
    raw.split_whitespace().filter_map(normalize_token).collect()
}

fn normalize_token(word: &str) -> Option<String> {
    let lowered = word.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();
    // Hyphens are only meaningful inside a token
    let trimmed = kept.trim_matches('-');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
