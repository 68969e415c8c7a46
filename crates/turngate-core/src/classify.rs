//! Utterance classification
//!
//! Pure function from normalized tokens to a `Classification`. The priority
//! ordering here is the crux of mixed-input correctness: command detection
//! always beats backchannel detection, so "yeah but wait" interrupts even
//! though "yeah" is an ignore word.

use crate::normalize::normalize;
use crate::types::Classification;
use crate::wordset::WordSetConfig;

/// Classify a normalized token sequence.
///
/// Priority order, first match wins:
/// 1. empty tokens are `Normal` — silence is not proof of backchanneling
///    and must never suppress anything;
/// 2. any command word or contiguous command phrase yields `Command`;
/// 3. if every token is an ignore word, `Backchannel` (all, not any — one
///    substantive token disqualifies the whole utterance);
/// 4. otherwise `Normal`.
pub fn classify(tokens: &[String], config: &WordSetConfig) -> Classification {
    if tokens.is_empty() {
        return Classification::Normal;
    }
    if has_command_trigger(tokens, config) {
        return Classification::Command;
    }
    if tokens
        .iter()
        .all(|t| config.ignore_words.contains(t.as_str()))
    {
        return Classification::Backchannel;
    }
    Classification::Normal
}

fn has_command_trigger(tokens: &[String], config: &WordSetConfig) -> bool {
    if tokens
        .iter()
        .any(|t| config.command_words.contains(t.as_str()))
    {
        return true;
    }
    config.command_phrases.iter().any(|phrase| {
        let needle = normalize(phrase);
        !needle.is_empty()
            && tokens
                .windows(needle.len())
                .any(|window| window == needle.as_slice())
    })
}
