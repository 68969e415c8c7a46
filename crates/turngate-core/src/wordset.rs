//! Word-set configuration
//!
//! Three lists drive classification: backchannel tokens to ignore, single
//! commands that always interrupt, and multi-word command phrases matched
//! against contiguous token windows. Entries are case-folded on
//! construction so lookups stay byte comparisons.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize::normalize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSetConfig {
    /// Backchannel/acknowledgment tokens
    pub ignore_words: HashSet<String>,
    /// Single-token interrupt triggers
    pub command_words: HashSet<String>,
    /// Multi-token interrupt triggers, matched as contiguous substrings
    pub command_phrases: Vec<String>,
}

impl Default for WordSetConfig {
    fn default() -> Self {
        Self {
            ignore_words: [
                "yeah", "yep", "yes", "yup", "ok", "okay", "alright", "right", "sure", "cool",
                "uh-huh", "mm-hmm", "mhm", "mm", "hmm", "gotcha", "exactly", "totally",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            command_words: ["stop", "wait", "pause", "cancel", "no"]
                .into_iter()
                .map(String::from)
                .collect(),
            command_phrases: ["hold on", "hang on", "one second", "never mind", "excuse me"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl WordSetConfig {
    /// Build a validated, case-folded config from raw lists.
    pub fn new<I, J, K>(ignore_words: I, command_words: J, command_phrases: K) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let config = Self {
            ignore_words: ignore_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            command_words: command_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            command_phrases: command_phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject contradictory configuration at construction time.
    ///
    /// A word in both sets would make "yeah" simultaneously a pacifier and
    /// an interrupt trigger; that ambiguity must not be resolved silently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(word) = self.ignore_words.intersection(&self.command_words).next() {
            return Err(ConfigError::OverlappingWordSets { word: word.clone() });
        }
        for phrase in &self.command_phrases {
            if normalize(phrase).is_empty() {
                return Err(ConfigError::EmptyCommandPhrase {
                    phrase: phrase.clone(),
                });
            }
        }
        Ok(())
    }
}
