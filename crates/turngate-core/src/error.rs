use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("word {word:?} appears in both the ignore and command sets")]
    OverlappingWordSets { word: String },

    #[error("command phrase {phrase:?} contains no usable tokens")]
    EmptyCommandPhrase { phrase: String },
}
