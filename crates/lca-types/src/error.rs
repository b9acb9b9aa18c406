use thiserror::Error;

/// Errors in a response rule definition.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule is missing a name")]
    MissingName,

    #[error("rule '{0}' has no keywords")]
    NoKeywords(String),

    #[error("rule '{0}' has a blank keyword")]
    BlankKeyword(String),

    #[error("rule '{0}' has a blank reply text")]
    BlankText(String),

    #[error("duplicate rule name '{0}'")]
    DuplicateName(String),
}

/// Errors from loading the assistant configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("invalid rule table: {0}")]
    Rules(#[from] RuleError),
}
