#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error(transparent)]
    Regex(#[from] fancy_regex::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
    #[error("unknown browser name in rules: {0:?}")]
    UnknownBrowser(String),
    #[error("unknown app in rules: {0:?}")]
    UnknownApp(String),
    /// The token is not base64.
    #[error("invalid auth state token: {0}")]
    InvalidToken(#[from] base64::DecodeError),
    /// The token decodes, but not to a payload.
    #[error("invalid auth state payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
