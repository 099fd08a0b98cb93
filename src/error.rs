use thiserror::Error;

/// Failures of the outbound completion call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("unsupported outgoing message kind: {0}")]
    UnsupportedMessageKind(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
