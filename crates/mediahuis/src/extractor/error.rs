use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("no supported video embed found on {0}")]
    UnsupportedEmbed(String),
    #[error("unable to extract {0}")]
    FieldNotFound(String),
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("url error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("tls error: {0}")]
    TlsError(String),
}
