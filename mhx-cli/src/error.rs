use mediahuis_parser::ExtractorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Extractor(#[from] ExtractorError),
    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
