use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use rustls::{ClientConfig, crypto::aws_lc_rs};
use rustls_platform_verifier::BuilderVerifierExt;

use super::error::ExtractorError;

pub const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the shared HTTP client: rustls with the platform verifier,
/// gzip/deflate decoding and a request timeout.
///
/// The user agent is sent per request by [`Extractor`](super::platform_extractor::Extractor).
pub fn build_client(timeout: Duration) -> Result<Client, ExtractorError> {
    let provider = Arc::new(aws_lc_rs::default_provider());
    let tls_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| ExtractorError::TlsError(e.to_string()))?
        .with_platform_verifier()
        .map_err(|e| ExtractorError::TlsError(e.to_string()))?
        .with_no_client_auth();

    Ok(Client::builder()
        .use_preconfigured_tls(tls_config)
        .timeout(timeout)
        .build()?)
}

pub fn default_client() -> Result<Client, ExtractorError> {
    build_client(DEFAULT_TIMEOUT)
}
