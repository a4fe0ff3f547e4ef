use std::str::FromStr;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

use super::{default::DEFAULT_UA, error::ExtractorError};
use crate::media::VideoInfo;

/// Base extractor: the page URL, a shared reqwest client and the headers
/// sent with every request.
///
/// ```rust,no_run
/// # use reqwest::Client;
/// # use mediahuis_parser::extractor::platform_extractor::{Extractor, PageFetcher};
/// # async fn doc_test() -> Result<(), mediahuis_parser::ExtractorError> {
/// let mut extractor = Extractor::new("Mediahuis", "https://www.gva.be/cnt/dmf20170412_02831246", Client::new());
/// extractor.add_header_str("Referer", "https://www.gva.be/");
///
/// let html = extractor.fetch_page("https://www.gva.be/cnt/dmf20170412_02831246").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    // url to extract from, e.g., "http://www.nieuwsblad.be/cnt/dmf20151224_02036890"
    pub url: String,
    // name of the platform, e.g., "Mediahuis"
    pub platform_name: String,
    pub client: Client,
    platform_headers: HeaderMap,
}

impl Extractor {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        platform_name: S1,
        platform_url: S2,
        client: Client,
    ) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_UA),
        );
        default_headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        default_headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("nl-BE,nl;q=0.9,en-US;q=0.5,en;q=0.3"),
        );
        // Accept-Encoding is left to reqwest so responses are decompressed.

        Self {
            platform_name: platform_name.into(),
            url: platform_url.into(),
            client,
            platform_headers: default_headers,
        }
    }

    pub fn add_header_str<K: AsRef<str>, V: AsRef<str>>(&mut self, key: K, value: V) {
        match HeaderName::from_str(key.as_ref()) {
            Ok(name) => match HeaderValue::from_str(value.as_ref()) {
                Ok(value) => {
                    self.platform_headers.insert(name, value);
                }
                Err(e) => {
                    debug!(error = %e, "Invalid header value; skipping");
                }
            },
            Err(e) => {
                debug!(error = %e, "Invalid header name; skipping");
            }
        }
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .headers(self.platform_headers.clone())
    }

    pub fn get_platform_headers(&self) -> &HeaderMap {
        &self.platform_headers
    }
}

/// Downloads the HTML of a page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, ExtractorError>;
}

#[async_trait]
impl PageFetcher for Extractor {
    async fn fetch_page(&self, url: &str) -> Result<String, ExtractorError> {
        debug!(platform = %self.platform_name, url, "Downloading webpage");
        let response = self.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
pub trait PlatformExtractor: Send + Sync {
    fn get_extractor(&self) -> &Extractor;

    fn get_platform_headers(&self) -> &HeaderMap {
        self.get_extractor().get_platform_headers()
    }

    async fn extract(&self) -> Result<VideoInfo, ExtractorError>;
}
