//! Locates a Kaltura player embed in arbitrary page HTML.
//!
//! Only the page is scanned; resolving the entry against the Kaltura API is
//! left to the Kaltura extractor the result is delegated to.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extractor::utils::capture_named;

static KWIDGET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)kWidget\.(?:thumb)?[Ee]mbed\(\{.*?["']?wid["']?\s*:\s*["']_?(?P<partner_id>[^"']+)["'],.*?["']?entry_?[Ii]d["']?\s*:\s*["'](?P<id>[^"']+)["'](?:,|\s*\})"#,
    )
    .unwrap()
});

static CDNAPI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)["'](?:https?:)?//cdnapi(?:sec)?\.kaltura\.com(?::\d+)?/[^"']*\b(?:p|partner_id)/(?P<partner_id>\d+)[^"']*["'].*?["']?entry_?[Ii]d["']?\s*:\s*["'](?P<id>[^"']+)["']"#,
    )
    .unwrap()
});

// iframe embeds and the dynamic/auto-embed script loaders
static EMBED_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(?:iframe|script)[^>]+src=["'](?:https?:)?//(?:[a-z0-9-]+\.)*kaltura\.com(?::\d+)?/[^"']*\b(?:p|partner_id)/(?P<partner_id>\d+)[^"']*[?&;]entry_id=(?P<id>[^"'&;]+)"#,
    )
    .unwrap()
});

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KalturaEmbed {
    pub partner_id: String,
    pub entry_id: String,
    /// Host serving `embedIframeJs` when the page does not use the default one.
    pub service_url: Option<String>,
}

impl KalturaEmbed {
    /// `kaltura:<partner id>:<entry id>`, the form the Kaltura extractor accepts.
    pub fn url(&self) -> String {
        format!("kaltura:{}:{}", self.partner_id, self.entry_id)
    }
}

/// Finds the first Kaltura embed in `webpage`.
pub fn extract_embed(webpage: &str) -> Option<KalturaEmbed> {
    let (partner_id, entry_id) = [&*KWIDGET_REGEX, &*CDNAPI_REGEX, &*EMBED_SRC_REGEX]
        .into_iter()
        .find_map(|re| {
            let caps = re.captures(webpage)?;
            let partner_id = caps.name("partner_id")?.as_str().trim();
            let entry_id = caps.name("id")?.as_str().trim();
            Some((partner_id.to_owned(), entry_id.to_owned()))
        })?;

    let service_url = find_service_url(webpage, &partner_id);
    debug!(partner_id, entry_id, ?service_url, "Found Kaltura embed");

    Some(KalturaEmbed {
        partner_id,
        entry_id,
        service_url,
    })
}

fn find_service_url(webpage: &str, partner_id: &str) -> Option<String> {
    let pid = regex::escape(partner_id);
    let re = Regex::new(&format!(
        r#"<script[^>]+src=["'](?P<id>(?:https?:)?//[^"']+)/p/{pid}/sp/{pid}00/embedIframeJs"#
    ))
    .ok()?;

    capture_named(&re, webpage, "id").map(ToOwned::to_owned)
}
