//! Embed probes: one regex scan per embed technology a Mediahuis article
//! can host its video with.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extractor::{
    platforms::kaltura::{self, KalturaEmbed},
    utils::{capture_group_1, unescape_attr_url},
};

static KALTURA_SCRIPT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<script[^>]+src="([^"]+?kaltura\.com[^"]*)""#).unwrap());
static VIER_IFRAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<iframe[^>]+src="([^"]+?vier\.be[^"]*)""#).unwrap());
static VRT_IFRAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<iframe[^>]+src="([^"]+?vrt\.be[^"]*)""#).unwrap());
static VMMA_IFRAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<iframe[^>]+src="([^"]+?vmma\.be[^"]*)""#).unwrap());
// flvpd.vtm.be / video.medialaancdn.be players
static INLINE_VIDEO_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<script.+?[^>]+videoUrl:'(.+?)'").unwrap());

/// Embed technologies, in probe order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EmbedSource {
    Kaltura,
    Vier,
    Vrt,
    Vmma,
    InlineVideoUrl,
}

/// What a probe found in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedMatch {
    Kaltura(KalturaEmbed),
    Vier { iframe_url: String },
    /// Needs a second fetch of `iframe_url` to find the media URL.
    Vrt { iframe_url: String },
    Vmma { iframe_url: String },
    InlineVideoUrl { video_url: String },
}

impl EmbedSource {
    /// Probes run in this order and the first match wins.
    pub const PROBE_ORDER: [EmbedSource; 5] = [
        EmbedSource::Kaltura,
        EmbedSource::Vier,
        EmbedSource::Vrt,
        EmbedSource::Vmma,
        EmbedSource::InlineVideoUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedSource::Kaltura => "kaltura",
            EmbedSource::Vier => "vier",
            EmbedSource::Vrt => "vrt",
            EmbedSource::Vmma => "vmma",
            EmbedSource::InlineVideoUrl => "inline_video_url",
        }
    }

    pub fn probe(self, webpage: &str) -> Option<EmbedMatch> {
        match self {
            EmbedSource::Kaltura => {
                let script = capture_group_1(&KALTURA_SCRIPT_REGEX, webpage)?;
                let embed = kaltura::extract_embed(webpage);
                if embed.is_none() {
                    debug!(script, "Kaltura script present but no embed found");
                }
                embed.map(EmbedMatch::Kaltura)
            }
            EmbedSource::Vier => iframe_src(&VIER_IFRAME_REGEX, webpage)
                .map(|iframe_url| EmbedMatch::Vier { iframe_url }),
            EmbedSource::Vrt => iframe_src(&VRT_IFRAME_REGEX, webpage)
                .map(|iframe_url| EmbedMatch::Vrt { iframe_url }),
            EmbedSource::Vmma => iframe_src(&VMMA_IFRAME_REGEX, webpage)
                .map(|iframe_url| EmbedMatch::Vmma { iframe_url }),
            EmbedSource::InlineVideoUrl => capture_group_1(&INLINE_VIDEO_URL_REGEX, webpage)
                .map(|video_url| EmbedMatch::InlineVideoUrl {
                    video_url: video_url.to_owned(),
                }),
        }
    }
}

impl fmt::Display for EmbedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EmbedMatch {
    pub fn source(&self) -> EmbedSource {
        match self {
            EmbedMatch::Kaltura(_) => EmbedSource::Kaltura,
            EmbedMatch::Vier { .. } => EmbedSource::Vier,
            EmbedMatch::Vrt { .. } => EmbedSource::Vrt,
            EmbedMatch::Vmma { .. } => EmbedSource::Vmma,
            EmbedMatch::InlineVideoUrl { .. } => EmbedSource::InlineVideoUrl,
        }
    }
}

fn iframe_src(re: &Regex, webpage: &str) -> Option<String> {
    capture_group_1(re, webpage).map(unescape_attr_url)
}

/// Runs the probes in [`EmbedSource::PROBE_ORDER`] and returns the first hit.
pub fn detect_embed(webpage: &str) -> Option<EmbedMatch> {
    EmbedSource::PROBE_ORDER
        .into_iter()
        .find_map(|source| source.probe(webpage))
}

/// Every probe that matches, in probe order.
pub fn detect_all(webpage: &str) -> Vec<EmbedMatch> {
    EmbedSource::PROBE_ORDER
        .into_iter()
        .filter_map(|source| source.probe(webpage))
        .collect()
}
