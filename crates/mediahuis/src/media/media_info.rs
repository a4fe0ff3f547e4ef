use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::media_format::MediaFormat;
use crate::extractor::{error::ExtractorError, platforms::Site, smuggle::smuggle_url};

/// Extractor that has to finish resolving a delegated video.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegateExtractor {
    Kaltura,
    Vier,
    Vmma,
}

impl DelegateExtractor {
    pub fn name(&self) -> &'static str {
        match self {
            DelegateExtractor::Kaltura => "Kaltura",
            DelegateExtractor::Vier => "Vier",
            DelegateExtractor::Vmma => "Vmma",
        }
    }

    /// Key under which the downstream framework registers the extractor.
    /// Iframe delegates have none: the framework picks one from the URL.
    pub fn ie_key(&self) -> Option<&'static str> {
        match self {
            DelegateExtractor::Kaltura => Some("Kaltura"),
            DelegateExtractor::Vier | DelegateExtractor::Vmma => None,
        }
    }
}

impl fmt::Display for DelegateExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the video actually lives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VideoTarget {
    /// A playable media URL.
    DirectMedia { url: String, format: MediaFormat },
    /// Not playable as is: `extractor` must resolve `url`, using `context`.
    DelegateTo {
        extractor: DelegateExtractor,
        url: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        context: BTreeMap<String, String>,
    },
}

impl VideoTarget {
    pub fn direct(url: impl Into<String>) -> Self {
        let url = url.into();
        let format = MediaFormat::from_url(&url);
        VideoTarget::DirectMedia { url, format }
    }

    pub fn delegate(extractor: DelegateExtractor, url: impl Into<String>) -> Self {
        VideoTarget::DelegateTo {
            extractor,
            url: url.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            VideoTarget::DirectMedia { url, .. } | VideoTarget::DelegateTo { url, .. } => url,
        }
    }

    pub fn is_delegate(&self) -> bool {
        matches!(self, VideoTarget::DelegateTo { .. })
    }

    /// The URL handed to the next stage. Delegates carry their context in
    /// the URL fragment.
    pub fn resolved_url(&self) -> Result<String, ExtractorError> {
        match self {
            VideoTarget::DirectMedia { url, .. } => Ok(url.clone()),
            VideoTarget::DelegateTo { url, context, .. } if context.is_empty() => Ok(url.clone()),
            VideoTarget::DelegateTo { url, context, .. } => smuggle_url(url, context),
        }
    }
}

/// The result of extracting one article page.
///
/// ```rust
/// use mediahuis_parser::{Site, VideoInfo, VideoTarget};
///
/// let info = VideoInfo::builder(
///     "02660060",
///     Site::GazetVanAntwerpen,
///     "Nieuw VTM-programma \"Groeten uit\" groeit uit tot nostalgische hit",
///     VideoTarget::direct("http://flvpd.vtm.be/videos/groeten-uit.mp4"),
/// )
/// .site_url("http://www.gva.be/cnt/dmf20170105_02660060")
/// .thumbnail("http://www.gva.be/thumb.jpg")
/// .build();
///
/// assert!(!info.target.is_delegate());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub id: String,
    pub site: Site,
    pub site_url: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub target: VideoTarget,
}

#[derive(Debug, Clone)]
pub struct VideoInfoBuilder {
    id: String,
    site: Site,
    site_url: String,
    title: String,
    description: Option<String>,
    thumbnail: Option<String>,
    publication_date: Option<NaiveDate>,
    target: VideoTarget,
}

impl VideoInfo {
    pub fn builder(
        id: impl Into<String>,
        site: Site,
        title: impl Into<String>,
        target: VideoTarget,
    ) -> VideoInfoBuilder {
        VideoInfoBuilder::new(id, site, title, target)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Flat info dictionary as consumed by a youtube-dl style pipeline.
    ///
    /// Delegates become `_type: url_transparent` entries whose `url` has the
    /// context smuggled in.
    pub fn to_info_dict(&self) -> Result<Value, ExtractorError> {
        let mut dict = Map::new();
        dict.insert("id".into(), json!(self.id));
        dict.insert("url".into(), json!(self.target.resolved_url()?));
        dict.insert("title".into(), json!(self.title));
        dict.insert("description".into(), json!(self.description));
        dict.insert("thumbnail".into(), json!(self.thumbnail));

        if let Some(date) = self.publication_date {
            dict.insert(
                "upload_date".into(),
                json!(date.format("%Y%m%d").to_string()),
            );
        }

        match &self.target {
            VideoTarget::DirectMedia { format, .. } => {
                if *format != MediaFormat::Unknown && *format != MediaFormat::Hls {
                    dict.insert("ext".into(), json!(format.as_str()));
                }
            }
            VideoTarget::DelegateTo { extractor, .. } => {
                dict.insert("_type".into(), json!("url_transparent"));
                if let Some(ie_key) = extractor.ie_key() {
                    dict.insert("ie_key".into(), json!(ie_key));
                }
            }
        }

        Ok(Value::Object(dict))
    }
}

impl VideoInfoBuilder {
    pub fn new(
        id: impl Into<String>,
        site: Site,
        title: impl Into<String>,
        target: VideoTarget,
    ) -> Self {
        Self {
            id: id.into(),
            site,
            site_url: String::new(),
            title: title.into(),
            description: None,
            thumbnail: None,
            publication_date: None,
            target,
        }
    }

    pub fn site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description_opt(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn thumbnail_opt(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    pub fn publication_date_opt(mut self, date: Option<NaiveDate>) -> Self {
        self.publication_date = date;
        self
    }

    pub fn build(self) -> VideoInfo {
        VideoInfo {
            id: self.id,
            site: self.site,
            site_url: self.site_url,
            title: self.title,
            description: self.description,
            thumbnail: self.thumbnail,
            publication_date: self.publication_date,
            target: self.target,
        }
    }
}

impl fmt::Display for VideoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.site.name(), self.id, self.title)?;
        match &self.target {
            VideoTarget::DirectMedia { url, format } => {
                write!(f, " ({}: {})", format.as_str(), url)
            }
            VideoTarget::DelegateTo { extractor, url, .. } => {
                write!(f, " (via {extractor}: {url})")
            }
        }
    }
}
