use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    Mp4,
    Mov,
    Webm,
    Flv,
    Hls,
    Unknown,
}

impl MediaFormat {
    pub fn as_str(&self) -> &str {
        match self {
            MediaFormat::Mp4 => "mp4",
            MediaFormat::Mov => "mov",
            MediaFormat::Webm => "webm",
            MediaFormat::Flv => "flv",
            MediaFormat::Hls => "hls",
            MediaFormat::Unknown => "unknown",
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "mp4" | "m4v" => MediaFormat::Mp4,
            "mov" => MediaFormat::Mov,
            "webm" => MediaFormat::Webm,
            "flv" => MediaFormat::Flv,
            "m3u8" => MediaFormat::Hls,
            _ => MediaFormat::Unknown,
        }
    }

    /// Guesses the format from the extension of the URL path, ignoring query and fragment.
    pub fn from_url(url: &str) -> Self {
        let path = match Url::parse(url) {
            Ok(parsed) => parsed.path().to_owned(),
            Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_owned(),
        };

        path.rsplit('/')
            .next()
            .and_then(|segment| segment.rsplit_once('.'))
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(MediaFormat::Unknown)
    }
}
