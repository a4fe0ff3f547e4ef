//! Context passing through URL fragments, in the form downstream extractors
//! understand: `<url>#__youtubedl_smuggle=<urlencoded json object>`.

use std::collections::BTreeMap;

use url::form_urlencoded;

use super::error::ExtractorError;

const SMUGGLE_KEY: &str = "__youtubedl_smuggle";

pub type SmuggledData = BTreeMap<String, String>;

/// Attaches `data` to `url`. Data already smuggled into `url` is kept,
/// with keys from `data` taking precedence.
pub fn smuggle_url(url: &str, data: &SmuggledData) -> Result<String, ExtractorError> {
    let (url, existing) = unsmuggle_url(url)?;
    let merged = match existing {
        Some(mut existing) => {
            existing.extend(data.clone());
            existing
        }
        None => data.clone(),
    };

    let payload = serde_json::to_string(&merged)?;
    let fragment = form_urlencoded::Serializer::new(String::new())
        .append_pair(SMUGGLE_KEY, &payload)
        .finish();
    Ok(format!("{url}#{fragment}"))
}

/// Splits a smuggled URL into the plain URL and its data, if any.
pub fn unsmuggle_url(url: &str) -> Result<(&str, Option<SmuggledData>), ExtractorError> {
    let Some((base, fragment)) = url.rsplit_once('#') else {
        return Ok((url, None));
    };

    let payload = form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == SMUGGLE_KEY)
        .map(|(_, value)| value.into_owned());

    match payload {
        Some(payload) => Ok((base, Some(serde_json::from_str(&payload)?))),
        None => Ok((url, None)),
    }
}
