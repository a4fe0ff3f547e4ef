use regex::Regex;
use url::Url;

use crate::extractor::error::ExtractorError;

#[inline]
pub fn capture_group_1<'a>(re: &Regex, input: &'a str) -> Option<&'a str> {
    re.captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[inline]
pub fn capture_group_1_owned(re: &Regex, input: &str) -> Option<String> {
    capture_group_1(re, input).map(ToOwned::to_owned)
}

#[inline]
pub fn capture_named<'a>(re: &Regex, input: &'a str, name: &str) -> Option<&'a str> {
    re.captures(input)
        .and_then(|caps| caps.name(name))
        .map(|m| m.as_str())
}

#[inline]
pub fn capture_named_or_invalid_url<'a>(
    re: &Regex,
    input: &'a str,
    name: &str,
) -> Result<&'a str, ExtractorError> {
    capture_named(re, input, name).ok_or_else(|| ExtractorError::InvalidUrl(input.to_string()))
}

/// Mirrors a fatal regex search: the first capture group, or `FieldNotFound(field)`.
pub fn search_regex(re: &Regex, input: &str, field: &str) -> Result<String, ExtractorError> {
    capture_group_1_owned(re, input).ok_or_else(|| ExtractorError::FieldNotFound(field.to_string()))
}

/// Decodes the entity that shows up in attribute URLs scraped with a regex.
#[inline]
pub fn unescape_attr_url(value: &str) -> String {
    value.trim().replace("&amp;", "&")
}

/// Resolves a protocol-relative or relative `src` against the page URL.
///
/// Anything that already carries a scheme is returned exactly as captured.
pub fn absolute_url(base: &str, src: &str) -> Result<String, ExtractorError> {
    match Url::parse(src) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Url::parse(base)?.join(src)?.into()),
        _ => Ok(src.to_owned()),
    }
}
