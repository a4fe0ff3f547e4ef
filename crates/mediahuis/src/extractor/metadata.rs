//! OpenGraph metadata scraping.

use scraper::{Html, Selector};

use super::error::ExtractorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

/// Content of the first `og:<property>` meta tag, matched on either the
/// `property` or the `name` attribute. Blank values count as missing.
pub fn og_property(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(
        r#"meta[property="og:{property}"], meta[name="og:{property}"]"#
    ))
    .ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(ToOwned::to_owned)
}

/// Extracts title, description and thumbnail. Only the title is required.
pub fn extract_page_metadata(html: &str) -> Result<PageMetadata, ExtractorError> {
    let document = Html::parse_document(html);

    let title = og_property(&document, "title")
        .ok_or_else(|| ExtractorError::FieldNotFound("og:title".to_string()))?;

    Ok(PageMetadata {
        title,
        description: og_property(&document, "description"),
        thumbnail: og_property(&document, "image"),
    })
}
