use std::collections::BTreeMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, info};

use super::probes::{EmbedMatch, detect_embed};
use super::site::Site;
use crate::{
    extractor::{
        error::ExtractorError,
        metadata::extract_page_metadata,
        platform_extractor::{Extractor, PageFetcher, PlatformExtractor},
        utils::{absolute_url, capture_named_or_invalid_url, search_regex},
    },
    media::{DelegateExtractor, VideoInfo, VideoTarget},
};

pub static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?(?P<host>nieuwsblad\.be|gva\.be|standaard\.be|hbvl\.be|limburger\.nl)/.+?/dmf(?P<date>[0-9]+?)_(?P<id>[0-9]+)",
    )
    .unwrap()
});
static VRT_SOURCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"sources\.pdl\s*=\s*"(.*?)";"#).unwrap());

/// The parts of an article URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleUrl {
    pub site: Site,
    pub id: String,
    /// Digits between `dmf` and the id, normally `YYYYMMDD`.
    pub date_code: String,
}

impl ArticleUrl {
    pub fn parse(url: &str) -> Result<Self, ExtractorError> {
        let host = capture_named_or_invalid_url(&URL_REGEX, url, "host")?;
        let site =
            Site::from_host(host).ok_or_else(|| ExtractorError::InvalidUrl(url.to_string()))?;

        Ok(Self {
            site,
            id: capture_named_or_invalid_url(&URL_REGEX, url, "id")?.to_owned(),
            date_code: capture_named_or_invalid_url(&URL_REGEX, url, "date")?.to_owned(),
        })
    }

    /// The date code as a calendar date, if it is one.
    pub fn publication_date(&self) -> Option<NaiveDate> {
        if self.date_code.len() != 8 {
            return None;
        }
        NaiveDate::parse_from_str(&self.date_code, "%Y%m%d").ok()
    }
}

/// Extractor for Het Nieuwsblad, De Standaard, Gazet van Antwerpen,
/// Het Belang van Limburg and De Limburger articles.
pub struct Mediahuis {
    pub extractor: Extractor,
}

impl Mediahuis {
    pub fn new(url: impl Into<String>, client: Client) -> Self {
        Self {
            extractor: Extractor::new("Mediahuis", url, client),
        }
    }

    pub fn is_supported(url: &str) -> bool {
        URL_REGEX.is_match(url)
    }
}

/// Runs the whole extraction for `url` against `fetcher`.
///
/// The URL is validated before anything is downloaded. The article page is
/// always fetched; the VRT embed costs one more fetch.
pub async fn extract_article<F>(fetcher: &F, url: &str) -> Result<VideoInfo, ExtractorError>
where
    F: PageFetcher + ?Sized,
{
    let article = ArticleUrl::parse(url)?;
    debug!(site = %article.site, id = %article.id, "Matched article url");

    let webpage = fetcher.fetch_page(url).await?;
    let metadata = extract_page_metadata(&webpage)?;

    let embed =
        detect_embed(&webpage).ok_or_else(|| ExtractorError::UnsupportedEmbed(url.to_string()))?;
    debug!(source = %embed.source(), "Detected video embed");

    let target = resolve_embed(fetcher, url, embed).await?;
    info!(id = %article.id, url = target.url(), delegate = target.is_delegate(), "Resolved video");

    Ok(
        VideoInfo::builder(&article.id, article.site, metadata.title, target)
            .site_url(url)
            .description_opt(metadata.description)
            .thumbnail_opt(metadata.thumbnail)
            .publication_date_opt(article.publication_date())
            .build(),
    )
}

async fn resolve_embed<F>(
    fetcher: &F,
    page_url: &str,
    embed: EmbedMatch,
) -> Result<VideoTarget, ExtractorError>
where
    F: PageFetcher + ?Sized,
{
    let target = match embed {
        EmbedMatch::Kaltura(embed) => {
            let mut context = BTreeMap::new();
            context.insert("source_url".to_owned(), page_url.to_owned());
            if let Some(service_url) = &embed.service_url {
                context.insert("service_url".to_owned(), service_url.clone());
            }
            VideoTarget::DelegateTo {
                extractor: DelegateExtractor::Kaltura,
                url: embed.url(),
                context,
            }
        }
        EmbedMatch::Vier { iframe_url } => VideoTarget::delegate(
            DelegateExtractor::Vier,
            absolute_url(page_url, &iframe_url)?,
        ),
        EmbedMatch::Vrt { iframe_url } => {
            let iframe_url = absolute_url(page_url, &iframe_url)?;
            let iframe_page = fetcher.fetch_page(&iframe_url).await?;
            VideoTarget::direct(search_regex(&VRT_SOURCE_REGEX, &iframe_page, "vrt-video")?)
        }
        EmbedMatch::Vmma { iframe_url } => VideoTarget::delegate(
            DelegateExtractor::Vmma,
            absolute_url(page_url, &iframe_url)?,
        ),
        EmbedMatch::InlineVideoUrl { video_url } => {
            VideoTarget::direct(absolute_url(page_url, &video_url)?)
        }
    };

    Ok(target)
}

#[async_trait]
impl PlatformExtractor for Mediahuis {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    async fn extract(&self) -> Result<VideoInfo, ExtractorError> {
        extract_article(&self.extractor, &self.extractor.url).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use rstest::rstest;

    use super::*;
    use crate::extractor::{default::default_client, platform_extractor::MockPageFetcher};
    use crate::media::MediaFormat;

    const HEAD: &str = r#"<head>
<meta property="og:title" content="Angst voor terreur: fotograaf toont hoe hij de werkelijkheid kan manipuleren">
<meta property="og:description" content="De metro rijdt niet, de scholen en cr&egrave;ches zijn dicht.">
<meta property="og:image" content="http://www.nieuwsblad.be/Assets/Images_Upload/2015/11/24/terreur.jpg">
</head>"#;

    fn page(body: &str) -> String {
        format!("<!DOCTYPE html><html>{HEAD}<body>{body}</body></html>")
    }

    fn fetcher_for(url: &'static str, html: String) -> MockPageFetcher {
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch_page()
            .withf(move |u| u == url)
            .times(1)
            .returning(move |_| Ok(html.clone()));
        fetcher
    }

    #[rstest]
    #[case("http://www.nieuwsblad.be/cnt/dmf20151224_02036890", Site::Nieuwsblad, "02036890")]
    #[case("https://www.standaard.be/cnt/dmf20170412_02831280", Site::Standaard, "02831280")]
    #[case(
        "http://www.gva.be/cnt/dmf20170412_02831246/blind-meisje-met-autisme-reageert-op-hartverwarmende-wijze-wanneer-ze-straatmuzikant-hoort-spelen",
        Site::GazetVanAntwerpen,
        "02831246"
    )]
    #[case(
        "http://hbvl.be/cnt/dmf20170331_02809751/video-limburger-treft-ravage-aan-na-oplichting-met-vastgoed",
        Site::BelangVanLimburg,
        "02809751"
    )]
    #[case("https://www.limburger.nl/cnt/dmf20170101_00012345", Site::Limburger, "00012345")]
    fn test_article_url(#[case] url: &str, #[case] site: Site, #[case] id: &str) {
        assert!(Mediahuis::is_supported(url));
        let article = ArticleUrl::parse(url).unwrap();
        assert_eq!(article.site, site);
        assert_eq!(article.id, id);
        assert!(article.publication_date().is_some());
    }

    #[rstest]
    #[case("http://www.nieuwsblad.be/dmf20151224_02036890")]
    #[case("http://www.hln.be/cnt/dmf20151224_02036890")]
    #[case("http://www.nieuwsblad.be/cnt/article-02036890")]
    #[case("ftp://www.gva.be/cnt/dmf20170412_02831246")]
    fn test_unsupported_url(#[case] url: &str) {
        assert!(!Mediahuis::is_supported(url));
        assert!(matches!(
            ArticleUrl::parse(url),
            Err(ExtractorError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_publication_date() {
        let article = ArticleUrl::parse("http://www.nieuwsblad.be/cnt/dmf20151224_02036890").unwrap();
        assert_eq!(article.date_code, "20151224");
        assert_eq!(article.publication_date(), NaiveDate::from_ymd_opt(2015, 12, 24));

        let bogus = ArticleUrl::parse("http://www.nieuwsblad.be/cnt/dmf20151399_02036890").unwrap();
        assert_eq!(bogus.publication_date(), None);
        let short = ArticleUrl::parse("http://www.nieuwsblad.be/cnt/dmf2015_02036890").unwrap();
        assert_eq!(short.publication_date(), None);
    }

    #[tokio::test]
    async fn test_kaltura_delegates_with_source_url() {
        let url = "http://www.nieuwsblad.be/cnt/dmf20151225_02037264";
        let html = page(
            r#"<script src="https://cdnapisec.kaltura.com/p/1820671/sp/182067100/embedIframeJs/uiconf_id/33765511/partner_id/1820671?autoembed=true&amp;entry_id=0_lvzxl8f0"></script>"#,
        );
        let fetcher = fetcher_for(url, html);

        let info = extract_article(&fetcher, url).await.unwrap();
        assert_eq!(info.id, "02037264");
        assert_eq!(info.site, Site::Nieuwsblad);
        match &info.target {
            VideoTarget::DelegateTo {
                extractor,
                url: target,
                context,
            } => {
                assert_eq!(*extractor, DelegateExtractor::Kaltura);
                assert_eq!(target, "kaltura:1820671:0_lvzxl8f0");
                assert_eq!(context["source_url"], url);
                assert_eq!(context["service_url"], "https://cdnapisec.kaltura.com");
            }
            other => panic!("expected Kaltura delegate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_vrt_iframe_fetches_once_more() {
        let url = "http://www.nieuwsblad.be/cnt/dmf20151124_01986463";
        let iframe_url = "https://www.vrt.be/vrtnieuws/embed/player?id=0_mwzfuvsk&autoplay=1";

        let mut fetcher = MockPageFetcher::new();
        let mut seq = Sequence::new();
        let article = page(
            r#"<iframe src="//www.vrt.be/vrtnieuws/embed/player?id=0_mwzfuvsk&amp;autoplay=1"></iframe>"#,
        );
        fetcher
            .expect_fetch_page()
            .withf(move |u| u == url)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(article.clone()));
        fetcher
            .expect_fetch_page()
            .withf(move |u| u == iframe_url)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(r#"<script>var sources = {}; sources.pdl = "https://vrtnieuws-vh.akamaihd.net/clip/2015/11/24/angst.mp4"; player.load(sources);</script>"#.to_string())
            });

        let info = extract_article(&fetcher, url).await.unwrap();
        assert_eq!(
            info.target,
            VideoTarget::DirectMedia {
                url: "https://vrtnieuws-vh.akamaihd.net/clip/2015/11/24/angst.mp4".into(),
                format: MediaFormat::Mp4,
            }
        );
    }

    #[tokio::test]
    async fn test_vrt_iframe_without_source_fails() {
        let url = "http://www.nieuwsblad.be/cnt/dmf20151124_01986463";
        let mut fetcher = MockPageFetcher::new();
        let article = page(r#"<iframe src="https://www.vrt.be/embed/1"></iframe>"#);
        fetcher
            .expect_fetch_page()
            .withf(move |u| u == url)
            .times(1)
            .returning(move |_| Ok(article.clone()));
        fetcher
            .expect_fetch_page()
            .withf(|u| u == "https://www.vrt.be/embed/1")
            .times(1)
            .returning(|_| Ok("<html></html>".to_string()));

        let err = extract_article(&fetcher, url).await.unwrap_err();
        assert!(matches!(err, ExtractorError::FieldNotFound(ref f) if f == "vrt-video"));
    }

    #[tokio::test]
    async fn test_inline_video_url_is_direct() {
        let url = "http://www.gva.be/cnt/dmf20170105_02660060/nieuwe-vtm-programma-groeten-uit-groeit-uit-tot-nostalgische-hit";
        let html = page(
            r#"<script type="text/javascript">new MedialaanPlayer({videoUrl:'http://flvpd.vtm.be/videos/2017/01/05/groeten-uit.mp4'});</script>"#,
        );
        let fetcher = fetcher_for(url, html);

        let info = extract_article(&fetcher, url).await.unwrap();
        assert!(!info.target.is_delegate());
        assert_eq!(
            info.target.url(),
            "http://flvpd.vtm.be/videos/2017/01/05/groeten-uit.mp4"
        );
        assert_eq!(info.publication_date, NaiveDate::from_ymd_opt(2017, 1, 5));
    }

    #[tokio::test]
    async fn test_inline_video_url_is_kept_verbatim() {
        let url = "http://www.gva.be/cnt/dmf20170105_02660060";
        for video_url in [
            "http://flvpd.vtm.be:80/videos/groeten uit.mp4",
            "http://flvpd vtm.be/a.mp4",
        ] {
            let html = page(&format!(
                "<script type=\"text/javascript\">new MedialaanPlayer({{videoUrl:'{video_url}'}});</script>"
            ));
            let fetcher = fetcher_for(url, html);

            let info = extract_article(&fetcher, url).await.unwrap();
            assert_eq!(
                info.target,
                VideoTarget::DirectMedia {
                    url: video_url.to_owned(),
                    format: MediaFormat::Mp4,
                }
            );
        }
    }

    #[tokio::test]
    async fn test_iframe_delegates() {
        let url = "http://www.nieuwsblad.be/cnt/dmf20170411_02829396";
        let html = page(r#"<iframe src="https://www.vier.be/video/v3/embed/16129"></iframe>"#);
        let info = extract_article(&fetcher_for(url, html), url).await.unwrap();
        assert_eq!(
            info.target,
            VideoTarget::delegate(DelegateExtractor::Vier, "https://www.vier.be/video/v3/embed/16129")
        );

        let url = "http://www.nieuwsblad.be/cnt/dmf20151224_02036890";
        let html = page(r#"<iframe src="http://vmmaplayer.vmma.be/embed/player.html?id=9c7d1e"></iframe>"#);
        let info = extract_article(&fetcher_for(url, html), url).await.unwrap();
        assert_eq!(
            info.target,
            VideoTarget::delegate(
                DelegateExtractor::Vmma,
                "http://vmmaplayer.vmma.be/embed/player.html?id=9c7d1e"
            )
        );
    }

    #[tokio::test]
    async fn test_metadata_is_always_populated() {
        let url = "http://www.nieuwsblad.be/cnt/dmf20151124_01986463";
        let html = page(r#"<iframe src="https://www.vier.be/video/v3/embed/1"></iframe>"#);
        let info = extract_article(&fetcher_for(url, html), url).await.unwrap();

        assert_eq!(
            info.title,
            "Angst voor terreur: fotograaf toont hoe hij de werkelijkheid kan manipuleren"
        );
        assert_eq!(
            info.description.as_deref(),
            Some("De metro rijdt niet, de scholen en crèches zijn dicht.")
        );
        assert_eq!(
            info.thumbnail.as_deref(),
            Some("http://www.nieuwsblad.be/Assets/Images_Upload/2015/11/24/terreur.jpg")
        );
        assert_eq!(info.site_url, url);
    }

    #[tokio::test]
    async fn test_first_probe_wins_over_later_ones() {
        // A VRT iframe is probed before the inline videoUrl, so the VRT page is fetched.
        let url = "http://www.nieuwsblad.be/cnt/dmf20151124_01986463";
        let mut fetcher = MockPageFetcher::new();
        let article = page(
            r#"<iframe src="https://www.vrt.be/embed/1"></iframe>
<script type="text/javascript">player({videoUrl:'http://flvpd.vtm.be/other.mp4'});</script>"#,
        );
        fetcher
            .expect_fetch_page()
            .withf(move |u| u == url)
            .times(1)
            .returning(move |_| Ok(article.clone()));
        fetcher
            .expect_fetch_page()
            .withf(|u| u == "https://www.vrt.be/embed/1")
            .times(1)
            .returning(|_| Ok(r#"sources.pdl = "https://vrt.example/a.mp4";"#.to_string()));

        let info = extract_article(&fetcher, url).await.unwrap();
        assert_eq!(info.target.url(), "https://vrt.example/a.mp4");
    }

    #[tokio::test]
    async fn test_unsupported_embed() {
        let url = "http://www.standaard.be/cnt/dmf20170412_02831280";
        let html = page(r#"<p>Geen video</p>"#);
        let err = extract_article(&fetcher_for(url, html), url)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractorError::UnsupportedEmbed(ref u) if u == url));
    }

    #[tokio::test]
    async fn test_invalid_url_fetches_nothing() {
        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch_page().never();

        let err = extract_article(&fetcher, "https://www.hln.be/cnt/dmf20151224_02036890")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractorError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_errors_propagate() {
        let url = "http://www.hbvl.be/cnt/dmf20170331_02809751";
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch_page()
            .times(1)
            .returning(|_| Err(ExtractorError::TlsError("handshake failed".into())));

        let err = extract_article(&fetcher, url).await.unwrap_err();
        assert!(matches!(err, ExtractorError::TlsError(ref m) if m == "handshake failed"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_extract() {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();

        let extractor = Mediahuis::new(
            "http://www.standaard.be/cnt/dmf20170412_02831280",
            default_client().unwrap(),
        );
        let info = extractor.extract().await;
        println!("{info:?}");
    }
}
