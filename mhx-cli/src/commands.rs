use std::path::Path;

use mediahuis_parser::{
    Mediahuis,
    extractor::{
        default::build_client,
        platform_extractor::{PageFetcher, PlatformExtractor},
        platforms::mediahuis::{ArticleUrl, probes::detect_all},
    },
};
use reqwest::Client;
use tracing::{debug, info};

use crate::{
    cli::OutputFormat,
    config::AppConfig,
    error::{CliError, Result},
    output::{Color, OutputManager, write_output},
};

pub struct CommandExecutor {
    config: AppConfig,
    output_manager: OutputManager,
}

impl CommandExecutor {
    pub fn new(config: AppConfig) -> Self {
        let output_manager = OutputManager::new(config.colored);
        Self {
            config,
            output_manager,
        }
    }

    fn client(&self) -> Result<Client> {
        Ok(build_client(self.config.timeout())?)
    }

    fn extractor(&self, url: &str) -> Result<Mediahuis> {
        if !Mediahuis::is_supported(url) {
            return Err(CliError::UnsupportedUrl(url.to_string()));
        }

        let mut mediahuis = Mediahuis::new(url, self.client()?);
        mediahuis
            .extractor
            .add_header_str("User-Agent", &self.config.user_agent);
        Ok(mediahuis)
    }

    pub async fn extract_single(
        &self,
        url: &str,
        output: Option<OutputFormat>,
        output_file: Option<&Path>,
    ) -> Result<()> {
        let format = output.unwrap_or(self.config.output_format);
        let extractor = self.extractor(url)?;

        info!(url, "Extracting video");
        let video = extractor.extract().await?;
        debug!(?video, "Extraction finished");

        let rendered = self.output_manager.format_video_info(&video, &format)?;
        write_output(&rendered, output_file)
    }

    pub async fn check(&self, url: &str, probe: bool) -> Result<()> {
        let article =
            ArticleUrl::parse(url).map_err(|_| CliError::UnsupportedUrl(url.to_string()))?;

        let mut output = format!(
            "{} {url}\n  Site: {}\n  ID: {}\n",
            self.output_manager
                .colorize("Supported:", &Color::Green, true),
            article.site,
            article.id,
        );
        if let Some(date) = article.publication_date() {
            output.push_str(&format!("  Published: {date}\n"));
        }

        if probe {
            let extractor = self.extractor(url)?;
            let webpage = extractor.extractor.fetch_page(url).await?;
            let matches = detect_all(&webpage);

            if matches.is_empty() {
                output.push_str("  Embeds: none\n");
            } else {
                output.push_str("  Embeds (probe order, first one is used):\n");
                for embed in &matches {
                    output.push_str(&format!("    - {}\n", embed.source()));
                }
            }
        }

        write_output(&output, None)
    }
}

/// Runs `mhx config` and returns the text to print.
///
/// `--reset` never reads the existing file.
pub fn config_command(path: Option<&Path>, show: bool, reset: bool) -> Result<String> {
    if reset {
        AppConfig::reset(path)?;
        Ok("✓ Configuration reset to defaults".to_string())
    } else if show {
        AppConfig::load(path)?.show()
    } else {
        Ok("Use --show to display current configuration or --reset to reset to defaults".to_string())
    }
}
