use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "mhx",
    version,
    about = "Extract videos from Het Nieuwsblad, De Standaard, Gazet van Antwerpen, Het Belang van Limburg and De Limburger articles"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "MHX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// User agent sent with every request (overrides the config file)
    #[arg(long, global = true)]
    pub user_agent: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the video of an article
    Extract {
        /// Article URL
        url: String,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Write the result to a file instead of stdout
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Check whether a URL is supported without extracting it
    Check {
        /// Article URL
        url: String,

        /// Also download the page and list every embed probe that matches
        #[arg(long)]
        probe: bool,
    },

    /// Show or reset the configuration
    Config {
        #[arg(long)]
        show: bool,

        #[arg(long, conflicts_with = "show")]
        reset: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    JsonCompact,
    /// youtube-dl style info dictionary
    InfoDict,
    Table,
}

impl Args {
    /// Format of the `extract` output: the `-o` flag, else the configured default.
    pub fn output_format(&self, config: Option<&AppConfig>) -> Option<OutputFormat> {
        match &self.command {
            Commands::Extract { output, .. } => {
                output.or_else(|| config.map(|config| config.output_format))
            }
            _ => None,
        }
    }
}
