use std::borrow::Cow;
use std::io::Write;

#[cfg(feature = "colored-output")]
use colored::*;
use mediahuis_parser::{VideoInfo, VideoTarget};
#[cfg(feature = "table-output")]
use tabled::{Table, Tabled, settings::Style};

use crate::{cli::OutputFormat, error::Result};

pub struct OutputManager {
    #[cfg_attr(not(feature = "colored-output"), allow(dead_code))]
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn format_video_info(&self, info: &VideoInfo, format: &OutputFormat) -> Result<String> {
        let mut output = match format {
            OutputFormat::Pretty => self.format_pretty(info),
            OutputFormat::Json => Ok(info.to_json_pretty()?),
            OutputFormat::JsonCompact => Ok(info.to_json()?),
            OutputFormat::InfoDict => Ok(serde_json::to_string_pretty(&info.to_info_dict()?)?),
            #[cfg(feature = "table-output")]
            OutputFormat::Table => self.format_table(info),
            #[cfg(not(feature = "table-output"))]
            OutputFormat::Table => self.format_pretty(info),
        }?;

        if !output.ends_with('\n') {
            output.push('\n');
        }
        Ok(output)
    }

    /// Property/value pairs shared by the pretty and table renderings.
    fn rows<'a>(info: &'a VideoInfo) -> Vec<(&'static str, Cow<'a, str>)> {
        let mut rows = vec![
            ("Site", Cow::Borrowed(info.site.name())),
            ("ID", Cow::Borrowed(info.id.as_str())),
            ("Title", Cow::Borrowed(info.title.as_str())),
        ];

        if let Some(description) = &info.description {
            rows.push(("Description", Cow::Borrowed(description.as_str())));
        }
        if let Some(thumbnail) = &info.thumbnail {
            rows.push(("Thumbnail", Cow::Borrowed(thumbnail.as_str())));
        }
        if let Some(date) = info.publication_date {
            rows.push(("Published", Cow::Owned(date.to_string())));
        }

        match &info.target {
            VideoTarget::DirectMedia { url, format } => {
                rows.push(("Type", Cow::Borrowed("direct")));
                rows.push(("Format", Cow::Borrowed(format.as_str())));
                rows.push(("URL", Cow::Borrowed(url.as_str())));
            }
            VideoTarget::DelegateTo {
                extractor,
                url,
                context,
            } => {
                rows.push(("Type", Cow::Borrowed("delegate")));
                rows.push(("Extractor", Cow::Borrowed(extractor.name())));
                rows.push(("URL", Cow::Borrowed(url.as_str())));
                for (key, value) in context {
                    rows.push(("Context", Cow::Owned(format!("{key}={value}"))));
                }
            }
        }

        rows
    }

    fn format_pretty(&self, info: &VideoInfo) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.colorize("Video Information:", &Color::Green, true));
        output.push('\n');

        for (property, value) in Self::rows(info) {
            let color = if property == "URL" || property == "Thumbnail" {
                Color::Blue
            } else {
                Color::Cyan
            };
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize(property, &Color::Yellow, false),
                self.colorize(&value, &color, false)
            ));
        }

        Ok(output)
    }

    #[cfg(feature = "table-output")]
    fn format_table(&self, info: &VideoInfo) -> Result<String> {
        #[derive(Tabled)]
        struct TableRow<'a> {
            property: &'a str,
            value: Cow<'a, str>,
        }

        let rows = Self::rows(info)
            .into_iter()
            .map(|(property, value)| TableRow { property, value });

        Ok(Table::new(rows).with(Style::modern()).to_string())
    }

    pub fn colorize(&self, text: &str, color: &Color, bold: bool) -> String {
        #[cfg(feature = "colored-output")]
        {
            if self.colored {
                let colored_text = match color {
                    Color::Green => text.green(),
                    Color::Yellow => text.yellow(),
                    Color::Blue => text.blue(),
                    Color::Cyan => text.cyan(),
                };
                if bold {
                    colored_text.bold().to_string()
                } else {
                    colored_text.to_string()
                }
            } else {
                text.to_string()
            }
        }

        #[cfg(not(feature = "colored-output"))]
        {
            let _ = (color, bold);
            text.to_string()
        }
    }
}

pub enum Color {
    Green,
    Yellow,
    Blue,
    Cyan,
}

pub fn write_output(content: &str, output_file: Option<&std::path::Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
        }
        None => {
            print!("{content}");
            std::io::stdout().flush()?;
        }
    }
    Ok(())
}
