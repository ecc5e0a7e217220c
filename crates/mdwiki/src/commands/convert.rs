//! `mdwiki convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdwiki_config::Config;
use mdwiki_convert::Converter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Confluence base URL for page links (overrides config).
    #[arg(long, env = "MDWIKI_BASE_URL")]
    base_url: Option<String>,

    /// Space key for page links (overrides config).
    #[arg(long, env = "MDWIKI_SPACE_KEY")]
    space_key: Option<String>,

    /// Path to configuration file (default: auto-discover mdwiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// Markup goes to stdout; image refs and labels go to stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or the file cannot be read.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let confluence = config.confluence.as_ref();

        let base_url = self
            .base_url
            .as_deref()
            .or(confluence.map(|c| c.base_url.as_str()))
            .unwrap_or_default();
        let space_key = self
            .space_key
            .as_deref()
            .or(confluence.map(|c| c.space_key.as_str()))
            .unwrap_or_default();

        let markdown = std::fs::read_to_string(&self.markdown_file)?;
        let result = Converter::new(base_url, space_key).convert(&markdown);

        output.stdout(&result.markup);

        if !result.image_refs.is_empty() {
            output.detail(&format!("Images: {}", result.image_refs.join(", ")));
        }
        if !result.labels.is_empty() {
            let labels: Vec<&str> = result.labels.iter().map(String::as_str).collect();
            output.detail(&format!("Labels: {}", labels.join(", ")));
        }

        Ok(())
    }
}
