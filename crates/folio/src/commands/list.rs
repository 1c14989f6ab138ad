//! `folio list` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_articles::{ArticleMeta, ArticleStore};
use folio_config::{CliSettings, Config};
use folio_server::server_config_from_config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Article content root (overrides config).
    #[arg(long, env = "FOLIO_CONTENT_ROOT")]
    content_root: Option<PathBuf>,
}

impl ListArgs {
    /// Print the published articles in navigation order.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or article loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_root: self.content_root,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let server_config = server_config_from_config(&config, String::new());

        let store = ArticleStore::load(&server_config.content_root, &server_config.store_options())?;

        if store.is_empty() {
            output.muted("No published articles");
            return Ok(());
        }

        let width = store
            .all()
            .iter()
            .map(|article| article.route.len())
            .max()
            .unwrap_or(0);
        for article in store.all() {
            output.result(&format_row(article, width));
        }

        Ok(())
    }
}

/// `<route>  <dateInt>  <title>` with the route column padded to `width`.
fn format_row(article: &ArticleMeta, width: usize) -> String {
    format!(
        "{:<width$}  {:>8}  {}",
        article.route, article.date_int, article.title
    )
}
