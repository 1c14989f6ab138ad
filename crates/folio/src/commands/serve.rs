//! `folio serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{ArticleFilter, CliSettings, Config};
use folio_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Article content root (overrides config).
    #[arg(long, env = "FOLIO_CONTENT_ROOT")]
    content_root: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and startup logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or article loading fails, or the
    /// server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            content_root: self.content_root,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content root: {}",
            config.content_resolved.root.display()
        ));
        output.info(&format!(
            "Static directory: {}",
            config.content_resolved.static_dir.display()
        ));
        output.info(&describe_filter(&config.filter));
        match &config.access_log {
            Some(path) => output.info(&format!("Access log: {}", path.display())),
            None => output.muted("Access log: disabled"),
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config).await?;

        Ok(())
    }
}

/// One-line summary of the configured article filter.
fn describe_filter(filter: &ArticleFilter) -> String {
    match filter {
        ArticleFilter::Excluded(routes) if routes.is_empty() => {
            "Articles: all published".to_owned()
        }
        ArticleFilter::Excluded(routes) => format!("Articles: {} excluded", routes.len()),
        ArticleFilter::Released(routes) => format!("Articles: {} released", routes.len()),
    }
}
