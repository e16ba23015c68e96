//! NEX CLI - Command-line interface
//!
//! Usage:
//!   nex annotate "Some text"
//!   nex annotate --file article.txt --convention flat
//!   nex config

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nex_core::{AppConfig, Convention, Iri, LoggingConfig, NexError};
use nex_engine::{CanEnhance, ContentItem, NexEngine};
use tracing::{info, warn};
use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

#[derive(Parser)]
#[command(name = "nex")]
#[command(about = "Named entity annotation to RDF via the dataTXT NEX service")]
#[command(version)]
struct Cli {
    /// TOML configuration file (environment variables still override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate text and print the resulting metadata as N-Triples
    Annotate {
        /// Text to annotate; read from stdin when neither this nor --file is given
        text: Option<String>,

        /// Read the text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// IRI identifying the text (a fresh URN by default)
        #[arg(long)]
        uri: Option<String>,

        /// Language hint sent to the service
        #[arg(long)]
        lang: Option<String>,

        /// Output convention: flat (fise) or linked (fam)
        #[arg(long)]
        convention: Option<Convention>,
    },
    /// Print the effective configuration, with the application key redacted
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Settings that fail to parse are reported before the configured subscriber exists
    let config = tracing::subscriber::with_default(bootstrap_subscriber(std::io::stderr), || {
        load_config(cli.config.as_ref(), |key| std::env::var(key).ok())
    })?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Annotate {
            text,
            file,
            uri,
            lang,
            convention,
        } => {
            let mut config = config;
            if let Some(convention) = convention {
                config.output.convention = convention;
            }

            let text = read_text(text, file)?;
            let uri = uri.unwrap_or_else(|| format!("urn:content-item-{}", uuid::Uuid::new_v4()));
            annotate(&config, Iri::new(uri), text, lang.as_deref()).await?;
        }
        Commands::Config => {
            let nex_config = config.nex_config()?;
            println!("{nex_config}");
            println!("convention     = {}", config.output.convention);
        }
    }

    Ok(())
}

async fn annotate(
    config: &AppConfig,
    uri: Iri,
    text: String,
    lang: Option<&str>,
) -> anyhow::Result<()> {
    let engine = NexEngine::from_config(config)?;
    let mut item = ContentItem::new(uri, text);

    if engine.can_enhance(&item) == CanEnhance::Cannot {
        warn!(uri = %item.uri, "No text to annotate");
        return Ok(());
    }

    match engine.enhance_with_language(&mut item, lang).await {
        Ok(()) => {
            info!(statements = item.metadata.len(), "Annotation complete");
            print!("{}", item.metadata);
            Ok(())
        }
        Err(NexError::UnsupportedLanguage { language }) => {
            warn!(
                language = language.as_deref().unwrap_or("unknown"),
                "Language not supported by the annotation service, skipping"
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn load_config<F>(path: Option<&PathBuf>, lookup: F) -> anyhow::Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env(lookup)?;
    Ok(config)
}

fn read_text(text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(file) = file {
        return std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

/// Warn-level subscriber active while the configuration loads
fn bootstrap_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

/// Logs go to stderr; stdout carries the N-Triples output
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.level.as_str().into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_config_warnings_reach_bootstrap_subscriber() {
        let captured = Captured::default();
        let writer = captured.clone();

        let config = tracing::subscriber::with_default(
            bootstrap_subscriber(move || writer.clone()),
            || {
                load_config(None, |key| match key {
                    "NEX_MIN_CONFIDENCE" => Some("not-a-number".to_string()),
                    _ => None,
                })
            },
        )
        .unwrap();

        assert_eq!(config.service.min_confidence, None);
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("NEX_MIN_CONFIDENCE"));
        assert!(output.contains("Unable to parse float setting"));
    }

    #[test]
    fn test_load_config_applies_lookup() {
        let config = load_config(None, |key| match key {
            "NEX_APP_ID" => Some("id".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.service.app_id.as_deref(), Some("id"));
    }
}
