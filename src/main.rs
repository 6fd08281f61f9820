use anyhow::{Context, Result};
use bib2wos::config::{find_config_file, load_config, save_config, Config};
use bib2wos::ui::{self, ConversionProgress, Status};
use bib2wos::{Converter, Enricher};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// bib2wos - Convert a Mendeley BibTeX export into Web of Science BibTeX
#[derive(Parser, Debug)]
#[command(name = "bib2wos")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert a Mendeley BibTeX export into Web of Science BibTeX, enriched from CrossRef", long_about = None)]
struct Cli {
    /// Mendeley BibTeX file to read [default: mendeley.bib]
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Web of Science BibTeX file to write [default: wos_converted.bib]
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Contact email sent to CrossRef with each request
    #[arg(long)]
    mailto: Option<String>,

    /// Do not look up DOIs; convert offline
    #[arg(long)]
    no_enrich: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Write the effective configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line flags on top of the loaded configuration
    fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.files.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.files.output = output.clone();
        }
        if let Some(mailto) = &self.mailto {
            config.crossref.mailto = Some(mailto.clone());
        }
        if let Some(timeout) = self.timeout {
            config.crossref.timeout_secs = timeout;
        }
        if self.no_enrich {
            config.enrichment.enabled = false;
        }
    }

    /// Log level for the `bib2wos` target
    fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => configured,
            1 => "debug",
            _ => "trace",
        }
    }
}

fn load(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => find_config_file(),
    };

    let mut config = load_config(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load config from environment".to_string(),
    })?;
    cli.apply(&mut config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("bib2wos={}", cli.log_level(&config.logging.level))),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &cli.write_config {
        save_config(&config, path)?;
        if !cli.quiet {
            ui::print_status(
                Status::Success,
                &format!("Wrote configuration to {}", path.display()),
            );
        }
        return Ok(());
    }

    let enricher = if config.enrichment.enabled {
        let enricher = Enricher::crossref(&config.crossref)?;
        tracing::info!(
            source = enricher.source_id(),
            "Enriching DOIs from {}",
            enricher.source_name()
        );
        Some(enricher)
    } else {
        tracing::info!("Enrichment disabled; DOIs will not be looked up");
        None
    };

    let converter = Converter::new(enricher);
    let progress = ConversionProgress::for_terminal(cli.quiet);
    let started = Instant::now();

    let stats = converter
        .run(&config.files.input, &config.files.output, &progress)
        .await?;

    tracing::info!("Conversion complete. Web of Science .bib file has been created.");
    if !cli.quiet {
        ui::print_summary(&stats, &config.files.output, started.elapsed());
    }

    Ok(())
}
