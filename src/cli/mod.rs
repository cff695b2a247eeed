//! Command-line interface for ethical-lens.
//!
//! Provides one-shot headline and image checks, an interactive form,
//! and a view of the resolved configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapters::{AnalysisService, Fixture, FixtureService, HttpAnalysisClient};
use crate::config::{self, ResolvedConfig};
use crate::core::{display, InputCollector, ModePolicy, Session};
use crate::domain::{AnalysisResult, TextHints};
use crate::error::LensError;

pub mod interactive;

/// ethical-lens - check headlines for misinformation and images for deepfakes
#[derive(Parser, Debug)]
#[command(name = "ethical-lens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Analysis endpoint (overrides config and ETHICAL_LENS_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Language hint sent with the request
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Answer from a canned payload instead of calling the service
    #[arg(long, global = true, value_enum)]
    pub fixture: Option<FixtureArg>,

    /// Print the raw result JSON instead of the rendered card
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a news headline
    Text {
        /// Headline to verify
        headline: String,

        /// Country hint (e.g., us)
        #[arg(long)]
        country: Option<String>,

        /// Category hint (e.g., technology)
        #[arg(long)]
        category: Option<String>,

        /// Number of sources to compare against
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Check an image for manipulation
    Image {
        /// Image file to upload
        path: PathBuf,
    },

    /// Fill in the form line by line
    Interactive {
        /// Require choosing text or image before entering input
        #[arg(long)]
        explicit: bool,
    },

    /// Show resolved configuration
    Config,
}

/// Canned payload for CLI (maps to Fixture)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FixtureArg {
    Verified,
    Misinformation,
    Authentic,
    Deepfake,
}

impl From<FixtureArg> for Fixture {
    fn from(f: FixtureArg) -> Self {
        match f {
            FixtureArg::Verified => Fixture::Verified,
            FixtureArg::Misinformation => Fixture::Misinformation,
            FixtureArg::Authentic => Fixture::Authentic,
            FixtureArg::Deepfake => Fixture::Deepfake,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let mut cfg = config::config()?.clone();
        if let Some(endpoint) = self.endpoint.clone() {
            cfg.endpoint = endpoint;
        }
        if let Some(language) = self.language.clone() {
            cfg.language = language;
        }

        let service = self.service(&cfg);

        match self.command {
            Commands::Text {
                headline,
                country,
                category,
                page_size,
            } => {
                let mut session = Session::new(service, collector(&cfg, ModePolicy::Inferred));
                let form = session.collector_mut();
                form.set_headline(headline)?;
                if let Some(country) = country {
                    form.set_country(country);
                }
                if let Some(category) = category {
                    form.set_category(category);
                }
                if let Some(n) = page_size {
                    form.set_page_size(n.to_string());
                }
                run_once(session, self.json).await
            }
            Commands::Image { path } => {
                let mut session = Session::new(service, collector(&cfg, ModePolicy::Inferred));
                session.collector_mut().set_image(path)?;
                run_once(session, self.json).await
            }
            Commands::Interactive { explicit } => {
                let policy = if explicit { ModePolicy::Explicit } else { cfg.mode };
                let session = Session::new(service, collector(&cfg, policy));
                interactive::run(session, self.json).await
            }
            Commands::Config => show_config(&cfg),
        }
    }

    fn service(&self, cfg: &ResolvedConfig) -> Box<dyn AnalysisService> {
        match self.fixture {
            Some(fixture) => Box::new(FixtureService::new(fixture.into())),
            None => Box::new(HttpAnalysisClient::from_config(cfg)),
        }
    }
}

/// Fresh form seeded from config
fn collector(cfg: &ResolvedConfig, policy: ModePolicy) -> InputCollector {
    InputCollector::new(policy)
        .with_language(cfg.language.clone())
        .with_default_hints(cfg.defaults.clone())
}

/// Submit once, print the outcome, exit non-zero on failure
async fn run_once<S: AnalysisService>(mut session: Session<S>, json: bool) -> Result<()> {
    eprintln!("Analyzing...");
    match session.submit().await {
        Ok(result) => {
            print_result(&result, json)?;
            Ok(())
        }
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    }
}

pub(crate) fn print_result(result: &AnalysisResult, json: bool) -> Result<()> {
    print!("{}", format_result(result, json)?);
    Ok(())
}

/// The rendered card, or with `--json` the body exactly as received
fn format_result(result: &AnalysisResult, json: bool) -> Result<String> {
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(result.raw())?))
    } else {
        Ok(display::render(result))
    }
}

pub(crate) fn print_error(error: &LensError) {
    eprintln!("Error: {}", error);
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Endpoint:  {}", cfg.endpoint);
    println!("Language:  {}", cfg.language);
    println!("Mode:      {:?}", cfg.mode);
    println!();
    println!("Text defaults:");
    print_hints(&cfg.defaults);
    Ok(())
}

fn print_hints(hints: &TextHints) {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "(unset)".to_string());
    println!("  Country:   {}", show(&hints.country));
    println!("  Category:  {}", show(&hints.category));
    println!("  Page size: {}", show(&hints.page_size));
}
