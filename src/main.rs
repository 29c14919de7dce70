use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use specsite::{loader, BuildError, LoadError, SiteConfig};
use tracing::info;

/// Exit status when there was nothing to render.
const EXIT_EMPTY_INPUT: u8 = 2;

#[derive(Parser)]
#[command(name = "specsite", about = "Render phone spec JSON files into a static HTML page")]
struct Cli {
    /// Config file (default: optional ./specsite.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every JSON file and write the page
    Build {
        #[command(flatten)]
        overrides: Overrides,
        /// Output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Base URL for og:url
        #[arg(long)]
        site_url: Option<String>,
        /// Skip the .nojekyll marker
        #[arg(long)]
        no_nojekyll: bool,
    },
    /// Load only: report records and per-file problems, write nothing
    Check {
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(Args)]
struct Overrides {
    /// Directory holding the *.json files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
    /// Only read the top level of the data directory
    #[arg(long)]
    no_recursive: bool,
}

impl Overrides {
    fn apply(&self, cfg: &mut SiteConfig) {
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        if self.no_recursive {
            cfg.recursive = false;
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if is_empty_input(&e) {
                ExitCode::from(EXIT_EMPTY_INPUT)
            } else {
                ExitCode::FAILURE
            }
        }
    };

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "Finished");
    code
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = SiteConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Build {
            overrides,
            out_dir,
            site_url,
            no_nojekyll,
        } => {
            overrides.apply(&mut cfg);
            if let Some(dir) = out_dir {
                cfg.out_dir = dir;
            }
            if let Some(url) = site_url {
                cfg.site_url = url;
            }
            if no_nojekyll {
                cfg.nojekyll = false;
            }

            let summary = specsite::build(&cfg)?;
            for issue in &summary.issues {
                println!("  skipped {}", issue);
            }
            println!(
                "Wrote {} ({} records from {} files, {} skipped, {} bytes)",
                summary.output.display(),
                summary.records,
                summary.files,
                summary.issues.len(),
                summary.bytes,
            );
            Ok(())
        }
        Commands::Check { overrides } => {
            overrides.apply(&mut cfg);
            let report = match loader::load(&cfg.data_dir, cfg.load_options()) {
                Ok(r) => r,
                Err(LoadError::EmptyInput { path, files, issues }) => {
                    for issue in &issues {
                        println!("  skipped {}", issue);
                    }
                    return Err(LoadError::EmptyInput { path, files, issues }.into());
                }
                Err(e) => return Err(e.into()),
            };
            for issue in &report.issues {
                println!("  skipped {}", issue);
            }
            println!(
                "{} records from {} files ({} skipped)",
                report.records.len(),
                report.files.len(),
                report.issues.len(),
            );
            Ok(())
        }
    }
}

fn is_empty_input(e: &anyhow::Error) -> bool {
    if let Some(b) = e.downcast_ref::<BuildError>() {
        return b.is_empty_input();
    }
    matches!(e.downcast_ref::<LoadError>(), Some(LoadError::EmptyInput { .. }))
}

// ── Tests ──
