use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use npm_stale::analyser::{Analyser, AnalyserSetup};
use npm_stale::config::{self, AnalyserConfig};
use npm_stale::logging;
use npm_stale::registry::NpmRegistry;
use npm_stale::report::{HumanSink, JsonSink, ReportSink};

#[derive(Parser)]
#[command(name = "npm-stale")]
#[command(version, about = "Reports package.json dependencies with newer stable releases")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (defaults to $XDG_DATA_HOME/npm-stale/npm-stale.log)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Read an analyser setup from stdin and print {"meta": [...]} to stdout
    Analyse,
    /// Check a package.json on disk
    Check {
        /// Manifest to check
        #[arg(default_value = "package.json")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Skip devDependencies
        #[arg(long)]
        no_dev: bool,

        /// Skip optionalDependencies
        #[arg(long)]
        no_optional: bool,

        /// Also flag dependencies whose only newer release is a pre-release
        #[arg(long)]
        include_prerelease: bool,

        /// Registry base URL
        #[arg(long, value_name = "URL")]
        registry: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(config::log_path);
    let _log_guard = logging::init(&log_file)
        .inspect_err(|e| eprintln!("Logging disabled, cannot open {:?}: {}", log_file, e))
        .ok();

    let mut config = match &cli.config {
        Some(path) => AnalyserConfig::load(path)?,
        None => AnalyserConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Analyse => runtime.block_on(analyse(config)),
        Command::Check {
            path,
            format,
            no_dev,
            no_optional,
            include_prerelease,
            registry,
        } => {
            if no_dev {
                config.groups.dev_dependencies = false;
            }
            if no_optional {
                config.groups.optional_dependencies = false;
            }
            if include_prerelease {
                config.stable_only = false;
            }
            if let Some(url) = registry {
                config.registry.url = url;
            }
            runtime.block_on(check(config, &path, format))
        }
    }
}

fn build_analyser(config: AnalyserConfig) -> anyhow::Result<Analyser> {
    let registry = NpmRegistry::new(&config.registry.url, config.registry.timeout())?;
    Ok(Analyser::new(Arc::new(registry), config))
}

/// Analyser runner protocol: setup on stdin, results on stdout
async fn analyse(config: AnalyserConfig) -> anyhow::Result<()> {
    let result = async {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read analyser setup from stdin")?;
        let setup: AnalyserSetup =
            serde_json::from_str(&input).context("Invalid analyser setup")?;

        info!("Analysing {}", setup.file_path);
        let analyser = build_analyser(config)?;
        Ok::<_, anyhow::Error>(analyser.run_setup(&setup).await?)
    }
    .await;

    match result {
        Ok(annotations) => {
            JsonSink::new(std::io::stdout().lock()).write(&annotations)?;
            Ok(())
        }
        Err(e) => {
            error!("Failed to analyse: {:#}", e);
            JsonSink::new(std::io::stdout().lock()).write_error(&format!("{:#}", e))?;
            Err(e)
        }
    }
}

async fn check(config: AnalyserConfig, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    info!("Checking {}", path.display());
    let analyser = build_analyser(config)?;
    let annotations = analyser.run(&content).await?;

    let stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Human => HumanSink::new(stdout).write(&annotations)?,
        OutputFormat::Json => JsonSink::new(stdout).write(&annotations)?,
    }

    Ok(())
}
