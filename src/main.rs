// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use typst_bridge::config::consts::FRONTMATTER_SELECTOR;
use typst_bridge::config::{load_config, BackendKind, Config};
use typst_bridge::engine::BackendFactory;
use typst_bridge::host::{page_data, page_request, render, PageData, Target};
use typst_bridge::model::{Artifact, BuildMode, OutputRange};
use typst_bridge::traits::Backend;

/// Compile Typst documents to HTML or PDF through a configurable backend.
#[derive(Parser)]
#[command(name = "typst-bridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (.yaml, .yml or .toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// `build` aborts on the first failed compile, `watch` keeps going.
    /// Defaults to ELEVENTY_RUN_MODE, then the config file.
    #[arg(long, global = true)]
    mode: Option<BuildMode>,

    /// Backend to use, overriding the config file
    #[arg(long, global = true)]
    backend: Option<BackendKind>,

    /// Typst executable for the subprocess-custom backend
    #[arg(long, global = true)]
    executable: Option<PathBuf>,

    /// Project root, overriding the config file
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile one source file
    Compile {
        file: PathBuf,

        /// Output target
        #[arg(short, long, default_value = "html")]
        target: Target,

        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Keep the full HTML document instead of the body content
        #[arg(long)]
        full: bool,
    },

    /// Query document metadata and print the first match as JSON
    Query {
        file: PathBuf,

        #[arg(short, long, default_value = FRONTMATTER_SELECTOR)]
        selector: String,
    },

    /// Print the per-file data: default targets merged with frontmatter
    Data { file: PathBuf },

    /// Print which backend the configuration selects
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let mode = cli
        .mode
        .or_else(BuildMode::from_env)
        .unwrap_or(config.mode);

    let backend = BackendFactory::from_config(&config, mode)
        .context("failed to construct Typst backend")?;

    match cli.command {
        Commands::Compile {
            file,
            target,
            out,
            full,
        } => {
            let range = if full {
                OutputRange::Full
            } else {
                config.html_output_range
            };
            compile(backend, &file, target, range, out.as_deref()).await
        }
        Commands::Query { file, selector } => {
            let request = page_request(&file, &PageData::default(), OutputRange::Body)?;
            let value = backend.query_metadata(&request, &selector).await;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Commands::Data { file } => {
            let data = page_data(backend.as_ref(), &file, &config.targets, FRONTMATTER_SELECTOR).await;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        Commands::Info => {
            println!("backend: {}", config.backend);
            println!("description: {}", backend.identify());
            println!("mode: {:?}", mode);
            println!("workspace: {}", config.workspace.display());
            Ok(())
        }
    }
}

/// Logs go to stderr so compiled output can be piped from stdout.
fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .try_init()
        .context("failed to install tracing subscriber")
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if let Some(kind) = cli.backend {
        config.backend = kind;
    }
    if let Some(executable) = &cli.executable {
        config.executable_path = Some(executable.clone());
    }
    if let Some(workspace) = &cli.workspace {
        config.workspace = workspace.clone();
    }
    Ok(config)
}

async fn compile(
    backend: Arc<dyn Backend>,
    file: &Path,
    target: Target,
    range: OutputRange,
    out: Option<&Path>,
) -> Result<()> {
    let page = PageData::for_target(target);
    let request = page_request(file, &page, range)?;

    let result = render(backend.as_ref(), target, &request)
        .await
        .with_context(|| format!("failed to compile {}", file.display()))?;

    if let Some(dependencies) = &result.dependencies {
        tracing::info!(
            source_path = %file.display(),
            count = dependencies.len(),
            "Typst dependencies: {:?}",
            dependencies
        );
    }

    let Some(artifact) = result.content else {
        bail!("no {} produced for {}", target, file.display());
    };
    write_artifact(&artifact, out)
}

fn write_artifact(artifact: &Artifact, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, artifact.as_bytes())
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(artifact.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
