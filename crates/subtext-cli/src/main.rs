mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use subtext_core::config::ViewerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "subtext", about = "Image subtitle annotation tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Viewer config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and its subtitle regions
    Info(commands::info::InfoArgs),
    /// Fit text into a box and print the chosen layout
    Fit(commands::fit::FitArgs),
    /// List the images in a folder in natural order
    List(commands::list::ListArgs),
    /// OCR (and optionally translate) a rectangle of an image
    #[cfg(feature = "remote")]
    Ocr(commands::ocr::OcrArgs),
    /// Translate a line-based subtitle file block by block
    #[cfg(feature = "remote")]
    TranslateFile(commands::translate_file::TranslateFileArgs),
    /// Print or save the default viewer config
    Config(commands::config::ConfigArgs),
}

fn load_config(path: Option<&PathBuf>) -> Result<ViewerConfig> {
    match path {
        Some(p) => ViewerConfig::load(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(ViewerConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(cli.config.as_ref())?;

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Fit(args) => commands::fit::run(args, &config),
        Commands::List(args) => commands::list::run(args),
        #[cfg(feature = "remote")]
        Commands::Ocr(args) => commands::ocr::run(args, &config),
        #[cfg(feature = "remote")]
        Commands::TranslateFile(args) => commands::translate_file::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
