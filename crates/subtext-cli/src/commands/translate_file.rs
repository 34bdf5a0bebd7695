use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use subtext_core::config::ViewerConfig;
use subtext_core::io::srt::{count_text_blocks, translate_content, translated_file_name};
use subtext_core::services::libretranslate::LibreTranslate;

#[derive(Args)]
pub struct TranslateFileArgs {
    /// Subtitle file (.srt or any line-based format)
    pub file: PathBuf,

    /// Source language code (overrides config)
    #[arg(long)]
    pub source: Option<String>,

    /// Target language code (overrides config)
    #[arg(long)]
    pub target: Option<String>,

    /// Output path (defaults to <name>.<target>.<ext> beside the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &TranslateFileArgs, config: &ViewerConfig) -> Result<()> {
    let source = args.source.as_deref().unwrap_or(&config.translation.source);
    let target = args.target.as_deref().unwrap_or(&config.translation.target);
    if source == target {
        bail!("Source and target languages cannot be the same");
    }

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let total = count_text_blocks(&content);

    println!("Translating {} blocks {} -> {}", total, source, target);

    let translator = LibreTranslate::new(&config.translation.endpoint)?;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:12} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Translating");

    let translated = translate_content(&content, &translator, source, target, |done, _| {
        pb.set_position(done as u64);
    });
    pb.finish_with_message("Done");

    if translated.trim().is_empty() {
        bail!("Translation resulted in empty content");
    }

    let output = args.output.clone().unwrap_or_else(|| {
        args.file
            .with_file_name(translated_file_name(&args.file, target))
    });
    std::fs::write(&output, translated)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("\nOutput saved to {}", output.display());

    Ok(())
}
