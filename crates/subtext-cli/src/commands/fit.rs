use anyhow::{bail, Result};
use clap::Args;
use subtext_core::config::ViewerConfig;
use subtext_core::layout::{fit_text, EstimatedMetrics};

use crate::summary::print_layout;

#[derive(Args)]
pub struct FitArgs {
    /// Text to lay out
    pub text: String,

    /// Box width
    #[arg(long)]
    pub width: f32,

    /// Box height
    #[arg(long)]
    pub height: f32,
}

pub fn run(args: &FitArgs, config: &ViewerConfig) -> Result<()> {
    if args.width <= 0.0 || args.height <= 0.0 {
        bail!("Box must have positive width and height");
    }

    let metrics = EstimatedMetrics {
        line_spacing: config.layout.line_spacing,
    };
    let layout = fit_text(
        &args.text,
        args.width,
        args.height,
        &metrics,
        &config.layout.fit_params(),
    );
    print_layout(&layout, args.width, args.height);

    Ok(())
}
