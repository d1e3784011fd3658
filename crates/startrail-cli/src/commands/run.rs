use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use startrail_core::filters::skyglow::SkyglowStrength;
use startrail_core::io::{FsImageStore, ImageStore};
use startrail_core::pipeline::config::{
    DarkFrameConfig, IntermediateConfig, RunConfig, SkyglowConfig,
};
use startrail_core::pipeline::{run_startrail_reported, FadeMode};

use crate::live::PreviewFile;
use crate::progress::BarReporter;
use crate::summary::print_run_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum SkyglowArg {
    None,
    Light,
    Moderate,
    Heavy,
    Full,
}

impl From<SkyglowArg> for SkyglowStrength {
    fn from(arg: SkyglowArg) -> Self {
        match arg {
            SkyglowArg::None => Self::None,
            SkyglowArg::Light => Self::Light,
            SkyglowArg::Moderate => Self::Moderate,
            SkyglowArg::Heavy => Self::Heavy,
            SkyglowArg::Full => Self::Full,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FadeArg {
    None,
    In,
    Out,
}

impl From<FadeArg> for FadeMode {
    fn from(arg: FadeArg) -> Self {
        match arg {
            FadeArg::None => Self::None,
            FadeArg::In => Self::In,
            FadeArg::Out => Self::Out,
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory of light frames
    pub frames: Option<PathBuf>,

    /// Run config file (TOML); overrides every other option
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of dark frames to average and subtract
    #[arg(long)]
    pub darks: Option<PathBuf>,

    /// Save a snapshot into this directory after every frame
    #[arg(long)]
    pub intermediate: Option<PathBuf>,

    /// Rewrite a preview image after every frame (much slower)
    #[arg(long)]
    pub live: bool,

    /// Preview image path used with --live
    #[arg(long, default_value = "live-preview.png")]
    pub live_path: PathBuf,

    /// Keep every frame as its own layer instead of merging as they arrive
    #[arg(long)]
    pub keep_layers: bool,

    /// Sky-glow subtraction strength (much slower)
    #[arg(long, value_enum, default_value = "none")]
    pub skyglow: SkyglowArg,

    /// Blur radius in pixels used to estimate sky-glow
    #[arg(long, default_value = "500")]
    pub skyglow_radius: f32,

    /// Fade trails in or out
    #[arg(long, value_enum, default_value = "none")]
    pub fade: FadeArg,

    /// Limit trail length in frames (0 = infinite; needs --keep-layers)
    #[arg(long, default_value = "0")]
    pub limit: usize,

    /// Output file path
    #[arg(short, long, default_value = "startrail.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = load_config(args)?;

    print_run_summary(&config);

    let reporter = BarReporter::new()?;
    let preview = PreviewFile::new(args.live_path.clone());
    let result = run_startrail_reported(&config, &FsImageStore, &reporter, Some(&preview));
    reporter.clear();
    let image = result?;

    FsImageStore.save(&image, &config.output)?;
    println!("\nOutput saved to {}", config.output.display());

    Ok(())
}

fn load_config(args: &RunArgs) -> Result<RunConfig> {
    match args.config {
        Some(ref config_path) => {
            let contents = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            toml::from_str(&contents).context("Invalid run config")
        }
        None => Ok(build_config_from_args(args)),
    }
}

fn build_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        light_frames: args.frames.clone().unwrap_or_default(),
        output: args.output.clone(),
        dark_frames: DarkFrameConfig {
            enabled: args.darks.is_some(),
            dir: args.darks.clone(),
        },
        intermediate: IntermediateConfig {
            enabled: args.intermediate.is_some(),
            dir: args.intermediate.clone(),
        },
        live_display: args.live,
        merge_layers: !args.keep_layers,
        skyglow: SkyglowConfig {
            strength: args.skyglow.into(),
            radius: args.skyglow_radius,
        },
        fade: args.fade.into(),
        trail_limit: args.limit,
    }
}
