// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preview harness for the Understory tilt card.
//!
//! Runs a scripted press, drag, and release through a [`TiltCard`] and writes
//! one SVG document per frame, for the light and/or dark theme.

mod config;
mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_tilt_card::TiltCard;

use crate::config::{DragStart, PreviewConfig};
use crate::script::Theme;

#[derive(Parser, Debug)]
#[command(name = "understory_tilt_card_preview")]
#[command(about = "Render a scripted tilt card gesture to SVG frames")]
#[command(version)]
struct Cli {
    /// Preview configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the frames are written to
    #[arg(short, long, default_value = "tilt_card_frames")]
    out: PathBuf,

    /// Document width, overriding the config file
    #[arg(long)]
    width: Option<u32>,

    /// Document height, overriding the config file
    #[arg(long)]
    height: Option<u32>,

    /// Frames per second, overriding the config file
    #[arg(long)]
    fps: Option<f64>,

    /// Themes to render
    #[arg(long, value_enum, default_value_t = ThemeChoice::Both)]
    theme: ThemeChoice,

    /// Mapping of the first drag sample, overriding the config file
    #[arg(long, value_enum)]
    drag_start: Option<DragStart>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
    Both,
}

impl ThemeChoice {
    fn themes(self) -> &'static [Theme] {
        match self {
            Self::Light => &[Theme::Light],
            Self::Dark => &[Theme::Dark],
            Self::Both => &[Theme::Light, Theme::Dark],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("understory_tilt_card=debug,understory_tilt_card_preview=debug")
    } else {
        EnvFilter::new("understory_tilt_card=warn,understory_tilt_card_preview=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut preview = PreviewConfig::load(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        preview.frames.width = width;
    }
    if let Some(height) = cli.height {
        preview.frames.height = height;
    }
    if let Some(fps) = cli.fps {
        preview.frames.fps = fps;
    }
    if cli.drag_start.is_some() {
        preview.card.drag_start = cli.drag_start;
    }
    info!(frames = ?preview.frames, "loaded configuration");

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;

    for &theme in cli.theme.themes() {
        let config = preview.card.apply(theme.card_config())?;
        config
            .validate()
            .with_context(|| format!("invalid card configuration for {} theme", theme.name()))?;

        let mut card = TiltCard::new(config);
        let frames = script::record(&mut card, theme, &preview.frames);
        for frame in &frames {
            let path = cli.out.join(&frame.name);
            std::fs::write(&path, &frame.svg)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        info!(
            theme = theme.name(),
            frames = frames.len(),
            out = %cli.out.display(),
            "wrote frames"
        );
    }
    Ok(())
}
