// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preview configuration file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use kurbo::Vec2;
use peniko::Color;
use serde::Deserialize;
use understory_tilt_card::{CardConfig, DragStartMode};

/// How the first drag sample is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DragStart {
    /// Same mapping as every other sample.
    Adjusted,
    /// Raw pointer position.
    Raw,
}

impl From<DragStart> for DragStartMode {
    fn from(choice: DragStart) -> Self {
        match choice {
            DragStart::Adjusted => Self::Adjusted,
            DragStart::Raw => Self::Raw,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PreviewConfig {
    #[serde(default)]
    pub(crate) frames: FrameSection,

    #[serde(default)]
    pub(crate) card: CardSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FrameSection {
    /// Document width in pixels
    #[serde(default = "default_width")]
    pub(crate) width: u32,

    /// Document height in pixels
    #[serde(default = "default_height")]
    pub(crate) height: u32,

    /// Frames per second
    #[serde(default = "default_fps")]
    pub(crate) fps: f64,

    /// Length of the recording in seconds
    #[serde(default = "default_duration")]
    pub(crate) duration: f64,
}

fn default_width() -> u32 {
    400
}
fn default_height() -> u32 {
    700
}
fn default_fps() -> f64 {
    60.0
}
fn default_duration() -> f64 {
    2.0
}

impl Default for FrameSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            duration: default_duration(),
        }
    }
}

/// Card overrides; unset keys keep the card defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CardSection {
    pub(crate) slow_down_factor: Option<f64>,
    pub(crate) aspect_ratio: Option<f64>,
    pub(crate) max_angle: Option<f64>,
    pub(crate) corner_radius: Option<f64>,
    pub(crate) glow_corner_radius: Option<f64>,
    pub(crate) glow_radius: Option<f64>,
    pub(crate) glow_offset: Option<[f64; 2]>,
    pub(crate) glow_color: Option<String>,
    pub(crate) gradient_colors: Option<Vec<String>>,
    pub(crate) surface_color: Option<String>,
    pub(crate) card_padding: Option<f64>,
    pub(crate) surface_inset: Option<f64>,
    pub(crate) camera_distance: Option<f64>,
    pub(crate) drag_start: Option<DragStart>,
    pub(crate) drag_slop: Option<f64>,
}

impl PreviewConfig {
    /// Load `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl CardSection {
    /// Apply the overrides on top of `base`.
    pub(crate) fn apply(&self, base: CardConfig) -> Result<CardConfig> {
        let mut config = base;
        if let Some(v) = self.slow_down_factor {
            config.slow_down_factor = v;
        }
        if let Some(v) = self.aspect_ratio {
            config.aspect_ratio = v;
        }
        if let Some(v) = self.max_angle {
            config.max_angle = v;
        }
        if let Some(v) = self.corner_radius {
            config.corner_radius = v;
        }
        if let Some(v) = self.glow_corner_radius {
            config.glow_corner_radius = v;
        }
        if let Some(v) = self.glow_radius {
            config.glow_radius = v;
        }
        if let Some([x, y]) = self.glow_offset {
            config.glow_offset = Vec2::new(x, y);
        }
        if let Some(hex) = &self.glow_color {
            config.glow_color = parse_hex_color(hex).context("glow_color")?;
        }
        if let Some(colors) = &self.gradient_colors {
            config.gradient_colors = colors
                .iter()
                .map(|hex| parse_hex_color(hex))
                .collect::<Result<_>>()
                .context("gradient_colors")?;
        }
        if let Some(hex) = &self.surface_color {
            config.surface_color = parse_hex_color(hex).context("surface_color")?;
        }
        if let Some(v) = self.card_padding {
            config.card_padding = v;
        }
        if let Some(v) = self.surface_inset {
            config.surface_inset = v;
        }
        if let Some(v) = self.camera_distance {
            config.camera_distance = v;
        }
        if let Some(v) = self.drag_start {
            config.drag_start = v.into();
        }
        if let Some(v) = self.drag_slop {
            config.drag_slop = v;
        }
        Ok(config)
    }
}

/// Parse `#rrggbb` or `#rrggbbaa`; the leading `#` is optional.
pub(crate) fn parse_hex_color(hex: &str) -> Result<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        bail!("expected #rrggbb or #rrggbbaa, got {hex:?}");
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .with_context(|| format!("invalid hex digits in {hex:?}"))
    };
    let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            parse_hex_color("#00ff00").unwrap(),
            Color::from_rgba8(0, 255, 0, 255)
        );
        assert_eq!(
            parse_hex_color("1C1B1F80").unwrap(),
            Color::from_rgba8(0x1c, 0x1b, 0x1f, 0x80)
        );
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#ff00é0").is_err());
    }

    #[test]
    fn empty_file_is_default() {
        let config = PreviewConfig::parse("").unwrap();
        assert_eq!(config.frames.width, 400);
        assert_eq!(config.frames.fps, 60.0);
        let card = config.card.apply(CardConfig::default()).unwrap();
        assert_eq!(card, CardConfig::default());
    }

    #[test]
    fn sample_file_matches_defaults() {
        let config = PreviewConfig::parse(include_str!("../tilt_card.toml")).unwrap();
        assert_eq!(config.frames.fps, 30.0);
        let card = config.card.apply(CardConfig::default()).unwrap();
        assert_eq!(card, CardConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let config = PreviewConfig::parse(
            r##"
            [card]
            max_angle = 0.0
            gradient_colors = []
            glow_offset = [1.0, -2.0]
            drag_start = "raw"
            surface_color = "#1c1b1f"
            "##,
        )
        .unwrap();
        let card = config.card.apply(CardConfig::default()).unwrap();
        assert_eq!(card.max_angle, 0.0);
        assert!(card.gradient_colors.is_empty());
        assert_eq!(card.glow_offset, Vec2::new(1.0, -2.0));
        assert_eq!(card.drag_start, DragStartMode::Raw);
        assert_eq!(card.surface_color, Color::from_rgba8(0x1c, 0x1b, 0x1f, 255));
    }

    #[test]
    fn bad_color_and_unknown_keys_are_errors() {
        let config = PreviewConfig::parse("[card]\nglow_color = \"green\"").unwrap();
        let err = config.card.apply(CardConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("glow_color"));

        assert!(PreviewConfig::parse("[card]\nwobble = 3").is_err());
    }
}
