// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tilt_card_svg --heading-base-level=0

//! SVG export for Understory tilt card scenes.
//!
//! [`to_svg`] replays a [`Scene`] into a standalone SVG document.
//!
//! This is intended for previews and inspection, not pixel-perfect rendering:
//! - Tilted layers are flattened and projected on the CPU, so the output is
//!   plain 2D paths.
//! - SVG has no conic gradient; sweep fills are drawn as thin wedges clipped
//!   to the shape.
//! - Shadows use `feDropShadow` on a group wrapping the shape.
//! - Top-level layers are stacked by `z_index`; nested tilts are not
//!   composed, the innermost one applies.
//!
//! ```rust
//! use kurbo::Size;
//! use understory_tilt_card::{CardConfig, TiltCard};
//!
//! let mut card = TiltCard::new(CardConfig::default());
//! card.layout(Size::new(400.0, 300.0));
//! let svg = understory_tilt_card_svg::to_svg(&card.render(), 400, 300);
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("feDropShadow"));
//! ```

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::TAU;
use core::fmt::Write as _;

use kurbo::{BezPath, PathEl, Point, RoundedRect, Shape, Vec2};
use peniko::Color;
use understory_tilt_card::{CardOp, Fill, Layer, Scene, Shadow, Tilt};

/// Default flattening tolerance for curved outlines.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Default number of wedges used to draw a sweep gradient.
pub const DEFAULT_SWEEP_SEGMENTS: usize = 96;

/// Export settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SvgOptions {
    /// Flattening tolerance for curved outlines.
    pub tolerance: f64,
    /// Wedges per sweep gradient; at least 3 are used.
    pub sweep_segments: usize,
    /// Color painted under the whole document.
    pub background: Option<Color>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            sweep_segments: DEFAULT_SWEEP_SEGMENTS,
            background: None,
        }
    }
}

impl SvgOptions {
    /// Paint `color` under the whole document.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the flattening tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the number of sweep wedges.
    #[must_use]
    pub fn with_sweep_segments(mut self, segments: usize) -> Self {
        self.sweep_segments = segments;
        self
    }
}

/// Export `scene` as an SVG document with default options.
pub fn to_svg(scene: &Scene, width: u32, height: u32) -> String {
    to_svg_with(scene, width, height, &SvgOptions::default())
}

/// Export `scene` as an SVG document.
pub fn to_svg_with(scene: &Scene, width: u32, height: u32, options: &SvgOptions) -> String {
    let mut writer = SvgWriter::new(options);
    for segment in stacked(scene.ops()) {
        for op in segment {
            writer.op(op);
        }
    }
    writer.close_open_groups();

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    if !writer.defs.is_empty() {
        svg.push_str("<defs>");
        svg.push_str(&writer.defs);
        svg.push_str("</defs>");
    }
    if let Some(color) = options.background {
        let _ = write!(
            svg,
            "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\"{}/>",
            paint_attrs(color)
        );
    }
    svg.push_str(&writer.body);
    svg.push_str("</svg>");
    svg
}

/// Split `ops` into top-level segments and order them by layer `z_index`.
///
/// Ops outside any layer stack at `0`. Equal indices keep recording order.
fn stacked(ops: &[CardOp]) -> Vec<&[CardOp]> {
    let mut segments: Vec<(i32, &[CardOp])> = Vec::new();
    let mut start = 0;
    let mut depth = 0_usize;
    for (i, op) in ops.iter().enumerate() {
        match op {
            CardOp::PushLayer(_) => depth += 1,
            CardOp::PopLayer => depth = depth.saturating_sub(1),
            CardOp::FillRoundedRect { .. } => {}
        }
        if depth == 0 {
            let segment = &ops[start..=i];
            segments.push((segment_z(segment), segment));
            start = i + 1;
        }
    }
    if start < ops.len() {
        let segment = &ops[start..];
        segments.push((segment_z(segment), segment));
    }
    segments.sort_by_key(|(z, _)| *z);
    segments.into_iter().map(|(_, segment)| segment).collect()
}

fn segment_z(segment: &[CardOp]) -> i32 {
    match segment.first() {
        Some(CardOp::PushLayer(layer)) => layer.z_index,
        _ => 0,
    }
}

struct SvgWriter<'a> {
    options: &'a SvgOptions,
    defs: String,
    body: String,
    /// Effective tilt of each open layer.
    layers: Vec<Option<Tilt>>,
    next_id: usize,
}

impl<'a> SvgWriter<'a> {
    fn new(options: &'a SvgOptions) -> Self {
        Self {
            options,
            defs: String::new(),
            body: String::new(),
            layers: Vec::new(),
            next_id: 0,
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn tilt(&self) -> Option<Tilt> {
        self.layers.last().copied().flatten()
    }

    fn op(&mut self, op: &CardOp) {
        match op {
            CardOp::PushLayer(layer) => self.push_layer(layer),
            CardOp::PopLayer => {
                if self.layers.pop().is_some() {
                    self.body.push_str("</g>");
                }
            }
            CardOp::FillRoundedRect {
                shape,
                fill,
                shadow,
            } => self.fill_rounded_rect(shape, fill, shadow.as_ref()),
        }
    }

    fn close_open_groups(&mut self) {
        while self.layers.pop().is_some() {
            self.body.push_str("</g>");
        }
    }

    fn push_layer(&mut self, layer: &Layer) {
        let tilt = layer.tilt.or_else(|| self.tilt());
        let _ = write!(self.body, "<g data-z-index=\"{}\"", layer.z_index);
        if let Some(clip) = &layer.clip {
            let id = self.clip_def(clip, tilt);
            let _ = write!(self.body, " clip-path=\"url(#{id})\"");
        }
        self.body.push('>');
        self.layers.push(tilt);
    }

    fn fill_rounded_rect(&mut self, shape: &RoundedRect, fill: &Fill, shadow: Option<&Shadow>) {
        let tilt = self.tilt();
        let filter = shadow.map(|shadow| self.shadow_def(shadow));
        if let Some(id) = &filter {
            let _ = write!(self.body, "<g filter=\"url(#{id})\">");
        }
        match fill {
            Fill::Solid(color) => {
                let d = self.outline(shape, tilt);
                let _ = write!(self.body, "<path d=\"{d}\"{}/>", paint_attrs(*color));
            }
            Fill::Sweep { center, .. } => self.sweep(shape, fill, *center, tilt),
        }
        if filter.is_some() {
            self.body.push_str("</g>");
        }
    }

    fn sweep(&mut self, shape: &RoundedRect, fill: &Fill, center: Point, tilt: Option<Tilt>) {
        let id = self.clip_def(shape, tilt);
        let _ = write!(self.body, "<g clip-path=\"url(#{id})\">");

        let rect = shape.rect();
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ];
        let radius = corners
            .iter()
            .map(|corner| (*corner - center).hypot())
            .fold(0.0, f64::max)
            + 1.0;

        let segments = self.options.sweep_segments.max(3);
        let step = TAU / segments as f64;
        for i in 0..segments {
            let start = step * i as f64;
            let end = start + step;
            let color = fill.color_at(start + step / 2.0);
            let a = project(tilt, center);
            let b = project(tilt, center + Vec2::from_angle(start) * radius);
            let c = project(tilt, center + Vec2::from_angle(end) * radius);
            let (rgb, alpha) = color_to_svg(color);
            // Stroke each wedge in its own color to hide antialiasing seams.
            let _ = write!(
                self.body,
                "<path d=\"M{} {}L{} {}L{} {}Z\"{} stroke=\"{rgb}\" stroke-width=\"0.5\"",
                fmt_f64(a.x),
                fmt_f64(a.y),
                fmt_f64(b.x),
                fmt_f64(b.y),
                fmt_f64(c.x),
                fmt_f64(c.y),
                paint_attrs(color),
            );
            if alpha < 1.0 {
                let _ = write!(self.body, " stroke-opacity=\"{}\"", fmt_f32(alpha));
            }
            self.body.push_str("/>");
        }
        self.body.push_str("</g>");
    }

    fn outline(&self, shape: &RoundedRect, tilt: Option<Tilt>) -> String {
        let path = match tilt {
            Some(tilt) => tilt.project_shape(shape, self.options.tolerance),
            None => shape.to_path(self.options.tolerance),
        };
        bez_path_to_svg_d(&path)
    }

    fn clip_def(&mut self, shape: &RoundedRect, tilt: Option<Tilt>) -> String {
        let id = self.fresh_id("clip");
        let d = self.outline(shape, tilt);
        let _ = write!(
            self.defs,
            "<clipPath id=\"{id}\" clipPathUnits=\"userSpaceOnUse\"><path d=\"{d}\"/></clipPath>"
        );
        id
    }

    fn shadow_def(&mut self, shadow: &Shadow) -> String {
        let id = self.fresh_id("shadow");
        let (rgb, alpha) = color_to_svg(shadow.color);
        let sigma = fmt_f64(shadow.sigma());
        // Use a generous region to avoid clipping the blur.
        let _ = write!(
            self.defs,
            "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
             <feDropShadow dx=\"{}\" dy=\"{}\" stdDeviation=\"{sigma} {sigma}\" flood-color=\"{rgb}\" flood-opacity=\"{}\"/>\
             </filter>",
            fmt_f64(shadow.offset.x),
            fmt_f64(shadow.offset.y),
            fmt_f32(alpha),
        );
        id
    }
}

fn project(tilt: Option<Tilt>, point: Point) -> Point {
    tilt.map_or(point, |tilt| tilt.project(point))
}

fn paint_attrs(color: Color) -> String {
    let (rgb, alpha) = color_to_svg(color);
    if alpha < 1.0 {
        format!(" fill=\"{rgb}\" fill-opacity=\"{}\"", fmt_f32(alpha))
    } else {
        format!(" fill=\"{rgb}\"")
    }
}

fn color_to_svg(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    let a = f32::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn bez_path_to_svg_d(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.iter() {
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                let _ = write!(
                    d,
                    "Q{} {} {} {}",
                    fmt_f64(p1.x),
                    fmt_f64(p1.y),
                    fmt_f64(p2.x),
                    fmt_f64(p2.y)
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {}",
                    fmt_f64(p1.x),
                    fmt_f64(p1.y),
                    fmt_f64(p2.x),
                    fmt_f64(p2.y),
                    fmt_f64(p3.x),
                    fmt_f64(p3.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "SVG uses f32-like scalar formatting"
)]
fn fmt_f64(v: f64) -> String {
    fmt_f32(v as f32)
}

fn fmt_f32(v: f32) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "integral values are printed without a fraction"
    )]
    let i = v as i32;
    let diff = (i as f32) - v;
    if diff > -1e-6 && diff < 1e-6 {
        return format!("{i}");
    }
    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};
    use understory_tilt_card::{CardConfig, PointerEvent, TiltCard};

    const RED: Color = Color::from_rgba8(255, 0, 0, 255);

    fn rounded() -> RoundedRect {
        RoundedRect::from_rect(Rect::new(10.0, 10.0, 110.0, 60.0), 8.0)
    }

    #[test]
    fn empty_scene_is_bare_document() {
        let svg = to_svg(&Scene::new(), 40, 20);
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"40\" height=\"20\" viewBox=\"0 0 40 20\"></svg>"
        );
    }

    #[test]
    fn solid_fill_with_background() {
        let mut scene = Scene::new();
        scene.fill_rounded_rect(rounded(), Fill::Solid(RED), None);
        let options = SvgOptions::default().with_background(Color::from_rgba8(0, 0, 0, 128));
        let svg = to_svg_with(&scene, 120, 80, &options);
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"120\" height=\"80\" fill=\"#000000\" fill-opacity=\"0.502\"/>"));
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(!svg.contains("<filter"));
    }

    #[test]
    fn shadow_becomes_drop_shadow_filter() {
        let mut scene = Scene::new();
        let shadow = Shadow {
            color: Color::from_rgba8(0, 255, 0, 255),
            offset: Vec2::new(0.0, 4.0),
            blur_radius: 0.0,
        };
        scene.fill_rounded_rect(rounded(), Fill::Solid(RED), Some(shadow));
        let svg = to_svg(&scene, 120, 80);
        assert!(svg.contains(
            "<feDropShadow dx=\"0\" dy=\"4\" stdDeviation=\"0 0\" flood-color=\"#00ff00\" flood-opacity=\"1\"/>"
        ));
        assert!(svg.contains("<g filter=\"url(#shadow0)\">"));
    }

    #[test]
    fn sweep_is_clipped_wedges() {
        let mut scene = Scene::new();
        let colors = [RED, Color::from_rgba8(0, 0, 255, 255)];
        let fill = Fill::sweep(rounded().rect().center(), &colors, RED);
        scene.fill_rounded_rect(rounded(), fill, None);
        let options = SvgOptions::default().with_sweep_segments(8);
        let svg = to_svg_with(&scene, 120, 80, &options);
        assert!(svg.contains("<clipPath id=\"clip0\""));
        assert!(svg.contains("<g clip-path=\"url(#clip0)\">"));
        assert_eq!(svg.matches("stroke-width=\"0.5\"").count(), 8);
    }

    #[test]
    fn layers_stack_by_z_index() {
        let mut scene = Scene::new();
        let top = Color::from_rgba8(1, 2, 3, 255);
        let bottom = Color::from_rgba8(4, 5, 6, 255);
        scene.with_layer(
            Layer {
                z_index: 5,
                ..Layer::default()
            },
            |scene| scene.fill_rounded_rect(rounded(), Fill::Solid(top), None),
        );
        scene.with_layer(Layer::default(), |scene| {
            scene.fill_rounded_rect(rounded(), Fill::Solid(bottom), None);
        });
        let svg = to_svg(&scene, 120, 80);
        let top_at = svg.find("#010203").expect("top layer is exported");
        let bottom_at = svg.find("#040506").expect("bottom layer is exported");
        assert!(bottom_at < top_at);
    }

    #[test]
    fn tilted_card_exports_projected_surface() {
        let mut card = TiltCard::new(CardConfig::default());
        let layout = card.layout(Size::new(400.0, 300.0));
        let flat = to_svg(&card.render(), 400, 300);

        card.pointer_event(PointerEvent::Down(
            layout.surface.center() + Vec2::new(150.0, 60.0),
        ));
        while card.tick(1.0 / 60.0) {}
        let tilted = to_svg(&card.render(), 400, 300);

        assert_ne!(flat, tilted);
        assert_eq!(tilted.matches("<g data-z-index=").count(), 2);
        assert!(tilted.find("data-z-index=\"0\"") < tilted.find("data-z-index=\"1\""));
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(fmt_f32(3.0), "3");
        assert_eq!(fmt_f32(-0.5), "-0.5");
        assert_eq!(fmt_f32(1.23456), "1.235");
        assert_eq!(fmt_f64(f64::NAN), "NaN");
    }
}
