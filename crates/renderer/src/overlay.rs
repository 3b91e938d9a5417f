//! Rasterizing current glyphs over a viewport.

use std::f64::consts::PI;

use hydromet_common::{HydroError, HydroResult};
use projection::Viewport;
use tiny_skia::{Color, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use crate::currents::{CurrentGlyph, GlyphStyle};
use crate::png;

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Vertices of a regular polygon centered on (`cx`, `cy`) in pixel space.
///
/// With `angle` 0 and no rotation the first vertex points straight up;
/// positive rotation turns the shape clockwise.
pub fn shape_vertices(
    cx: f64,
    cy: f64,
    radius: f64,
    points: u32,
    angle: f64,
    rotation: f64,
) -> Vec<(f32, f32)> {
    (0..points)
        .map(|i| {
            let a = angle + rotation + 2.0 * PI * i as f64 / points as f64;
            ((cx + radius * a.sin()) as f32, (cy - radius * a.cos()) as f32)
        })
        .collect()
}

fn paint_for(hex: &str) -> HydroResult<Paint<'static>> {
    let (r, g, b) = hex_to_rgb(hex)
        .ok_or_else(|| HydroError::Render(format!("invalid color '{}'", hex)))?;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    Ok(paint)
}

/// Draw glyphs on a transparent canvas the size of `viewport`. Glyphs whose
/// shape lies entirely off screen are skipped.
pub fn render_overlay(
    glyphs: &[CurrentGlyph],
    viewport: &Viewport,
    style: &GlyphStyle,
) -> HydroResult<Pixmap> {
    let mut pixmap = Pixmap::new(viewport.width, viewport.height).ok_or_else(|| {
        HydroError::Render(format!(
            "cannot allocate {}x{} canvas",
            viewport.width, viewport.height
        ))
    })?;
    pixmap.fill(Color::TRANSPARENT);

    if style.points < 3 {
        return Err(HydroError::Render(format!(
            "shape needs at least 3 points, got {}",
            style.points
        )));
    }

    let stroke_paint = paint_for(&style.stroke_color)?;
    let fill_paint = style.fill_color.as_deref().map(paint_for).transpose()?;
    let stroke = Stroke {
        width: style.stroke_width,
        line_join: LineJoin::Miter,
        ..Stroke::default()
    };

    let (w, h) = (viewport.width as f64, viewport.height as f64);
    let mut drawn = 0usize;

    for glyph in glyphs {
        let (px, py) = viewport.pixel_from_coordinate(glyph.x, glyph.y);
        let reach = glyph.size + style.stroke_width as f64;
        if px + reach < 0.0 || py + reach < 0.0 || px - reach > w || py - reach > h {
            continue;
        }

        let vertices = shape_vertices(px, py, glyph.size, style.points, style.angle, glyph.rotation);
        let mut pb = PathBuilder::new();
        pb.move_to(vertices[0].0, vertices[0].1);
        for &(x, y) in &vertices[1..] {
            pb.line_to(x, y);
        }
        pb.close();

        if let Some(path) = pb.finish() {
            if let Some(fill) = &fill_paint {
                pixmap.fill_path(&path, fill, tiny_skia::FillRule::Winding, Transform::identity(), None);
            }
            pixmap.stroke_path(&path, &stroke_paint, &stroke, Transform::identity(), None);
            drawn += 1;
        }
    }

    debug!(total = glyphs.len(), drawn, "Rendered current overlay");
    Ok(pixmap)
}

/// Straight-alpha RGBA bytes of a pixmap.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

/// Render the overlay and encode it as PNG.
pub fn encode_overlay_png(
    glyphs: &[CurrentGlyph],
    viewport: &Viewport,
    style: &GlyphStyle,
) -> HydroResult<Vec<u8>> {
    let pixmap = render_overlay(glyphs, viewport, style)?;
    let rgba = pixmap_to_rgba(&pixmap);
    png::create_png_auto(&rgba, pixmap.width() as usize, pixmap.height() as usize)
        .map_err(HydroError::Render)
}
