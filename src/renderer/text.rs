//! HUD text rendering
//!
//! Printable ASCII is rasterized once with `fontdue` into a single atlas
//! texture. Each character then becomes one textured quad whose alpha is the
//! glyph coverage, tinted by the vertex color.

use std::collections::HashMap;

use fontdue::{Font, FontSettings};
use glam::Vec2;
use image::{Rgba, RgbaImage};
use thiserror::Error;

use super::shapes;
use super::vertex::Vertex;
use crate::sim::Rect;

/// Embedded HUD font (DejaVu Sans, see assets/fonts for its license)
pub const HUD_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
/// HUD text size in pixels per em
pub const HUD_FONT_SIZE: f32 = 24.0;

/// Glyphs per atlas row
const ATLAS_COLUMNS: u32 = 16;
/// Transparent pixels around each glyph so filtering never bleeds
const GLYPH_PADDING: u32 = 2;
/// Drawn in place of characters outside printable ASCII
const FALLBACK_CHAR: char = '?';

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to load font: {0}")]
    Load(&'static str),
    #[error("font has no horizontal line metrics")]
    MissingLineMetrics,
    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),
}

/// Placement of one glyph in the atlas
#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    uv_min: Vec2,
    uv_max: Vec2,
    /// Bitmap size in pixels
    size: Vec2,
    /// Top-left of the bitmap relative to the pen on the baseline (y down)
    offset: Vec2,
    advance: f32,
}

/// Rasterized font plus per-character layout metrics
pub struct FontAtlas {
    glyphs: HashMap<char, Glyph>,
    fallback: Glyph,
    image: RgbaImage,
    ascent: f32,
    line_height: f32,
}

impl FontAtlas {
    /// Atlas of the embedded HUD font
    pub fn new() -> Result<Self, FontError> {
        Self::from_bytes(HUD_FONT, HUD_FONT_SIZE)
    }

    pub fn from_bytes(data: &[u8], px: f32) -> Result<Self, FontError> {
        let settings = FontSettings {
            scale: px,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data, settings).map_err(FontError::Load)?;
        let line = font
            .horizontal_line_metrics(px)
            .ok_or(FontError::MissingLineMetrics)?;

        let rasterized: Vec<_> = (' '..='~')
            .map(|c| {
                let (metrics, bitmap) = font.rasterize(c, px);
                (c, metrics, bitmap)
            })
            .collect();

        let max_width = rasterized.iter().map(|(_, m, _)| m.width).max().unwrap_or(0);
        let max_height = rasterized.iter().map(|(_, m, _)| m.height).max().unwrap_or(0);
        let cell_w = max_width as u32 + GLYPH_PADDING;
        let cell_h = max_height as u32 + GLYPH_PADDING;
        let rows = (rasterized.len() as u32).div_ceil(ATLAS_COLUMNS);

        let mut image = RgbaImage::from_pixel(
            cell_w * ATLAS_COLUMNS,
            cell_h * rows,
            Rgba([255, 255, 255, 0]),
        );
        let atlas_size = Vec2::new(image.width() as f32, image.height() as f32);

        let mut glyphs = HashMap::with_capacity(rasterized.len());
        for (i, (c, metrics, bitmap)) in rasterized.into_iter().enumerate() {
            let cell_x = (i as u32 % ATLAS_COLUMNS) * cell_w;
            let cell_y = (i as u32 / ATLAS_COLUMNS) * cell_h;
            for (j, coverage) in bitmap.iter().enumerate() {
                let x = cell_x + (j % metrics.width) as u32;
                let y = cell_y + (j / metrics.width) as u32;
                image.put_pixel(x, y, Rgba([255, 255, 255, *coverage]));
            }

            let size = Vec2::new(metrics.width as f32, metrics.height as f32);
            let uv_min = Vec2::new(cell_x as f32, cell_y as f32) / atlas_size;
            glyphs.insert(
                c,
                Glyph {
                    uv_min,
                    uv_max: uv_min + size / atlas_size,
                    size,
                    offset: Vec2::new(metrics.xmin as f32, -(metrics.ymin as f32 + size.y)),
                    advance: metrics.advance_width,
                },
            );
        }

        let fallback = glyphs
            .get(&FALLBACK_CHAR)
            .copied()
            .ok_or(FontError::MissingGlyph(FALLBACK_CHAR))?;
        log::debug!(
            "Font atlas {}x{} with {} glyphs at {}px",
            image.width(),
            image.height(),
            glyphs.len(),
            px
        );

        Ok(Self {
            glyphs,
            fallback,
            image,
            ascent: line.ascent,
            line_height: line.ascent - line.descent,
        })
    }

    /// Atlas texture: white, with glyph coverage in alpha
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Height of one line of text in pixels
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    fn glyph(&self, c: char) -> &Glyph {
        self.glyphs.get(&c).unwrap_or(&self.fallback)
    }

    /// Width of `text` in pixels
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.glyph(c).advance).sum()
    }

    /// Generate vertices for `content` with the top-left of its line at `origin`
    pub fn text(&self, content: &str, origin: Vec2, color: [f32; 4]) -> Vec<Vertex> {
        let baseline = origin.y + self.ascent;
        let mut pen = origin.x;
        let mut vertices = Vec::with_capacity(content.len() * 6);

        for c in content.chars() {
            let glyph = self.glyph(c);
            if glyph.size.x > 0.0 && glyph.size.y > 0.0 {
                let quad = Rect {
                    pos: (Vec2::new(pen, baseline) + glyph.offset).round(),
                    size: glyph.size,
                };
                vertices.extend_from_slice(&shapes::textured_rect(
                    &quad,
                    glyph.uv_min,
                    glyph.uv_max,
                    color,
                ));
            }
            pen += glyph.advance;
        }

        vertices
    }
}
