use image::RgbaImage;
use thiserror::Error;
use tiny_skia::Pixmap;
use tracing::debug;

use super::draw::{fill_disc, fill_ellipse, fill_polygon, stroke_arc, stroke_line};
use crate::config::IconConfig;
use crate::layout::{BBox, Geometry, ARC_END_DEG, ARC_START_DEG, TICK_ANGLES_DEG};
use crate::style::Palette;

/// A finished icon raster, straight RGBA.
pub type Canvas = RgbaImage;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {size}x{size} canvas")]
    EmptyCanvas { size: u32 },
}

#[derive(Clone, Debug)]
pub struct RenderedIcon {
    pub size: u32,
    pub canvas: Canvas,
}

/// Icons ordered largest first; the first one is the primary frame.
#[derive(Clone, Debug, Default)]
pub struct RenderedIconSet {
    icons: Vec<RenderedIcon>,
}

impl RenderedIconSet {
    pub fn primary(&self) -> Option<&RenderedIcon> {
        self.icons.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedIcon> {
        self.icons.iter()
    }

    pub fn sizes(&self) -> Vec<u32> {
        self.icons.iter().map(|icon| icon.size).collect()
    }
}

impl FromIterator<RenderedIcon> for RenderedIconSet {
    fn from_iter<I: IntoIterator<Item = RenderedIcon>>(iter: I) -> Self {
        let mut icons: Vec<RenderedIcon> = iter.into_iter().collect();
        icons.sort_by(|a, b| b.size.cmp(&a.size));
        Self { icons }
    }
}

/// Render the gauge icon with the default palette.
pub fn render(size: u32) -> Result<Canvas, RenderError> {
    render_with(size, &Palette::default())
}

/// Render the gauge icon at `size`x`size` pixels. Drawing order matters:
/// each step overwrites the pixels it covers.
pub fn render_with(size: u32, palette: &Palette) -> Result<Canvas, RenderError> {
    let mut pixmap = Pixmap::new(size, size).ok_or(RenderError::EmptyCanvas { size })?;
    let g = Geometry::for_size(size);

    // Outer ring, then the lighter face inside it
    fill_ellipse(&mut pixmap, BBox::inset(size, g.margin), palette.bg_dark);
    fill_ellipse(&mut pixmap, BBox::inset(size, g.inner_margin), palette.bg_light);

    let arc_bbox = g.gauge_bbox();
    if !arc_bbox.is_degenerate() {
        stroke_arc(
            &mut pixmap,
            arc_bbox,
            ARC_START_DEG,
            ARC_END_DEG,
            g.arc_width,
            palette.accent,
        );
    }

    if g.shows_ticks() {
        let inner = g.gauge_radius - g.tick_length / 2;
        let outer = g.gauge_radius + g.tick_length / 2;
        for angle in TICK_ANGLES_DEG {
            stroke_line(
                &mut pixmap,
                g.polar(inner, angle),
                g.polar(outer, angle),
                g.tick_width,
                palette.tick(),
            );
        }
    }

    let center = g.gauge_center();
    fill_disc(&mut pixmap, center, g.hub_radius, palette.bg_dark);
    if g.shows_hub_highlight() {
        fill_disc(&mut pixmap, center, g.hub_highlight_radius, palette.accent);
    }

    fill_polygon(&mut pixmap, &g.needle(), palette.white);
    fill_disc(&mut pixmap, center, g.dot_radius, palette.white);

    debug!(size, "rendered gauge icon");
    Ok(to_canvas(&pixmap))
}

/// Render every configured size, largest first.
pub fn render_set(config: &IconConfig) -> Result<RenderedIconSet, RenderError> {
    config
        .sizes
        .iter()
        .map(|&size| {
            let canvas = if config.palette == Palette::default() {
                render(size)?
            } else {
                render_with(size, &config.palette)?
            };
            Ok::<_, RenderError>(RenderedIcon { size, canvas })
        })
        .collect()
}

fn to_canvas(pixmap: &Pixmap) -> Canvas {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let c = pixels[(y * width + x) as usize].demultiply();
        image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}
