use tiny_skia::{
    BlendMode, FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};
use tracing::trace;

use crate::layout::BBox;
use crate::style::Rgba;

/// Continuous rectangle covering every pixel of the box.
fn to_rect(bbox: BBox) -> Option<Rect> {
    Rect::from_ltrb(
        bbox.left as f32,
        bbox.top as f32,
        (bbox.right + 1) as f32,
        (bbox.bottom + 1) as f32,
    )
}

/// Paint that replaces destination pixels. Edges are hard so every pixel
/// carries exactly one palette color.
fn solid(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = false;
    paint.blend_mode = BlendMode::Source;
    paint
}

fn pixel_center(p: (i32, i32)) -> (f32, f32) {
    (p.0 as f32 + 0.5, p.1 as f32 + 0.5)
}

pub fn fill_ellipse(pixmap: &mut Pixmap, bbox: BBox, color: Rgba) {
    if bbox.is_degenerate() {
        trace!(?bbox, "skipping degenerate ellipse");
        return;
    }
    let Some(path) = to_rect(bbox).and_then(PathBuilder::from_oval) else {
        trace!(?bbox, "skipping ellipse without a path");
        return;
    };
    pixmap.fill_path(
        &path,
        &solid(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}

pub fn fill_disc(pixmap: &mut Pixmap, center: (i32, i32), radius: i32, color: Rgba) {
    fill_ellipse(pixmap, BBox::around(center, radius), color);
}

/// Stroke a circular arc inside `bbox`. The stroke's outer edge touches the
/// box and it grows inward by `width`. Angles are in degrees, clockwise from
/// the positive x axis.
pub fn stroke_arc(
    pixmap: &mut Pixmap,
    bbox: BBox,
    start_deg: f32,
    end_deg: f32,
    width: i32,
    color: Rgba,
) {
    if bbox.is_degenerate() || width <= 0 || end_deg <= start_deg {
        trace!(?bbox, width, "skipping degenerate arc");
        return;
    }
    let Some(rect) = to_rect(bbox) else {
        return;
    };
    let outer = rect.width().min(rect.height()) / 2.0;
    let radius = (outer - width as f32 / 2.0).max(0.5);
    let center = (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);

    let Some(path) = arc_path(center, radius, start_deg, end_deg) else {
        trace!(?bbox, "skipping arc without a path");
        return;
    };
    let stroke = Stroke {
        width: width as f32,
        line_cap: LineCap::Butt,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
}

/// Cubic approximation of a circular arc, one segment per quarter turn at most.
fn arc_path(center: (f32, f32), radius: f32, start_deg: f32, end_deg: f32) -> Option<Path> {
    let sweep = (end_deg - start_deg).to_radians();
    let segments = (sweep / std::f32::consts::FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
    let point = |t: f32| (center.0 + radius * t.cos(), center.1 + radius * t.sin());

    let mut t0 = start_deg.to_radians();
    let mut pb = PathBuilder::new();
    let (x, y) = point(t0);
    pb.move_to(x, y);
    for _ in 0..segments {
        let t1 = t0 + step;
        let (x0, y0) = point(t0);
        let (x1, y1) = point(t1);
        pb.cubic_to(
            x0 - k * t0.sin(),
            y0 + k * t0.cos(),
            x1 + k * t1.sin(),
            y1 - k * t1.cos(),
            x1,
            y1,
        );
        t0 = t1;
    }
    pb.finish()
}

/// Stroke a straight segment between two pixels. One-pixel lines are drawn
/// as hairlines so short diagonals never vanish between pixel centers.
pub fn stroke_line(pixmap: &mut Pixmap, from: (i32, i32), to: (i32, i32), width: i32, color: Rgba) {
    if from == to || width <= 0 {
        trace!(?from, ?to, width, "skipping degenerate line");
        return;
    }
    let (x0, y0) = pixel_center(from);
    let (x1, y1) = pixel_center(to);
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y1);
    let Some(path) = pb.finish() else {
        return;
    };
    let stroke = Stroke {
        width: if width == 1 { 0.0 } else { width as f32 },
        line_cap: LineCap::Butt,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
}

pub fn fill_polygon(pixmap: &mut Pixmap, points: &[(i32, i32)], color: Rgba) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    if rest.len() < 2 {
        trace!(?points, "skipping polygon with fewer than three points");
        return;
    }
    let mut pb = PathBuilder::new();
    let (x, y) = pixel_center(first);
    pb.move_to(x, y);
    for &p in rest {
        let (x, y) = pixel_center(p);
        pb.line_to(x, y);
    }
    pb.close();
    let Some(path) = pb.finish() else {
        trace!(?points, "skipping polygon without a path");
        return;
    };
    pixmap.fill_path(
        &path,
        &solid(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}
