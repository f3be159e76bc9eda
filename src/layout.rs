// Layout constants for the gauge icon, expressed at the 256px reference size

// --- Reference ---
pub const BASE_SIZE: f32 = 256.0;

// --- Background ---
pub const MARGIN: f32 = 8.0;
pub const INNER_MARGIN: f32 = 20.0;

// --- Gauge ---
pub const GAUGE_OFFSET_Y: f32 = 8.0;
pub const GAUGE_RADIUS: f32 = 90.0;
pub const ARC_WIDTH: f32 = 12.0;
pub const ARC_START_DEG: f32 = 135.0;
pub const ARC_END_DEG: f32 = 405.0;

// --- Ticks ---
pub const TICK_LENGTH: f32 = 12.0;
pub const TICK_WIDTH: f32 = 2.0;
pub const TICK_ANGLES_DEG: [f32; 7] = [135.0, 180.0, 225.0, 270.0, 315.0, 360.0, 405.0];
pub const TICK_MIN_SIZE: u32 = 32;

// --- Hub and needle ---
pub const HUB_RADIUS: f32 = 20.0;
pub const HUB_RIM: f32 = 5.0;
pub const NEEDLE_ANGLE_DEG: f32 = 330.0;
pub const NEEDLE_INSET: f32 = 8.0;
pub const NEEDLE_WIDTH: f32 = 6.0;
pub const DOT_RADIUS: f32 = 6.0;

/// Scale a reference measurement to the target size. Truncates toward zero,
/// then clamps to `floor` so small icons keep every element visible.
pub fn scaled(base: f32, scale: f32, floor: i32) -> i32 {
    ((base * scale) as i32).max(floor)
}

/// Inclusive pixel bounding box, the way an ellipse or arc is addressed on
/// the canvas: `right` and `bottom` are the last covered pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BBox {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square box of the given radius around a pixel.
    pub fn around(center: (i32, i32), radius: i32) -> Self {
        Self::new(
            center.0 - radius,
            center.1 - radius,
            center.0 + radius,
            center.1 + radius,
        )
    }

    /// Box inset by `margin` on every side of a `size`-pixel canvas.
    pub fn inset(size: u32, margin: i32) -> Self {
        let edge = size as i32 - 1;
        Self::new(margin, margin, edge - margin, edge - margin)
    }

    pub fn is_degenerate(&self) -> bool {
        self.right - self.left <= 0 || self.bottom - self.top <= 0
    }
}

/// Pixel measurements for one icon size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub size: u32,
    pub center: i32,
    pub margin: i32,
    pub inner_margin: i32,
    pub gauge_center_y: i32,
    pub gauge_radius: i32,
    pub arc_width: i32,
    pub tick_length: i32,
    pub tick_width: i32,
    pub hub_radius: i32,
    pub hub_highlight_radius: i32,
    pub needle_length: i32,
    pub needle_width: i32,
    pub dot_radius: i32,
}

impl Geometry {
    pub fn for_size(size: u32) -> Self {
        let scale = size as f32 / BASE_SIZE;
        let center = (size / 2) as i32;

        let gauge_radius = scaled(GAUGE_RADIUS, scale, 10);
        let hub_radius = scaled(HUB_RADIUS, scale, 3);

        Self {
            size,
            center,
            margin: scaled(MARGIN, scale, 1),
            inner_margin: scaled(INNER_MARGIN, scale, 2),
            gauge_center_y: center + scaled(GAUGE_OFFSET_Y, scale, 1),
            gauge_radius,
            arc_width: scaled(ARC_WIDTH, scale, 2),
            tick_length: scaled(TICK_LENGTH, scale, 2),
            tick_width: scaled(TICK_WIDTH, scale, 1),
            hub_radius,
            hub_highlight_radius: (hub_radius - scaled(HUB_RIM, scale, 1)).max(1),
            needle_length: gauge_radius - scaled(NEEDLE_INSET, scale, 2),
            needle_width: scaled(NEEDLE_WIDTH, scale, 1),
            dot_radius: scaled(DOT_RADIUS, scale, 1),
        }
    }

    pub fn gauge_center(&self) -> (i32, i32) {
        (self.center, self.gauge_center_y)
    }

    pub fn gauge_bbox(&self) -> BBox {
        BBox::around(self.gauge_center(), self.gauge_radius)
    }

    pub fn shows_ticks(&self) -> bool {
        self.size >= TICK_MIN_SIZE
    }

    pub fn shows_hub_highlight(&self) -> bool {
        self.hub_highlight_radius > 1
    }

    /// Point at `radius` from the gauge center along `angle_deg`, with each
    /// offset truncated to whole pixels.
    pub fn polar(&self, radius: i32, angle_deg: f32) -> (i32, i32) {
        offset(self.gauge_center(), radius as f32, angle_deg.to_radians())
    }

    /// Needle triangle: tip, then the two base corners either side of the center.
    pub fn needle(&self) -> [(i32, i32); 3] {
        let rad = NEEDLE_ANGLE_DEG.to_radians();
        let perp = rad + std::f32::consts::FRAC_PI_2;
        let (cx, cy) = self.gauge_center();
        let w = self.needle_width as f32;

        let tip = offset((cx, cy), self.needle_length as f32, rad);
        let base1 = offset((cx, cy), w, perp);
        let base2 = (
            cx - (w * perp.cos()) as i32,
            cy - (w * perp.sin()) as i32,
        );
        [tip, base1, base2]
    }
}

fn offset(origin: (i32, i32), length: f32, rad: f32) -> (i32, i32) {
    (
        origin.0 + (length * rad.cos()) as i32,
        origin.1 + (length * rad.sin()) as i32,
    )
}
