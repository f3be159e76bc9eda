mod draw;
pub(crate) mod gauge;

pub use gauge::{render_set, Canvas, RenderedIconSet};
