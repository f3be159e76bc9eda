mod pack;

pub use pack::{export_frames, pack};
