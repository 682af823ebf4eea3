pub mod bounds;
pub mod cursor_track;
pub mod easing;
pub mod segments;
pub mod transform;
pub mod zoom_engine;
