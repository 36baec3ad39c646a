pub mod map_canvas;
pub mod pin_notice;
