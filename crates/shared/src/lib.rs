pub mod config;
pub mod geometry;
pub mod gesture;
pub mod pins;
pub mod render;
pub mod widget;

pub use config::{CanvasSizing, ConfigError, MapImage, WidgetConfig};
pub use geometry::{Bounds, Point, Rect};
pub use pins::{Pin, PinVariant};
pub use widget::{MapWidget, ViewportState};
