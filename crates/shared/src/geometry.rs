/// Viewport geometry.
///
/// Two coordinate systems are involved:
/// - map space: pixels of the full background image,
/// - view space: pixels of the square rendering surface.
///
/// The viewport offset is the map-space position of the visible window's
/// top-left corner. A window of `window` map units is stretched over a canvas
/// of `canvas_size` pixels, so `scale = canvas_size / window`.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Rect {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edges are inclusive on all four sides.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Upper clamp limits for the viewport offset. The lower limit is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(max_x: f64, max_y: f64) -> Self {
        Bounds {
            max_x: max_x.max(0.0),
            max_y: max_y.max(0.0),
        }
    }

    /// Largest offsets that keep a `window`-sized view inside a
    /// `map_width` x `map_height` image. A window bigger than the map on an
    /// axis pins that axis to 0.
    pub fn for_map(map_width: f64, map_height: f64, window: f64) -> Self {
        Bounds::new(map_width - window, map_height - window)
    }
}

/// View pixels per map unit.
pub fn scale_for(canvas_size: f64, window: f64) -> f64 {
    if window <= 0.0 {
        return 0.0;
    }
    canvas_size / window
}

/// Project a map-space point onto the view.
pub fn map_to_view(map_point: Point, viewport_offset: Point, scale: f64) -> Point {
    Point {
        x: (map_point.x - viewport_offset.x) * scale,
        y: (map_point.y - viewport_offset.y) * scale,
    }
}

/// Inverse of [`map_to_view`]. Returns `None` for a degenerate scale.
pub fn view_to_map(view_point: Point, viewport_offset: Point, scale: f64) -> Option<Point> {
    if scale <= 0.0 || !scale.is_finite() {
        return None;
    }
    Some(Point {
        x: view_point.x / scale + viewport_offset.x,
        y: view_point.y / scale + viewport_offset.y,
    })
}

/// Clamp each axis of `proposed` into `[0, bounds.max]`.
pub fn clamp_offset(proposed: Point, bounds: Bounds) -> Point {
    Point {
        x: proposed.x.min(bounds.max_x).max(0.0),
        y: proposed.y.min(bounds.max_y).max(0.0),
    }
}

/// Sensitivity at which the map moves exactly with the pointer.
pub fn follow_sensitivity(scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    1.0 / scale
}

/// Move the viewport by a screen-space pointer delta.
///
/// The delta is converted to map units with `sensitivity` (map units per
/// screen pixel) and subtracted: dragging right reveals content to the left.
/// When `sensitivity` is `None` the map follows the pointer at the current
/// `scale`.
pub fn apply_pan(
    current: Point,
    pointer_delta: Point,
    sensitivity: Option<f64>,
    scale: f64,
    bounds: Bounds,
) -> Point {
    let k = sensitivity.unwrap_or_else(|| follow_sensitivity(scale));
    let proposed = Point {
        x: current.x - pointer_delta.x * k,
        y: current.y - pointer_delta.y * k,
    };
    clamp_offset(proposed, bounds)
}
