use pinmap_shared::Point;

/// Convert client (viewport) coordinates to canvas-relative pixel coordinates.
pub fn client_to_canvas(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Point {
    Point::new(client_x - rect_left, client_y - rect_top)
}

/// Get canvas-relative coordinates for a client position using web_sys.
pub fn client_to_element(client_x: f64, client_y: f64, element_id: &str) -> Option<Point> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(element_id)?;
    let rect = element.get_bounding_client_rect();
    Some(client_to_canvas(client_x, client_y, rect.left(), rect.top()))
}

/// Rendered width of an element, used to size a responsive canvas.
pub fn element_width(element_id: &str) -> Option<f64> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(element_id)?;
    Some(element.get_bounding_client_rect().width())
}

/// Canvas pixels are whole numbers; the widget must use the same value.
pub fn canvas_px(size: f64) -> f64 {
    if size.is_finite() {
        size.floor().max(0.0)
    } else {
        0.0
    }
}
