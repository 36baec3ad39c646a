use crate::config::WidgetConfig;
use crate::geometry::{apply_pan, clamp_offset, map_to_view, scale_for, Bounds, Point, Rect};
use crate::gesture::{GestureEnd, PanGesture, PointerKind};
use crate::pins::{hit_test, visible_pins, Pin};
use crate::render::{AssetSet, AssetSlot, FrameOutcome, Surface};

/// The map-space top-left corner of the visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub offset: Point,
}

/// One map widget instance: configuration plus the mutable view state.
///
/// Pointer handlers return whether a redraw is needed; the host owns the
/// surface and performs the draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MapWidget {
    config: WidgetConfig,
    bounds: Bounds,
    canvas_size: f64,
    viewport: ViewportState,
    gesture: PanGesture,
}

impl MapWidget {
    pub fn new(config: WidgetConfig, canvas_size: f64) -> Self {
        let bounds = config.bounds();
        let offset = clamp_offset(config.initial_offset, bounds);
        MapWidget {
            config,
            bounds,
            canvas_size: canvas_size.max(0.0),
            viewport: ViewportState { offset },
            gesture: PanGesture::default(),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn offset(&self) -> Point {
        self.viewport.offset
    }

    pub fn canvas_size(&self) -> f64 {
        self.canvas_size
    }

    pub fn scale(&self) -> f64 {
        scale_for(self.canvas_size, self.config.window)
    }

    pub fn is_panning(&self) -> bool {
        self.gesture.is_panning()
    }

    /// Returns true when the size actually changed.
    pub fn set_canvas_size(&mut self, size: f64) -> bool {
        let size = size.max(0.0);
        if (size - self.canvas_size).abs() < f64::EPSILON {
            return false;
        }
        self.canvas_size = size;
        self.viewport.offset = clamp_offset(self.viewport.offset, self.bounds);
        true
    }

    pub fn pointer_down(&mut self, pos: Point, kind: PointerKind) {
        self.gesture.begin(pos, kind);
    }

    /// Pan by the movement since the last pointer event. Returns true when the
    /// offset changed.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        let Some(delta) = self.gesture.advance(pos) else {
            return false;
        };
        let next = apply_pan(
            self.viewport.offset,
            delta,
            self.config.pan_sensitivity,
            self.scale(),
            self.bounds,
        );
        if next == self.viewport.offset {
            return false;
        }
        self.viewport.offset = next;
        true
    }

    /// End the gesture. A stationary press/release is a tap and is hit-tested
    /// against the pins; a drag never selects a pin.
    pub fn pointer_up(&mut self) -> Option<&Pin> {
        match self.gesture.finish() {
            GestureEnd::Tap(pos) => self.pin_at(pos),
            GestureEnd::Drag | GestureEnd::Idle => None,
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.gesture.cancel();
    }

    /// Hit-test a view-space position against the pins.
    pub fn pin_at(&self, pos: Point) -> Option<&Pin> {
        let hit = hit_test(pos, &self.config.pins, self.viewport.offset, self.scale());
        if let Some(pin) = hit {
            tracing::debug!(pin = %pin.name, x = pos.x, y = pos.y, "Pin selected");
        }
        hit
    }

    /// Draw the current view at the widget's canvas size, the same size used
    /// for hit-testing. Nothing is drawn until the background is ready; pins
    /// whose image is missing are skipped and counted.
    pub fn render<S: Surface>(&self, surface: &mut S, assets: &AssetSet<S::Image>) -> FrameOutcome {
        let map = match assets.map() {
            AssetSlot::Ready(map) => map,
            AssetSlot::Pending => {
                tracing::trace!("Map image not ready, deferring frame");
                return FrameOutcome::Deferred;
            }
            AssetSlot::Failed(reason) => {
                return FrameOutcome::MapUnavailable(reason.clone());
            }
        };

        let size = self.canvas_size;
        let scale = self.scale();
        let offset = self.viewport.offset;

        surface.clear();
        surface.draw_region(
            map,
            Rect {
                x: offset.x,
                y: offset.y,
                width: self.config.window,
                height: self.config.window,
            },
            Rect {
                x: 0.0,
                y: 0.0,
                width: size,
                height: size,
            },
        );

        let mut pins_drawn = 0;
        let mut pins_pending = 0;
        let mut pins_failed = 0;
        for pin in visible_pins(&self.config.pins, offset, scale, size) {
            match assets.pin(&pin.name) {
                Some(AssetSlot::Ready(image)) => {
                    let center = map_to_view(pin.center(), offset, scale);
                    surface.draw_image(image, Rect::centered(center, pin.width, pin.height));
                    pins_drawn += 1;
                }
                Some(AssetSlot::Failed(_)) => pins_failed += 1,
                Some(AssetSlot::Pending) | None => pins_pending += 1,
            }
        }
        FrameOutcome::Drawn {
            pins_drawn,
            pins_pending,
            pins_failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasSizing;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Region(&'static str, Rect, Rect),
        Image(&'static str, Rect),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        type Image = &'static str;

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn draw_region(&mut self, image: &Self::Image, src: Rect, dst: Rect) {
            self.ops.push(Op::Region(image, src, dst));
        }

        fn draw_image(&mut self, image: &Self::Image, dst: Rect) {
            self.ops.push(Op::Image(image, dst));
        }
    }

    /// Canvas 500 over a 1000 window, sensitivity 0.8, limit 1300x1450.
    fn widget() -> MapWidget {
        let config = WidgetConfig {
            pan_sensitivity: Some(0.8),
            pan_limit: Some(Bounds::new(1300.0, 1450.0)),
            canvas: CanvasSizing::Fixed { size: 500.0 },
            ..WidgetConfig::default()
        };
        MapWidget::new(config, 500.0)
    }

    fn all_ready() -> AssetSet<&'static str> {
        let mut set = AssetSet::pending(["popup", "a1", "a2"]);
        set.set_map(AssetSlot::Ready("map"));
        set.set_pin("popup", AssetSlot::Ready("popup"));
        set.set_pin("a1", AssetSlot::Ready("a1"));
        set.set_pin("a2", AssetSlot::Ready("a2"));
        set
    }

    #[test]
    fn test_initial_offset_is_clamped() {
        let config = WidgetConfig {
            initial_offset: Point::new(-50.0, 99999.0),
            ..WidgetConfig::default()
        };
        let w = MapWidget::new(config, 800.0);
        assert_eq!(w.offset(), Point::new(0.0, 1481.0));
    }

    #[test]
    fn test_scale() {
        assert!((widget().scale() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pan_sensitivity_scenario() {
        let mut w = widget();
        w.pointer_down(Point::new(0.0, 0.0), PointerKind::Mouse);
        // drag left by 150px: offset.x 0 -> 120
        assert!(w.pointer_move(Point::new(-150.0, 0.0)));
        assert!((w.offset().x - 120.0).abs() < 1e-9);
        // drag right by 100px: offset.x 120 -> 40
        assert!(w.pointer_move(Point::new(-50.0, 0.0)));
        assert!((w.offset().x - 40.0).abs() < 1e-9);
        assert_eq!(w.offset().y, 0.0);
    }

    #[test]
    fn test_pan_clamped_to_limit() {
        let mut w = widget();
        w.pointer_down(Point::new(0.0, 0.0), PointerKind::Mouse);
        w.pointer_move(Point::new(-5000.0, -5000.0));
        assert_eq!(w.offset(), Point::new(1300.0, 1450.0));
        // already at the limit: no change, no redraw
        assert!(!w.pointer_move(Point::new(-5100.0, -5100.0)));
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut w = widget();
        assert!(!w.pointer_move(Point::new(300.0, 300.0)));
        assert_eq!(w.offset(), Point::ORIGIN);
    }

    #[test]
    fn test_zero_delta_move_keeps_offset() {
        let mut w = widget();
        w.pointer_down(Point::new(10.0, 10.0), PointerKind::Mouse);
        assert!(!w.pointer_move(Point::new(10.0, 10.0)));
        assert_eq!(w.offset(), Point::ORIGIN);
    }

    #[test]
    fn test_tap_selects_pin() {
        let mut w = widget();
        w.pointer_down(Point::new(415.0, 200.0), PointerKind::Mouse);
        let hit = w.pointer_up().map(|p| p.name.clone());
        assert_eq!(hit.as_deref(), Some("popup"));
        assert!(!w.is_panning());
    }

    #[test]
    fn test_tap_on_empty_map() {
        let mut w = widget();
        w.pointer_down(Point::new(0.0, 0.0), PointerKind::Touch);
        assert!(w.pointer_up().is_none());
    }

    #[test]
    fn test_drag_ending_on_pin_does_not_select() {
        let mut w = widget();
        w.pointer_down(Point::new(300.0, 300.0), PointerKind::Mouse);
        w.pointer_move(Point::new(415.0, 200.0));
        assert!(w.pointer_up().is_none());
    }

    #[test]
    fn test_cancel_ends_panning() {
        let mut w = widget();
        w.pointer_down(Point::new(100.0, 100.0), PointerKind::Touch);
        w.pointer_cancel();
        assert!(!w.is_panning());
        assert!(w.pointer_up().is_none());
        assert!(!w.pointer_move(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_pin_at_follows_pan() {
        let mut w = widget();
        w.pointer_down(Point::new(0.0, 0.0), PointerKind::Mouse);
        // offset -> (0, 480): a1 at (200,1090) is now at view (100, 305)
        w.pointer_move(Point::new(0.0, -600.0));
        w.pointer_up();
        assert_eq!(w.pin_at(Point::new(100.0, 305.0)).map(|p| p.name.as_str()), Some("a1"));
        assert!(w.pin_at(Point::new(415.0, 200.0)).is_none());
    }

    #[test]
    fn test_set_canvas_size_rescales() {
        let mut w = widget();
        assert!(w.set_canvas_size(1000.0));
        assert!(!w.set_canvas_size(1000.0));
        assert!((w.scale() - 1.0).abs() < 1e-12);
        assert_eq!(w.pin_at(Point::new(830.0, 400.0)).map(|p| p.name.as_str()), Some("popup"));
    }

    #[test]
    fn test_render_deferred_until_map_ready() {
        let w = widget();
        let mut surface = RecordingSurface::default();
        let assets: AssetSet<&'static str> = AssetSet::pending(["popup", "a1", "a2"]);
        assert_eq!(w.render(&mut surface, &assets), FrameOutcome::Deferred);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_render_draws_window_and_visible_pins() {
        let w = widget();
        let mut surface = RecordingSurface::default();
        let outcome = w.render(&mut surface, &all_ready());
        assert_eq!(
            outcome,
            FrameOutcome::Drawn {
                pins_drawn: 1,
                pins_pending: 0,
                pins_failed: 0,
            }
        );
        assert_eq!(
            surface.ops,
            vec![
                Op::Clear,
                Op::Region(
                    "map",
                    Rect { x: 0.0, y: 0.0, width: 1000.0, height: 1000.0 },
                    Rect { x: 0.0, y: 0.0, width: 500.0, height: 500.0 },
                ),
                Op::Image(
                    "popup",
                    Rect { x: 365.0, y: 150.0, width: 100.0, height: 100.0 }
                ),
            ]
        );
    }

    #[test]
    fn test_render_skips_pending_pins() {
        let mut w = widget();
        w.pointer_down(Point::new(0.0, 0.0), PointerKind::Mouse);
        w.pointer_move(Point::new(0.0, -600.0));
        let mut assets = all_ready();
        assets.set_pin("a2", AssetSlot::Pending);
        let mut surface = RecordingSurface::default();
        let outcome = w.render(&mut surface, &assets);
        assert_eq!(
            outcome,
            FrameOutcome::Drawn {
                pins_drawn: 1,
                pins_pending: 1,
                pins_failed: 0,
            }
        );
    }

    #[test]
    fn test_deferred_frame_replays_once_map_loads() {
        let w = widget();
        let mut assets = all_ready();
        assets.set_map(AssetSlot::Pending);
        let mut surface = RecordingSurface::default();
        assert_eq!(w.render(&mut surface, &assets), FrameOutcome::Deferred);
        assert!(surface.ops.is_empty());

        assets.set_map(AssetSlot::Ready("map"));
        let outcome = w.render(&mut surface, &assets);
        assert_eq!(
            outcome,
            FrameOutcome::Drawn {
                pins_drawn: 1,
                pins_pending: 0,
                pins_failed: 0,
            }
        );
        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(surface.ops.len(), 3);
    }

    #[test]
    fn test_failed_map_is_reported() {
        let w = widget();
        let mut assets = all_ready();
        assets.set_map(AssetSlot::Failed("404".to_string()));
        let mut surface = RecordingSurface::default();
        assert_eq!(
            w.render(&mut surface, &assets),
            FrameOutcome::MapUnavailable("404".to_string())
        );
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_failed_pin_counted_separately() {
        let w = widget();
        let mut assets = all_ready();
        assets.set_pin("popup", AssetSlot::Failed("404".to_string()));
        let mut surface = RecordingSurface::default();
        assert_eq!(
            w.render(&mut surface, &assets),
            FrameOutcome::Drawn {
                pins_drawn: 0,
                pins_pending: 0,
                pins_failed: 1,
            }
        );
        // the map is still drawn, the failed pin is not
        assert_eq!(surface.ops.len(), 2);
    }

    #[test]
    fn test_render_follows_widget_size() {
        let mut w = widget();
        w.set_canvas_size(250.0);
        let mut surface = RecordingSurface::default();
        w.render(&mut surface, &all_ready());
        // popup center (830,400) at scale 0.25 lands on (207.5, 100)
        assert_eq!(
            surface.ops[1],
            Op::Region(
                "map",
                Rect { x: 0.0, y: 0.0, width: 1000.0, height: 1000.0 },
                Rect { x: 0.0, y: 0.0, width: 250.0, height: 250.0 },
            )
        );
        assert_eq!(
            surface.ops[2],
            Op::Image(
                "popup",
                Rect { x: 157.5, y: 50.0, width: 100.0, height: 100.0 }
            )
        );
        assert_eq!(w.pin_at(Point::new(207.5, 100.0)).map(|p| p.name.as_str()), Some("popup"));
    }
}
