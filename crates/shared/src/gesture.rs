use crate::geometry::Point;

/// Movement below this (screen pixels from the press point) is a click.
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold, larger than mouse because touch is less precise.
pub const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    pub fn drag_threshold(self) -> f64 {
        match self {
            PointerKind::Mouse => DRAG_THRESHOLD,
            PointerKind::Touch => TOUCH_DRAG_THRESHOLD,
        }
    }
}

/// How a finished gesture should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// Stationary press and release at this screen position.
    Tap(Point),
    /// The pointer travelled past the drag threshold.
    Drag,
    /// No gesture was in progress.
    Idle,
}

/// Transient state of a single-pointer pan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanGesture {
    active: Option<ActiveGesture>,
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveGesture {
    kind: PointerKind,
    start: Point,
    last: Point,
    dragged: bool,
}

impl PanGesture {
    pub fn is_panning(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, pos: Point, kind: PointerKind) {
        self.active = Some(ActiveGesture {
            kind,
            start: pos,
            last: pos,
            dragged: false,
        });
    }

    /// Record a new pointer position and return the delta from the previous
    /// one, or `None` when no gesture is active.
    pub fn advance(&mut self, pos: Point) -> Option<Point> {
        let g = self.active.as_mut()?;
        let delta = Point::new(pos.x - g.last.x, pos.y - g.last.y);
        g.last = pos;
        if !g.dragged && g.start.distance(pos) > g.kind.drag_threshold() {
            g.dragged = true;
        }
        Some(delta)
    }

    pub fn finish(&mut self) -> GestureEnd {
        match self.active.take() {
            Some(g) if g.dragged => GestureEnd::Drag,
            Some(g) => GestureEnd::Tap(g.last),
            None => GestureEnd::Idle,
        }
    }

    /// Drop the gesture without producing a tap.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
