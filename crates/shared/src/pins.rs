use serde::{Deserialize, Serialize};

use crate::geometry::{map_to_view, Point, Rect};

/// Which image family a pin is drawn with. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinVariant {
    CustomPin,
    BothPin,
}

impl std::fmt::Display for PinVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinVariant::CustomPin => write!(f, "customPin"),
            PinVariant::BothPin => write!(f, "bothPin"),
        }
    }
}

/// A fixed point of interest on the map.
///
/// `x`/`y` is the pin's center in map space. `width`/`height` are on-screen
/// pixels and do not follow the map scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "type")]
    pub variant: PinVariant,
}

impl Pin {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Relative URL of the pin's image.
    pub fn asset_path(&self) -> String {
        asset_path(&self.name)
    }
}

/// Image location convention shared by the map and its pins.
pub fn asset_path(name: &str) -> String {
    format!("asset/{}.png", name)
}

/// The pin's clickable box in view space.
pub fn pin_view_bounds(pin: &Pin, viewport_offset: Point, scale: f64) -> Rect {
    let center = map_to_view(pin.center(), viewport_offset, scale);
    Rect::centered(center, pin.width, pin.height)
}

/// Whether the pin's center lands on a `canvas_size` x `canvas_size` view.
pub fn is_pin_visible(pin: &Pin, viewport_offset: Point, scale: f64, canvas_size: f64) -> bool {
    let c = map_to_view(pin.center(), viewport_offset, scale);
    c.x >= 0.0 && c.x <= canvas_size && c.y >= 0.0 && c.y <= canvas_size
}

/// Pins that would be drawn for the current view, in declaration order.
pub fn visible_pins<'a>(
    pins: &'a [Pin],
    viewport_offset: Point,
    scale: f64,
    canvas_size: f64,
) -> impl Iterator<Item = &'a Pin> + 'a {
    pins.iter()
        .filter(move |p| is_pin_visible(p, viewport_offset, scale, canvas_size))
}

/// First pin, in declaration order, whose view box contains `pointer`.
///
/// Off-screen pins are tested too; their boxes cannot contain an on-screen
/// pointer unless they overhang the edge.
pub fn hit_test<'a>(
    pointer: Point,
    pins: &'a [Pin],
    viewport_offset: Point,
    scale: f64,
) -> Option<&'a Pin> {
    pins.iter()
        .find(|pin| pin_view_bounds(pin, viewport_offset, scale).contains(pointer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(name: &str, x: f64, y: f64, w: f64, h: f64) -> Pin {
        Pin {
            name: name.to_string(),
            x,
            y,
            width: w,
            height: h,
            variant: PinVariant::BothPin,
        }
    }

    fn scenario_pins() -> Vec<Pin> {
        vec![
            pin("popup", 830.0, 400.0, 100.0, 100.0),
            pin("a1", 200.0, 1090.0, 80.0, 50.0),
        ]
    }

    #[test]
    fn test_pin_view_bounds_not_scaled() {
        let p = pin("popup", 830.0, 400.0, 100.0, 100.0);
        let r = pin_view_bounds(&p, Point::ORIGIN, 0.5);
        assert!((r.x - 365.0).abs() < 1e-9);
        assert!((r.y - 150.0).abs() < 1e-9);
        assert_eq!(r.width, 100.0);
        assert_eq!(r.height, 100.0);
    }

    #[test]
    fn test_hit_test_scenario() {
        let pins = scenario_pins();
        let hit = hit_test(Point::new(415.0, 200.0), &pins, Point::ORIGIN, 0.5);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("popup"));
        assert!(hit_test(Point::new(0.0, 0.0), &pins, Point::ORIGIN, 0.5).is_none());
    }

    #[test]
    fn test_hit_test_second_pin() {
        let pins = scenario_pins();
        // a1 at (200,1090) -> view (100,545), box 80x50
        let hit = hit_test(Point::new(130.0, 560.0), &pins, Point::ORIGIN, 0.5);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("a1"));
        assert!(hit_test(Point::new(141.0, 545.0), &pins, Point::ORIGIN, 0.5).is_none());
    }

    #[test]
    fn test_hit_test_overlap_first_declared_wins() {
        let pins = vec![
            pin("first", 200.0, 1090.0, 80.0, 50.0),
            pin("second", 300.0, 1090.0, 80.0, 50.0),
        ];
        // at scale 0.5 the views are (100,545) and (150,545): boxes overlap on x in [110,140]
        for _ in 0..3 {
            let hit = hit_test(Point::new(125.0, 545.0), &pins, Point::ORIGIN, 0.5);
            assert_eq!(hit.map(|p| p.name.as_str()), Some("first"));
        }
        let reversed: Vec<Pin> = pins.iter().rev().cloned().collect();
        let hit = hit_test(Point::new(125.0, 545.0), &reversed, Point::ORIGIN, 0.5);
        assert_eq!(hit.map(|p| p.name.as_str()), Some("second"));
    }

    #[test]
    fn test_hit_test_empty_pins() {
        assert!(hit_test(Point::new(10.0, 10.0), &[], Point::ORIGIN, 1.0).is_none());
    }

    #[test]
    fn test_hit_test_follows_viewport_offset() {
        let pins = scenario_pins();
        let offset = Point::new(630.0, 200.0);
        // popup -> view (100,100) at scale 0.5
        assert!(hit_test(Point::new(100.0, 100.0), &pins, offset, 0.5).is_some());
        assert!(hit_test(Point::new(415.0, 200.0), &pins, offset, 0.5).is_none());
    }

    #[test]
    fn test_visibility() {
        let pins = scenario_pins();
        let shown: Vec<&str> = visible_pins(&pins, Point::ORIGIN, 0.5, 500.0)
            .map(|p| p.name.as_str())
            .collect();
        // a1 lands at y=545, below a 500px canvas
        assert_eq!(shown, vec!["popup"]);

        let shown: Vec<&str> = visible_pins(&pins, Point::new(0.0, 600.0), 0.5, 500.0)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(shown, vec!["a1"]);
    }

    #[test]
    fn test_asset_path() {
        assert_eq!(pin("a2", 0.0, 0.0, 1.0, 1.0).asset_path(), "asset/a2.png");
        assert_eq!(asset_path("map"), "asset/map.png");
    }

    #[test]
    fn test_pin_json_shape() {
        let json = r#"{"name":"popup","x":830,"y":400,"width":100,"height":100,"type":"customPin"}"#;
        let p: Pin = serde_json::from_str(json).unwrap();
        assert_eq!(p.variant, PinVariant::CustomPin);
        assert_eq!(p.variant.to_string(), "customPin");
        assert_eq!(p.center(), Point::new(830.0, 400.0));
    }
}
