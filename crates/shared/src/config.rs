use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};
use crate::pins::{Pin, PinVariant};

/// Background image description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapImage {
    /// Asset name, resolved as `asset/<name>.png`.
    pub name: String,
    pub width: f64,
    pub height: f64,
}

/// How the square canvas picks its side length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum CanvasSizing {
    Fixed { size: f64 },
    /// Fraction of the available container width.
    Responsive { fraction: f64 },
}

impl CanvasSizing {
    pub fn resolve(&self, available_width: f64) -> f64 {
        match *self {
            CanvasSizing::Fixed { size } => size,
            CanvasSizing::Responsive { fraction } => (available_width * fraction).max(0.0),
        }
    }
}

/// Static configuration for one map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub map: MapImage,
    /// Side of the visible map window, in map pixels.
    pub window: f64,
    /// Map units moved per screen pixel dragged. Absent: follow the pointer.
    #[serde(default)]
    pub pan_sensitivity: Option<f64>,
    /// Explicit clamp maximum; derived from the map size when absent.
    #[serde(default)]
    pub pan_limit: Option<Bounds>,
    pub canvas: CanvasSizing,
    #[serde(default)]
    pub initial_offset: Point,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidMapSize { width: f64, height: f64 },
    InvalidWindow(f64),
    InvalidSensitivity(f64),
    InvalidCanvas(CanvasSizing),
    InvalidAssetName(String),
    DuplicatePin(String),
    InvalidPinSize { name: String, width: f64, height: f64 },
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidMapSize { width, height } => {
                write!(f, "map size must be positive, got {}x{}", width, height)
            }
            ConfigError::InvalidWindow(w) => write!(f, "visible window must be positive, got {}", w),
            ConfigError::InvalidSensitivity(s) => {
                write!(f, "pan sensitivity must be a positive number, got {}", s)
            }
            ConfigError::InvalidCanvas(c) => write!(f, "invalid canvas sizing: {:?}", c),
            ConfigError::InvalidAssetName(n) => write!(f, "invalid asset name {:?}", n),
            ConfigError::DuplicatePin(n) => write!(f, "duplicate pin name {:?}", n),
            ConfigError::InvalidPinSize { name, width, height } => {
                write!(f, "pin {:?} has invalid size {}x{}", name, width, height)
            }
            ConfigError::Parse(e) => write!(f, "failed to parse widget config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Asset names become a single URL path segment.
fn valid_asset_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WidgetConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.map.width) || !positive(self.map.height) {
            return Err(ConfigError::InvalidMapSize {
                width: self.map.width,
                height: self.map.height,
            });
        }
        if !valid_asset_name(&self.map.name) {
            return Err(ConfigError::InvalidAssetName(self.map.name.clone()));
        }
        if !positive(self.window) {
            return Err(ConfigError::InvalidWindow(self.window));
        }
        if let Some(s) = self.pan_sensitivity {
            if !positive(s) {
                return Err(ConfigError::InvalidSensitivity(s));
            }
        }
        let canvas_ok = match self.canvas {
            CanvasSizing::Fixed { size } => positive(size),
            CanvasSizing::Responsive { fraction } => positive(fraction) && fraction <= 1.0,
        };
        if !canvas_ok {
            return Err(ConfigError::InvalidCanvas(self.canvas));
        }

        let mut seen = std::collections::HashSet::new();
        for pin in &self.pins {
            if !valid_asset_name(&pin.name) || pin.name == self.map.name {
                return Err(ConfigError::InvalidAssetName(pin.name.clone()));
            }
            if !seen.insert(pin.name.as_str()) {
                return Err(ConfigError::DuplicatePin(pin.name.clone()));
            }
            if !positive(pin.width) || !positive(pin.height) {
                return Err(ConfigError::InvalidPinSize {
                    name: pin.name.clone(),
                    width: pin.width,
                    height: pin.height,
                });
            }
        }
        Ok(())
    }

    /// Clamp limits for the viewport offset.
    pub fn bounds(&self) -> Bounds {
        match self.pan_limit {
            Some(limit) => Bounds::new(limit.max_x, limit.max_y),
            None => Bounds::for_map(self.map.width, self.map.height, self.window),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let pin = |name: &str, x, y, width, height, variant| Pin {
            name: name.to_string(),
            x,
            y,
            width,
            height,
            variant,
        };
        WidgetConfig {
            map: MapImage {
                name: "map".to_string(),
                width: 2336.0,
                height: 2481.0,
            },
            window: 1000.0,
            pan_sensitivity: Some(2.5),
            pan_limit: None,
            canvas: CanvasSizing::Responsive { fraction: 0.8 },
            initial_offset: Point::ORIGIN,
            pins: vec![
                pin("popup", 830.0, 400.0, 100.0, 100.0, PinVariant::CustomPin),
                pin("a1", 200.0, 1090.0, 80.0, 50.0, PinVariant::BothPin),
                pin("a2", 300.0, 1090.0, 80.0, 50.0, PinVariant::BothPin),
            ],
        }
    }
}
