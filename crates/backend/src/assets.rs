use pinmap_shared::pins::asset_path;
use pinmap_shared::WidgetConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "widget.json";

pub struct Assets {
    pub widget: WidgetConfig,
    /// Image files referenced by the config that are not on disk.
    pub missing: Vec<PathBuf>,
}

impl Assets {
    /// Read and validate `widget.json` from `assets_dir`.
    ///
    /// Images are looked up as `<assets_dir>/<name>.png`, the same files the
    /// browser requests as `asset/<name>.png`. Missing images are reported but
    /// do not fail the load; the widget simply never draws them.
    pub fn load(assets_dir: &Path) -> Result<Self, String> {
        let config_path = assets_dir.join(CONFIG_FILE);
        let data = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read {}: {}", config_path.display(), e))?;
        let widget = WidgetConfig::from_json(&data)
            .map_err(|e| format!("Invalid {}: {}", config_path.display(), e))?;

        let missing: Vec<PathBuf> = std::iter::once(widget.map.name.as_str())
            .chain(widget.pins.iter().map(|p| p.name.as_str()))
            .map(|name| image_file(assets_dir, name))
            .filter(|path| !path.is_file())
            .collect();

        for path in &missing {
            tracing::warn!(path = %path.display(), "Widget image missing");
        }
        tracing::info!(pins = widget.pins.len(), map = %widget.map.name, "Loaded widget config");

        Ok(Assets { widget, missing })
    }
}

/// Disk location of the image served for `asset/<name>.png`.
fn image_file(assets_dir: &Path, name: &str) -> PathBuf {
    let rel = asset_path(name);
    let file = rel.strip_prefix("asset/").unwrap_or(&rel);
    assets_dir.join(file)
}
