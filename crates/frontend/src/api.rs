use pinmap_shared::WidgetConfig;

/// Build the widget configuration URL for a page origin.
pub fn config_url(origin: &str) -> String {
    format!("{}/api/widget", origin.trim_end_matches('/'))
}

fn origin() -> Result<String, String> {
    // In production, same origin as the page.
    let window = web_sys::window().ok_or_else(|| "No window".to_string())?;
    window
        .location()
        .origin()
        .map_err(|e| format!("No page origin: {:?}", e))
}

/// Fetch and validate the widget configuration from the host.
pub async fn fetch_config() -> Result<WidgetConfig, String> {
    let resp = reqwest::get(config_url(&origin()?))
        .await
        .map_err(|e| e.to_string())?;

    if !resp.status().is_success() {
        return Err(format!("Widget config request failed: {}", resp.status()));
    }

    let config: WidgetConfig = resp.json().await.map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
