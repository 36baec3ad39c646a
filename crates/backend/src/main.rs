mod assets;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Json, Router};
use pinmap_shared::WidgetConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Server settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    assets_dir: PathBuf,
    dist_dir: PathBuf,
    port: u16,
}

impl Settings {
    fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let port = match lookup("PORT") {
            Some(p) => p.parse().map_err(|e| format!("Invalid PORT {:?}: {}", p, e))?,
            None => 3000,
        };
        Ok(Settings {
            assets_dir: PathBuf::from(lookup("ASSETS_DIR").unwrap_or_else(|| "assets".to_string())),
            dist_dir: PathBuf::from(lookup("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            port,
        })
    }
}

#[derive(Clone)]
struct AppState {
    widget: Arc<WidgetConfig>,
    dist_dir: Arc<PathBuf>,
}

async fn widget_config(State(state): State<AppState>) -> Json<WidgetConfig> {
    Json(state.widget.as_ref().clone())
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(widget: WidgetConfig, assets_dir: &Path, dist_dir: &Path) -> Router {
    // Map and pin images keep the `asset/<name>.png` URLs the widget expects
    let static_files = Router::new()
        .nest("/asset", cached_static_router(assets_dir, CACHE_1DAY))
        .nest("/dist", cached_static_router(dist_dir, CACHE_IMMUTABLE))
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let state = AppState {
        widget: Arc::new(widget),
        dist_dir: Arc::new(dist_dir.to_path_buf()),
    };

    Router::new()
        .route("/api/widget", get(widget_config))
        .route("/", get(serve_index))
        .with_state(state)
        .merge(static_files)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Bad server settings");
            std::process::exit(1);
        }
    };

    let loaded = match assets::Assets::load(&settings.assets_dir) {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(error = %e, "Could not load widget assets");
            std::process::exit(1);
        }
    };
    if !loaded.missing.is_empty() {
        tracing::warn!(count = loaded.missing.len(), "Some widget images are missing");
    }

    let app = build_app(loaded.widget, &settings.assets_dir, &settings.dist_dir);

    let addr = format!("0.0.0.0:{}", settings.port);
    tracing::info!("Server running at http://localhost:{}", settings.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server stopped");
    }
}

async fn serve_index(State(state): State<AppState>) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match std::fs::read_to_string(state.dist_dir.join("index.html")) {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Pin Map</title></head>
<body>
<h1>Pin Map</h1>
<p>Frontend not built yet. The widget configuration is at <a href="/api/widget">/api/widget</a>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}
