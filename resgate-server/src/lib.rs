//! Static host for the built funnel pages. The funnel itself is entirely
//! client-side (`resgate-web`); this binary only serves the compiled assets
//! and keeps an audit trail of requests.

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tracing::info;

pub struct Config {
    pub port: u16,
    pub dist_dir: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            port: env_or("RESGATE_PORT", "8080")
                .parse()
                .context("invalid RESGATE_PORT")?,
            dist_dir: env_or("RESGATE_DIST", "dist"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

pub fn app(dist_dir: &str) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(dist_dir).append_index_html_on_directories(true))
        .layer(axum::middleware::from_fn(
            |req: axum::extract::Request, next: axum::middleware::Next| async move {
                let method = req.method().clone();
                let uri = req.uri().clone();
                tracing::info!("REQ: {} {}", method, uri);
                let response = next.run(req).await;
                tracing::info!("RES: {} -> {}", uri, response.status());
                response
            },
        ))
}
