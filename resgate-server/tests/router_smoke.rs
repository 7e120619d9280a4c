use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_route_responds() -> Result<(), Box<dyn std::error::Error>> {
    let app = resgate_server::app("dist");

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(&body[..], b"OK");
    Ok(())
}

#[tokio::test]
async fn test_fallback_serves_funnel_assets() -> Result<(), Box<dyn std::error::Error>> {
    let dist = std::env::temp_dir().join("resgate-router-smoke");
    std::fs::create_dir_all(&dist)?;
    std::fs::write(
        dist.join("index.html"),
        "<!DOCTYPE html><title>Resgate</title>",
    )?;

    let app = resgate_server::app(dist.to_str().expect("temp path is valid utf-8"));

    // "/" falls through to ServeDir and picks up index.html
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    assert!(std::str::from_utf8(&body)?.contains("Resgate"));

    let missing = app
        .oneshot(Request::builder().uri("/nao-existe.js").body(Body::empty())?)
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    Ok(())
}
