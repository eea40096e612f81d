use axum::body::Body;
use axum::http::{Request, StatusCode};
use callbridge_server::{Config, build_router, spawn_switchboard};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check_reports_running() {
    let config = Config::default();
    let app = build_router(&config, spawn_switchboard(config.command_buffer)).expect("router");

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"Running");
}

#[tokio::test]
async fn test_invalid_origin_is_rejected() {
    let config = Config {
        allowed_origin: "not a\nheader".to_string(),
        ..Config::default()
    };
    assert!(build_router(&config, spawn_switchboard(config.command_buffer)).is_err());
}
