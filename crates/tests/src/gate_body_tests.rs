use axum::body::Body;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use server::repo::MemoryStore;

use crate::common;

const WASHER_ASSIGN: &str = "/api/assignments/washer-wash-area";

#[tokio::test]
async fn over_limit_body_is_rejected_as_too_large() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let mut settings = common::settings();
    settings.max_body_bytes = 256;
    let (app, _store) = common::test_app_with(MemoryStore::new().with_profile(caller), settings);

    let body = format!(r#"{{"wash_area_id":"{}"}}"#, "a".repeat(1024));
    let (status, body) =
        common::json_request(&app, "POST", WASHER_ASSIGN, Body::from(body), Some(&token)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["kind"], "PayloadTooLarge");
    assert_eq!(common::error_message(&body), "Request body too large");
}

#[tokio::test]
async fn unreadable_body_is_a_failed_permission_check() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let chunks = futures::stream::iter(vec![
        Ok::<_, std::io::Error>(b"{\"wash_area_id\":".to_vec()),
        Err(std::io::Error::other("connection reset")),
    ]);
    let (status, body) = common::json_request(
        &app,
        "POST",
        WASHER_ASSIGN,
        Body::from_stream(chunks),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "error": "Permission check failed",
            "kind": "InternalError",
        })
    );
}
