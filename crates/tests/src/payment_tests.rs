use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::razorpay::sign_payment;
use server::repo::MemoryStore;

use crate::common;

#[tokio::test]
async fn valid_signature_is_accepted() {
    let caller = common::profile(shared_types::UserRole::Customer, Default::default());
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new());
    let signature = sign_payment(common::RAZORPAY_SECRET, "order_1", "pay_1").unwrap();

    let (status, body) = common::post_json(
        &app,
        "/api/payments/verify",
        &json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": signature,
        }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "order_id": "order_1", "payment_id": "pay_1" })
    );
}

#[tokio::test]
async fn tampered_signature_is_rejected() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new());
    let signature = sign_payment(common::RAZORPAY_SECRET, "order_1", "pay_1").unwrap();

    let (status, body) = common::post_json(
        &app,
        "/api/payments/verify",
        &json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_2",
            "razorpay_signature": signature,
        }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_message(&body), "Invalid payment signature");
}

#[tokio::test]
async fn verification_requires_authentication() {
    let (app, _store) = common::test_app(MemoryStore::new());

    let (status, body) = common::post_json(
        &app,
        "/api/payments/verify",
        &json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "00",
        }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn missing_secret_is_a_server_error() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let mut settings = common::settings();
    settings.razorpay_key_secret = None;
    let (app, _store) = common::test_app_with(MemoryStore::new(), settings);

    let (status, body) = common::post_json(
        &app,
        "/api/payments/verify",
        &json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "00",
        }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::error_message(&body),
        "Payment verification is not configured"
    );
}

#[tokio::test]
async fn empty_fields_fail_validation() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new());

    let (status, body) = common::post_json(
        &app,
        "/api/payments/verify",
        &json!({
            "razorpay_order_id": "",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "00",
        }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["razorpay_order_id"], "Order id is required");
}
