use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use server::repo::MemoryStore;
use shared_types::UserRole;

use crate::common;

#[tokio::test]
async fn request_without_city_passes_through_to_handler() {
    let (app, _store) = common::test_app(MemoryStore::new());
    // No token and no city: the gate lets it through, the handler's own
    // query extractor rejects the missing parameter.
    let (status, _body) = common::get(&app, "/api/regions/talukas", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_without_city_works_for_any_role() {
    let customer = common::profile(UserRole::Customer, Default::default());
    let token = common::token_for(&customer);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(customer));

    let (status, body) = common::get(&app, "/api/wash-areas", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn sub_admin_is_denied_unassigned_city() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) =
        common::get(&app, "/api/regions/talukas?city=Rajkot", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(common::error_message(&body), "Access denied to city: Rajkot");
}

#[tokio::test]
async fn sub_admin_reaches_assigned_city_in_any_spelling() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) = common::get(
        &app,
        "/api/regions/talukas?city=ahmedabad%20(City)",
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "ahmedabad");
    assert_eq!(body["talukas"], serde_json::json!(["Daskroi", "Sanand", "Dholka"]));
}

#[tokio::test]
async fn admin_reaches_every_city() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) =
        common::get(&app, "/api/regions/talukas?city=Rajkot", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["talukas"][0], "Gondal");

    let (status, body) =
        common::get(&app, "/api/regions/talukas?city=Kutch", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(common::error_message(&body), "Unknown city: Kutch");
}

#[tokio::test]
async fn general_role_maps_to_admin_tier() {
    let caller = common::profile(UserRole::General, Default::default());
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, _body) =
        common::get(&app, "/api/regions/talukas?city=Surat", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn hr_is_denied_city_level_access() {
    let caller = common::hr(&["Daskroi"]);
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) =
        common::get(&app, "/api/regions/talukas?city=Ahmedabad", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(common::error_message(&body).contains("Ahmedabad"));
}

#[tokio::test]
async fn missing_token_cannot_be_verified() {
    let (app, _store) = common::test_app(MemoryStore::new());
    let (status, body) = common::get(&app, "/api/regions/talukas?city=Surat", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(common::error_message(&body), "Cannot verify user permissions");
}

#[tokio::test]
async fn invalid_token_cannot_be_verified() {
    let (app, _store) = common::test_app(MemoryStore::new());
    let (status, body) =
        common::get(&app, "/api/regions/talukas?city=Surat", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(common::error_message(&body), "Cannot verify user permissions");
}

#[tokio::test]
async fn unknown_profile_cannot_be_verified() {
    let stranger = common::admin();
    let token = common::token_for(&stranger);
    let (app, _store) = common::test_app(MemoryStore::new());

    let (status, body) =
        common::get(&app, "/api/regions/talukas?city=Surat", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(common::error_message(&body), "Cannot verify user permissions");
}

#[tokio::test]
async fn store_outage_fails_closed() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let (app, store) = common::test_app(MemoryStore::new().with_profile(caller));
    store.set_unavailable(true);

    let (status, body) =
        common::get(&app, "/api/regions/talukas?city=Surat", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(common::error_message(&body), "Cannot verify user permissions");
}

#[tokio::test]
async fn allowed_body_city_does_not_clear_forbidden_query_city() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) = common::json_request(
        &app,
        "GET",
        "/api/regions/talukas?city=Rajkot",
        axum::body::Body::from(r#"{"city":"Ahmedabad"}"#),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(common::error_message(&body), "Access denied to city: Rajkot");
}

#[tokio::test]
async fn array_city_in_body_is_denied() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) = common::json_request(
        &app,
        "GET",
        "/api/regions/talukas?city=Ahmedabad",
        axum::body::Body::from(r#"{"city":["Rajkot"]}"#),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        common::error_message(&body),
        r#"Access denied to city: ["Rajkot"]"#
    );
}
