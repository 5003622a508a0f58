use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use server::repo::{MemoryStore, ProfileStore};
use uuid::Uuid;

use crate::common;

// ---------------------------------------------------------------------------
// Sub-admin -> HR
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validate_accepts_taluka_under_assigned_city() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let target = common::hr(&[]);
    let token = common::token_for(&caller);
    let body = json!({ "hr_id": target.user_id, "talukas": ["Sanand"] });
    let (app, _store) =
        common::test_app(MemoryStore::new().with_profile(caller).with_profile(target));

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas/validate",
        &body,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true }));
}

#[tokio::test]
async fn validate_rejects_taluka_outside_assigned_cities() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let token = common::token_for(&caller);
    let body = json!({ "hr_id": Uuid::new_v4(), "talukas": ["Bardoli"] });
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas/validate",
        &body,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert!(body["error"].as_str().unwrap().contains("Bardoli"));
}

#[tokio::test]
async fn assign_replaces_hr_talukas() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let target = common::hr(&["Gondal"]);
    let hr_id = target.user_id;
    let token = common::token_for(&caller);
    let (app, store) =
        common::test_app(MemoryStore::new().with_profile(caller).with_profile(target));

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas",
        &json!({ "hr_id": hr_id, "talukas": ["Sanand", "dholka"] }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_talukas"], json!(["Sanand", "dholka"]));

    let stored = store.fetch_permissions(hr_id).await.unwrap().unwrap();
    assert_eq!(stored.scope.assigned_talukas.len(), 2);
}

#[tokio::test]
async fn assign_outside_scope_is_a_validation_error() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let target = common::hr(&[]);
    let hr_id = target.user_id;
    let token = common::token_for(&caller);
    let (app, store) =
        common::test_app(MemoryStore::new().with_profile(caller).with_profile(target));

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas",
        &json!({ "hr_id": hr_id, "talukas": ["Sanand", "Bardoli"] }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["field_errors"]["talukas"],
        "Bardoli does not belong to any of your assigned cities"
    );

    let stored = store.fetch_permissions(hr_id).await.unwrap().unwrap();
    assert!(stored.scope.assigned_talukas.is_empty());
}

#[tokio::test]
async fn empty_taluka_list_fails_validation() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas",
        &json!({ "hr_id": Uuid::new_v4(), "talukas": [] }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["talukas"], "At least one taluka is required");
}

#[tokio::test]
async fn hr_cannot_delegate_talukas() {
    let caller = common::hr(&["Daskroi"]);
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas/validate",
        &json!({ "hr_id": Uuid::new_v4(), "talukas": ["Daskroi"] }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        common::error_message(&body),
        "Only admins and sub-admins can assign talukas to HR"
    );
}

#[tokio::test]
async fn admin_may_delegate_only_known_talukas() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (_, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas/validate",
        &json!({ "hr_id": Uuid::new_v4(), "talukas": ["Gondal", "Bardoli"] }),
        Some(&token),
    )
    .await;
    assert_eq!(body, json!({ "valid": true }));

    let (_, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas/validate",
        &json!({ "hr_id": Uuid::new_v4(), "talukas": ["Mundra"] }),
        Some(&token),
    )
    .await;
    assert_eq!(body["error"], "Mundra is not a known taluka");
}

#[tokio::test]
async fn assigning_to_missing_or_wrong_profile_fails() {
    let caller = common::sub_admin(&["Ahmedabad"]);
    let not_hr = common::washer(&[]);
    let not_hr_id = not_hr.user_id;
    let token = common::token_for(&caller);
    let (app, _store) =
        common::test_app(MemoryStore::new().with_profile(caller).with_profile(not_hr));

    let (status, _) = common::post_json(
        &app,
        "/api/assignments/hr-talukas",
        &json!({ "hr_id": Uuid::new_v4(), "talukas": ["Sanand"] }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::post_json(
        &app,
        "/api/assignments/hr-talukas",
        &json!({ "hr_id": not_hr_id, "talukas": ["Sanand"] }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// HR -> washer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hr_assigns_wash_area_in_own_taluka() {
    let area = common::wash_area("Bopal Hub", "Ahmedabad", "Daskroi");
    let area_id = area.id;
    let caller = common::hr(&["Daskroi"]);
    let target = common::washer(&[]);
    let washer_id = target.user_id;
    let token = common::token_for(&caller);
    let (app, store) = common::test_app(
        MemoryStore::new()
            .with_profile(caller)
            .with_profile(target)
            .with_wash_area(area),
    );

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/washer-wash-area",
        &json!({ "washer_id": washer_id, "wash_area_id": area_id }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_wash_areas"], json!([area_id]));

    let stored = store.fetch_permissions(washer_id).await.unwrap().unwrap();
    assert_eq!(stored.scope.assigned_wash_areas, vec![area_id]);
}

#[tokio::test]
async fn hr_cannot_assign_wash_area_in_other_taluka() {
    let area = common::wash_area("Sanand GIDC", "Ahmedabad", "Sanand");
    let area_id = area.id;
    let caller = common::hr(&["Daskroi"]);
    let token = common::token_for(&caller);
    let (app, _store) =
        common::test_app(MemoryStore::new().with_profile(caller).with_wash_area(area));

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/washer-wash-area/validate",
        &json!({ "washer_id": Uuid::new_v4(), "wash_area_id": area_id }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "valid": false, "error": "Sanand is not one of your assigned talukas" })
    );
}

#[tokio::test]
async fn sub_admin_wash_area_delegation_follows_cities() {
    let area = common::wash_area("Adajan", "Surat", "Choryasi");
    let area_id = area.id;
    let caller = common::sub_admin(&["Ahmedabad"]);
    let token = common::token_for(&caller);
    let (app, _store) =
        common::test_app(MemoryStore::new().with_profile(caller).with_wash_area(area));

    let (_, body) = common::post_json(
        &app,
        "/api/assignments/washer-wash-area/validate",
        &json!({ "washer_id": Uuid::new_v4(), "wash_area_id": area_id }),
        Some(&token),
    )
    .await;
    assert_eq!(body["valid"], false);
    assert!(body["error"].as_str().unwrap().contains("Choryasi"));
}

#[tokio::test]
async fn washer_is_stopped_by_wash_area_gate() {
    let area = common::wash_area("Adajan", "Surat", "Choryasi");
    let area_id = area.id;
    let caller = common::washer(&[]);
    let token = common::token_for(&caller);
    let (app, _store) =
        common::test_app(MemoryStore::new().with_profile(caller).with_wash_area(area));

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/washer-wash-area",
        &json!({ "washer_id": Uuid::new_v4(), "wash_area_id": area_id }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        common::error_message(&body),
        format!("Access denied to wash area: {area_id}")
    );
}

#[tokio::test]
async fn unknown_wash_area_is_not_found() {
    let caller = common::admin();
    let token = common::token_for(&caller);
    let (app, _store) = common::test_app(MemoryStore::new().with_profile(caller));

    let (status, _) = common::post_json(
        &app,
        "/api/assignments/washer-wash-area/validate",
        &json!({ "washer_id": Uuid::new_v4(), "wash_area_id": Uuid::new_v4() }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unauthenticated_delegation_cannot_be_verified() {
    let (app, _store) = common::test_app(MemoryStore::new());

    let (status, body) = common::post_json(
        &app,
        "/api/assignments/hr-talukas/validate",
        &json!({ "hr_id": Uuid::new_v4(), "talukas": ["Sanand"] }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(common::error_message(&body), "Cannot verify user permissions");
}
