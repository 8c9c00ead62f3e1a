// This file is part of the product Stockroom.
// SPDX-FileCopyrightText: 2025-2026 Stockroom Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

#[actix_web::test]
async fn unauthenticated_requests_are_rejected() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/items").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/items")
        .set_json(json!({"name": "Drill"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_requires_a_name() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    // Absent name fails JSON extraction
    let req = common::bearer(test::TestRequest::post().uri("/items"), &harness.member_token)
        .set_json(json!({"description": "nameless"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Blank name fails document validation
    let req = common::bearer(test::TestRequest::post().uri("/items"), &harness.member_token)
        .set_json(json!({"name": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = common::bearer(test::TestRequest::get().uri("/items"), &harness.member_token)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let items: Vec<Value> = serde_json::from_slice(&body).expect("items json");
    assert!(items.is_empty());
}

#[actix_web::test]
async fn create_then_get_round_trip() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = common::bearer(test::TestRequest::post().uri("/items"), &harness.member_token)
        .set_json(json!({"name": "Drill", "description": "Cordless"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = test::read_body(resp).await;
    let created: Value = serde_json::from_slice(&body).expect("item json");
    let item_id = created["id"].as_str().expect("item id");
    assert_eq!(created["name"], "Drill");
    assert_eq!(created["description"], "Cordless");

    let req = common::bearer(
        test::TestRequest::get().uri(&format!("/items/{}", item_id)),
        &harness.member_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let fetched: Value = serde_json::from_slice(&body).expect("item json");
    assert_eq!(fetched, created);

    let req = common::bearer(
        test::TestRequest::get().uri("/items/missing"),
        &harness.member_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn partial_update_preserves_other_fields() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = common::bearer(test::TestRequest::post().uri("/items"), &harness.member_token)
        .set_json(json!({"name": "Drill", "description": "Cordless"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let created: Value = serde_json::from_slice(&body).expect("item json");
    let item_id = created["id"].as_str().expect("item id");

    let req = common::bearer(
        test::TestRequest::put().uri(&format!("/items/{}", item_id)),
        &harness.member_token,
    )
    .set_json(json!({"amount": 3}))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let updated: Value = serde_json::from_slice(&body).expect("item json");
    assert_eq!(updated["name"], "Drill");
    assert_eq!(updated["description"], "Cordless");
    assert_eq!(updated["amount"], 3);

    let req = common::bearer(
        test::TestRequest::put().uri("/items/missing"),
        &harness.member_token,
    )
    .set_json(json!({"amount": 1}))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn list_supports_search_and_skip() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    for name in ["Drill", "Hammer", "Drill press"] {
        let req = common::bearer(test::TestRequest::post().uri("/items"), &harness.member_token)
            .set_json(json!({"name": name}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = common::bearer(
        test::TestRequest::get().uri("/items?search=drill"),
        &harness.member_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let found: Vec<Value> = serde_json::from_slice(&body).expect("items json");
    assert_eq!(found.len(), 2);

    let req = common::bearer(
        test::TestRequest::get().uri("/items?search=drill&skip=1"),
        &harness.member_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let skipped: Vec<Value> = serde_json::from_slice(&body).expect("items json");
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["name"], "Drill press");

    let req = common::bearer(
        test::TestRequest::get().uri("/items?skip=99"),
        &harness.member_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let empty: Vec<Value> = serde_json::from_slice(&body).expect("items json");
    assert!(empty.is_empty());
}

#[actix_web::test]
async fn delete_removes_the_item() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = common::bearer(test::TestRequest::post().uri("/items"), &harness.member_token)
        .set_json(json!({"name": "Drill"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let created: Value = serde_json::from_slice(&body).expect("item json");
    let item_id = created["id"].as_str().expect("item id");

    let req = common::bearer(
        test::TestRequest::delete().uri(&format!("/items/{}", item_id)),
        &harness.member_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = common::bearer(
        test::TestRequest::get().uri(&format!("/items/{}", item_id)),
        &harness.member_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting again is a 404, not a silent success
    let req = common::bearer(
        test::TestRequest::delete().uri(&format!("/items/{}", item_id)),
        &harness.member_token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
