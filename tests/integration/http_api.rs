//! HTTP endpoint tests against the actix application

use super::test_utils::{app_state, memory_state, FailingStore, ScriptedProvider};
use actix_web::{test, web, App};
use postcraft::server::{configure, RATE_LIMIT_MESSAGE};
use serde_json::{json, Value};
use std::sync::Arc;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure),
        )
        .await
    };
}

fn generate_request(client: &str, body: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/generate-content")
        .insert_header(("X-Forwarded-For", client))
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
}

#[actix_web::test]
async fn test_three_posts_end_to_end() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = generate_request("203.0.113.1", r#"{"count": 3}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["generated"], true);
    assert_eq!(body["aiPowered"], true);
    assert_eq!(body["totalGenerated"], 3);
    assert_eq!(body["aiSuccessRate"], 1.0);
    assert_eq!(body["rateLimitRemaining"], 4);

    let ideas = body["ideas"].as_array().unwrap();
    let pillars: Vec<&str> = ideas.iter().map(|i| i["pillar"].as_str().unwrap()).collect();
    assert_eq!(pillars, vec!["Educational", "Showcase", "Social Proof"]);
    assert_eq!(ideas[0]["postDescription"], "Drafted post 1");
    assert_eq!(ideas[0]["isAIGenerated"], true);
    assert_eq!(ideas[0]["scheduledFor"], "Monday 09:00");
    assert_eq!(ideas[1]["scheduledFor"], "Tuesday 11:00");
}

#[actix_web::test]
async fn test_sixth_request_is_rate_limited() {
    let (state, _) = memory_state();
    let app = app!(state);

    for _ in 0..5 {
        let req = generate_request("198.51.100.9", r#"{"count": 1}"#).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    let req = generate_request("198.51.100.9", r#"{"count": 1}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 429);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], RATE_LIMIT_MESSAGE);
    assert_eq!(body["retryAfter"], 60);

    // Other clients keep their own quota.
    let req = generate_request("198.51.100.10", r#"{"count": 1}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_requests_without_identity_share_a_bucket() {
    let (state, _) = memory_state();
    let app = app!(state);

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/generate-content")
            .set_payload(r#"{"count": 0}"#)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }
    let req = test::TestRequest::post()
        .uri("/api/generate-content")
        .insert_header(("X-Real-IP", "192.0.2.1"))
        .set_payload(r#"{"count": 0}"#)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/generate-content")
        .set_payload(r#"{"count": 0}"#)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 429);
}

#[actix_web::test]
async fn test_oversized_count_is_truncated() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = generate_request("client", r#"{"count": 25}"#).to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ideas"].as_array().unwrap().len(), 10);
    assert_eq!(body["totalGenerated"], 10);
}

#[actix_web::test]
async fn test_zero_count_yields_empty_batch() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = generate_request("client", r#"{"count": 0}"#).to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["ideas"].as_array().unwrap().is_empty());
    assert_eq!(body["aiSuccessRate"], 0.0);
}

#[actix_web::test]
async fn test_malformed_body_returns_canned_batch() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = generate_request("client", "not json").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["generated"], false);
    assert_eq!(body["aiPowered"], false);
    assert_eq!(body["ideas"].as_array().unwrap().len(), 2);
    assert!(body["error"].as_str().unwrap().contains("templates"));
    assert!(body.get("rateLimitRemaining").is_none());
}

#[actix_web::test]
async fn test_bad_focus_with_known_count_trims_canned_batch() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = generate_request("client", r#"{"count": 1, "focusArea": 5}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["generated"], false);
    let ideas = body["ideas"].as_array().unwrap();
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0]["pillar"], "Educational");
}

#[actix_web::test]
async fn test_negative_count_returns_empty_generated_batch() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = generate_request("client", r#"{"count": -3}"#).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["generated"], true);
    assert_eq!(body["totalGenerated"], 0);
    assert_eq!(body["aiSuccessRate"], 0.0);
    assert!(body["ideas"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_provider_failures_fall_back_per_item() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Err("timeout".to_string()),
        Ok("second".to_string()),
    ]));
    let state = app_state(provider.clone(), Arc::new(FailingStore));
    let app = app!(state);

    let req = generate_request("client", r#"{"count": 2}"#).to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["aiSuccessRate"], 0.5);
    assert_eq!(body["ideas"][0]["isAIGenerated"], false);
    assert!(body["ideas"][0]["postDescription"]
        .as_str()
        .unwrap()
        .contains('1'));
    assert_eq!(body["ideas"][0]["pillar"], "Educational");
    assert_eq!(body["ideas"][1]["postDescription"], "second");
    assert_eq!(provider.calls(), 2);
}

#[actix_web::test]
async fn test_sheets_round_trip() {
    let (state, store) = memory_state();
    let app = app!(state);

    let req = generate_request("client", r#"{"count": 2}"#).to_request();
    let resp = test::call_service(&app, req).await;
    let batch: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/api/sheets")
        .set_json(json!({ "content": batch["ideas"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let added: Value = test::read_body_json(resp).await;
    assert_eq!(added, json!({ "success": true, "added": 2 }));
    assert_eq!(store.len(), 3);

    let req = test::TestRequest::get().uri("/api/sheets").to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(summary["totalPosts"], 2);
    assert_eq!(summary["pendingPosts"], 2);
    assert_eq!(summary["scheduledPosts"], 0);

    let post = &summary["posts"][0];
    let idea = &batch["ideas"][0];
    for field in ["postDescription", "instructions", "scheduledFor", "cta", "pillar", "hashtags"] {
        assert_eq!(post[field], idea[field], "field {} differs", field);
    }
    assert_eq!(post["status"], "Pending");
    assert_eq!(post["image"], "");
    assert_eq!(post["createdDate"].as_str().unwrap().len(), 10);
}

#[actix_web::test]
async fn test_store_failures_return_500() {
    let state = app_state(Arc::new(ScriptedProvider::always_ok()), Arc::new(FailingStore));
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/sheets").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to fetch data");

    let req = test::TestRequest::post()
        .uri("/api/sheets")
        .set_json(json!({ "content": [{ "postDescription": "x" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to add content");
}

#[actix_web::test]
async fn test_append_without_content_is_rejected() {
    let (state, store) = memory_state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/sheets")
        .set_json(json!({ "posts": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    assert_eq!(store.len(), 1);
}

#[actix_web::test]
async fn test_health() {
    let (state, _) = memory_state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}
