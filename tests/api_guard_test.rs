mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use cleaning_marketplace::{middleware::auth::CurrentUser, routes::build_router};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use common::{body_json, json_request, offline_state};

fn someone() -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        username: "elliot".to_string(),
    }
}

#[tokio::test]
async fn health_is_public() {
    let app = build_router(offline_state());
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn api_routes_require_a_valid_bearer_token() {
    let app = build_router(offline_state());

    let req = Request::builder()
        .uri("/api/feed/jobs")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "missing_authorization");

    let req = Request::builder()
        .uri("/api/feed/jobs")
        .header("authorization", "Basic abc")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/jobs/{}/offers", Uuid::new_v4()))
        .header("authorization", "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "invalid_token");
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = build_router(offline_state());
    let req = Request::builder()
        .uri("/api/nowhere")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn feed_rejects_out_of_range_page_size() {
    let app = build_router(offline_state());
    let user = someone();

    for size in ["0", "-5", "101", "abc"] {
        let req = json_request(
            "GET",
            &format!("/api/feed/jobs?page_chunk_size={}", size),
            &user,
            None,
        );
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], "invalid_argument");
    }
}

#[tokio::test]
async fn feed_rejects_malformed_cursor() {
    let app = build_router(offline_state());
    let req = json_request(
        "GET",
        "/api/feed/jobs?starting_date=yesterday",
        &someone(),
        None,
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "invalid_argument");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn evaluation_ratings_are_validated_before_lookup() {
    let app = build_router(offline_state());
    let req = json_request(
        "POST",
        &format!("/api/users/mrrobot/evaluations/{}", Uuid::new_v4()),
        &someone(),
        Some(json!({ "overall_rating": 9 })),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "validation");
}

#[tokio::test]
async fn job_with_blank_name_is_rejected() {
    let app = build_router(offline_state());
    let req = json_request(
        "POST",
        "/api/jobs",
        &someone(),
        Some(json!({ "name": "", "price": "12.50" })),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_lists_core_routes() {
    let app = build_router(offline_state());
    let req = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    assert!(doc["paths"]["/api/feed/jobs"].is_object());
    assert!(doc["paths"]["/api/jobs/{job_id}/offers/{username}"].is_object());
}
