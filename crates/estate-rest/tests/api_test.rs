//! Router-level tests over in-memory stores and an in-memory cache.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use estate_config::ServerConfig;
use estate_core::{HealthCheck, HealthStatus};
use estate_repository::{InMemoryHouseRepository, InMemoryUserRepository};
use estate_rest::{create_router, AppState};
use estate_service::{
    CacheInterface, EntityCache, HouseServiceImpl, MemoryCache, UserServiceImpl, DEFAULT_TTL,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn state() -> AppState {
    let cache = Arc::new(MemoryCache::new());
    let user_service = Arc::new(UserServiceImpl::new(
        Arc::new(InMemoryUserRepository::default()),
        EntityCache::new(cache.clone(), DEFAULT_TTL),
    ));
    let house_service = Arc::new(HouseServiceImpl::new(
        Arc::new(InMemoryHouseRepository::default()),
        EntityCache::new(cache.clone(), DEFAULT_TTL),
    ));

    AppState::new(user_service, house_service, cache.backend()).with_health_check(cache)
}

fn app() -> Router {
    create_router(state(), &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn user_body(username: &str) -> Value {
    json!({ "username": username, "password": "secret", "nickname": "Nick" })
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/users", Some(user_body("alice"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert!(created.get("password").is_none());

    let (status, fetched) = send(&app, Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, by_name) = send(&app, Method::GET, "/api/users/username/alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_name["id"], id);

    let update = json!({ "id": id, "username": "alice", "password": "changed", "nickname": "Al" });
    let (status, updated) = send(&app, Method::PUT, "/api/users", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nickname"], "Al");
    assert_eq!(updated["create_time"], created["create_time"]);

    let (status, list) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["nickname"], "Al");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let app = app();
    send(&app, Method::POST, "/api/users", Some(user_body("alice"))).await;
    let (_, bob) = send(&app, Method::POST, "/api/users", Some(user_body("bob"))).await;

    let (status, body) = send(&app, Method::POST, "/api/users", Some(user_body("alice"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_KEY");

    let rename = json!({ "id": bob["id"], "username": "alice", "password": "x" });
    let (status, _) = send(&app, Method::PUT, "/api/users", Some(rename)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_bad_requests_are_validation_errors() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/users", Some(user_body(""))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::POST, "/api/users", Some(json!({ "username": "a" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_missing_entities_are_not_found() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/users/username/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let update = json!({ "id": 42, "username": "ghost", "password": "x" });
    let (status, _) = send(&app, Method::PUT, "/api/users", Some(update)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/houses/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, list) = send(&app, Method::GET, "/api/houses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_house_lifecycle() {
    let app = app();
    let house = json!({
        "district": "Haidian",
        "community": "Lakeside",
        "house_type": "3-2",
        "floor": 12,
        "area": 96,
        "total_price": 6500000
    });

    let (status, created) = send(&app, Method::POST, "/api/houses", Some(house)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["elevator"], Value::Null);

    let update = json!({ "id": id, "district": "Haidian", "community": "Hillside", "area": 96 });
    let (status, updated) = send(&app, Method::PUT, "/api/houses", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["community"], "Hillside");
    assert_eq!(updated["house_type"], Value::Null);

    let (_, fetched) = send(&app, Method::GET, &format!("/api/houses/{id}"), None).await;
    assert_eq!(fetched, updated);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/houses/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/api/houses", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_house_numbers_are_not_range_checked() {
    let app = app();
    let house = json!({ "district": "Haidian", "community": "Lakeside", "area": -3 });

    let (status, created) = send(&app, Method::POST, "/api/houses", Some(house)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["area"], -3);

    let blank = json!({ "district": "Haidian", "community": "" });
    let (status, body) = send(&app, Method::POST, "/api/houses", Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, ready) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["ready"], true);
    assert_eq!(ready["cache_backend"], "memory");
    assert_eq!(ready["components"][0]["name"], "cache");

    let (status, _) = send(&app, Method::GET, "/live", None).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Estate Cloud API");
}

struct DownStore;

#[async_trait]
impl HealthCheck for DownStore {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Unhealthy("connection refused".to_string())
    }
}

#[tokio::test]
async fn test_ready_fails_when_store_is_down() {
    let app = create_router(
        state().with_health_check(Arc::new(DownStore)),
        &ServerConfig::default(),
    );

    let (status, ready) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready["ready"], false);
    assert_eq!(ready["components"][1]["status"], "unhealthy");
    assert_eq!(ready["components"][1]["message"], "connection refused");
}
