//! Integration tests for the Fitness Tracker Server API
//!
//! These tests verify the complete request/response cycle for all endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use fitness_tracker_server::{build_router, open_database, open_in_memory, AppState, Config, Db};

// Test configuration constants
const TEST_SECRET: &str = "test-token-secret";
const TEST_PASSWORD: &str = "supersecret";

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a test configuration
fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_path: String::new(),
        database_max_connections: 1,
        allowed_origins: vec!["http://localhost:5173".to_string()],
        environment: "test".to_string(),
        token_secret: TEST_SECRET.to_string(),
        // Cheapest bcrypt cost keeps the suite fast
        bcrypt_cost: 4,
        token_ttl_secs: 3600,
    }
}

async fn create_test_db() -> Db {
    open_in_memory().await.expect("Failed to create test database")
}

/// Create a test app router
fn create_test_app(db: Db) -> Router {
    build_router(AppState::new(db, test_config()))
}

/// Parse response body as JSON
async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a request with an optional bearer token and JSON body
fn make_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and return status plus JSON body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

/// Register a user and return (user_id, token)
async fn register(app: &Router, username: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        make_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": username, "password": TEST_PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);

    (
        body["user"]["id"].as_i64().unwrap(),
        body["token"].as_str().unwrap().to_string(),
    )
}

async fn create_activity(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        make_request(
            "POST",
            "/api/activities",
            Some(token),
            Some(json!({ "name": name, "description": format!("{} description", name) })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create activity failed: {}", body);
    body["id"].as_i64().unwrap()
}

async fn create_routine(app: &Router, token: &str, name: &str, is_public: bool) -> i64 {
    let (status, body) = send(
        app,
        make_request(
            "POST",
            "/api/routines",
            Some(token),
            Some(json!({ "name": name, "goal": "strength", "isPublic": is_public })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create routine failed: {}", body);
    body["id"].as_i64().unwrap()
}

async fn link_activity(app: &Router, token: &str, routine_id: i64, activity_id: i64) -> Value {
    let (status, body) = send(
        app,
        make_request(
            "POST",
            &format!("/api/routines/{}/activities", routine_id),
            Some(token),
            Some(json!({ "activityId": activity_id, "count": 3, "duration": 60 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "link failed: {}", body);
    body
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check_returns_healthy() {
    let app = create_test_app(create_test_db().await);

    let (status, body) = send(&app, make_request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_file_database_is_bootstrapped() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("fitness.db");

    let db = open_database(&db_path, 2).await.unwrap();
    assert!(db_path.exists());

    // Opening again must not fail on existing tables
    drop(db);
    let db = open_database(&db_path, 2).await.unwrap();
    let app = create_test_app(db);
    register(&app, "alice").await;
}

// =============================================================================
// User Tests
// =============================================================================

#[tokio::test]
async fn test_register_user_success() {
    let app = create_test_app(create_test_db().await);

    let (status, body) = send(
        &app,
        make_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "password": TEST_PASSWORD })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("password").is_none());
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_register_short_password_rejected() {
    let app = create_test_app(create_test_db().await);

    let (status, body) = send(
        &app,
        make_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "password": "12345678" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password Too Short!");
}

#[tokio::test]
async fn test_register_duplicate_user_returns_conflict() {
    let app = create_test_app(create_test_db().await);
    register(&app, "alice").await;

    let (status, _) = send(
        &app,
        make_request(
            "POST",
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "password": TEST_PASSWORD })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_and_me() {
    let app = create_test_app(create_test_db().await);
    let (user_id, _) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        make_request(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "username": "alice", "password": TEST_PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, make_request("GET", "/api/users/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id);
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app(create_test_db().await);
    register(&app, "alice").await;

    let (status, _) = send(
        &app,
        make_request(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "username": "alice", "password": "wrong-password" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = create_test_app(create_test_db().await);

    let (status, _) = send(&app, make_request("GET", "/api/users/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        make_request("GET", "/api/users/me", Some("1.2.deadbeef"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_routines_visibility() {
    let app = create_test_app(create_test_db().await);
    let (_, alice) = register(&app, "alice").await;
    let (_, bob) = register(&app, "bob").await;
    let squat = create_activity(&app, &alice, "squat").await;

    let public = create_routine(&app, &alice, "Leg Day", true).await;
    let private = create_routine(&app, &alice, "Secret", false).await;
    let empty = create_routine(&app, &alice, "Empty", true).await;
    link_activity(&app, &alice, public, squat).await;
    link_activity(&app, &alice, private, squat).await;

    // Owner sees everything, including routines without activities
    let (status, body) = send(
        &app,
        make_request("GET", "/api/users/alice/routines", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![public, private, empty]);

    // Anyone else sees only public routines with activities
    for token in [Some(bob.as_str()), None] {
        let (status, body) = send(
            &app,
            make_request("GET", "/api/users/alice/routines", token, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], public);
        assert_eq!(list[0]["creatorName"], "alice");
    }

    let (status, _) = send(&app, make_request("GET", "/api/users/nobody/routines", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Activity Tests
// =============================================================================

#[tokio::test]
async fn test_activity_lifecycle() {
    let app = create_test_app(create_test_db().await);
    let (_, token) = register(&app, "alice").await;

    let (status, _) = send(
        &app,
        make_request(
            "POST",
            "/api/activities",
            None,
            Some(json!({ "name": "squat", "description": "d" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let squat = create_activity(&app, &token, "squat").await;

    let (status, _) = send(
        &app,
        make_request(
            "POST",
            "/api/activities",
            Some(&token),
            Some(json!({ "name": "squat", "description": "again" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        make_request(
            "PATCH",
            &format!("/api/activities/{}", squat),
            Some(&token),
            Some(json!({ "description": "Bend the knees" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "squat");
    assert_eq!(body["description"], "Bend the knees");

    let (status, body) = send(&app, make_request("GET", "/api/activities", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        make_request(
            "PATCH",
            "/api/activities/999",
            Some(&token),
            Some(json!({ "description": "missing" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Routine Tests
// =============================================================================

#[tokio::test]
async fn test_public_routines_listing() {
    let app = create_test_app(create_test_db().await);
    let (_, token) = register(&app, "alice").await;
    let squat = create_activity(&app, &token, "squat").await;
    let lunge = create_activity(&app, &token, "lunge").await;

    let leg_day = create_routine(&app, &token, "Leg Day", true).await;
    let private = create_routine(&app, &token, "Secret", false).await;
    create_routine(&app, &token, "Empty", true).await;
    link_activity(&app, &token, leg_day, squat).await;
    link_activity(&app, &token, leg_day, lunge).await;
    link_activity(&app, &token, private, squat).await;

    let (status, body) = send(&app, make_request("GET", "/api/routines", None, None)).await;
    assert_eq!(status, StatusCode::OK);

    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], leg_day);
    assert_eq!(list[0]["name"], "Leg Day");
    assert_eq!(list[0]["isPublic"], true);
    assert_eq!(list[0]["creatorName"], "alice");

    let activities = list[0]["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0]["id"], squat);
    assert_eq!(activities[0]["count"], 3);
    assert_eq!(activities[0]["duration"], 60);
}

#[tokio::test]
async fn test_update_routine() {
    let app = create_test_app(create_test_db().await);
    let (_, token) = register(&app, "alice").await;
    let routine = create_routine(&app, &token, "Leg Day", true).await;
    let uri = format!("/api/routines/{}", routine);

    let (status, body) = send(
        &app,
        make_request("PATCH", &uri, Some(&token), Some(json!({ "name": "X" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "X");
    assert_eq!(body["goal"], "strength");
    assert_eq!(body["isPublic"], true);

    // Empty body is a no-op that echoes the routine
    let (status, body) = send(&app, make_request("PATCH", &uri, Some(&token), Some(json!({})))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "X");

    // Keys outside the allow-list are ignored
    let (status, body) = send(
        &app,
        make_request(
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({ "creatorId": 999, "isPublic": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isPublic"], false);
    assert_ne!(body["creatorId"], 999);
}

#[tokio::test]
async fn test_routine_changes_require_owner() {
    let app = create_test_app(create_test_db().await);
    let (_, alice) = register(&app, "alice").await;
    let (_, bob) = register(&app, "bob").await;
    let squat = create_activity(&app, &alice, "squat").await;
    let routine = create_routine(&app, &alice, "Leg Day", true).await;
    let uri = format!("/api/routines/{}", routine);

    let (status, _) = send(
        &app,
        make_request("PATCH", &uri, Some(&bob), Some(json!({ "name": "Mine" }))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, make_request("DELETE", &uri, Some(&bob), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        make_request(
            "POST",
            &format!("{}/activities", uri),
            Some(&bob),
            Some(json!({ "activityId": squat, "count": 1, "duration": 1 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, make_request("DELETE", "/api/routines/999", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_routine_cascades() {
    let app = create_test_app(create_test_db().await);
    let (_, token) = register(&app, "alice").await;
    let squat = create_activity(&app, &token, "squat").await;
    let routine = create_routine(&app, &token, "Leg Day", true).await;
    let link = link_activity(&app, &token, routine, squat).await;

    let (status, body) = send(
        &app,
        make_request("DELETE", &format!("/api/routines/{}", routine), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], routine);

    // The link went with it
    let (status, _) = send(
        &app,
        make_request(
            "DELETE",
            &format!("/api/routine_activities/{}", link["id"]),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, make_request("GET", "/api/routines", None, None)).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_activity_validation() {
    let app = create_test_app(create_test_db().await);
    let (_, token) = register(&app, "alice").await;
    let squat = create_activity(&app, &token, "squat").await;
    let routine = create_routine(&app, &token, "Leg Day", true).await;
    let uri = format!("/api/routines/{}/activities", routine);

    let (status, _) = send(
        &app,
        make_request(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "activityId": 999, "count": 1, "duration": 1 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        make_request(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "activityId": squat, "count": -1, "duration": 1 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Routine Activity Tests
// =============================================================================

#[tokio::test]
async fn test_update_and_delete_routine_activity() {
    let app = create_test_app(create_test_db().await);
    let (_, alice) = register(&app, "alice").await;
    let (_, bob) = register(&app, "bob").await;
    let squat = create_activity(&app, &alice, "squat").await;
    let routine = create_routine(&app, &alice, "Leg Day", true).await;
    let link = link_activity(&app, &alice, routine, squat).await;
    let uri = format!("/api/routine_activities/{}", link["id"]);

    let (status, _) = send(
        &app,
        make_request("PATCH", &uri, Some(&bob), Some(json!({ "count": 10 }))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        make_request("PATCH", &uri, Some(&alice), Some(json!({ "count": 10 }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);
    assert_eq!(body["duration"], 60);
    assert_eq!(body["routineId"], routine);
    assert_eq!(body["activityId"], squat);

    let (status, body) = send(&app, make_request("DELETE", &uri, Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], link["id"]);

    let (status, _) = send(
        &app,
        make_request("PATCH", &uri, Some(&alice), Some(json!({ "count": 1 }))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
