mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use common::TestApp;
use elearning_backend::model::user::Role;
use elearning_backend::repository::user_repo::UserRepository;
use serde_json::json;

#[tokio::test]
async fn test_delete_instructor_with_courses_is_blocked() {
    let app = TestApp::new();
    let (_, admin_token) = app.user("root", Role::Admin).await;
    let (alice, _) = app.user("alice", Role::Instructor).await;
    let category = app.category("Programming").await;
    app.course("Intro to X", &alice, &category).await;
    let uri = format!("/api/instructors/{}", alice.id.unwrap().to_hex());

    let (status, resp) = app.send("DELETE", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp, json!({ "success": false, "error": "Cannot delete instructor with existing courses" }));
    assert!(app.repos.users.find_by_id(&alice.id.unwrap()).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_instructor_without_courses() {
    let app = TestApp::new();
    let (_, admin_token) = app.user("root", Role::Admin).await;
    let (alice, _) = app.user("alice", Role::Instructor).await;
    let uri = format!("/api/instructors/{}", alice.id.unwrap().to_hex());

    let (status, resp) = app.send("DELETE", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "success": true, "data": {} }));

    let (status, resp) = app.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["error"], json!("Instructor not found"));
}

#[tokio::test]
async fn test_get_student_id_is_not_an_instructor() {
    let app = TestApp::new();
    let (sam, _) = app.user("sam", Role::Student).await;

    let uri = format!("/api/instructors/{}", sam.id.unwrap().to_hex());
    let (status, resp) = app.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["error"], json!("Instructor not found"));
}

#[tokio::test]
async fn test_get_instructor_with_courses() {
    let app = TestApp::new();
    let (alice, _) = app.user("alice", Role::Instructor).await;
    let (bob, _) = app.user("bob", Role::Instructor).await;
    let category = app.category("Programming").await;
    app.course("Intro to X", &alice, &category).await;
    app.course("Bob's course", &bob, &category).await;

    let uri = format!("/api/instructors/{}", alice.id.unwrap().to_hex());
    let (status, resp) = app.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["instructor"]["email"], json!("alice@example.com"));
    assert!(resp["data"]["instructor"].get("passwordHash").is_none());
    assert_eq!(resp["data"]["courses"].as_array().unwrap().len(), 1);
    assert_eq!(resp["data"]["courses"][0]["title"], json!("Intro to X"));
}

#[tokio::test]
async fn test_list_only_instructors() {
    let app = TestApp::new();
    app.user("alice", Role::Instructor).await;
    app.user("sam", Role::Student).await;
    app.user("root", Role::Admin).await;

    let (status, resp) = app.send("GET", "/api/instructors", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["count"], json!(1));
    assert_eq!(resp["data"][0]["role"], json!("instructor"));
}

#[tokio::test]
async fn test_create_forces_instructor_role() {
    let app = TestApp::new();
    let (_, admin_token) = app.user("root", Role::Admin).await;
    let body = json!({ "name": "Carol", "email": "carol@example.com", "password": "secret123", "role": "admin" });

    let (status, resp) = app.send("POST", "/api/instructors", Some(&admin_token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["data"]["role"], json!("instructor"));
    assert!(resp["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_create_requires_admin() {
    let app = TestApp::new();
    let (_, token) = app.user("alice", Role::Instructor).await;
    let body = json!({ "name": "Carol", "email": "carol@example.com", "password": "secret123" });

    let (status, _) = app.send("POST", "/api/instructors", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_strips_role() {
    let app = TestApp::new();
    let (alice, token) = app.user("alice", Role::Instructor).await;
    let uri = format!("/api/instructors/{}", alice.id.unwrap().to_hex());

    let body = json!({ "name": "Alice Smith", "role": "admin" });
    let (status, resp) = app.send("PUT", &uri, Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["name"], json!("Alice Smith"));
    assert_eq!(resp["data"]["role"], json!("instructor"));
}

#[tokio::test]
async fn test_update_other_instructor_is_unauthorized() {
    let app = TestApp::new();
    let (alice, _) = app.user("alice", Role::Instructor).await;
    let (_, bob_token) = app.user("bob", Role::Instructor).await;
    let (_, admin_token) = app.user("root", Role::Admin).await;
    let uri = format!("/api/instructors/{}", alice.id.unwrap().to_hex());

    let (status, _) = app.send("PUT", &uri, Some(&bob_token), Some(json!({ "name": "Hacked" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, resp) = app.send("PUT", &uri, Some(&admin_token), Some(json!({ "name": "Renamed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["data"]["name"], json!("Renamed"));
}

#[tokio::test]
async fn test_update_other_instructor_with_bad_payload_is_unauthorized() {
    let app = TestApp::new();
    let (alice, _) = app.user("alice", Role::Instructor).await;
    let (_, bob_token) = app.user("bob", Role::Instructor).await;
    let uri = format!("/api/instructors/{}", alice.id.unwrap().to_hex());

    let (status, resp) = app.send("PUT", &uri, Some(&bob_token), Some(json!({ "email": "not-an-email" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["error"], json!("Not authorized to update this instructor"));

    let missing = format!("/api/instructors/{}", ObjectId::new().to_hex());
    let (status, resp) = app.send("PUT", &missing, Some(&bob_token), Some(json!({ "password": "1" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["error"], json!("Instructor not found"));
}
