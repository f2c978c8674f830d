//! Handler tests for the Tasks domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_tasks::*;
use domain_users::{InMemoryUserRepository, UserRepository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(tasks: InMemoryTaskRepository, users: InMemoryUserRepository) -> Router {
    handlers::router(TaskService::new(tasks, users))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_task_with_assignee() {
    let users = InMemoryUserRepository::new();
    users.create("alice".to_string()).await.unwrap();

    let response = app(InMemoryTaskRepository::new(), users)
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "t1", "description": "d1", "user_name": "alice" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["status"], "NOT_STARTED");
    assert_eq!(body["assigned_user_id"], 1);
    assert_eq!(body["assigned_user"]["user_name"], "alice");
}

#[tokio::test]
async fn test_create_task_with_unknown_user_returns_404() {
    let tasks = InMemoryTaskRepository::new();
    let app = app(tasks.clone(), InMemoryUserRepository::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "t1", "user_name": "ghost" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "REFERENCED_ENTITY_NOT_FOUND");
    assert!(tasks.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_task_with_duplicate_name_returns_409() {
    let app = app(InMemoryTaskRepository::new(), InMemoryUserRepository::new());

    let first = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": "t1" })))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/", json!({ "name": "t1" })))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_task_with_unknown_status_is_rejected() {
    let response = app(InMemoryTaskRepository::new(), InMemoryUserRepository::new())
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "t1", "status": "PAUSED" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_list_tasks_with_unknown_status_returns_400() {
    let response = app(InMemoryTaskRepository::new(), InMemoryUserRepository::new())
        .oneshot(get("/?status=PAUSED"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ARGUMENT");
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let response = app(InMemoryTaskRepository::new(), InMemoryUserRepository::new())
        .oneshot(get("/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_list_tasks_filters_by_status() {
    let app = app(InMemoryTaskRepository::new(), InMemoryUserRepository::new());

    for (name, status) in [("a", "COMPLETE"), ("b", "IN_PROGRESS"), ("c", "COMPLETE")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/",
                json!({ "name": name, "status": status }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/?status=COMPLETE")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let complete: Vec<TaskResponse> = json_body(response.into_body()).await;
    let names: Vec<_> = complete.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);

    let response = app.oneshot(get("/")).await.unwrap();
    let all: Vec<TaskResponse> = json_body(response.into_body()).await;
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_update_task_clears_assignee() {
    let users = InMemoryUserRepository::new();
    users.create("alice".to_string()).await.unwrap();
    let app = app(InMemoryTaskRepository::new(), users);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "t1", "user_name": "alice" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/1",
            json!({ "name": "t1", "description": "d2", "status": "COMPLETE" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let task: TaskResponse = json_body(response.into_body()).await;
    assert_eq!(task.status, TaskStatus::Complete);
    assert_eq!(task.assigned_user_id, None);
    assert_eq!(task.assigned_user, None);
}

#[tokio::test]
async fn test_get_missing_task_returns_404() {
    let response = app(InMemoryTaskRepository::new(), InMemoryUserRepository::new())
        .oneshot(get("/99"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
