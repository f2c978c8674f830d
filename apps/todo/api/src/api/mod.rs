//! HTTP routes
//!
//! Domain routers are nested under `/v1`; `axum_helpers::create_router`
//! adds the `/api` prefix.

pub mod health;

use axum::Router;
use domain_tasks::TaskRepository;
use domain_todolists::TodoListRepository;
use domain_users::UserRepository;

use crate::state::Services;

/// Creates the API routes without the `/api` prefix.
pub fn routes<U, T, L>(services: Services<U, T, L>) -> Router
where
    U: UserRepository + Clone + 'static,
    T: TaskRepository + Clone + 'static,
    L: TodoListRepository + Clone + 'static,
{
    Router::new()
        .nest("/v1/users", domain_users::handlers::router(services.users))
        .nest("/v1/tasks", domain_tasks::handlers::router(services.tasks))
        .nest(
            "/v1/todolists",
            domain_todolists::handlers::router(services.todo_lists),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDoc;
    use crate::state::InMemoryServices;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        axum_helpers::create_router::<ApiDoc>(routes(InMemoryServices::in_memory()), None).unwrap()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_user_task_and_list_flow() {
        let app = app();

        let (status, user) = send(&app, "POST", "/api/v1/users", Some(json!({ "user_name": "alice" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["id"], 1);

        let (status, task) = send(
            &app,
            "POST",
            "/api/v1/tasks",
            Some(json!({ "name": "t1", "description": "d1", "user_name": "alice" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task["assigned_user"]["user_name"], "alice");

        let (status, list) = send(
            &app,
            "POST",
            "/api/v1/todolists",
            Some(json!({ "name": "L1", "task_ids": [1, 5] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(list["tasks"].as_array().unwrap().len(), 1);

        // Deleting the assignee leaves the task with a dangling id
        let (status, _) = send(&app, "DELETE", "/api/v1/users/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, task) = send(&app, "GET", "/api/v1/tasks/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(task["assigned_user_id"], 1);
        assert!(task["assigned_user"].is_null());

        let (status, tasks) = send(&app, "GET", "/api/v1/todolists/1/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tasks[0]["name"], "t1");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let (status, body) = send(&app(), "GET", "/api/v2/users", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
