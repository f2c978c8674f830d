use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{IdPath, ValidatedJson};
use axum_helpers::errors::responses::{
    BadRequestArgumentResponse, BadRequestValidationResponse, ConflictResponse,
    InternalServerErrorResponse, NotFoundResponse,
};
use domain_tasks::{Task, TaskRepository};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TodoListResult;
use crate::models::{CreateTodoList, TodoListResponse};
use crate::repository::TodoListRepository;
use crate::service::TodoListService;

const TAG: &str = "todolists";

/// OpenAPI documentation for TodoLists API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_todo_lists,
        create_todo_list,
        get_todo_list,
        get_todo_list_tasks,
        delete_todo_list
    ),
    components(
        schemas(TodoListResponse, CreateTodoList, Task),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestArgumentResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Todo list endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R, T> = Arc<TodoListService<R, T>>;

/// Create the todolists router
pub fn router<R, T>(service: TodoListService<R, T>) -> Router
where
    R: TodoListRepository + 'static,
    T: TaskRepository + 'static,
{
    Router::new()
        .route("/", get(list_todo_lists).post(create_todo_list))
        .route("/{id}", get(get_todo_list).delete(delete_todo_list))
        .route("/{id}/tasks", get(get_todo_list_tasks))
        .with_state(Arc::new(service))
}

/// List all todo lists with their tasks
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of todo lists", body = Vec<TodoListResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_todo_lists<R: TodoListRepository, T: TaskRepository>(
    State(service): State<SharedService<R, T>>,
) -> TodoListResult<Json<Vec<TodoListResponse>>> {
    let lists = service.get_all_todo_lists().await?;
    Ok(Json(lists))
}

/// Create a todo list. Unknown task ids are ignored.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateTodoList,
    responses(
        (status = 201, description = "Todo list created successfully", body = TodoListResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_todo_list<R: TodoListRepository, T: TaskRepository>(
    State(service): State<SharedService<R, T>>,
    ValidatedJson(input): ValidatedJson<CreateTodoList>,
) -> TodoListResult<impl IntoResponse> {
    let list = service.create_todo_list(input).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// Get a todo list by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "TodoList ID")
    ),
    responses(
        (status = 200, description = "Todo list found", body = TodoListResponse),
        (status = 400, response = BadRequestArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_todo_list<R: TodoListRepository, T: TaskRepository>(
    State(service): State<SharedService<R, T>>,
    IdPath(id): IdPath,
) -> TodoListResult<Json<TodoListResponse>> {
    let list = service.get_todo_list_by_id(id).await?;
    Ok(Json(list))
}

/// Get the tasks of a todo list, in list order
#[utoipa::path(
    get,
    path = "/{id}/tasks",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "TodoList ID")
    ),
    responses(
        (status = 200, description = "Tasks of the todo list", body = Vec<Task>),
        (status = 400, response = BadRequestArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_todo_list_tasks<R: TodoListRepository, T: TaskRepository>(
    State(service): State<SharedService<R, T>>,
    IdPath(id): IdPath,
) -> TodoListResult<Json<Vec<Task>>> {
    let tasks = service.get_todo_list_tasks(id).await?;
    Ok(Json(tasks))
}

/// Delete a todo list. Its tasks are kept.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "TodoList ID")
    ),
    responses(
        (status = 204, description = "Todo list deleted successfully"),
        (status = 400, response = BadRequestArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_todo_list<R: TodoListRepository, T: TaskRepository>(
    State(service): State<SharedService<R, T>>,
    IdPath(id): IdPath,
) -> TodoListResult<impl IntoResponse> {
    service.delete_todo_list(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
