use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{IdPath, QueryArgs, ValidatedJson};
use axum_helpers::errors::responses::{
    BadRequestArgumentResponse, BadRequestValidationResponse, ConflictResponse,
    InternalServerErrorResponse, NotFoundResponse, ReferenceNotFoundResponse,
};
use domain_users::UserRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{CreateTask, TaskFilter, TaskResponse, TaskStatus, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

const TAG: &str = "tasks";

/// OpenAPI documentation for Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task),
    components(
        schemas(TaskResponse, TaskStatus, CreateTask, UpdateTask),
        responses(
            NotFoundResponse,
            ReferenceNotFoundResponse,
            BadRequestValidationResponse,
            BadRequestArgumentResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R, U> = Arc<TaskService<R, U>>;

/// Create the tasks router
pub fn router<R, U>(service: TaskService<R, U>) -> Router
where
    R: TaskRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", get(get_task).put(update_task))
        .with_state(Arc::new(service))
}

/// List tasks, optionally filtered by status
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(TaskFilter),
    responses(
        (status = 200, description = "List of tasks", body = Vec<TaskResponse>),
        (status = 400, response = BadRequestArgumentResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    QueryArgs(filter): QueryArgs<TaskFilter>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let tasks = match filter.status {
        Some(status) => service.get_all_tasks_by_status(status).await?,
        None => service.get_all_tasks().await?,
    };
    Ok(Json(tasks))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = ReferenceNotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 400, response = BadRequestArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    IdPath(id): IdPath,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.get_task(id).await?;
    Ok(Json(task))
}

/// Overwrite a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = TaskResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task<R: TaskRepository, U: UserRepository>(
    State(service): State<SharedService<R, U>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<TaskResponse>> {
    let task = service.update_task(id, input).await?;
    Ok(Json(task))
}
