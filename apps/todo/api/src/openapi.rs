//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Users, tasks and todo lists"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/users", api = domain_users::ApiDoc),
        (path = "/api/v1/tasks", api = domain_tasks::ApiDoc),
        (path = "/api/v1/todolists", api = domain_todolists::ApiDoc)
    )
)]
pub struct ApiDoc;
