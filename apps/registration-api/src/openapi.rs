//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registration API",
        version = "0.1.0",
        description = "Registration of users, roles and departments backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/api/users", api = domain_users::ApiDoc),
        (path = "/api", api = domain_roles::ApiDoc),
        (path = "/api", api = domain_departments::ApiDoc)
    ),
    tags(
        (name = "Users", description = "User registration and login"),
        (name = "Roles", description = "Role registration"),
        (name = "Departments", description = "Department registration")
    )
)]
pub struct ApiDoc;
