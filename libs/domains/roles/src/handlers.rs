use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use axum_helpers::{
    JsonBody, MessageResponse,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RoleResult;
use crate::models::{CreateRole, RoleList, RoleView, UpdateRole};
use crate::repository::RoleRepository;
use crate::service::RoleService;

/// OpenAPI documentation for Roles API
#[derive(OpenApi)]
#[openapi(
    paths(create_role, list_roles, update_role, delete_role),
    components(
        schemas(CreateRole, UpdateRole, RoleView, RoleList, MessageResponse),
        responses(
            BadRequestResponse,
            ConflictResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Roles", description = "Role registration endpoints")
    )
)]
pub struct ApiDoc;

/// Role routes, mounted at the API root
pub fn router<R: RoleRepository + 'static>(service: RoleService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create/role", post(create_role))
        .route("/get/roles", get(list_roles))
        .route("/update/role/{id}", put(update_role))
        .route("/delete/role/{id}", delete(delete_role))
        .with_state(shared_service)
}

/// Create a role
#[utoipa::path(
    post,
    path = "/create/role",
    tag = "Roles",
    request_body = CreateRole,
    responses(
        (status = 201, description = "Role created", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    JsonBody(input): JsonBody<CreateRole>,
) -> RoleResult<Response> {
    service.create_role(input).await?;
    Ok(MessageResponse::new("Role created successfully").with_status(StatusCode::CREATED))
}

/// List live roles
#[utoipa::path(
    get,
    path = "/get/roles",
    tag = "Roles",
    responses(
        (status = 200, description = "Roles that are not inactive", body = RoleList),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_roles<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
) -> RoleResult<Json<RoleList>> {
    let roles = service.list_roles().await?;
    Ok(Json(RoleList { roles }))
}

/// Update a role
#[utoipa::path(
    put,
    path = "/update/role/{id}",
    tag = "Roles",
    params(("id" = String, Path, description = "Role ID")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateRole>,
) -> RoleResult<impl IntoResponse> {
    service.update_role(&id, input).await?;
    Ok(MessageResponse::new("Role updated successfully"))
}

/// Soft-delete a role
#[utoipa::path(
    delete,
    path = "/delete/role/{id}",
    tag = "Roles",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role marked as inactive", body = MessageResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_role<R: RoleRepository>(
    State(service): State<Arc<RoleService<R>>>,
    Path(id): Path<String>,
) -> RoleResult<impl IntoResponse> {
    service.delete_role(&id).await?;
    Ok(MessageResponse::new("Role marked as inactive"))
}
