use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use axum_helpers::{
    AppError, JsonBody, MessageResponse,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::DepartmentResult;
use crate::models::{
    CreateDepartment, DepartmentList, DepartmentUpdateMode, DepartmentView, UpdateDepartment,
};
use crate::repository::DepartmentRepository;
use crate::service::{DepartmentService, UpdateOutcome};

/// OpenAPI documentation for Departments API
#[derive(OpenApi)]
#[openapi(
    paths(create_department, list_departments, update_department, delete_department),
    components(
        schemas(
            CreateDepartment,
            UpdateDepartment,
            DepartmentView,
            DepartmentList,
            MessageResponse
        ),
        responses(
            BadRequestResponse,
            ConflictResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Departments", description = "Department registration endpoints")
    )
)]
pub struct ApiDoc;

/// Department routes, mounted at the API root
pub fn router<R: DepartmentRepository + 'static>(service: DepartmentService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create/department", post(create_department))
        .route("/get/department", get(list_departments))
        .route("/update/department/{id}", put(update_department))
        .route("/delete/department/{id}", delete(delete_department))
        .with_state(shared_service)
}

/// Create a department
#[utoipa::path(
    post,
    path = "/create/department",
    tag = "Departments",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_department<R: DepartmentRepository>(
    State(service): State<Arc<DepartmentService<R>>>,
    JsonBody(input): JsonBody<CreateDepartment>,
) -> DepartmentResult<Response> {
    service.create_department(input).await?;
    Ok(MessageResponse::new("Department created successfully").with_status(StatusCode::CREATED))
}

/// List live departments
#[utoipa::path(
    get,
    path = "/get/department",
    tag = "Departments",
    responses(
        (status = 200, description = "Departments that are not inactive", body = DepartmentList),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_departments<R: DepartmentRepository>(
    State(service): State<Arc<DepartmentService<R>>>,
) -> DepartmentResult<Json<DepartmentList>> {
    let departments = service.list_departments().await?;
    Ok(Json(DepartmentList { departments }))
}

/// Update a department.
///
/// Depending on `DEPARTMENT_UPDATE_MODE` this either applies the changes or
/// marks the department inactive. In `soft_delete` mode the body is not read,
/// so an empty or malformed body is accepted.
#[utoipa::path(
    put,
    path = "/update/department/{id}",
    tag = "Departments",
    params(("id" = String, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated or deactivated", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_department<R: DepartmentRepository>(
    State(service): State<Arc<DepartmentService<R>>>,
    Path(id): Path<String>,
    body: Result<JsonBody<UpdateDepartment>, AppError>,
) -> Response {
    let input = match (body, service.update_mode()) {
        (Ok(JsonBody(input)), _) => input,
        (Err(_), DepartmentUpdateMode::SoftDelete) => UpdateDepartment::default(),
        (Err(rejection), DepartmentUpdateMode::ApplyChanges) => return rejection.into_response(),
    };

    match service.update_department(&id, input).await {
        Ok(UpdateOutcome::Updated) => {
            MessageResponse::new("Department updated successfully").into_response()
        }
        Ok(UpdateOutcome::Deactivated) => {
            MessageResponse::new("Department marked as inactive").into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Soft-delete a department
#[utoipa::path(
    delete,
    path = "/delete/department/{id}",
    tag = "Departments",
    params(("id" = String, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department marked as inactive", body = MessageResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_department<R: DepartmentRepository>(
    State(service): State<Arc<DepartmentService<R>>>,
    Path(id): Path<String>,
) -> DepartmentResult<impl IntoResponse> {
    service.delete_department(&id).await?;
    Ok(MessageResponse::new("Department marked as inactive"))
}
