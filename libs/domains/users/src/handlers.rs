use axum::{
    Json, Router,
    extract::{Query, State},
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
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreateUser, DeleteUser, LoginRequest, LoginResponse, UpdateUser, UserIdQuery, UserList,
    UserView,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(register_users, list_users, get_user, update_user, delete_user, login),
    components(
        schemas(
            CreateUser,
            UpdateUser,
            DeleteUser,
            LoginRequest,
            LoginResponse,
            UserView,
            UserList,
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
        (name = "Users", description = "User registration and login endpoints")
    )
)]
pub struct ApiDoc;

/// User routes, mounted under `/api/users`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create", post(register_users))
        .route("/get/all", get(list_users))
        .route("/get/by-id", get(get_user))
        .route("/update", put(update_user))
        .route("/delete", delete(delete_user))
        .route("/login", post(login))
        .with_state(shared_service)
}

fn parse_batch(body: Value) -> UserResult<Vec<CreateUser>> {
    let Value::Array(entries) = body else {
        return Err(UserError::ExpectedList);
    };
    entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value(entry).map_err(|e| UserError::InvalidEntry(e.to_string()))
        })
        .collect()
}

/// Register a list of users
#[utoipa::path(
    post,
    path = "/create",
    tag = "Users",
    request_body = Vec<CreateUser>,
    responses(
        (status = 201, description = "All users registered", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(body): JsonBody<Value>,
) -> UserResult<Response> {
    let batch = parse_batch(body)?;
    service.register_users(batch).await?;
    Ok(MessageResponse::new("Registration successful").with_status(StatusCode::CREATED))
}

/// List every user
#[utoipa::path(
    get,
    path = "/get/all",
    tag = "Users",
    responses(
        (status = 200, description = "All users, without passwords", body = UserList),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<UserList>> {
    let users = service.list_users().await?;
    Ok(Json(UserList { users }))
}

/// Fetch one user by id
#[utoipa::path(
    get,
    path = "/get/by-id",
    tag = "Users",
    params(UserIdQuery),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(query): Query<UserIdQuery>,
) -> UserResult<Json<UserView>> {
    let user = service.get_user(query.user_id.as_deref()).await?;
    Ok(Json(user))
}

/// Update the user named by `_id`
#[utoipa::path(
    put,
    path = "/update",
    tag = "Users",
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<UpdateUser>,
) -> UserResult<impl IntoResponse> {
    service.update_user(input).await?;
    Ok(MessageResponse::new("User updated successfully"))
}

/// Delete the user named by `_id`
#[utoipa::path(
    delete,
    path = "/delete",
    tag = "Users",
    request_body = DeleteUser,
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<DeleteUser>,
) -> UserResult<impl IntoResponse> {
    service.delete_user(input.id).await?;
    Ok(MessageResponse::new("User deleted successfully"))
}

/// Check an email and password pair
#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials matched", body = LoginResponse),
        (status = 400, description = "Email or password missing", body = LoginResponse),
        (status = 401, description = "Credentials did not match", body = LoginResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> Response {
    match service.login(input.email, input.password).await {
        Ok(user) => Json(LoginResponse::success(user)).into_response(),
        Err(err @ UserError::CredentialsRequired) => (
            StatusCode::BAD_REQUEST,
            Json(LoginResponse::failure(err.to_string())),
        )
            .into_response(),
        Err(err @ UserError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse::failure(err.to_string())),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_batch_rejects_object_body() {
        assert!(matches!(
            parse_batch(json!({ "email": "a@example.com" })),
            Err(UserError::ExpectedList)
        ));
    }

    #[test]
    fn test_parse_batch_rejects_mistyped_entry() {
        assert!(matches!(
            parse_batch(json!([{ "agree": "yes" }])),
            Err(UserError::InvalidEntry(_))
        ));
    }
}
