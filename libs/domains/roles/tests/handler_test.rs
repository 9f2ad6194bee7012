//! Handler tests for the Roles domain, backed by the in-memory repository

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_roles::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn role(role_name: &str, display: &str) -> Value {
    json!({
        "role_name": role_name,
        "role_display_name": display,
        "permissions": [{ "module": "users", "actions": ["read"] }],
        "created_by": "root",
        "updated_by": "root"
    })
}

async fn create_and_get_id(app: &Router, body: Value) -> String {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/create/role", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/get/roles"))
        .await
        .unwrap();
    let list: RoleList = json_body(response.into_body()).await;
    list.roles.last().unwrap().id.clone()
}

fn app(repo: InMemoryRoleRepository) -> Router {
    handlers::router(RoleService::new(repo))
}

#[tokio::test]
async fn test_create_role_returns_201() {
    let app = app(InMemoryRoleRepository::new());

    let response = app
        .oneshot(json_request("POST", "/create/role", role("admin", "Super Admin")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Role created successfully");
}

#[tokio::test]
async fn test_duplicate_display_name_returns_409() {
    let app = app(InMemoryRoleRepository::new());
    create_and_get_id(&app, role("admin", "Super Admin")).await;

    let response = app
        .oneshot(json_request("POST", "/create/role", role("other", "  super admin ")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Role 'SUPER_ADMIN' already exists");
}

#[tokio::test]
async fn test_duplicate_role_name_returns_409() {
    let app = app(InMemoryRoleRepository::new());
    create_and_get_id(&app, role("admin", "Super Admin")).await;

    let response = app
        .oneshot(json_request("POST", "/create/role", role("admin", "Manager")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Role 'admin' already exists");
}

#[tokio::test]
async fn test_non_array_permissions_returns_400() {
    let app = app(InMemoryRoleRepository::new());
    let mut body = role("admin", "Admin");
    body["permissions"] = json!("everything");

    let response = app
        .oneshot(json_request("POST", "/create/role", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Permissions must be an array of objects");
}

#[tokio::test]
async fn test_missing_field_returns_400() {
    let app = app(InMemoryRoleRepository::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/create/role",
            json!({ "role_name": "admin", "permissions": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Missing required field: role_display_name");
}

#[tokio::test]
async fn test_list_shows_uppercase_key_and_permissions() {
    let app = app(InMemoryRoleRepository::new());
    create_and_get_id(&app, role("admin", "super admin")).await;

    let response = app
        .oneshot(empty_request("GET", "/get/roles"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    let listed = &body["roles"][0];
    assert_eq!(listed["role_display_name"], "SUPER_ADMIN");
    assert_eq!(listed["permissions"][0]["module"], "users");
    assert_eq!(listed["status"], "active");
}

#[tokio::test]
async fn test_role_delete_succeeds_twice() {
    let app = app(InMemoryRoleRepository::new());
    let id = create_and_get_id(&app, role("admin", "Admin")).await;
    let uri = format!("/delete/role/{id}");

    let first = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let body: Value = json_body(first.into_body()).await;
    assert_eq!(body["message"], "Role marked as inactive");

    let second = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    let list = app.oneshot(empty_request("GET", "/get/roles")).await.unwrap();
    let list: RoleList = json_body(list.into_body()).await;
    assert!(list.roles.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_role_returns_404() {
    let app = app(InMemoryRoleRepository::new());

    let response = app
        .oneshot(empty_request("DELETE", "/delete/role/nope"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Role not found");
}

#[tokio::test]
async fn test_update_inactive_role_is_allowed() {
    let repo = InMemoryRoleRepository::new();
    let app = app(repo.clone());
    let id = create_and_get_id(&app, role("admin", "Admin")).await;

    app.clone()
        .oneshot(empty_request("DELETE", &format!("/delete/role/{id}")))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/update/role/{id}"),
            json!({ "permissions": [], "updated_by": "ops" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Role updated successfully");

    let stored = repo.get(&id).await.unwrap();
    assert!(stored.permissions.is_empty());
    assert_eq!(stored.updated_by, "ops");
}

#[tokio::test]
async fn test_update_to_own_name_succeeds_but_other_conflicts() {
    let app = app(InMemoryRoleRepository::new());
    let admin = create_and_get_id(&app, role("admin", "Admin")).await;
    create_and_get_id(&app, role("viewer", "Viewer")).await;

    let same = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/update/role/{admin}"),
            json!({ "role_display_name": "admin" }),
        ))
        .await
        .unwrap();
    assert_eq!(same.status(), StatusCode::OK);

    let clash = app
        .oneshot(json_request(
            "PUT",
            &format!("/update/role/{admin}"),
            json!({ "role_display_name": " viewer" }),
        ))
        .await
        .unwrap();
    assert_eq!(clash.status(), StatusCode::CONFLICT);
    let body: Value = json_body(clash.into_body()).await;
    assert_eq!(body["message"], "Role 'VIEWER' already exists");
}

#[tokio::test]
async fn test_display_name_reusable_after_delete() {
    let app = app(InMemoryRoleRepository::new());
    let id = create_and_get_id(&app, role("admin", "Admin")).await;

    app.clone()
        .oneshot(empty_request("DELETE", &format!("/delete/role/{id}")))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("POST", "/create/role", role("admin", "ADMIN")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
