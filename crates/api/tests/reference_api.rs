//! HTTP-level tests for employees, clients and projects.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_employee_defaults_role(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/employees",
        serde_json::json!({"name": "Ana", "email": "ana@contoso.com", "hourly_rate": "95.5"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["role"], "employee");
    assert_eq!(json["hourly_rate"], "95.50");
    assert!(json["home_state"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_email_is_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/employees",
        serde_json::json!({"name": "Ana", "email": "not-an-address"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_employee_email_returns_409(pool: PgPool) {
    common::create_employee(&pool, "Ana", "ana@contoso.com").await;
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/employees",
        serde_json::json!({"name": "Other Ana", "email": "ana@contoso.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_employees_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_employee_clears_nullable_field(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/employees",
        serde_json::json!({"name": "Ana", "email": "ana@contoso.com", "home_state": "CA"}),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/employees/{id}"),
        serde_json::json!({"home_state": null, "role": "manager"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["home_state"].is_null());
    assert_eq!(json["role"], "manager");
    assert_eq!(json["name"], "Ana");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_employee_then_404(pool: PgPool) {
    let id = common::create_employee(&pool, "Ana", "ana@contoso.com").await;

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/employees/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/api/v1/employees/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_is_addressed_by_id_pair(pool: PgPool) {
    let f = common::seed(&pool).await;
    let uri = format!("/api/v1/clients/{}/{}", f.client_primary_id, f.client_id);

    let response = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Contoso");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({"billing_city": "Lisbon", "active": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["billing_city"], "Lisbon");
    assert_eq!(json["active"], false);

    let response = get(common::build_test_app(pool.clone()), "/api/v1/clients?active=true").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    let swapped = format!("/api/v1/clients/{}/{}", f.client_id, f.client_primary_id);
    let response = get(common::build_test_app(pool), &swapped).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_client_with_supplied_ids(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/clients",
        serde_json::json!({
            "primary_id": "11111111-1111-1111-1111-111111111111",
            "secondary_id": "22222222-2222-2222-2222-222222222222",
            "name": "Fabrikam"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["secondary_id"], "22222222-2222-2222-2222-222222222222");
    assert_eq!(json["active"], true);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_projects_by_client(pool: PgPool) {
    let f = common::seed(&pool).await;
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/clients",
        serde_json::json!({"name": "Fabrikam"}),
    )
    .await;
    let other_client = body_json(response).await["secondary_id"]
        .as_str()
        .unwrap()
        .to_string();
    common::create_project(&pool, &other_client, "Elsewhere").await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/projects?client_id={}", f.client_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let projects = json.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "Migration");
    assert_eq!(projects[0]["billable_default"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_project_returns_404(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        "/api/v1/projects/999999",
        serde_json::json!({"name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
