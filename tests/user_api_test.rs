use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use metas_backend::{
    build_router, config::Config, repositories::user_repository::InMemoryUserRepository,
    AppState,
};
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

fn setup_app() -> Router {
    let config = Config::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    let state = AppState::with_user_repository(
        pool,
        Arc::new(InMemoryUserRepository::new()),
        &config,
    )
    .expect("state");
    build_router(state, &config)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn signup(email: &str, senha: &str) -> JsonValue {
    json!({
        "email": email,
        "nome": "Ana Souza",
        "nivel_acesso": "cadastrador",
        "senha": senha,
    })
}

async fn login(app: &Router, email: &str, senha: &str) -> StatusCode {
    let (status, _) = send(
        app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": email, "senha": senha })),
    )
    .await;
    status
}

#[tokio::test]
async fn user_lifecycle_scenario() {
    let app = setup_app();

    let (status, a) = send(&app, "POST", "/api/users/", Some(signup("a@x.com", "secret1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(a["email"], "a@x.com");
    assert_eq!(a["ativo"], true);
    assert_eq!(a["nivel_acesso"], "cadastrador");
    assert!(a["updated_at"].is_null());
    assert!(a.get("senha_hash").is_none());
    let a_id = a["id"].as_i64().unwrap();

    let (status, body) =
        send(&app, "POST", "/api/users/", Some(signup("a@x.com", "secret2"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email já cadastrado");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", a_id),
        Some(json!({ "email": "b@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "b@x.com");
    assert_eq!(updated["nome"], "Ana Souza");
    assert!(!updated["updated_at"].is_null());

    let (status, c) = send(&app, "POST", "/api/users/", Some(signup("a@x.com", "secret3"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(c["id"], a["id"]);

    let (status, body) = send(&app, "DELETE", &format!("/api/users/{}", a_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, fetched) = send(&app, "GET", &format!("/api/users/{}", a_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["ativo"], false);

    assert_eq!(login(&app, "b@x.com", "secret1").await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_filters_inactive_users_by_default() {
    let app = setup_app();
    for email in ["a@x.com", "b@x.com", "c@x.com"] {
        let (status, _) = send(&app, "POST", "/api/users", Some(signup(email, "secret1"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = send(&app, "DELETE", "/api/users/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, active) = send(&app, "GET", "/api/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|u| u["ativo"] == true));

    let (_, everyone) = send(&app, "GET", "/api/users/?apenas_ativos=false", None).await;
    assert_eq!(everyone.as_array().unwrap().len(), 3);

    let (_, page) = send(&app, "GET", "/api/users/?apenas_ativos=false&skip=1&limit=1", None).await;
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["email"], "b@x.com");
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let app = setup_app();

    let (status, body) = send(&app, "POST", "/api/users/", Some(signup("a@x.com", "12345"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("senha"));

    let (status, _) = send(&app, "POST", "/api/users/", Some(signup("nope", "secret1"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, users) = send(&app, "GET", "/api/users/?apenas_ativos=false", None).await;
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_rules() {
    let app = setup_app();
    send(&app, "POST", "/api/users/", Some(signup("a@x.com", "secret1"))).await;
    send(&app, "POST", "/api/users/", Some(signup("b@x.com", "secret1"))).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({ "email": "b@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, same) = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({ "email": "a@x.com", "nivel_acesso": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(same["nivel_acesso"], "admin");

    let (status, _) = send(&app, "PUT", "/api/users/1", Some(json!({ "nome": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/api/users/1", Some(json!({ "senha": "123" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/api/users/99", Some(json!({ "nome": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, unchanged) = send(&app, "PUT", "/api/users/2", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["email"], "b@x.com");
    assert!(unchanged["updated_at"].is_null());
}

#[tokio::test]
async fn password_change_and_reactivation_drive_login() {
    let app = setup_app();
    send(&app, "POST", "/api/users/", Some(signup("a@x.com", "secret1"))).await;

    let (status, token) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "a@x.com", "senha": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "bearer");
    assert!(!token["access_token"].as_str().unwrap().is_empty());

    send(&app, "PUT", "/api/users/1", Some(json!({ "senha": "secret2" }))).await;
    assert_eq!(login(&app, "a@x.com", "secret1").await, StatusCode::UNAUTHORIZED);
    assert_eq!(login(&app, "a@x.com", "secret2").await, StatusCode::OK);

    send(&app, "DELETE", "/api/users/1", None).await;
    assert_eq!(login(&app, "a@x.com", "secret2").await, StatusCode::UNAUTHORIZED);

    send(&app, "PUT", "/api/users/1", Some(json!({ "ativo": true }))).await;
    assert_eq!(login(&app, "a@x.com", "secret2").await, StatusCode::OK);
}

#[tokio::test]
async fn missing_users_are_not_found() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/api/users/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Usuário não encontrado");

    let (status, _) = send(&app, "DELETE", "/api/users/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn service_endpoints_respond() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");

    let (status, doc) = send(&app, "GET", "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/users/{id}"].is_object());
    assert!(doc["paths"]["/api/regions/{id}"]["put"].is_object());
    assert!(doc["paths"]["/api/branches"]["get"]["parameters"].is_array());
    assert!(doc["paths"]["/api/employees"]["post"].is_object());
    assert!(doc["components"]["schemas"]["UpdateRegionPayload"]["properties"]["descricao"].is_object());
}

#[tokio::test]
async fn wildcard_cors_origin_is_accepted() {
    let config = Config {
        cors_origins: "*".to_string(),
        ..Config::default()
    };
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    let state = AppState::with_user_repository(
        pool,
        Arc::new(InMemoryUserRepository::new()),
        &config,
    )
    .expect("state");
    let app = build_router(state, &config);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://painel.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "http://painel.example.com"
    );
}
