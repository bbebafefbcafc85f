pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::repositories::user_repository::{PgUserRepository, UserRepository};
use crate::services::{
    auth_service::AuthService, organization_service::OrganizationService,
    user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub auth_service: AuthService,
    pub organization_service: OrganizationService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> error::Result<Self> {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        Self::with_user_repository(pool, users, config)
    }

    /// State whose user slice runs on `users` instead of the pool.
    pub fn with_user_repository(
        pool: PgPool,
        users: Arc<dyn UserRepository>,
        config: &Config,
    ) -> error::Result<Self> {
        Ok(Self {
            user_service: UserService::new(users),
            auth_service: AuthService::from_config(config)?,
            organization_service: OrganizationService::new(pool),
        })
    }
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let user_api = Router::new()
        .route(
            "/api/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/api/users/",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/api/users/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route("/api/auth/login", post(routes::auth::login));

    let organization_api = Router::new()
        .route(
            "/api/regions",
            get(routes::organization::list_regions).post(routes::organization::create_region),
        )
        .route(
            "/api/regions/:id",
            get(routes::organization::get_region)
                .put(routes::organization::update_region)
                .delete(routes::organization::delete_region),
        )
        .route(
            "/api/branches",
            get(routes::organization::list_branches).post(routes::organization::create_branch),
        )
        .route(
            "/api/branches/:id",
            get(routes::organization::get_branch)
                .put(routes::organization::update_branch)
                .delete(routes::organization::delete_branch),
        )
        .route(
            "/api/employees",
            get(routes::organization::list_employees)
                .post(routes::organization::create_employee),
        )
        .route(
            "/api/employees/:id",
            get(routes::organization::get_employee)
                .put(routes::organization::update_employee)
                .delete(routes::organization::delete_employee),
        );

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        .route("/api/openapi.json", get(routes::docs::openapi_json))
        .merge(user_api)
        .merge(organization_api)
        .with_state(state)
        .layer(middleware::cors::cors_layer(&config.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}
