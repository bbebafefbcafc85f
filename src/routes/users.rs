use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::user_dto::{CreateUserPayload, UpdateUserPayload, UserListQuery, UserResponse},
    error::{Error, Result, EMAIL_TAKEN},
    AppState,
};

const USER_NOT_FOUND: &str = "Usuário não encontrado";

#[utoipa::path(
    get,
    path = "/api/users/",
    tag = "usuarios",
    params(UserListQuery),
    responses(
        (status = 200, description = "List of users", body = [UserResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse> {
    let users = state
        .user_service
        .list(query.skip, query.limit, query.apenas_ativos)
        .await?;
    let items: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "usuarios",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/users/",
    tag = "usuarios",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid payload or email already registered")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    // Fast path only: the unique constraint decides under concurrent signups.
    if state.user_service.find_by_email(&payload.email).await?.is_some() {
        return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
    }

    let user = state.user_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "usuarios",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid payload or email already registered"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    if let Some(email) = payload.email.as_value() {
        if let Some(existing) = state.user_service.find_by_email(email).await? {
            if existing.id != id {
                return Err(Error::Conflict(EMAIL_TAKEN.to_string()));
            }
        }
    }

    let user = state
        .user_service
        .update(id, payload)
        .await?
        .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "usuarios",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deactivated"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if !state.user_service.soft_delete(id).await? {
        return Err(Error::NotFound(USER_NOT_FOUND.to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
