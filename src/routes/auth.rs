use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, TokenResponse},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "autenticacao",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials or inactive account")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let Some(user) = state
        .user_service
        .authenticate(&payload.email, &payload.senha)
        .await?
    else {
        tracing::warn!(email = %payload.email, "Rejected login attempt");
        return Err(Error::Unauthorized("Email ou senha incorretos".to_string()));
    };

    let access_token = state.auth_service.issue_token(&user)?;
    tracing::info!(user_id = user.id, "Access token issued");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
