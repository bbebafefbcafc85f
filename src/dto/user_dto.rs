use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateEmail, ValidationErrors};

use crate::dto::patch::Patch;
use crate::models::user::{AccessLevel, User};
use crate::utils::validation::{into_result, reject_null, validation_error};

pub const MIN_PASSWORD_LENGTH: usize = 6;
const PASSWORD_TOO_SHORT: &str = "Senha deve ter no mínimo 6 caracteres";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    pub nome: String,
    pub nivel_acesso: AccessLevel,
    #[validate(length(min = 6, message = "Senha deve ter no mínimo 6 caracteres"))]
    pub senha: String,
}

/// Partial update. Only fields present in the body are changed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nome: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub senha: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<AccessLevel>)]
    pub nivel_acesso: Patch<AccessLevel>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub ativo: Patch<bool>,
}

impl UpdateUserPayload {
    pub fn is_empty(&self) -> bool {
        self.email.is_absent()
            && self.nome.is_absent()
            && self.senha.is_absent()
            && self.nivel_acesso.is_absent()
            && self.ativo.is_absent()
    }
}

impl Validate for UpdateUserPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        reject_null(&mut errors, "email", &self.email);
        reject_null(&mut errors, "nome", &self.nome);
        reject_null(&mut errors, "senha", &self.senha);
        reject_null(&mut errors, "nivel_acesso", &self.nivel_acesso);
        reject_null(&mut errors, "ativo", &self.ativo);

        if let Some(email) = self.email.as_value() {
            if !email.validate_email() {
                errors.add("email", validation_error("email", "Email inválido"));
            }
        }
        if let Some(senha) = self.senha.as_value() {
            if senha.chars().count() < MIN_PASSWORD_LENGTH {
                errors.add("senha", validation_error("length", PASSWORD_TOO_SHORT));
            }
        }

        into_result(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub nome: String,
    pub nivel_acesso: AccessLevel,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: value.email,
            nome: value.name,
            nivel_acesso: value.access_level,
            ativo: value.active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_active_only")]
    pub apenas_ativos: bool,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            apenas_ativos: default_active_only(),
        }
    }
}

fn default_limit() -> i64 {
    100
}

fn default_active_only() -> bool {
    true
}
