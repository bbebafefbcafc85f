use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Links a user to the branch they work at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i64,
    pub user_id: i64,
    pub agencia_id: i64,
    pub centro_custo: String,
    pub cargo: String,
}
