use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::dto::patch::Patch;
use crate::utils::validation::{check_length, into_result, reject_null};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRegionPayload {
    #[validate(length(min = 1, max = 255))]
    pub nome: String,
    #[validate(length(max = 500))]
    pub descricao: Option<String>,
}

/// `descricao: null` clears the description.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRegionPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nome: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub descricao: Patch<String>,
}

impl UpdateRegionPayload {
    pub fn is_empty(&self) -> bool {
        self.nome.is_absent() && self.descricao.is_absent()
    }
}

impl Validate for UpdateRegionPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        reject_null(&mut errors, "nome", &self.nome);
        check_length(&mut errors, "nome", self.nome.as_value(), 1, 255);
        check_length(&mut errors, "descricao", self.descricao.as_value(), 0, 500);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBranchPayload {
    #[validate(length(min = 1, max = 255))]
    pub nome: String,
    #[validate(length(min = 1, max = 255))]
    pub endereco: String,
    #[validate(length(min = 1, max = 50))]
    pub telefone: String,
    pub id_regional: i64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBranchPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nome: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub endereco: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub telefone: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub id_regional: Patch<i64>,
}

impl UpdateBranchPayload {
    pub fn is_empty(&self) -> bool {
        self.nome.is_absent()
            && self.endereco.is_absent()
            && self.telefone.is_absent()
            && self.id_regional.is_absent()
    }
}

impl Validate for UpdateBranchPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        reject_null(&mut errors, "nome", &self.nome);
        reject_null(&mut errors, "endereco", &self.endereco);
        reject_null(&mut errors, "telefone", &self.telefone);
        reject_null(&mut errors, "id_regional", &self.id_regional);
        check_length(&mut errors, "nome", self.nome.as_value(), 1, 255);
        check_length(&mut errors, "endereco", self.endereco.as_value(), 1, 255);
        check_length(&mut errors, "telefone", self.telefone.as_value(), 1, 50);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeePayload {
    pub user_id: i64,
    pub agencia_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub centro_custo: String,
    #[validate(length(min = 1, max = 100))]
    pub cargo: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEmployeePayload {
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub agencia_id: Patch<i64>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub centro_custo: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub cargo: Patch<String>,
}

impl UpdateEmployeePayload {
    pub fn is_empty(&self) -> bool {
        self.agencia_id.is_absent() && self.centro_custo.is_absent() && self.cargo.is_absent()
    }
}

impl Validate for UpdateEmployeePayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        reject_null(&mut errors, "agencia_id", &self.agencia_id);
        reject_null(&mut errors, "centro_custo", &self.centro_custo);
        reject_null(&mut errors, "cargo", &self.cargo);
        check_length(&mut errors, "centro_custo", self.centro_custo.as_value(), 1, 100);
        check_length(&mut errors, "cargo", self.cargo.as_value(), 1, 100);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegionListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BranchListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub id_regional: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub agencia_id: Option<i64>,
}

fn default_limit() -> i64 {
    100
}
