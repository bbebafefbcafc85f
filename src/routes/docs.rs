use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::auth_dto::{LoginPayload, TokenResponse};
use crate::dto::organization_dto::{
    CreateBranchPayload, CreateEmployeePayload, CreateRegionPayload, UpdateBranchPayload,
    UpdateEmployeePayload, UpdateRegionPayload,
};
use crate::dto::user_dto::{CreateUserPayload, UpdateUserPayload, UserResponse};
use crate::models::{branch::Branch, employee::Employee, region::Region, user::AccessLevel};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sistema de Cadastramento de Metas",
        description = "API para gerenciamento de metas e objetivos"
    ),
    paths(
        crate::routes::health::root,
        crate::routes::health::health,
        crate::routes::auth::login,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::organization::list_regions,
        crate::routes::organization::create_region,
        crate::routes::organization::get_region,
        crate::routes::organization::update_region,
        crate::routes::organization::delete_region,
        crate::routes::organization::list_branches,
        crate::routes::organization::create_branch,
        crate::routes::organization::get_branch,
        crate::routes::organization::update_branch,
        crate::routes::organization::delete_branch,
        crate::routes::organization::list_employees,
        crate::routes::organization::create_employee,
        crate::routes::organization::get_employee,
        crate::routes::organization::update_employee,
        crate::routes::organization::delete_employee,
    ),
    components(schemas(
        AccessLevel,
        CreateUserPayload,
        UpdateUserPayload,
        UserResponse,
        LoginPayload,
        TokenResponse,
        Region,
        CreateRegionPayload,
        UpdateRegionPayload,
        Branch,
        CreateBranchPayload,
        UpdateBranchPayload,
        Employee,
        CreateEmployeePayload,
        UpdateEmployeePayload
    )),
    tags(
        (name = "usuarios", description = "User management"),
        (name = "autenticacao", description = "Login"),
        (name = "regioes", description = "Regions"),
        (name = "agencias", description = "Branches"),
        (name = "colaboradores", description = "Employees")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
