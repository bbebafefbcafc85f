use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::organization_dto::{
        BranchListQuery, CreateBranchPayload, CreateEmployeePayload, CreateRegionPayload,
        EmployeeListQuery, RegionListQuery, UpdateBranchPayload, UpdateEmployeePayload,
        UpdateRegionPayload,
    },
    error::Result,
    models::{branch::Branch, employee::Employee, region::Region},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/regions",
    tag = "regioes",
    params(RegionListQuery),
    responses(
        (status = 200, description = "List of regions", body = [Region])
    )
)]
#[axum::debug_handler]
pub async fn list_regions(
    State(state): State<AppState>,
    Query(query): Query<RegionListQuery>,
) -> Result<impl IntoResponse> {
    let items = state.organization_service.list_regions(query).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/regions",
    tag = "regioes",
    request_body = CreateRegionPayload,
    responses(
        (status = 201, description = "Region created", body = Region),
        (status = 400, description = "Invalid payload or name already registered")
    )
)]
#[axum::debug_handler]
pub async fn create_region(
    State(state): State<AppState>,
    Json(payload): Json<CreateRegionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let region = state.organization_service.create_region(payload).await?;
    Ok((StatusCode::CREATED, Json(region)))
}

#[utoipa::path(
    get,
    path = "/api/regions/{id}",
    tag = "regioes",
    params(
        ("id" = i64, Path, description = "Region ID")
    ),
    responses(
        (status = 200, description = "Region found", body = Region),
        (status = 404, description = "Region not found")
    )
)]
#[axum::debug_handler]
pub async fn get_region(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let region = state.organization_service.get_region(id).await?;
    Ok(Json(region))
}

#[utoipa::path(
    put,
    path = "/api/regions/{id}",
    tag = "regioes",
    params(
        ("id" = i64, Path, description = "Region ID")
    ),
    request_body = UpdateRegionPayload,
    responses(
        (status = 200, description = "Region updated", body = Region),
        (status = 400, description = "Invalid payload or name already registered"),
        (status = 404, description = "Region not found")
    )
)]
#[axum::debug_handler]
pub async fn update_region(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRegionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let region = state.organization_service.update_region(id, payload).await?;
    Ok(Json(region))
}

#[utoipa::path(
    delete,
    path = "/api/regions/{id}",
    tag = "regioes",
    params(
        ("id" = i64, Path, description = "Region ID")
    ),
    responses(
        (status = 204, description = "Region deleted"),
        (status = 400, description = "Region still has branches"),
        (status = 404, description = "Region not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_region(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.organization_service.delete_region(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/branches",
    tag = "agencias",
    params(BranchListQuery),
    responses(
        (status = 200, description = "List of branches", body = [Branch])
    )
)]
#[axum::debug_handler]
pub async fn list_branches(
    State(state): State<AppState>,
    Query(query): Query<BranchListQuery>,
) -> Result<impl IntoResponse> {
    let items = state.organization_service.list_branches(query).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/branches",
    tag = "agencias",
    request_body = CreateBranchPayload,
    responses(
        (status = 201, description = "Branch created", body = Branch),
        (status = 400, description = "Invalid payload, unknown region or name already registered")
    )
)]
#[axum::debug_handler]
pub async fn create_branch(
    State(state): State<AppState>,
    Json(payload): Json<CreateBranchPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let branch = state.organization_service.create_branch(payload).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

#[utoipa::path(
    get,
    path = "/api/branches/{id}",
    tag = "agencias",
    params(
        ("id" = i64, Path, description = "Branch ID")
    ),
    responses(
        (status = 200, description = "Branch found", body = Branch),
        (status = 404, description = "Branch not found")
    )
)]
#[axum::debug_handler]
pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let branch = state.organization_service.get_branch(id).await?;
    Ok(Json(branch))
}

#[utoipa::path(
    put,
    path = "/api/branches/{id}",
    tag = "agencias",
    params(
        ("id" = i64, Path, description = "Branch ID")
    ),
    request_body = UpdateBranchPayload,
    responses(
        (status = 200, description = "Branch updated", body = Branch),
        (status = 400, description = "Invalid payload, unknown region or name already registered"),
        (status = 404, description = "Branch not found")
    )
)]
#[axum::debug_handler]
pub async fn update_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBranchPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let branch = state.organization_service.update_branch(id, payload).await?;
    Ok(Json(branch))
}

#[utoipa::path(
    delete,
    path = "/api/branches/{id}",
    tag = "agencias",
    params(
        ("id" = i64, Path, description = "Branch ID")
    ),
    responses(
        (status = 204, description = "Branch deleted"),
        (status = 400, description = "Branch still has employees"),
        (status = 404, description = "Branch not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_branch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.organization_service.delete_branch(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "colaboradores",
    params(EmployeeListQuery),
    responses(
        (status = 200, description = "List of employees", body = [Employee])
    )
)]
#[axum::debug_handler]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<impl IntoResponse> {
    let items = state.organization_service.list_employees(query).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "colaboradores",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid payload, unknown user or branch, or user already linked")
    )
)]
#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let employee = state.organization_service.create_employee(payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "colaboradores",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    )
)]
#[axum::debug_handler]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let employee = state.organization_service.get_employee(id).await?;
    Ok(Json(employee))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "colaboradores",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid payload or unknown branch"),
        (status = 404, description = "Employee not found")
    )
)]
#[axum::debug_handler]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let employee = state
        .organization_service
        .update_employee(id, payload)
        .await?;
    Ok(Json(employee))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "colaboradores",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.organization_service.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
