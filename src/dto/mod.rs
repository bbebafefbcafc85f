pub mod auth_dto;
pub mod organization_dto;
pub mod patch;
pub mod user_dto;
