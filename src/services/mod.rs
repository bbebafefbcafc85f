pub mod auth_service;
pub mod organization_service;
pub mod user_service;
