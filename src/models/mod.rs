pub mod branch;
pub mod employee;
pub mod region;
pub mod user;
