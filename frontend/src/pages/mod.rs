pub mod auth;
pub mod not_found;
pub mod patients;
pub mod settings;
