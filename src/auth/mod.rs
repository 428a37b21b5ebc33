pub mod admin;
pub mod handlers;
