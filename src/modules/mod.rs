pub mod admin;
pub mod auth;
pub mod courses;
pub mod health;
pub mod lessons;
