pub mod auth;
pub mod blog;
pub mod diagnostics;
pub mod health;
pub mod media;
pub mod pages;
pub mod usage;
pub mod validate;
