pub mod auth;
pub mod blog;
pub mod diagnostics;
pub mod shared;
pub mod usage;
