pub mod blog;
pub mod media;
pub mod usage_event;
pub mod user;
