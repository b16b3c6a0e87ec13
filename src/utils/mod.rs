pub mod auth;
pub mod password;
pub mod reorder;
pub mod time;
