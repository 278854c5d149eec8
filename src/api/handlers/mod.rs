//! HTTP request handlers.

pub mod auth_handler;
pub mod garment_handler;

pub use auth_handler::auth_routes;
pub use garment_handler::{garment_read_routes, garment_write_routes};
