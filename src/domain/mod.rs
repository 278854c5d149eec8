//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod garment;
pub mod password;
pub mod token;
pub mod user;

pub use garment::{Garment, GarmentFilter, GarmentRequest};
pub use password::Password;
pub use token::Token;
pub use user::{Principal, User};
