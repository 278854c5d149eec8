//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod garment;
pub mod token;
pub mod user;
