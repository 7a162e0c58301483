//! Domain models module
//!
//! All aggregate rows and value records are consolidated in models.rs;
//! none of them carry storage identity, that belongs to the caller.

mod models;

pub use models::*;
