//! Configuration loading and schema definitions
//!
//! The fallback coordinate lives here and nowhere else; every consumer reads
//! it from [`LocationConfig`].

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
