//! Catalog Types - Pure type definitions
//!
//! This crate contains only pure data types with no async runtime
//! dependencies, so it can be shared by the server, tests, and any
//! future client code.

pub mod product;
pub mod user;

pub use product::*;
pub use user::*;
