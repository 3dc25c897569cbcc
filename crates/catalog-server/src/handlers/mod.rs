//! HTTP handlers

pub mod auth;
pub mod health;
pub mod products;

pub use health::health;
