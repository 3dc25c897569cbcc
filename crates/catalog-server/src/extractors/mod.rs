//! Request extractors

pub mod auth;
