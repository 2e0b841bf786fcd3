//! Business logic on top of the data layer.
//! - Keeps web-framework concerns out of the core flows.
//! - Reuses entity definitions and validation from the `models` crate.
//! - Exposes clear error types for the HTTP layer to map.

pub mod auth;
