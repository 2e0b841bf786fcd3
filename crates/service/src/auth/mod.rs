//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login, and session-token verification live here; the HTTP
//! layer only translates inputs and errors.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use service::AuthService;
