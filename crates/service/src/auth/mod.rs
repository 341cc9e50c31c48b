//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Login, password hashing and bearer-token checks for the household API.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
