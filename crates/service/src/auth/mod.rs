//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration and credential verification live here, independent of the
//! HTTP layer; stores implement [`repository::CredentialStore`].

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
