//! Service layer for the authentication service.
//! - `auth`: credential verification and registration on top of a credential store.
//! - `audit`: audit events and their synchronous delivery to the log service.

pub mod audit;
pub mod auth;
