//! Audit events and their synchronous delivery to the log service.
//!
//! Every successful authentication or registration produces exactly one
//! [`AuditEvent`]; the caller waits for [`AuditEmitter::emit`] before answering.

pub mod emitter;
pub mod event;

pub use emitter::{AuditEmitter, AuditError, HttpAuditEmitter};
pub use event::{AuditCategory, AuditEvent};
