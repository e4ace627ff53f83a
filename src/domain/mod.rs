//! Domain models and types for Custodia.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`UserId`])
//! - **Domain models** ([`PatientRecord`], [`User`], [`Actor`], [`AuditEntry`])
//! - **Error types** ([`CustodiaError`])
//! - **Result type alias** ([`Result`])
//!
//! Identifiers use the newtype pattern so a patient id can never be passed
//! where a user id is expected. All fallible operations return
//! [`Result<T, CustodiaError>`](Result).

pub mod audit;
pub mod errors;
pub mod ids;
pub mod patient;
pub mod result;
pub mod user;

// Re-export commonly used types for convenience
pub use audit::{AuditAction, AuditEntry};
pub use errors::CustodiaError;
pub use ids::{PatientId, UserId};
pub use patient::{
    PatientRecord, PatientUpdate, ARCHIVED_ANON_CONTACT, ARCHIVED_ANON_NAME, ARCHIVED_SENTINEL,
};
pub use result::Result;
pub use user::{Actor, Role, User};
