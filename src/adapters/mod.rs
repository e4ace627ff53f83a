//! Collaborator contracts and their provided implementations
//!
//! The trait contracts in [`traits`] are the engine's only view of
//! persistence. [`memory`] backs tests and demos; [`jsonfile`] backs the
//! operator CLI.

pub mod jsonfile;
pub mod memory;
pub mod traits;

pub use jsonfile::{JsonAuditSink, JsonRecordStore};
pub use memory::MemoryStore;
pub use traits::{AuditSink, ConsentStore, KeyStore, RecordStore, UserStore};
