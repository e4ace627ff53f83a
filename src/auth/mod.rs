//! Credential verification, login protocol, and the consent gate

pub mod consent;
pub mod login;
pub mod password;

pub use consent::ConsentGate;
pub use login::Authenticator;
pub use password::{hash_password, verify_password};
