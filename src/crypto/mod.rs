//! Transform library: anonymization, masking, and reversible encryption
//!
//! Pure field transforms plus the shared key holder. The only state in this
//! module is the optionally loaded symmetric key; without one the system
//! degrades to anonymization/masking-only mode and encryption fails closed.

pub mod anonymize;
pub mod cipher;
pub mod keyring;
pub mod keystore;

pub use anonymize::{anonymize_name, mask_contact};
pub use cipher::{FieldCipher, NONCE_SIZE};
pub use keyring::{Keyring, KEY_SIZE};
pub use keystore::FileKeyStore;
