//! Access policy: the role capability table and role-scoped row rendering

pub mod capability;
pub mod view;

pub use capability::{allows, authorize, Capability};
pub use view::{
    render_row, DisplayMode, PatientRow, Representation, CANNOT_DECRYPT_MARKER,
    NOT_ENCRYPTED_MARKER, REDACTED_MARKER,
};
