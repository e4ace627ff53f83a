//! Result type alias for Custodia operations

use crate::domain::errors::CustodiaError;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, CustodiaError>;
