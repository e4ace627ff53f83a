//! Configuration loading and validation

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CustodiaConfig, EncryptionConfig, LoggingConfig, OperatorConfig,
    RetentionConfig, StoreConfig,
};
