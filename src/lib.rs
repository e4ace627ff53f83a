// Custodia - Patient Record Protection Engine
// Copyright (c) 2026 Custodia Contributors
// Licensed under the MIT License

//! # Custodia - Patient Record Protection Engine
//!
//! Custodia is the data-protection and access-control core for a patient
//! record dashboard: reversible field encryption, one-way anonymization,
//! role-scoped visibility, an append-only audit trail, and a retention
//! policy that irreversibly archives stale records.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Transforming** PII fields: anonymize tokens, contact masks, and
//!   authenticated field encryption under a process-wide key
//! - **Gating** every operation on a role capability table plus the actor's
//!   recorded consent
//! - **Auditing** every security-relevant action to an append-only trail
//! - **Retiring** records past the retention window with sentinel overwrites
//!
//! ## Architecture
//!
//! Custodia follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The protection engine, batch outcomes, and retention policy
//! - [`policy`] - Role capability table and role-scoped row rendering
//! - [`auth`] - Login protocol, password hashing, and the consent gate
//! - [`crypto`] - Anonymization, field cipher, keyring, and key persistence
//! - [`adapters`] - Storage collaborators (in-memory and file-backed)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use custodia::adapters::memory::MemoryStore;
//! use custodia::core::{ProtectionEngine, RetentionPolicy};
//! use custodia::crypto::keyring::Keyring;
//! use custodia::domain::ids::UserId;
//! use custodia::domain::user::{Actor, Role};
//! use custodia::policy::view::DisplayMode;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let keyring = Arc::new(Keyring::new());
//!     keyring.generate();
//!
//!     let engine = ProtectionEngine::new(
//!         store.clone(),
//!         store.clone(),
//!         store.clone(),
//!         store,
//!         keyring,
//!         RetentionPolicy::default(),
//!     );
//!
//!     let admin = Actor {
//!         id: UserId::new(1)?,
//!         username: "admin".to_string(),
//!         role: Role::Admin,
//!     };
//!     engine.record_consent(&admin, true).await?;
//!     engine
//!         .add_patient(&admin, "John Doe", "0300-555-1234", "Flu")
//!         .await?;
//!
//!     let rows = engine.view_patients(&admin, DisplayMode::Anonymized).await?;
//!     println!("{} row(s)", rows.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Custodia uses the [`domain::CustodiaError`] type for all errors:
//!
//! ```rust,no_run
//! use custodia::domain::CustodiaError;
//!
//! fn example() -> Result<(), CustodiaError> {
//!     let config = custodia::config::load_config("custodia.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod crypto;
pub mod domain;
pub mod logging;
pub mod policy;
