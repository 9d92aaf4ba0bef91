//! Authentication module for sessions, credentials, and role gating.
//!
//! This module provides:
//! - `Session`: token-based session management with expiry, persisted to disk
//! - `CredentialStore`: secure OS-level credential storage via keyring
//! - `RoleGate`: the admin-only view guard (grant/deny/pending)
//!
//! Authentication itself is delegated to the backend's identity service;
//! nothing here validates passwords.

pub mod credentials;
pub mod gate;
pub mod session;

pub use credentials::CredentialStore;
pub use gate::{Access, RoleGate};
pub use session::{Session, SessionData};
