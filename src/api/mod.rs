//! REST API client module for the campaign backend.
//!
//! This module provides the `ApiClient` for talking to the backend's
//! generic row-level CRUD API (PostgREST conventions) and its session
//! service. Every table access goes through typed fetch/insert/update/delete
//! helpers built on a small query builder.
//!
//! Requests authenticate with the publishable API key plus a JWT bearer
//! token obtained through the password sign-in endpoint.

pub mod client;
pub mod error;
pub mod query;

pub use client::ApiClient;
pub use error::ApiError;
pub use query::Query;
