//! Shared formatting helpers for the UI layer.

pub mod format;

pub use format::{format_date, format_money, format_optional, format_phone, truncate_string};
