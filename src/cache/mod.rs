//! Local JSON cache of campaign data.

pub mod manager;

pub use manager::{CacheAges, CacheManager, CachedData};
