// Allow dead code: Infrastructure methods for future use
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    Building, BudgetItem, CensusRecord, District, Profile, ResidentialSquare, StrategyItem,
    TeamMember,
};

/// Consider cache stale after 15 minutes.
/// Campaign data changes throughout the day, so the cache is mainly a
/// fast path for startup rather than a long-lived store.
const CACHE_STALE_MINUTES: i64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew (negative ages)
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(name);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    // ===== Representatives =====

    pub fn load_representatives(&self) -> Result<Option<CachedData<Vec<Profile>>>> {
        self.load("representatives")
    }

    pub fn save_representatives(&self, reps: &[Profile]) -> Result<()> {
        self.save("representatives", &reps)
    }

    // ===== Districts =====

    pub fn load_districts(&self) -> Result<Option<CachedData<Vec<District>>>> {
        self.load("districts")
    }

    pub fn save_districts(&self, districts: &[District]) -> Result<()> {
        self.save("districts", &districts)
    }

    // ===== Residential squares =====

    pub fn load_squares(&self) -> Result<Option<CachedData<Vec<ResidentialSquare>>>> {
        self.load("squares")
    }

    pub fn save_squares(&self, squares: &[ResidentialSquare]) -> Result<()> {
        self.save("squares", &squares)
    }

    // ===== Buildings =====

    pub fn load_buildings(&self) -> Result<Option<CachedData<Vec<Building>>>> {
        self.load("buildings")
    }

    pub fn save_buildings(&self, buildings: &[Building]) -> Result<()> {
        self.save("buildings", &buildings)
    }

    // ===== Census entries =====

    pub fn load_census(&self) -> Result<Option<CachedData<Vec<CensusRecord>>>> {
        self.load("census")
    }

    pub fn save_census(&self, records: &[CensusRecord]) -> Result<()> {
        self.save("census", &records)
    }

    // ===== Budget =====

    pub fn load_budget(&self) -> Result<Option<CachedData<Vec<BudgetItem>>>> {
        self.load("budget")
    }

    pub fn save_budget(&self, items: &[BudgetItem]) -> Result<()> {
        self.save("budget", &items)
    }

    // ===== Team =====

    pub fn load_team(&self) -> Result<Option<CachedData<Vec<TeamMember>>>> {
        self.load("team")
    }

    pub fn save_team(&self, members: &[TeamMember]) -> Result<()> {
        self.save("team", &members)
    }

    // ===== Strategy =====

    pub fn load_strategy(&self) -> Result<Option<CachedData<Vec<StrategyItem>>>> {
        self.load("strategy")
    }

    pub fn save_strategy(&self, items: &[StrategyItem]) -> Result<()> {
        self.save("strategy", &items)
    }

    // ===== Cache Age Information =====

    /// Helper to load cache and log errors without failing
    fn load_age<T>(
        &self,
        name: &str,
        loader: impl FnOnce() -> Result<Option<CachedData<T>>>,
    ) -> Option<String> {
        match loader() {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(cache = name, error = %e, "Failed to load cache for age display");
                None
            }
        }
    }

    pub fn get_cache_ages(&self) -> CacheAges {
        CacheAges {
            districts: self.load_age("districts", || self.load_districts()),
            squares: self.load_age("squares", || self.load_squares()),
            buildings: self.load_age("buildings", || self.load_buildings()),
            census: self.load_age("census", || self.load_census()),
        }
    }

    /// Helper to check staleness and log errors without failing
    fn is_cache_stale<T>(
        &self,
        name: &str,
        loader: impl FnOnce() -> Result<Option<CachedData<T>>>,
    ) -> bool {
        match loader() {
            Ok(Some(cached)) => cached.is_stale(),
            Ok(None) => true, // No cache = stale
            Err(e) => {
                debug!(cache = name, error = %e, "Failed to load cache for staleness check");
                true // Error reading = treat as stale
            }
        }
    }

    /// Check if any of the core cached data is stale
    pub fn any_stale(&self) -> bool {
        let stale_checks = [
            self.is_cache_stale("districts", || self.load_districts()),
            self.is_cache_stale("squares", || self.load_squares()),
            self.is_cache_stale("buildings", || self.load_buildings()),
            self.is_cache_stale("census", || self.load_census()),
        ];
        stale_checks.iter().any(|&stale| stale)
    }
}

#[derive(Debug, Default)]
pub struct CacheAges {
    pub districts: Option<String>,
    pub squares: Option<String>,
    pub buildings: Option<String>,
    pub census: Option<String>,
}

impl CacheAges {
    /// Returns the most recent update time across the core cache types
    pub fn last_updated(&self) -> String {
        let ages = [&self.census, &self.buildings, &self.districts, &self.squares];
        for a in ages.iter().copied().flatten() {
            return a.clone();
        }
        "never".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cached_data_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_cached_data_is_stale() {
        let fresh = CachedData::new(vec![1]);
        assert!(!fresh.is_stale());

        let mut old = CachedData::new(vec![1]);
        old.cached_at = Utc::now() - Duration::minutes(CACHE_STALE_MINUTES + 1);
        assert!(old.is_stale());
    }

    #[test]
    fn test_age_display_rounds_hours() {
        let mut cached = CachedData::new(vec![1]);
        cached.cached_at = Utc::now() - Duration::minutes(95);
        assert_eq!(cached.age_display(), "2h ago");
    }

    #[test]
    fn test_cache_ages_last_updated_with_values() {
        let ages = CacheAges {
            districts: Some("5m ago".to_string()),
            ..Default::default()
        };
        assert_eq!(ages.last_updated(), "5m ago");
    }

    #[test]
    fn test_cache_ages_last_updated_empty() {
        let ages = CacheAges::default();
        assert_eq!(ages.last_updated(), "never");
    }
}
