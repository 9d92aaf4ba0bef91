//! Data models for the campaign backend tables.
//!
//! Rows come back from the generic CRUD API as loosely-typed JSON; these
//! structs validate them once at the boundary, with explicit optional
//! fields, so the rest of the application works with typed data.
//!
//! - `Profile`, `Role`: representatives and admins
//! - `District`, `ResidentialSquare`, `Building`: field geography
//! - `CensusRecord`: one surveyed household
//! - `BudgetItem`, `TeamMember`, `StrategyItem`: flat admin records

pub mod budget;
pub mod building;
pub mod census;
pub mod district;
pub mod profile;
pub mod square;
pub mod strategy;
pub mod team;

use serde::{Deserialize, Deserializer};

/// The backend stores list columns as nullable arrays; treat an explicit
/// `null` the same as a missing field.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

pub use budget::{BudgetItem, NewBudgetItem};
pub use building::Building;
pub use census::{CensusRecord, NewCensusRecord};
pub use district::{District, NewDistrict};
pub use profile::{Profile, Role};
pub use square::ResidentialSquare;
pub use strategy::{NewStrategyItem, StrategyItem};
pub use team::{NewTeamMember, TeamMember};
