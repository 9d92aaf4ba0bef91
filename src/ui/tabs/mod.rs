pub mod assignments;
pub mod budget;
pub mod census;
pub mod districts;
pub mod overview;
pub mod squares;
pub mod strategy;
pub mod team;
