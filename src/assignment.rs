//! Building assignment rules.
//!
//! Representatives cover at most [`MAX_BUILDINGS_PER_REP`] buildings at a
//! time. A batch assignment is admitted only when the representative's
//! current holdings plus the whole batch stay within that cap; otherwise
//! the entire batch is rejected and nothing is assigned.

use thiserror::Error;

/// Maximum number of buildings a single representative may hold.
pub const MAX_BUILDINGS_PER_REP: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error(
        "{name} already has {current} of {max} buildings; assigning {requested} more would exceed the limit"
    )]
    CapacityExceeded {
        name: String,
        current: usize,
        requested: usize,
        max: usize,
    },

    #[error("No buildings selected")]
    EmptySelection,

    #[error("No representative selected")]
    NoRepresentative,
}

/// Check that a representative can take on `requested` more buildings.
/// Succeeds iff `current + requested <= MAX_BUILDINGS_PER_REP`.
pub fn check_capacity(name: &str, current: usize, requested: usize) -> Result<(), AssignmentError> {
    if requested == 0 {
        return Err(AssignmentError::EmptySelection);
    }
    if current + requested > MAX_BUILDINGS_PER_REP {
        return Err(AssignmentError::CapacityExceeded {
            name: name.to_string(),
            current,
            requested,
            max: MAX_BUILDINGS_PER_REP,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_within_capacity_is_accepted() {
        assert!(check_capacity("Amina Benali", 4, 2).is_ok());
    }

    #[test]
    fn test_batch_filling_to_exact_capacity_is_accepted() {
        assert!(check_capacity("Amina Benali", 0, MAX_BUILDINGS_PER_REP).is_ok());
        assert!(check_capacity("Amina Benali", 5, 1).is_ok());
    }

    #[test]
    fn test_batch_over_capacity_is_rejected_whole() {
        let err = check_capacity("Amina Benali", 5, 2).unwrap_err();
        match &err {
            AssignmentError::CapacityExceeded {
                name,
                current,
                requested,
                max,
            } => {
                assert_eq!(name, "Amina Benali");
                assert_eq!(*current, 5);
                assert_eq!(*requested, 2);
                assert_eq!(*max, MAX_BUILDINGS_PER_REP);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("Amina Benali"));
        assert!(message.contains('5'));
    }

    #[test]
    fn test_full_representative_rejects_single_building() {
        assert!(check_capacity("Karim", MAX_BUILDINGS_PER_REP, 1).is_err());
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        assert_eq!(
            check_capacity("Karim", 0, 0),
            Err(AssignmentError::EmptySelection)
        );
    }
}
