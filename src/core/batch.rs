//! Outcome types for batch operations
//!
//! Batch transforms (anonymize-all, encrypt-all) and the retention sweep
//! never abort on a single record's failure. Failures are collected per
//! record and reported alongside the success count.

use crate::domain::ids::PatientId;

/// Result of a batch transform over all records
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Records successfully transformed
    pub succeeded: usize,
    /// Records skipped (already archived)
    pub skipped: usize,
    /// Per-record failures
    pub errors: Vec<(PatientId, String)>,
}

impl BatchOutcome {
    /// Creates an empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one success
    pub fn add_success(&mut self) {
        self.succeeded += 1;
    }

    /// Counts one skipped record
    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Records one per-record failure
    pub fn add_failure(&mut self, id: PatientId, error: String) {
        self.errors.push((id, error));
    }

    /// True when no record failed
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of a retention sweep
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    /// Records archived by this sweep
    pub archived: usize,
    /// Records left alone (within the window or already archived)
    pub skipped: usize,
    /// Per-record failures
    pub errors: Vec<(PatientId, String)>,
}

impl SweepOutcome {
    /// True when no record failed
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_outcome_accumulates() {
        let mut outcome = BatchOutcome::new();
        outcome.add_success();
        outcome.add_success();
        outcome.add_skipped();
        outcome.add_failure(PatientId::new(7).unwrap(), "boom".to_string());

        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(!outcome.is_clean());
    }

    #[test]
    fn test_empty_outcomes_are_clean() {
        assert!(BatchOutcome::new().is_clean());
        assert!(SweepOutcome::default().is_clean());
    }
}
