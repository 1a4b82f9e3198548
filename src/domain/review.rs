//! Review value and rating bounds

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

/// The nested review on a food or pokemon record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub content: String,
    pub rating: u8,
}

/// Inclusive rating bounds.
///
/// The add and edit flows historically validate different ranges; both
/// are kept configurable instead of unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBounds {
    pub min: u8,
    pub max: u8,
}

impl RatingBounds {
    /// Range accepted when creating a record (add modals used 1..=5).
    pub const ADD: RatingBounds = RatingBounds { min: 1, max: 5 };
    /// Range accepted when editing a record (edit modals used 0..=5).
    pub const EDIT: RatingBounds = RatingBounds { min: 0, max: 5 };

    pub fn validate(&self, rating: u8) -> DomainResult<()> {
        if rating < self.min || rating > self.max {
            return Err(DomainError::InvalidInput(format!(
                "rating {} outside {}..={}",
                rating, self.min, self.max
            )));
        }
        Ok(())
    }
}
