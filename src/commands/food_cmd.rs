//! Food review commands

use crate::domain::{DomainError, DomainResult, FoodReview, RecordId, Review};
use crate::repository::RecordRepository;
use crate::AppState;

use super::review_cmd::{self, NewReviewedRecord, ReviewedRecordEdit};

/// Fetch the signed-in user's food reviews.
pub async fn list_food(state: &AppState) -> DomainResult<Vec<FoodReview>> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    state.repo::<FoodReview>().list(owner).await
}

/// Upload the photo and insert the review row.
pub async fn submit_food(
    state: &AppState,
    input: NewReviewedRecord,
) -> DomainResult<Option<FoodReview>> {
    review_cmd::submit_reviewed(state, input).await
}

/// Edit an existing food review, optionally replacing the photo.
pub async fn update_food(
    state: &AppState,
    photo: &FoodReview,
    edit: ReviewedRecordEdit,
) -> DomainResult<Option<FoodReview>> {
    review_cmd::update_reviewed(state, photo, edit).await
}

/// Save just the review from the expanded panel.
pub async fn set_food_review(
    state: &AppState,
    photo: &FoodReview,
    review: Review,
) -> DomainResult<Option<FoodReview>> {
    review_cmd::set_review(state, photo, review).await
}

/// Delete one food review, scoped to the signed-in user.
pub async fn delete_food(state: &AppState, id: RecordId) -> DomainResult<u64> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    state.repo::<FoodReview>().delete(owner, id).await
}
