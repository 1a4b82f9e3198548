//! Pokemon review commands

use crate::domain::{DomainError, DomainResult, PokemonReview, RecordId, Review};
use crate::repository::RecordRepository;
use crate::AppState;

use super::review_cmd::{self, NewReviewedRecord, ReviewedRecordEdit};

pub async fn list_pokemon(state: &AppState) -> DomainResult<Vec<PokemonReview>> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    state.repo::<PokemonReview>().list(owner).await
}

pub async fn submit_pokemon(
    state: &AppState,
    input: NewReviewedRecord,
) -> DomainResult<Option<PokemonReview>> {
    review_cmd::submit_reviewed(state, input).await
}

pub async fn update_pokemon(
    state: &AppState,
    review: &PokemonReview,
    edit: ReviewedRecordEdit,
) -> DomainResult<Option<PokemonReview>> {
    review_cmd::update_reviewed(state, review, edit).await
}

pub async fn set_pokemon_review(
    state: &AppState,
    record: &PokemonReview,
    review: Review,
) -> DomainResult<Option<PokemonReview>> {
    review_cmd::set_review(state, record, review).await
}

pub async fn delete_pokemon(state: &AppState, id: RecordId) -> DomainResult<u64> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    state.repo::<PokemonReview>().delete(owner, id).await
}
