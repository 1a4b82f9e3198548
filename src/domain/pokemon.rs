//! Pokemon review record
//!
//! Same wire shape as the food table, scoped to its own table and bucket.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::record::{ContentRecord, RecordId, ReviewedRecord};
use super::review::Review;
use super::user::UserId;

/// One row of the `pokemon_review` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonReview {
    pub id: RecordId,
    pub user_id: UserId,
    pub name: String,
    pub image_url: String,
    pub upload_date: String,
    pub review_content: Option<String>,
    pub review_rating: Option<u8>,
}

impl PokemonReview {
    pub fn new(
        owner: UserId,
        name: String,
        image_url: String,
        upload_date: String,
        review: &Review,
    ) -> Self {
        Self {
            id: 0,
            user_id: owner,
            name,
            image_url,
            upload_date,
            review_content: Some(review.content.clone()),
            review_rating: Some(review.rating),
        }
    }
}

impl Entity for PokemonReview {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl ContentRecord for PokemonReview {
    const TABLE: &'static str = "pokemon_review";
    const BUCKET: Option<&'static str> = Some("pokemonreview");

    fn owner(&self) -> UserId {
        self.user_id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn timestamp_raw(&self) -> &str {
        &self.upload_date
    }
}

impl ReviewedRecord for PokemonReview {
    fn new_record(
        owner: UserId,
        name: &str,
        image_url: &str,
        upload_date: &str,
        review: &Review,
    ) -> Self {
        Self::new(
            owner,
            name.to_string(),
            image_url.to_string(),
            upload_date.to_string(),
            review,
        )
    }

    fn image_url(&self) -> &str {
        &self.image_url
    }

    fn review(&self) -> Option<Review> {
        match (&self.review_content, self.review_rating) {
            (None, None) => None,
            (content, rating) => Some(Review {
                content: content.clone().unwrap_or_default(),
                rating: rating.unwrap_or(0),
            }),
        }
    }

    fn with_edits(&self, name: &str, image_url: &str, review: &Review) -> Self {
        Self {
            id: self.id,
            user_id: self.user_id,
            name: name.to_string(),
            image_url: image_url.to_string(),
            upload_date: self.upload_date.clone(),
            review_content: Some(review.content.clone()),
            review_rating: Some(review.rating),
        }
    }
}
