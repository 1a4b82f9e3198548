//! Commands Layer
//!
//! Async operation handlers bridging the pages to the stores.

mod account_cmd;
mod attachment;
mod food_cmd;
mod note_cmd;
mod pokemon_cmd;
mod review_cmd;

#[cfg(test)]
mod tests;

pub use account_cmd::*;
pub use attachment::FileUpload;
pub use food_cmd::*;
pub use note_cmd::*;
pub use pokemon_cmd::*;
pub use review_cmd::{
    set_review, submit_reviewed, update_reviewed, NewReviewedRecord, ReviewedRecordEdit,
};
