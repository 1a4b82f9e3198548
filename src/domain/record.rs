//! Content record contract
//!
//! One trait pair describes all three content tables, replacing the
//! per-table copy-paste the pages grew out of. `ContentRecord` is the
//! descriptor every page-level component is generic over; `ReviewedRecord`
//! marks the two attachment-bearing tables.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::entity::Entity;
use super::review::Review;
use super::user::UserId;

/// Store-assigned row identifier, immutable after insert.
pub type RecordId = i64;

/// Ordering pushed down to the store on the initial fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOrder {
    pub column: &'static str,
    pub ascending: bool,
}

/// A user-owned content row: food review, pokemon review or note.
///
/// The associated constants are the entity-type descriptor (table,
/// optional attachment bucket); the methods expose the fields the list
/// state needs (owner scoping, search/sort text, timestamp).
pub trait ContentRecord:
    Entity<Id = RecordId> + Serialize + DeserializeOwned + PartialEq + std::fmt::Debug + 'static
{
    /// Table the records live in.
    const TABLE: &'static str;
    /// Bucket attachments upload to; `None` for text-only records.
    const BUCKET: Option<&'static str> = None;

    /// The user this record is scoped to.
    fn owner(&self) -> UserId;

    /// Primary user-entered text; drives search and the name sort.
    fn display_name(&self) -> &str;

    /// The stored timestamp, verbatim.
    fn timestamp_raw(&self) -> &str;

    /// Parsed timestamp for the date sort; `None` if unparseable.
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.timestamp_raw())
    }

    /// Ordering for the initial fetch. Notes load newest-first.
    fn load_order() -> Option<LoadOrder> {
        None
    }
}

/// Records carrying an image attachment and an optional nested review.
pub trait ReviewedRecord: ContentRecord {
    /// Build an unsaved row (id 0); the store assigns the real id.
    fn new_record(
        owner: UserId,
        name: &str,
        image_url: &str,
        upload_date: &str,
        review: &Review,
    ) -> Self;

    fn image_url(&self) -> &str;

    /// `None` when both review columns are null ("no review yet").
    fn review(&self) -> Option<Review>;

    /// Copy with edited fields; id, owner and timestamp are kept.
    fn with_edits(&self, name: &str, image_url: &str, review: &Review) -> Self;

    /// Copy with only the review replaced (the expanded panel's save).
    fn with_review(&self, review: &Review) -> Self {
        self.with_edits(self.display_name(), self.image_url(), review)
    }
}

/// Parse the timestamp formats the tables actually hold: RFC 3339
/// (notes) and bare `YYYY-MM-DD` (the date input on the review forms).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    None
}
