//! Collection actions
//!
//! Local reconciliation is an explicit fold instead of ad hoc array
//! splicing: each successful remote mutation becomes exactly one action
//! applied to the in-memory collection.

use crate::domain::{ContentRecord, RecordId};

use super::view::SortKey;

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionAction<T: ContentRecord> {
    /// A fresh scoped fetch finished; replace wholesale.
    Loaded(Vec<T>),
    /// A new record was inserted remotely.
    Added(T),
    /// One record's fields changed remotely.
    Updated(T),
    /// One record was deleted remotely.
    Deleted(RecordId),
    /// The user picked a sort key.
    Sorted(SortKey),
}
