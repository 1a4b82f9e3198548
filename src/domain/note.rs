//! Markdown note record

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::record::{ContentRecord, LoadOrder, RecordId};
use super::user::UserId;

/// One row of the `notes` table. The content is raw markdown; rendering
/// is the embedding application's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub user_id: UserId,
    pub content: String,
    /// RFC 3339, stamped at creation
    pub date: String,
}

impl Note {
    pub fn new(owner: UserId, content: String, date: String) -> Self {
        Self {
            id: 0,
            user_id: owner,
            content,
            date,
        }
    }
}

impl Entity for Note {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl ContentRecord for Note {
    const TABLE: &'static str = "notes";

    fn owner(&self) -> UserId {
        self.user_id
    }

    fn display_name(&self) -> &str {
        &self.content
    }

    fn timestamp_raw(&self) -> &str {
        &self.date
    }

    // Notes present newest-first
    fn load_order() -> Option<LoadOrder> {
        Some(LoadOrder {
            column: "date",
            ascending: false,
        })
    }
}
