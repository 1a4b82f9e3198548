//! Collection Layer
//!
//! The list view-controller behind each page: pure collection state
//! (sort, search, expansion) with an explicit action reducer, plus the
//! async controller that keeps it reconciled with the remote store.

mod action;
mod controller;
mod view;

pub use action::CollectionAction;
pub use controller::{ConfirmAction, ScopedCollection};
pub use view::{CollectionView, SortKey};
