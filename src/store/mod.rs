//! Persistence of the entry collection.
//!  - [entry_store::EntryStore] implements the collection operations over one key.
//!  - [entry_store::EntryStorage] abstracts where that key lives (a file, or memory).
//!  - The whole collection is stored as one JSON record, see [entities::DashboardRecord].

pub mod draft;
pub mod entities;
pub mod entry_store;
pub mod error;
pub mod id;
