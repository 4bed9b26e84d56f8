//! Personal habit and activity log. Entries are dated, tagged and carry a numeric value; the
//! crate keeps them in a small JSON store and derives dashboard statistics from snapshots of it.
//!
//! - [store] persists the collection and handles export/import.
//! - [query] filters and sorts snapshots.
//! - [analytics] computes streaks, weekly goal rate and daily chart buckets.
//! - [session] wires a store to a clock and seeds an empty store with demo data.
//! - [cli] is a thin terminal front end over all of the above.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod fs;
pub mod query;
pub mod seed;
pub mod session;
pub mod store;
pub mod utils;
