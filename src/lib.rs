//! Dealership inventory reporting over in-memory CSV joins.
//!
//! Eleven normalized CSV tables (vehicles, dimensions, join tables) are
//! loaded into a [`data::store::DatasetStore`]; the functions in
//! [`data::engine`] reconstruct denormalized vehicle records and grouped
//! statistics from the snapshot on every call. [`report`] turns engine
//! output into a text or JSON dashboard.

pub mod data;
pub mod report;
