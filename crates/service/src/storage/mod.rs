//! Storage abstractions for service layer
//!
//! Contains reusable in-memory stores so each domain store only has to
//! describe its records, not its locking.

pub mod map_store;
