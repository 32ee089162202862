//! Service layer for the product catalog.
//! - `storage`: generic lock-guarded in-memory maps.
//! - `catalog`: the product domain and its store.
//! - `errors`: error type shared by every store operation.

pub mod errors;
pub mod storage;
pub mod catalog;
