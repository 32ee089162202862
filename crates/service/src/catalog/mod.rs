//! Product catalog: the record types and the store that owns them.

pub mod domain;
pub mod store;

pub use domain::{Product, ProductInput};
pub use store::{InMemoryProductStore, ProductStore};
