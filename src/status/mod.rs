//! Status-check log: an insert-only connectivity smoke test.

pub mod models;
pub mod store;

pub use models::{StatusCheck, StatusCheckCreate};
pub use store::{open_store, FileStatusStore, MemoryStatusStore, StatusStore, StoreError};
