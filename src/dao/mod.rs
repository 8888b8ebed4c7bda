/// Database model definitions.
pub mod models;
/// Room collection storage and retrieval operations.
pub mod room_store;
/// Storage abstraction layer for datastore operations.
pub mod storage;
