// Document model operations: reducer-style store, entry ids, sample data
// and JSON import/export.

pub mod handlers;
pub mod ids;
pub mod sample;
pub mod store;
pub mod transfer;
