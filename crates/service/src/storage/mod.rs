//! Storage abstractions for service layer
//!
//! Every resource persists as one pretty-printed JSON array file; the store
//! here owns the in-memory copy and the whole-file rewrite on mutation.

pub mod json_array_store;
