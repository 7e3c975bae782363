//! Resource definitions for the purchasing hub.
//!
//! Each module holds the stored record, its create body, its patch body and the
//! `Entity` impl that ties validation and uniqueness rules to them.

pub mod errors;
pub mod entity;
pub mod validation;
pub mod id;
pub mod password;
pub mod status;

pub mod user;
pub mod product;
pub mod order;
pub mod store;
pub mod supplier;
pub mod campaign;

pub use entity::{Entity, UniqueKey};
pub use status::Status;
