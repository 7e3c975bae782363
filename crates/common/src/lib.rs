//! Cross-cutting helpers shared by the service and server crates.

pub mod env;
pub mod metrics;
pub mod types;
pub mod utils;
