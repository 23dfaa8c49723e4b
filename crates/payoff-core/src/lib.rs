//! payoff-core
//!
//! Business logic and services for the liability tracker.
//! Depends on payoff-domain. No CLI, no terminal I/O; persistence goes
//! through the [`storage::KeyValueStore`] abstraction.

pub mod account_service;
pub mod error;
pub mod storage;
pub mod summary_service;
pub mod timeline_service;
pub mod tracker;

pub use account_service::*;
pub use error::CoreError;
pub use summary_service::*;
pub use timeline_service::*;
pub use tracker::Tracker;

#[cfg(test)]
mod tests;
