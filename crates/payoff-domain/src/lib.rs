//! payoff-domain
//!
//! Pure domain models (Account, BalanceEntry, Portfolio) and the seed dataset.
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod account;
pub mod balance;
pub mod common;
pub mod portfolio;
pub mod seed;

pub use account::*;
pub use balance::*;
pub use common::*;
pub use portfolio::*;
pub use seed::*;
