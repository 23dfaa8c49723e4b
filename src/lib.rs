//! Payoff tracks personal liabilities over time and ranks credit cards for
//! avalanche-style repayment. This crate hosts the interactive shell; the
//! model, services, storage and advisor live in the `payoff-*` crates.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("payoff tracing initialized");
    });
}
