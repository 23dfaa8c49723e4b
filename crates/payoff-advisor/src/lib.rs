//! payoff-advisor
//!
//! Natural-language debt analysis from an external text-generation service.
//! Every failure degrades to a fixed message; callers always get a string.

pub mod advisor;
pub mod error;
pub mod prompt;
pub mod provider;

pub use advisor::{DebtAdvisor, EMPTY_RESPONSE_MESSAGE, FAILURE_MESSAGE, MISSING_KEY_MESSAGE};
pub use error::AdvisorError;
pub use prompt::build_prompt;
pub use provider::{GeminiClient, TextGenerator};
