use payoff_core::summary_service::{AccountSnapshot, SummaryService};
use payoff_domain::Account;

use crate::AdvisorError;

const INSTRUCTIONS: &str = "Please analyze my debt situation.
1. Identify which debt I should pay off first using the Avalanche method (highest interest rate first).
2. Provide a brief, encouraging summary of my financial health based on these numbers.
3. Give me 3 actionable bullet points to reduce my debt faster.

Keep the response concise, friendly, and formatted in Markdown.";

/// Renders the analysis request for `accounts` as captured at call time.
pub fn build_prompt(accounts: &[Account]) -> Result<String, AdvisorError> {
    let snapshots: Vec<AccountSnapshot> = SummaryService::snapshots(accounts);
    let portfolio = serde_json::to_string_pretty(&snapshots)?;
    Ok(format!(
        "I am a financial debt tracking application user. Here is my current liability portfolio:\n{}\n\n{}",
        portfolio, INSTRUCTIONS
    ))
}
