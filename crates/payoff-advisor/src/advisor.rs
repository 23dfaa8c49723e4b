use std::sync::Arc;

use tracing::{error, info};

use payoff_domain::Account;

use crate::{build_prompt, AdvisorError, TextGenerator};

pub const MISSING_KEY_MESSAGE: &str = "To use the AI Debt Advisor, set your Google Gemini API Key with `key set <value>`. You can get one for free at aistudio.google.com.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, I encountered an error while analyzing your data. Please check your API Key and try again.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "No analysis could be generated at this time.";

/// Produces debt advice for a set of accounts. Never fails: missing
/// credentials and service errors come back as fixed messages.
#[derive(Clone)]
pub struct DebtAdvisor {
    generator: Arc<dyn TextGenerator>,
    default_key: Option<String>,
}

impl DebtAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>, default_key: Option<String>) -> Self {
        Self {
            generator,
            default_key: default_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// The explicit credential wins over the process default.
    pub fn resolve_key<'a>(&'a self, credential: Option<&'a str>) -> Option<&'a str> {
        credential
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or(self.default_key.as_deref())
    }

    pub async fn get_advice(&self, accounts: &[Account], credential: Option<&str>) -> String {
        let Some(api_key) = self.resolve_key(credential) else {
            info!("advice requested without an API key");
            return MISSING_KEY_MESSAGE.to_string();
        };

        match self.request(api_key, accounts).await {
            Ok(text) => text,
            Err(AdvisorError::EmptyResponse) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(err) => {
                error!(error = %err, "debt analysis failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }

    async fn request(&self, api_key: &str, accounts: &[Account]) -> Result<String, AdvisorError> {
        let prompt = build_prompt(accounts)?;
        let text = self.generator.generate(api_key, &prompt).await?;
        if text.trim().is_empty() {
            return Err(AdvisorError::EmptyResponse);
        }
        Ok(text)
    }
}
