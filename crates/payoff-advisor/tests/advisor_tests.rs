use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use payoff_advisor::{
    AdvisorError, DebtAdvisor, TextGenerator, EMPTY_RESPONSE_MESSAGE, FAILURE_MESSAGE,
    MISSING_KEY_MESSAGE,
};
use payoff_domain::seed_accounts;

enum Reply {
    Text(&'static str),
    Fail,
}

struct FakeGenerator {
    reply: Reply,
    calls: AtomicUsize,
    last_key: Mutex<Option<String>>,
    last_prompt: Mutex<Option<String>>,
}

impl FakeGenerator {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_key: Mutex::new(None),
            last_prompt: Mutex::new(None),
        })
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, AdvisorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(api_key.to_string());
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Fail => Err(AdvisorError::Api {
                status: 403,
                message: "API key not valid".into(),
            }),
        }
    }
}

#[tokio::test]
async fn missing_key_returns_instructions_without_calling_service() {
    let fake = FakeGenerator::new(Reply::Text("unused"));
    let advisor = DebtAdvisor::new(fake.clone(), None);

    let advice = advisor.get_advice(&seed_accounts(), None).await;
    assert_eq!(advice, MISSING_KEY_MESSAGE);
    let blank = advisor.get_advice(&seed_accounts(), Some("   ")).await;
    assert_eq!(blank, MISSING_KEY_MESSAGE);
    assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn successful_generation_is_returned_verbatim() {
    let fake = FakeGenerator::new(Reply::Text("## Pay Chase Sapphire first"));
    let advisor = DebtAdvisor::new(fake.clone(), None);

    let advice = advisor.get_advice(&seed_accounts(), Some("key-1")).await;
    assert_eq!(advice, "## Pay Chase Sapphire first");
    assert_eq!(fake.last_key.lock().unwrap().as_deref(), Some("key-1"));
    let prompt = fake.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Auto Loan"));
}

#[tokio::test]
async fn explicit_key_wins_over_default() {
    let fake = FakeGenerator::new(Reply::Text("ok"));
    let advisor = DebtAdvisor::new(fake.clone(), Some("env-key".into()));

    advisor.get_advice(&[], None).await;
    assert_eq!(fake.last_key.lock().unwrap().as_deref(), Some("env-key"));

    advisor.get_advice(&[], Some("stored-key")).await;
    assert_eq!(fake.last_key.lock().unwrap().as_deref(), Some("stored-key"));
}

#[tokio::test]
async fn service_failure_degrades_to_apology() {
    let fake = FakeGenerator::new(Reply::Fail);
    let advisor = DebtAdvisor::new(fake, Some("bad".into()));

    assert_eq!(advisor.get_advice(&seed_accounts(), None).await, FAILURE_MESSAGE);
}

#[tokio::test]
async fn blank_generation_uses_empty_message() {
    let fake = FakeGenerator::new(Reply::Text("  \n"));
    let advisor = DebtAdvisor::new(fake, Some("key".into()));

    assert_eq!(advisor.get_advice(&seed_accounts(), None).await, EMPTY_RESPONSE_MESSAGE);
}
