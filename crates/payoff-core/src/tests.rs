use chrono::NaiveDate;

use crate::{
    account_service::NewAccount,
    storage::{BackupInfo, KeyValueStore, MemoryStore, ACCOUNTS_KEY, CREDENTIAL_KEY},
    summary_service::SummaryService,
    tracker::Tracker,
    CoreError,
};
use payoff_domain::{AccountType, Portfolio};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_tracker() -> Tracker {
    Tracker::open(Box::new(MemoryStore::new()))
}

fn card(name: &str, rate: f64, balance: f64) -> NewAccount {
    NewAccount::new(name, AccountType::CreditCard, rate, balance, day(2024, 1, 1))
}

/// Reads like a memory store but rejects every write.
#[derive(Default)]
struct ReadOnlyStore {
    inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("store is read-only".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("store is read-only".into()))
    }

    fn backup(&self, key: &str, note: Option<&str>) -> Result<Option<BackupInfo>, CoreError> {
        self.inner.backup(key, note)
    }

    fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError> {
        self.inner.list_backups(key)
    }

    fn restore_backup(&self, backup: &BackupInfo) -> Result<(), CoreError> {
        self.inner.restore_backup(backup)
    }
}

#[test]
fn seed_scenario_totals() {
    let tracker = seeded_tracker();
    let accounts = tracker.accounts();

    let order = SummaryService::avalanche_order(accounts);
    assert_eq!(order.len(), 1);
    assert_eq!(order[0].account.name, "Chase Sapphire");
    assert!(order[0].is_priority());

    assert_eq!(SummaryService::total_liabilities(accounts), 28700.0);
    assert_eq!(SummaryService::credit_card_debt(accounts), 4500.0);
    assert_eq!(SummaryService::debt_reduced(accounts), 1300.0);
}

#[test]
fn avalanche_ranks_cards_by_non_increasing_rate() {
    let mut tracker = seeded_tracker();
    for (name, rate) in [("Low", 12.0), ("High", 29.99), ("Mid", 19.5)] {
        tracker.create_account(&card(name, rate, 500.0)).unwrap();
    }
    let house = NewAccount::new("House", AccountType::Mortgage, 99.0, 1.0, day(2024, 1, 1));
    tracker.create_account(&house).unwrap();

    let order = SummaryService::avalanche_order(tracker.accounts());
    assert!(order
        .windows(2)
        .all(|pair| pair[0].account.interest_rate >= pair[1].account.interest_rate));
    assert!(order
        .iter()
        .all(|rank| rank.account.account_type == AccountType::CreditCard));
    let ranks: Vec<_> = order.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn adding_account_increases_total_by_initial_balance() {
    let mut tracker = seeded_tracker();
    let before = SummaryService::total_liabilities(tracker.accounts());
    tracker
        .create_account(&card("Store Card", 27.0, 812.5))
        .unwrap()
        .expect("account created");
    let after = SummaryService::total_liabilities(tracker.accounts());
    assert_eq!(after - before, 812.5);
}

#[test]
fn debt_reduced_tracks_new_entries() {
    let mut tracker = seeded_tracker();
    let card = tracker.accounts()[0].id.clone();
    let before = SummaryService::debt_reduced(tracker.accounts());

    tracker.record_balance(&card, 4500.0, day(2023, 4, 1)).unwrap();
    assert_eq!(SummaryService::debt_reduced(tracker.accounts()), before);

    tracker.record_balance(&card, 4200.0, day(2023, 5, 1)).unwrap();
    assert_eq!(
        SummaryService::debt_reduced(tracker.accounts()),
        before + 300.0
    );
}

#[test]
fn backdated_balance_does_not_change_current() {
    let mut tracker = seeded_tracker();
    let card = tracker.accounts()[0].id.clone();

    assert!(tracker.record_balance(&card, 4700.0, day(2023, 2, 15)).unwrap());
    let account = tracker.portfolio().account(&card).unwrap();
    assert_eq!(account.history.len(), 4);
    assert_eq!(account.history[2].date, day(2023, 2, 15));
    assert_eq!(account.current_balance(), 4500.0);
}

#[test]
fn deleting_only_card_empties_ranking() {
    let mut tracker = seeded_tracker();
    let card = tracker.accounts()[0].id.clone();

    assert!(tracker.delete_account(&card).unwrap());
    let accounts = tracker.accounts();
    assert!(SummaryService::avalanche_order(accounts).is_empty());
    assert_eq!(SummaryService::credit_card_debt(accounts), 0.0);
    assert_eq!(SummaryService::total_liabilities(accounts), 24200.0);
    assert!(!tracker.delete_account(&card).unwrap());
}

#[test]
fn every_mutation_is_written_through() {
    let mut tracker = seeded_tracker();
    let loan = tracker.accounts()[1].id.clone();
    tracker.record_balance(&loan, 24000.0, day(2023, 4, 1)).unwrap();

    let reloaded = Tracker::load(tracker.store());
    assert_eq!(&reloaded, tracker.portfolio());
}

#[test]
fn failed_write_leaves_state_untouched() {
    let mut tracker = Tracker::open(Box::new(ReadOnlyStore::default()));
    let before = tracker.portfolio().clone();
    let card = before.accounts[0].id.clone();

    assert!(matches!(
        tracker.create_account(&self::card("Visa", 19.0, 300.0)),
        Err(CoreError::Storage(_))
    ));
    assert!(tracker.record_balance(&card, 10.0, day(2024, 1, 1)).is_err());
    assert!(tracker.delete_account(&card).is_err());
    assert!(tracker.reset_all().is_err());

    assert_eq!(tracker.portfolio(), &before);
    assert_eq!(tracker.store().get(ACCOUNTS_KEY).unwrap(), None);
}

#[test]
fn save_and_load_roundtrip_is_identical() {
    let store = MemoryStore::new();
    let mut tracker = Tracker::open(Box::new(MemoryStore::new()));
    tracker.create_account(&card("Visa", 18.0, 300.0)).unwrap();
    let json = serde_json::to_string(tracker.portfolio()).unwrap();
    store.set(ACCOUNTS_KEY, &json).unwrap();

    let loaded = Tracker::load(&store);
    assert_eq!(&loaded, tracker.portfolio());
}

#[test]
fn load_keeps_accounts_with_non_uuid_ids() {
    let store = MemoryStore::new();
    let json = r#"[
        {"id":"1","name":"Chase Sapphire","type":"credit_card","interestRate":24.99,
         "history":[{"date":"2023-01-01","balance":5000},{"date":"2023-03-01","balance":4500}]},
        {"id":"k3j9x2abc","name":"My Visa","type":"credit_card","interestRate":19.5,
         "history":[{"date":"2024-02-01","balance":700}]}
    ]"#;
    store.set(ACCOUNTS_KEY, json).unwrap();

    let mut tracker = Tracker::open(Box::new(store));
    let names: Vec<_> = tracker.accounts().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Chase Sapphire", "My Visa"]);
    assert_ne!(tracker.portfolio(), &Portfolio::seeded());

    assert!(tracker.record_balance("k3j9x2abc", 650.0, day(2024, 3, 1)).unwrap());
    let reloaded = Tracker::load(tracker.store());
    assert_eq!(reloaded.account("k3j9x2abc").unwrap().current_balance(), 650.0);
    assert_eq!(reloaded.len(), 2);
}

#[test]
fn malformed_store_falls_back_to_seed() {
    let store = MemoryStore::new();
    store.set(ACCOUNTS_KEY, "{not json").unwrap();
    assert_eq!(Tracker::load(&store), Portfolio::seeded());
}

#[test]
fn reset_keeps_credential_and_backs_up_accounts() {
    let mut tracker = seeded_tracker();
    tracker.save().unwrap();
    tracker.set_credential(Some("  key-123 ")).unwrap();

    let backup = tracker.reset_all().unwrap().expect("backup taken");
    assert!(tracker.accounts().is_empty());
    assert_eq!(tracker.credential().unwrap().as_deref(), Some("key-123"));
    assert_eq!(
        tracker.store().get(ACCOUNTS_KEY).unwrap().as_deref(),
        Some("[]")
    );

    tracker.restore_backup(&backup).unwrap();
    assert_eq!(tracker.portfolio(), &Portfolio::seeded());
}

#[test]
fn blank_credential_clears_key() {
    let mut tracker = seeded_tracker();
    tracker.set_credential(Some("abc")).unwrap();
    tracker.set_credential(Some("   ")).unwrap();
    assert_eq!(tracker.credential().unwrap(), None);
    assert_eq!(tracker.store().get(CREDENTIAL_KEY).unwrap(), None);
}

#[test]
fn declined_creation_does_not_persist() {
    let mut tracker = seeded_tracker();
    let draft = NewAccount::from_input("", AccountType::Loan, "4", "100", day(2024, 1, 1));
    assert_eq!(tracker.create_account(&draft).unwrap(), None);
    assert_eq!(tracker.store().get(ACCOUNTS_KEY).unwrap(), None);
}

#[test]
fn snapshot_is_detached_from_later_mutations() {
    let mut tracker = seeded_tracker();
    let snapshot = tracker.snapshot();
    let card = snapshot[0].id.clone();
    tracker.record_balance(&card, 100.0, day(2030, 1, 1)).unwrap();

    assert_eq!(snapshot[0].current_balance(), 4500.0);
    assert_eq!(tracker.accounts()[0].current_balance(), 100.0);
}
