use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{balance::BalanceEntry, common::*};

/// Enumerates the supported liability classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    CreditCard,
    Loan,
    Mortgage,
    Other,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::CreditCard,
        AccountType::Loan,
        AccountType::Mortgage,
        AccountType::Other,
    ];

    /// Wire name, as stored in the persisted account list.
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::CreditCard => "credit_card",
            AccountType::Loan => "loan",
            AccountType::Mortgage => "mortgage",
            AccountType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountType::CreditCard => "Credit Card",
            AccountType::Loan => "Personal Loan",
            AccountType::Mortgage => "Mortgage",
            AccountType::Other => "Other",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Returned when a string does not name a known [`AccountType`].
pub struct ParseAccountTypeError(pub String);

impl fmt::Display for ParseAccountTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown account type `{}` (expected credit_card, loan, mortgage or other)",
            self.0
        )
    }
}

impl std::error::Error for ParseAccountTypeError {}

impl FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "credit_card" | "creditcard" | "card" | "cc" => Ok(AccountType::CreditCard),
            "loan" | "personal_loan" => Ok(AccountType::Loan),
            "mortgage" => Ok(AccountType::Mortgage),
            "other" => Ok(AccountType::Other),
            _ => Err(ParseAccountTypeError(value.to_string())),
        }
    }
}

/// A tracked liability and its dated balance history.
///
/// `id` is opaque: documents written by other tools may carry short or
/// non-UUID identifiers, and those are kept verbatim.
///
/// `history` is kept in ascending date order. Entries sharing a date keep
/// their insertion order, so the most recently recorded one is last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub interest_rate: f64,
    pub history: Vec<BalanceEntry>,
}

impl Account {
    /// Creates an account with a fresh identifier and a single-entry history.
    pub fn new(
        name: impl Into<String>,
        account_type: AccountType,
        interest_rate: f64,
        opening: BalanceEntry,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            account_type,
            interest_rate,
            history: vec![opening],
        }
    }

    /// Replaces the generated identifier; used for fixed datasets.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_credit_card(&self) -> bool {
        self.account_type == AccountType::CreditCard
    }

    pub fn first_entry(&self) -> Option<&BalanceEntry> {
        self.history.first()
    }

    pub fn latest_entry(&self) -> Option<&BalanceEntry> {
        self.history.last()
    }

    /// Balance of the latest entry, or zero when the history is empty.
    pub fn current_balance(&self) -> f64 {
        self.latest_entry().map_or(0.0, |entry| entry.balance)
    }

    /// Balance of the first-ever entry, or zero when the history is empty.
    pub fn opening_balance(&self) -> f64 {
        self.first_entry().map_or(0.0, |entry| entry.balance)
    }

    /// Appends an observation and restores date order.
    pub fn record(&mut self, entry: BalanceEntry) {
        self.history.push(entry);
        self.sort_history();
    }

    pub fn sort_history(&mut self) {
        // `sort_by_key` is stable: same-day entries stay in insertion order.
        self.history.sort_by_key(|entry| entry.date);
    }
}

impl Identifiable for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!(
            "{} ({}, {}%)",
            self.name,
            self.account_type.label(),
            self.interest_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card() -> Account {
        Account::new(
            "Visa",
            AccountType::CreditCard,
            19.9,
            BalanceEntry::new(day(2024, 1, 1), 1000.0),
        )
    }

    #[test]
    fn new_account_seeds_single_entry() {
        let account = card();
        assert_eq!(account.history.len(), 1);
        assert_eq!(account.current_balance(), 1000.0);
        assert_eq!(account.opening_balance(), 1000.0);
    }

    #[test]
    fn backdated_entry_is_inserted_in_order() {
        let mut account = card();
        account.record(BalanceEntry::new(day(2024, 3, 1), 800.0));
        account.record(BalanceEntry::new(day(2024, 2, 1), 900.0));

        let dates: Vec<_> = account.history.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(2024, 1, 1), day(2024, 2, 1), day(2024, 3, 1)]);
        assert_eq!(account.current_balance(), 800.0);
    }

    #[test]
    fn same_day_entries_keep_last_write_visible() {
        let mut account = card();
        account.record(BalanceEntry::new(day(2024, 2, 1), 900.0));
        account.record(BalanceEntry::new(day(2024, 2, 1), 850.0));
        assert_eq!(account.current_balance(), 850.0);
    }

    #[test]
    fn empty_history_reports_zero() {
        let mut account = card();
        account.history.clear();
        assert_eq!(account.current_balance(), 0.0);
        assert_eq!(account.opening_balance(), 0.0);
    }

    #[test]
    fn wire_format_uses_original_field_names() {
        let account = card().with_id("7");
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["type"], "credit_card");
        assert_eq!(json["interestRate"], 19.9);
        assert_eq!(json["history"][0]["date"], "2024-01-01");
    }

    #[test]
    fn parses_account_type_aliases() {
        assert_eq!("credit_card".parse(), Ok(AccountType::CreditCard));
        assert_eq!("Credit Card".parse(), Ok(AccountType::CreditCard));
        assert_eq!("MORTGAGE".parse(), Ok(AccountType::Mortgage));
        assert!("savings".parse::<AccountType>().is_err());
    }
}
