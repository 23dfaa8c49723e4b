use chrono::NaiveDate;
use tracing::debug;

use payoff_domain::{Account, AccountType, BalanceEntry, Identifiable, NamedEntity, Portfolio};

/// Raw input for a new account. Missing or unparseable numbers are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub account_type: AccountType,
    pub interest_rate: Option<f64>,
    pub initial_balance: Option<f64>,
    pub date: NaiveDate,
}

impl NewAccount {
    pub fn new(
        name: impl Into<String>,
        account_type: AccountType,
        interest_rate: f64,
        initial_balance: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            account_type,
            interest_rate: Some(interest_rate),
            initial_balance: Some(initial_balance),
            date,
        }
    }

    /// Builds a draft from form text, leaving unparseable numbers empty.
    pub fn from_input(
        name: &str,
        account_type: AccountType,
        interest_rate: &str,
        initial_balance: &str,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.to_string(),
            account_type,
            interest_rate: parse_amount(interest_rate),
            initial_balance: parse_amount(initial_balance),
            date,
        }
    }

    fn validated(&self) -> Option<(&str, f64, f64)> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let rate = self
            .interest_rate
            .filter(|rate| rate.is_finite() && *rate >= 0.0)?;
        let balance = self.initial_balance.filter(|balance| balance.is_finite())?;
        Some((name, rate, balance))
    }
}

/// Parses a user-entered amount such as `1,250.50`, `$300` or `18.5%`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub struct AccountService;

impl AccountService {
    /// Appends a new account with a single-entry history.
    ///
    /// Declines without changes (returns `None`) when the name is blank or
    /// the rate/balance are missing, non-finite, or the rate is negative.
    pub fn create(portfolio: &mut Portfolio, draft: &NewAccount) -> Option<String> {
        let Some((name, rate, balance)) = draft.validated() else {
            debug!(name = %draft.name, "account creation declined: incomplete input");
            return None;
        };
        let account = Account::new(
            name,
            draft.account_type,
            rate,
            BalanceEntry::new(draft.date, balance),
        );
        let id = portfolio.add(account);
        debug!(%id, "account created");
        Some(id)
    }

    /// Removes the account; returns `false` when it does not exist.
    pub fn delete(portfolio: &mut Portfolio, id: &str) -> bool {
        let removed = portfolio.remove(id).is_some();
        if removed {
            debug!(%id, "account deleted");
        }
        removed
    }

    /// Appends a balance observation and keeps the history date-ordered.
    pub fn record_balance(
        portfolio: &mut Portfolio,
        id: &str,
        balance: f64,
        date: NaiveDate,
    ) -> bool {
        if !balance.is_finite() {
            return false;
        }
        match portfolio.account_mut(id) {
            Some(account) => {
                account.record(BalanceEntry::new(date, balance));
                debug!(%id, %date, balance, "balance recorded");
                true
            }
            None => false,
        }
    }

    pub fn reset(portfolio: &mut Portfolio) {
        portfolio.clear();
    }

    pub fn list(portfolio: &Portfolio) -> Vec<&Account> {
        portfolio.iter().collect()
    }

    /// Resolves a 1-based list position, an id, or a case-insensitive name.
    /// Positions win over ids that happen to look like numbers.
    pub fn resolve(portfolio: &Portfolio, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if let Ok(position) = reference.parse::<usize>() {
            if let Some(account) = position
                .checked_sub(1)
                .and_then(|index| portfolio.accounts.get(index))
            {
                return Some(account.id().to_string());
            }
        }
        if let Some(account) = portfolio.account(reference) {
            return Some(account.id().to_string());
        }
        let needle = reference.to_lowercase();
        portfolio
            .iter()
            .find(|account| account.name().trim().to_lowercase() == needle)
            .map(|account| account.id().to_string())
    }
}
