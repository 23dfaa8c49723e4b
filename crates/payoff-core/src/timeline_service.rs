//! Chart-ready time series derived from balance histories.
//!
//! Dates are bucketed by exact calendar day. Nothing is interpolated or
//! carried forward: an account without an entry on a date contributes
//! nothing to that date.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use payoff_domain::Account;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// One account's value on a breakdown date; `None` means no entry that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountValue {
    pub account_id: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownPoint {
    pub date: NaiveDate,
    pub values: Vec<AccountValue>,
}

impl BreakdownPoint {
    pub fn value(&self, account_id: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|entry| entry.account_id == account_id)
            .and_then(|entry| entry.value)
    }
}

/// Which liabilities the trend chart should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrendSelection {
    #[default]
    All,
    Account(String),
}

pub struct TimelineService;

impl TimelineService {
    /// Sums every entry per calendar day across `accounts`, ascending by date.
    pub fn summed_series<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Vec<SeriesPoint> {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for account in accounts {
            for entry in &account.history {
                *by_date.entry(entry.date).or_insert(0.0) += entry.balance;
            }
        }
        by_date
            .into_iter()
            .map(|(date, amount)| SeriesPoint { date, amount })
            .collect()
    }

    /// Aggregate credit-card debt over time.
    pub fn credit_card_series(accounts: &[Account]) -> Vec<SeriesPoint> {
        Self::summed_series(accounts.iter().filter(|a| a.is_credit_card()))
    }

    /// Per-account values aligned on the union of all entry dates.
    ///
    /// When an account has several entries on one day the latest recorded
    /// one is reported, matching the current-balance rule.
    pub fn breakdown<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Vec<BreakdownPoint> {
        let accounts: Vec<&Account> = accounts.into_iter().collect();
        let dates: BTreeSet<NaiveDate> = accounts
            .iter()
            .flat_map(|account| account.history.iter().map(|entry| entry.date))
            .collect();
        dates
            .into_iter()
            .map(|date| BreakdownPoint {
                date,
                values: accounts
                    .iter()
                    .map(|account| AccountValue {
                        account_id: account.id.clone(),
                        value: account
                            .history
                            .iter()
                            .rev()
                            .find(|entry| entry.date == date)
                            .map(|entry| entry.balance),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Per-card breakdown used by the individual credit card chart.
    pub fn card_breakdown(accounts: &[Account]) -> Vec<BreakdownPoint> {
        Self::breakdown(accounts.iter().filter(|a| a.is_credit_card()))
    }

    /// One account's history as a series, in date order.
    pub fn account_series(account: &Account) -> Vec<SeriesPoint> {
        let mut points: Vec<SeriesPoint> = account
            .history
            .iter()
            .map(|entry| SeriesPoint {
                date: entry.date,
                amount: entry.balance,
            })
            .collect();
        points.sort_by_key(|point| point.date);
        points
    }

    /// Single-account or combined liability trend. An unknown account id
    /// yields an empty series.
    pub fn liability_trend(accounts: &[Account], selection: TrendSelection) -> Vec<SeriesPoint> {
        match selection {
            TrendSelection::All => Self::summed_series(accounts),
            TrendSelection::Account(id) => accounts
                .iter()
                .find(|account| account.id == id)
                .map(Self::account_series)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payoff_domain::{AccountType, BalanceEntry};

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn account(name: &str, kind: AccountType, entries: &[(NaiveDate, f64)]) -> Account {
        let (first_date, first_balance) = entries[0];
        let mut account = Account::new(
            name,
            kind,
            10.0,
            BalanceEntry::new(first_date, first_balance),
        );
        for &(date, balance) in &entries[1..] {
            account.record(BalanceEntry::new(date, balance));
        }
        account
    }

    fn card(name: &str, entries: &[(NaiveDate, f64)]) -> Account {
        account(name, AccountType::CreditCard, entries)
    }

    #[test]
    fn summed_series_does_not_carry_forward() {
        let a = card("A", &[(day(1, 1), 100.0), (day(2, 1), 90.0)]);
        let b = card("B", &[(day(1, 1), 50.0)]);
        let series = TimelineService::summed_series([&a, &b]);
        assert_eq!(
            series,
            vec![
                SeriesPoint {
                    date: day(1, 1),
                    amount: 150.0,
                },
                SeriesPoint {
                    date: day(2, 1),
                    amount: 90.0,
                },
            ]
        );
    }

    #[test]
    fn breakdown_leaves_gaps_unfilled() {
        let a = card("A", &[(day(1, 1), 100.0), (day(3, 1), 80.0)]);
        let b = card("B", &[(day(2, 1), 40.0)]);
        let points = TimelineService::breakdown([&a, &b]);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value(&a.id), Some(100.0));
        assert_eq!(points[0].value(&b.id), None);
        assert_eq!(points[1].value(&a.id), None);
        assert_eq!(points[1].value(&b.id), Some(40.0));
        assert_eq!(points[2].values.len(), 2);
    }

    #[test]
    fn breakdown_reports_zero_balances_distinctly() {
        let a = card("A", &[(day(1, 1), 100.0), (day(2, 1), 0.0)]);
        let points = TimelineService::breakdown([&a]);
        assert_eq!(points[1].value(&a.id), Some(0.0));
    }

    #[test]
    fn breakdown_reports_last_recorded_entry_of_a_day() {
        let a = card(
            "A",
            &[(day(1, 1), 100.0), (day(2, 1), 90.0), (day(2, 1), 85.0)],
        );
        let points = TimelineService::breakdown([&a]);

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].value(&a.id), Some(85.0));
        assert_eq!(a.current_balance(), 85.0);
        // The summed series still adds every entry of the day.
        assert_eq!(TimelineService::summed_series([&a])[1].amount, 175.0);
    }

    #[test]
    fn single_entry_account_yields_single_point() {
        let a = account("A", AccountType::Loan, &[(day(1, 1), 100.0)]);
        let selection = TrendSelection::Account(a.id.clone());
        let series = TimelineService::liability_trend(std::slice::from_ref(&a), selection);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn trend_for_unknown_account_is_empty() {
        let a = account("A", AccountType::Loan, &[(day(1, 1), 100.0)]);
        let selection = TrendSelection::Account("missing".into());
        let series = TimelineService::liability_trend(&[a], selection);
        assert!(series.is_empty());
    }

    #[test]
    fn card_series_excludes_other_types() {
        let visa = card("Visa", &[(day(1, 1), 100.0)]);
        let loan = account("Loan", AccountType::Loan, &[(day(1, 1), 1000.0)]);
        let accounts = vec![visa, loan];

        assert_eq!(TimelineService::credit_card_series(&accounts)[0].amount, 100.0);
        assert_eq!(
            TimelineService::liability_trend(&accounts, TrendSelection::All)[0].amount,
            1100.0
        );
    }
}
