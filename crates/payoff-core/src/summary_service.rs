use serde::Serialize;

use payoff_domain::{Account, AccountType};

/// One credit card's position in the avalanche payoff order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffRank<'a> {
    /// 1-based priority; rank 1 should be paid down first.
    pub rank: usize,
    pub account: &'a Account,
}

impl PayoffRank<'_> {
    pub fn is_priority(&self) -> bool {
        self.rank == 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioTotals {
    pub account_count: usize,
    pub credit_card_count: usize,
    pub total_liabilities: f64,
    pub credit_card_debt: f64,
    pub debt_reduced: f64,
}

/// A headline figure for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTile {
    pub title: &'static str,
    pub value: f64,
    pub subtext: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub totals: PortfolioTotals,
    pub tiles: Vec<StatTile>,
}

/// Compact per-account view handed to the advisory prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub rate: String,
    pub current_balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Credit cards ordered by descending interest rate; ties keep their
    /// original relative order.
    pub fn avalanche_order(accounts: &[Account]) -> Vec<PayoffRank<'_>> {
        let mut cards: Vec<&Account> = accounts.iter().filter(|a| a.is_credit_card()).collect();
        cards.sort_by(|a, b| b.interest_rate.total_cmp(&a.interest_rate));
        cards
            .into_iter()
            .enumerate()
            .map(|(index, account)| PayoffRank {
                rank: index + 1,
                account,
            })
            .collect()
    }

    /// Non-credit-card accounts in their original order.
    pub fn other_liabilities(accounts: &[Account]) -> Vec<&Account> {
        accounts.iter().filter(|a| !a.is_credit_card()).collect()
    }

    pub fn current_balance(account: &Account) -> f64 {
        account.current_balance()
    }

    pub fn total_liabilities(accounts: &[Account]) -> f64 {
        accounts.iter().map(Account::current_balance).sum()
    }

    pub fn credit_card_debt(accounts: &[Account]) -> f64 {
        accounts
            .iter()
            .filter(|a| a.is_credit_card())
            .map(Account::current_balance)
            .sum()
    }

    /// Sum over accounts of (first recorded balance - current balance).
    pub fn debt_reduced(accounts: &[Account]) -> f64 {
        accounts
            .iter()
            .filter(|a| !a.history.is_empty())
            .map(|a| a.opening_balance() - a.current_balance())
            .sum()
    }

    pub fn totals(accounts: &[Account]) -> PortfolioTotals {
        PortfolioTotals {
            account_count: accounts.len(),
            credit_card_count: accounts.iter().filter(|a| a.is_credit_card()).count(),
            total_liabilities: Self::total_liabilities(accounts),
            credit_card_debt: Self::credit_card_debt(accounts),
            debt_reduced: Self::debt_reduced(accounts),
        }
    }

    pub fn dashboard(accounts: &[Account]) -> DashboardSummary {
        let totals = Self::totals(accounts);
        let liabilities_subtext = if totals.account_count == 0 {
            "No active accounts".to_string()
        } else {
            "All accounts combined".to_string()
        };
        let tiles = vec![
            StatTile {
                title: "Total Liabilities",
                value: totals.total_liabilities,
                subtext: liabilities_subtext,
            },
            StatTile {
                title: "Credit Card Debt",
                value: totals.credit_card_debt,
                subtext: format!("{} active cards", totals.credit_card_count),
            },
            StatTile {
                title: "Debt Reduced",
                value: totals.debt_reduced,
                subtext: "Since tracking began".to_string(),
            },
        ];
        DashboardSummary { totals, tiles }
    }

    pub fn snapshots(accounts: &[Account]) -> Vec<AccountSnapshot> {
        accounts
            .iter()
            .map(|account| AccountSnapshot {
                name: account.name.clone(),
                account_type: account.account_type,
                rate: format!("{}%", account.interest_rate),
                current_balance: account.current_balance(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use payoff_domain::{seed_accounts, BalanceEntry};

    fn card(name: &str, rate: f64, balance: f64) -> Account {
        Account::new(
            name,
            AccountType::CreditCard,
            rate,
            BalanceEntry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), balance),
        )
    }

    #[test]
    fn avalanche_ties_preserve_input_order() {
        let accounts = vec![
            card("First", 18.0, 100.0),
            card("High", 29.9, 100.0),
            card("Second", 18.0, 100.0),
        ];
        let names: Vec<_> = SummaryService::avalanche_order(&accounts)
            .iter()
            .map(|rank| rank.account.name.as_str())
            .collect();
        assert_eq!(names, vec!["High", "First", "Second"]);
    }

    #[test]
    fn dashboard_tiles_describe_empty_portfolio() {
        let summary = SummaryService::dashboard(&[]);
        assert_eq!(summary.tiles[0].subtext, "No active accounts");
        assert_eq!(summary.tiles[1].subtext, "0 active cards");
        assert_eq!(summary.totals.total_liabilities, 0.0);
    }

    #[test]
    fn snapshots_format_rate_as_percentage() {
        let snapshots = SummaryService::snapshots(&seed_accounts());
        assert_eq!(snapshots[0].rate, "24.99%");
        assert_eq!(snapshots[1].rate, "5.4%");
        assert_eq!(snapshots[1].current_balance, 24200.0);

        let json = serde_json::to_value(&snapshots[0]).unwrap();
        assert_eq!(json["type"], "credit_card");
        assert_eq!(json["currentBalance"], 4500.0);
    }
}
