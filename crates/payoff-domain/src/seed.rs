use chrono::NaiveDate;

use crate::{Account, AccountType, BalanceEntry, Portfolio};

/// Example dataset used when nothing usable has been persisted yet.
pub fn seed_accounts() -> Vec<Account> {
    vec![
        seeded(
            "1",
            "Chase Sapphire",
            AccountType::CreditCard,
            24.99,
            &[(2023, 1, 1, 5000.0), (2023, 2, 1, 4800.0), (2023, 3, 1, 4500.0)],
        ),
        seeded(
            "2",
            "Auto Loan",
            AccountType::Loan,
            5.4,
            &[
                (2023, 1, 1, 25000.0),
                (2023, 2, 1, 24600.0),
                (2023, 3, 1, 24200.0),
            ],
        ),
    ]
}

impl Portfolio {
    pub fn seeded() -> Self {
        Portfolio::new(seed_accounts())
    }
}

fn seeded(
    id: &str,
    name: &str,
    account_type: AccountType,
    interest_rate: f64,
    history: &[(i32, u32, u32, f64)],
) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        account_type,
        interest_rate,
        history: history
            .iter()
            .filter_map(|&(y, m, d, balance)| {
                NaiveDate::from_ymd_opt(y, m, d).map(|date| BalanceEntry::new(date, balance))
            })
            .collect(),
    }
}
