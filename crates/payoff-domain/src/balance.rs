use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observed balance for one account on one calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BalanceEntry {
    pub date: NaiveDate,
    pub balance: f64,
}

impl BalanceEntry {
    pub fn new(date: NaiveDate, balance: f64) -> Self {
        Self { date, balance }
    }
}
