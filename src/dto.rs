use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::de::Deserializer;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => f.write_str("Income"),
            TransactionKind::Expense => f.write_str("Expense"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Date", deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(rename = "Type")]
    pub kind: TransactionKind,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount", deserialize_with = "deserialize_amount_2dp")]
    pub amount: Decimal,
    #[serde(rename = "Payment_Mode")]
    pub payment_mode: String,
}

/// Accepted date formats, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&raw, format).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date: {raw}")))
}

fn deserialize_amount_2dp<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount: Decimal = Deserialize::deserialize(deserializer)?;
    Ok(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
