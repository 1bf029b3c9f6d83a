//! The ledger aggregator: pure views over an immutable transaction list.
//!
//! Every view is recomputed from scratch on each call. That keeps the
//! aggregator free of shared mutable state and makes recomputation
//! trivially idempotent. Savings is defined as income minus expense at
//! every granularity, and zero-filled cells appear explicitly in the
//! pivot views rather than being omitted.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::dto::{Transaction, TransactionKind};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Overall income, expense and savings sums.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
}

/// One row of the monthly pivot. Serializes with capitalized headers for
/// the exported report file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Income")]
    pub income: Decimal,
    #[serde(rename = "Expense")]
    pub expense: Decimal,
    #[serde(rename = "Savings")]
    pub savings: Decimal,
}

/// One row of the weekly pivot, keyed by ISO week number.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub week: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Zero-filled category × payment-mode table of expense sums.
/// `cells[row][col]` is the sum for `categories[row]` paid via `modes[col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseMatrix {
    pub categories: Vec<String>,
    pub modes: Vec<String>,
    pub cells: Vec<Vec<Decimal>>,
}

impl ExpenseMatrix {
    pub fn get(&self, category: &str, mode: &str) -> Option<Decimal> {
        let row = self.categories.iter().position(|c| c == category)?;
        let col = self.modes.iter().position(|m| m == mode)?;
        Some(self.cells[row][col])
    }
}

/// The full set of loaded transactions plus the aggregate views over them.
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The first `n` transactions in load order, for the console preview.
    pub fn head(&self, n: usize) -> &[Transaction] {
        &self.transactions[..n.min(self.transactions.len())]
    }

    fn expenses(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
    }

    /// Income, expense and savings sums over the whole ledger.
    /// An empty ledger yields zero sums.
    pub fn totals_by_type(&self) -> LedgerTotals {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for transaction in &self.transactions {
            match transaction.kind {
                TransactionKind::Income => income += transaction.amount,
                TransactionKind::Expense => expense += transaction.amount,
            }
        }
        LedgerTotals {
            income,
            expense,
            savings: income - expense,
        }
    }

    /// Expense sum per category, descending by sum. Ties keep the order in
    /// which the categories first appear in the ledger.
    pub fn category_totals(&self) -> Vec<(String, Decimal)> {
        let mut order: Vec<String> = Vec::new();
        let mut sums: HashMap<String, Decimal> = HashMap::new();
        for transaction in self.expenses() {
            if !sums.contains_key(&transaction.category) {
                order.push(transaction.category.clone());
            }
            *sums.entry(transaction.category.clone()).or_insert(Decimal::ZERO) +=
                transaction.amount;
        }

        let mut totals: Vec<(String, Decimal)> = order
            .into_iter()
            .map(|category| {
                let sum = sums[&category];
                (category, sum)
            })
            .collect();
        // Stable sort, so equal sums stay in first-appearance order.
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
    }

    /// Income, expense and savings per month label, in calendar order.
    /// A type with no transactions in a month contributes 0.
    ///
    /// Months are keyed by label alone, so a multi-year ledger folds the
    /// same month of different years into one row.
    pub fn monthly_pivot(&self) -> Vec<MonthlySummary> {
        let mut by_month: BTreeMap<u32, (Decimal, Decimal)> = BTreeMap::new();
        for transaction in &self.transactions {
            let slot = by_month.entry(transaction.date.month()).or_default();
            match transaction.kind {
                TransactionKind::Income => slot.0 += transaction.amount,
                TransactionKind::Expense => slot.1 += transaction.amount,
            }
        }
        by_month
            .into_iter()
            .map(|(month, (income, expense))| MonthlySummary {
                month: MONTH_LABELS[(month - 1) as usize].to_string(),
                income,
                expense,
                savings: income - expense,
            })
            .collect()
    }

    /// Income and expense per ISO week number, ascending, zero-filled.
    ///
    /// Week numbers are year-agnostic, like the month labels above: week 7
    /// of 2024 and week 7 of 2025 land in the same row.
    pub fn weekly_pivot(&self) -> Vec<WeeklySummary> {
        let mut by_week: BTreeMap<u32, (Decimal, Decimal)> = BTreeMap::new();
        for transaction in &self.transactions {
            let slot = by_week
                .entry(transaction.date.iso_week().week())
                .or_default();
            match transaction.kind {
                TransactionKind::Income => slot.0 += transaction.amount,
                TransactionKind::Expense => slot.1 += transaction.amount,
            }
        }
        by_week
            .into_iter()
            .map(|(week, (income, expense))| WeeklySummary {
                week,
                income,
                expense,
            })
            .collect()
    }

    /// Expense sum per payment mode, modes in lexicographic order.
    pub fn payment_mode_totals(&self) -> Vec<(String, Decimal)> {
        let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
        for transaction in self.expenses() {
            *sums
                .entry(transaction.payment_mode.clone())
                .or_insert(Decimal::ZERO) += transaction.amount;
        }
        sums.into_iter().collect()
    }

    /// Zero-filled category × payment-mode matrix of expense sums, both
    /// axes in lexicographic order.
    pub fn category_by_payment_matrix(&self) -> ExpenseMatrix {
        let mut categories: BTreeSet<String> = BTreeSet::new();
        let mut modes: BTreeSet<String> = BTreeSet::new();
        let mut sums: HashMap<(String, String), Decimal> = HashMap::new();
        for transaction in self.expenses() {
            categories.insert(transaction.category.clone());
            modes.insert(transaction.payment_mode.clone());
            *sums
                .entry((transaction.category.clone(), transaction.payment_mode.clone()))
                .or_insert(Decimal::ZERO) += transaction.amount;
        }

        let categories: Vec<String> = categories.into_iter().collect();
        let modes: Vec<String> = modes.into_iter().collect();
        let cells = categories
            .iter()
            .map(|category| {
                modes
                    .iter()
                    .map(|mode| {
                        sums.get(&(category.clone(), mode.clone()))
                            .copied()
                            .unwrap_or(Decimal::ZERO)
                    })
                    .collect()
            })
            .collect();
        ExpenseMatrix {
            categories,
            modes,
            cells,
        }
    }

    /// Mean of per-day expense sums over the days that have at least one
    /// expense. `None` when the ledger has no expenses at all.
    pub fn average_daily_expense(&self) -> Option<Decimal> {
        let mut by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
        for transaction in self.expenses() {
            *by_day.entry(transaction.date).or_insert(Decimal::ZERO) += transaction.amount;
        }
        if by_day.is_empty() {
            return None;
        }
        let total: Decimal = by_day.values().copied().sum();
        Some(total / Decimal::from(by_day.len() as u64))
    }

    /// The categories with the largest and smallest expense totals, or
    /// `None` when the ledger has no expense transactions.
    pub fn extreme_categories(&self) -> Option<((String, Decimal), (String, Decimal))> {
        let totals = self.category_totals();
        let max = totals.first()?.clone();
        let min = totals.last()?.clone();
        Some((max, min))
    }

    /// The payment mode carrying the largest expense total. Ties resolve
    /// to the lexicographically first mode.
    pub fn most_used_payment(&self) -> Option<(String, Decimal)> {
        self.payment_mode_totals()
            .into_iter()
            .reduce(|best, current| if current.1 > best.1 { current } else { best })
    }
}
