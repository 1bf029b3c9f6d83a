//! Console rendering of the dashboard.
//!
//! A pure consumer of the aggregate views: formats the data preview, the
//! totals, the monthly summary table and the insights block into any
//! `io::Write`. Nothing here mutates the ledger, and ledgers without
//! expense rows render "no data" lines instead of failing.

use std::io::{self, Write};

use crate::ledger::Ledger;

/// Number of transactions shown in the data preview.
const PREVIEW_ROWS: usize = 5;

pub fn write_dashboard<W: Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    writeln!(out, "========== EXPENSE TRACKER DASHBOARD ==========")?;
    write_preview(out, ledger)?;
    write_totals(out, ledger)?;
    write_monthly_summary(out, ledger)?;
    write_insights(out, ledger)?;
    Ok(())
}

fn write_preview<W: Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    let head = ledger.head(PREVIEW_ROWS);
    if head.is_empty() {
        writeln!(out, "(no transactions)")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<12} {:<8} {:<14} {:>10}  {}",
        "Date", "Type", "Category", "Amount", "Payment_Mode"
    )?;
    for transaction in head {
        writeln!(
            out,
            "{:<12} {:<8} {:<14} {:>10}  {}",
            transaction.date.to_string(),
            transaction.kind.to_string(),
            transaction.category,
            transaction.amount.to_string(),
            transaction.payment_mode,
        )?;
    }
    Ok(())
}

fn write_totals<W: Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    let totals = ledger.totals_by_type();
    writeln!(out)?;
    writeln!(out, "Total Income  : {}", totals.income)?;
    writeln!(out, "Total Expense : {}", totals.expense)?;
    writeln!(out, "Total Savings : {}", totals.savings)?;
    Ok(())
}

fn write_monthly_summary<W: Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== Monthly Summary =====")?;
    let pivot = ledger.monthly_pivot();
    if pivot.is_empty() {
        writeln!(out, "(no transactions)")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<6} {:>12} {:>12} {:>12}",
        "Month", "Income", "Expense", "Savings"
    )?;
    for row in &pivot {
        writeln!(
            out,
            "{:<6} {:>12} {:>12} {:>12}",
            row.month,
            row.income.to_string(),
            row.expense.to_string(),
            row.savings.to_string(),
        )?;
    }
    Ok(())
}

fn write_insights<W: Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== Extra Insights =====")?;
    match ledger.extreme_categories() {
        Some(((top, top_sum), (bottom, bottom_sum))) => {
            writeln!(out, "Highest Spending Category: {} ({})", top, top_sum)?;
            writeln!(out, "Lowest Spending Category : {} ({})", bottom, bottom_sum)?;
        }
        None => {
            writeln!(out, "Highest Spending Category: no data")?;
            writeln!(out, "Lowest Spending Category : no data")?;
        }
    }
    match ledger.most_used_payment() {
        Some((mode, _)) => writeln!(out, "Most Used Payment Mode   : {}", mode)?,
        None => writeln!(out, "Most Used Payment Mode   : no data")?,
    }
    match ledger.average_daily_expense() {
        Some(average) => writeln!(out, "Average Daily Expense    : {}", average.round_dp(2))?,
        None => writeln!(out, "Average Daily Expense    : no data")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{Transaction, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_ledger() -> Ledger {
        Ledger::new(vec![
            Transaction {
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                kind: TransactionKind::Income,
                category: "Salary".to_string(),
                amount: dec!(1000),
                payment_mode: "Bank Transfer".to_string(),
            },
            Transaction {
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                kind: TransactionKind::Expense,
                category: "Food".to_string(),
                amount: dec!(400),
                payment_mode: "Cash".to_string(),
            },
        ])
    }

    fn render(ledger: &Ledger) -> String {
        let mut output = Vec::new();
        write_dashboard(&mut output, ledger).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_dashboard_sections() {
        let text = render(&sample_ledger());
        assert!(text.contains("========== EXPENSE TRACKER DASHBOARD =========="));
        assert!(text.contains("Total Income  : 1000"));
        assert!(text.contains("Total Expense : 400"));
        assert!(text.contains("Total Savings : 600"));
        assert!(text.contains("===== Monthly Summary ====="));
        assert!(text.contains("Jan"));
        assert!(text.contains("Highest Spending Category: Food (400)"));
        assert!(text.contains("Most Used Payment Mode   : Cash"));
        assert!(text.contains("Average Daily Expense    : 400"));
    }

    #[test]
    fn test_dashboard_preview_limited_to_five_rows() {
        let transactions: Vec<Transaction> = (1..=8)
            .map(|day| Transaction {
                date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                kind: TransactionKind::Expense,
                category: format!("Category{}", day),
                amount: dec!(10),
                payment_mode: "Cash".to_string(),
            })
            .collect();
        let text = render(&Ledger::new(transactions));
        assert!(text.contains("Category5"));
        assert!(!text.contains("Category6"));
    }

    #[test]
    fn test_dashboard_empty_ledger_reports_no_data() {
        let text = render(&Ledger::new(vec![]));
        assert!(text.contains("(no transactions)"));
        assert!(text.contains("Total Income  : 0"));
        assert!(text.contains("Highest Spending Category: no data"));
        assert!(text.contains("Average Daily Expense    : no data"));
    }
}
