//! The runner is responsible for loading the ledger from CSV, building the
//! aggregate views, printing the console dashboard, rendering the charts
//! and exporting the monthly summary report.
//!
//! Everything runs synchronously to completion in sequence:
//! load → aggregate → print → render → export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{
    charts,
    csv_utils::{read_csv, write_csv},
    dto::Transaction,
    error::Error,
    ledger::Ledger,
    report,
};

/// Name of the exported monthly summary file.
pub const REPORT_FILE: &str = "monthly_summary_report.csv";
/// Name of the rendered chart page.
pub const DASHBOARD_FILE: &str = "expense_dashboard.html";

/// Runs the dashboard pipeline on the given input file, writing the console
/// report to the provided writer and the two output files into `out_dir`.
///
/// # Arguments
/// * `input_path` - Path to the input CSV file containing transactions
/// * `out_dir` - Directory the report CSV and chart page are written into
/// * `console` - Where to write the console dashboard (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
/// * Writing the console report or an output file fails
pub fn run<I, O, W>(input_path: I, out_dir: O, mut console: W) -> Result<(), Error>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
    W: Write,
{
    // A single bad row aborts the whole run before any aggregation.
    let transactions: Vec<Transaction> = read_csv(input_path)?.collect::<csv::Result<_>>()?;
    let ledger = Ledger::new(transactions);

    report::write_dashboard(&mut console, &ledger)?;

    let dashboard_path = out_dir.as_ref().join(DASHBOARD_FILE);
    charts::save_dashboard(&ledger, &dashboard_path)?;

    let report_path = out_dir.as_ref().join(REPORT_FILE);
    write_csv(File::create(&report_path)?, ledger.monthly_pivot().into_iter())?;

    writeln!(console)?;
    writeln!(
        console,
        "Monthly summary report saved as '{}'",
        report_path.display()
    )?;
    writeln!(console, "Charts saved as '{}'", dashboard_path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn out_dir(test_name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("expense-dashboard-tests").join(test_name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_example_ledger() -> Result<(), Error> {
        let dir = out_dir("example_ledger");
        let mut console = Vec::new();
        run("data/example_ledger.csv", &dir, &mut console)?;

        let expected = "Month,Income,Expense,Savings
Jan,5000.00,1760.75,3239.25
Feb,5800.00,351.75,5448.25
Mar,0,1632.10,-1632.10
";
        assert_eq!(fs::read_to_string(dir.join(REPORT_FILE))?, expected);

        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("Total Income  : 10800.00"));
        assert!(console.contains("Total Expense : 3744.60"));
        assert!(console.contains("Total Savings : 7055.40"));
        assert!(console.contains("Highest Spending Category: Rent (3000.00)"));
        assert!(console.contains("Lowest Spending Category : Travel (105.60)"));
        assert!(console.contains("Most Used Payment Mode   : Bank Transfer"));
        assert!(console.contains("Average Daily Expense    : 416.07"));
        assert!(console.contains("Monthly summary report saved as"));

        let page = fs::read_to_string(dir.join(DASHBOARD_FILE))?;
        assert!(page.contains("payment-heatmap"));
        Ok(())
    }

    #[test]
    fn test_missing_input_file() {
        let dir = out_dir("missing_input");
        let result = run("data/does_not_exist.csv", &dir, Vec::<u8>::new());
        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn test_malformed_row_aborts_before_export() {
        let dir = out_dir("malformed_row");
        let input = dir.join("bad_ledger.csv");
        fs::write(
            &input,
            "Date,Type,Category,Amount,Payment_Mode\n2024-01-05,Expense,Food,not-a-number,Cash\n",
        )
        .unwrap();

        let result = run(&input, &dir, Vec::<u8>::new());
        assert!(matches!(result, Err(Error::Csv(_))));
        assert!(!dir.join(REPORT_FILE).exists());
    }
}
