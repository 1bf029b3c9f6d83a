//! Error type for the dashboard pipeline.
//!
//! Every failure is fatal and carries a descriptive message: an unreadable
//! or malformed ledger aborts before aggregation, and an output file that
//! cannot be written aborts the export. Empty-ledger conditions (no expense
//! rows when computing extremes or averages) are not errors; the aggregator
//! reports those as `None` and the report prints "no data".

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The ledger file could not be opened or a row failed to parse.
    #[error("could not read the ledger: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the console report or an output file failed.
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}
