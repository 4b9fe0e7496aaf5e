use std::fmt;

use thiserror::Error;

/// Why a text was rejected as a Wise statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotAWiseReason {
    /// No `XXX statement` banner line.
    MissingCurrency,
    /// No statement period within the lookahead window after the banner.
    MissingDateRange,
    /// No `Description ... Amount` table header.
    MissingTransactionTable,
}

impl fmt::Display for NotAWiseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            NotAWiseReason::MissingCurrency => "no currency line found",
            NotAWiseReason::MissingDateRange => "no date range found",
            NotAWiseReason::MissingTransactionTable => "no transaction table found",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("invalid date range: {0:?}")]
    InvalidDateRange(String),

    #[error("not a Wise statement: {0}")]
    NotAWiseStatement(NotAWiseReason),

    #[error("no transactions found in statement")]
    NoTransactionsFound,
}

pub type Result<T> = std::result::Result<T, ParseError>;
