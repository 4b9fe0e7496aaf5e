//! Wise account statement parser (PDF-to-text output).
//!
//! Handles both known extraction layouts: the spaced one, where fields are
//! separated by spaces and newlines, and the run-on one, where adjacent
//! fields are glued together:
//!
//! ```text
//! EUR statement                                   USD statement
//! 1 November 2025 [GMT] - 30 November 2025 [GMT]  1 January 2026 [GMT] - 31 January 2026 [GMT]
//! Description Incoming Outgoing Amount            DescriptionIncomingOutgoingAmount
//! ...                                             ...
//! 27 November 2025 Card ending in 1234 ...        10 January 2026Card ending in 4321 ...
//! -25.51 1,974.49                                 -10.00500.00
//! Wise is the trading name of ...                 Wise is the trading name of ...
//! ```

pub mod scanner;
pub mod segmenter;

use log::info;

use crate::error::Result;
use crate::types::ParseResult;

/// Lines after the currency banner searched for the statement period.
pub const DEFAULT_DATE_RANGE_LOOKAHEAD: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub date_range_lookahead: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            date_range_lookahead: DEFAULT_DATE_RANGE_LOOKAHEAD,
        }
    }
}

/// Parse extracted statement text with default options.
pub fn parse(text: &str) -> Result<ParseResult> {
    parse_with(text, &ParseOptions::default())
}

/// Parse extracted statement text.
///
/// Either every structural anchor is found and at least one record is
/// extracted, or an error is returned. Anchor lines that could not be turned
/// into records are listed in `ParseResult::skipped`.
pub fn parse_with(text: &str, opts: &ParseOptions) -> Result<ParseResult> {
    let lines: Vec<&str> = text.lines().collect();

    let layout = scanner::scan(&lines, opts)?;
    let segmented = segmenter::segment(&lines, layout.table, &layout.currency)?;

    info!(
        "parsed {} {} transactions ({} skipped anchors)",
        segmented.transactions.len(),
        layout.currency,
        segmented.skipped.len()
    );

    Ok(ParseResult {
        currency: layout.currency,
        date_range: layout.date_range,
        transactions: segmented.transactions,
        skipped: segmented.skipped,
    })
}
