//! Locates the structural anchors of a Wise statement: currency banner,
//! statement period, transaction table header and footer.

use std::ops::Range;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::dates::parse_date_range;
use crate::error::{NotAWiseReason, ParseError, Result};
use crate::types::DateRange;

use super::ParseOptions;

const TABLE_HEADER_PREFIX: &str = "Description";
const TABLE_HEADER_AMOUNT: &str = "Amount";
const FOOTER_PREFIX: &str = "Wise is the trading name";

fn banner_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<currency>[A-Z]{3})\s+statement$").expect("banner regex"))
}

/// Where the pieces of a statement live, as 0-based line indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementLayout {
    pub currency: String,
    pub date_range: DateRange,
    /// Lines strictly between the table header and the footer (or end of text).
    pub table: Range<usize>,
}

/// First `XXX statement` line: (line index, currency code).
pub fn find_currency_banner(lines: &[&str]) -> Option<(usize, String)> {
    lines.iter().enumerate().find_map(|(i, line)| {
        banner_re()
            .captures(line.trim())
            .map(|caps| (i, caps["currency"].to_string()))
    })
}

/// First line within `lookahead` lines after the banner that parses as a period.
pub fn find_date_range(lines: &[&str], banner: usize, lookahead: usize) -> Option<(usize, DateRange)> {
    let start = banner + 1;
    let end = start.saturating_add(lookahead).min(lines.len());
    (start..end).find_map(|i| parse_date_range(lines[i]).ok().map(|range| (i, range)))
}

/// First line starting with `Description` that also mentions `Amount`.
///
/// Containment, not word matching: the run-on layout renders the header as
/// one token (`DescriptionIncomingOutgoingAmount`).
pub fn find_table_header(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let line = line.trim();
        line.starts_with(TABLE_HEADER_PREFIX) && line.contains(TABLE_HEADER_AMOUNT)
    })
}

/// First footer line after `header`, if any.
pub fn find_footer(lines: &[&str], header: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(header + 1)
        .find(|(_, line)| line.trim().starts_with(FOOTER_PREFIX))
        .map(|(i, _)| i)
}

pub fn scan(lines: &[&str], opts: &ParseOptions) -> Result<StatementLayout> {
    let (banner, currency) = find_currency_banner(lines)
        .ok_or(ParseError::NotAWiseStatement(NotAWiseReason::MissingCurrency))?;
    debug!("currency banner {currency} at line {banner}");

    let (range_line, date_range) = find_date_range(lines, banner, opts.date_range_lookahead)
        .ok_or(ParseError::NotAWiseStatement(NotAWiseReason::MissingDateRange))?;
    debug!(
        "statement period {} - {} at line {range_line}",
        date_range.from, date_range.to
    );

    let header = find_table_header(lines)
        .ok_or(ParseError::NotAWiseStatement(NotAWiseReason::MissingTransactionTable))?;
    let end = match find_footer(lines, header) {
        Some(footer) => {
            debug!("table header at line {header}, footer at line {footer}");
            footer
        }
        None => {
            debug!("table header at line {header}, no footer; table runs to end of text");
            lines.len()
        }
    };

    Ok(StatementLayout {
        currency,
        date_range,
        table: header + 1..end,
    })
}
