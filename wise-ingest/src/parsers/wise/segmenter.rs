//! Splits the transaction table into records.
//!
//! Every line containing `Transaction:` is an anchor for one record. From the
//! anchor the walker reads the date and reference, walks backward to collect
//! the (possibly wrapped) description and forward to the amounts line:
//!
//! ```text
//! Card transaction of 25.51 EUR issued by      <- description (1..n lines)
//! Backblaze San Mateo
//! 27 November 2025 Card ending in 1234 ... Transaction: CARD-3166196743   <- anchor
//! -25.51 1,974.49                              <- amount, running balance
//! ```
//!
//! The description walk stops at the previous record's amounts line or at
//! the top of the table.

use std::ops::Range;
use std::sync::OnceLock;

use chrono::NaiveDate;
use log::{debug, warn};
use regex::Regex;

use crate::amount::{extract_amounts, is_amounts_line};
use crate::dates::leading_date;
use crate::error::{ParseError, Result};
use crate::types::{SkipReason, SkippedAnchor, Transaction};

const ANCHOR_MARKER: &str = "Transaction:";

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Transaction:\s*(\S+)").expect("reference regex"))
}

/// Records recovered from one table, in order of appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmented {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedAnchor>,
}

/// Indices of all anchor lines inside `table`.
pub fn anchor_lines(lines: &[&str], table: Range<usize>) -> Vec<usize> {
    table.filter(|&i| lines[i].contains(ANCHOR_MARKER)).collect()
}

/// Reference token following the `Transaction:` marker.
pub fn reference_of(line: &str) -> Option<&str> {
    reference_re().captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// Reading date and reference off the anchor line.
    AtAnchor,
    /// Walking upward; `cursor` is the last line consumed (initially the anchor).
    SeekingDescriptionStart { cursor: usize },
    /// Walking downward; `cursor` is the last line consumed (initially the anchor).
    SeekingAmounts { cursor: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue(WalkState),
    Done(std::result::Result<Transaction, SkipReason>),
}

/// Walks the lines around one anchor and assembles its record.
#[derive(Debug)]
pub struct RecordWalker<'a> {
    lines: &'a [&'a str],
    table: Range<usize>,
    anchor: usize,
    currency: &'a str,
    date: Option<NaiveDate>,
    reference: Option<&'a str>,
    /// Collected bottom-up; reversed when the record is built.
    description: Vec<&'a str>,
}

impl<'a> RecordWalker<'a> {
    pub fn new(lines: &'a [&'a str], table: Range<usize>, anchor: usize, currency: &'a str) -> Self {
        Self {
            lines,
            table,
            anchor,
            currency,
            date: None,
            reference: None,
            description: Vec::new(),
        }
    }

    pub fn run(mut self) -> std::result::Result<Transaction, SkipReason> {
        let mut state = WalkState::AtAnchor;
        loop {
            match self.step(state) {
                Step::Continue(next) => state = next,
                Step::Done(outcome) => return outcome,
            }
        }
    }

    pub fn step(&mut self, state: WalkState) -> Step {
        match state {
            WalkState::AtAnchor => self.read_anchor(),
            WalkState::SeekingDescriptionStart { cursor } => self.seek_description_start(cursor),
            WalkState::SeekingAmounts { cursor } => self.seek_amounts(cursor),
        }
    }

    fn read_anchor(&mut self) -> Step {
        let lines = self.lines;
        let line = lines[self.anchor].trim();
        let Some((date, _)) = leading_date(line) else {
            return Step::Done(Err(SkipReason::MissingDate));
        };
        let Some(reference) = reference_of(line) else {
            return Step::Done(Err(SkipReason::MissingReference));
        };
        self.date = Some(date);
        self.reference = Some(reference);
        Step::Continue(WalkState::SeekingDescriptionStart { cursor: self.anchor })
    }

    fn seek_description_start(&mut self, cursor: usize) -> Step {
        let done = Step::Continue(WalkState::SeekingAmounts { cursor: self.anchor });
        if cursor <= self.table.start {
            return done;
        }
        let prev = cursor - 1;
        let lines = self.lines;
        let line = lines[prev].trim();
        if is_amounts_line(line) {
            return done;
        }
        if !line.is_empty() {
            self.description.push(line);
        }
        Step::Continue(WalkState::SeekingDescriptionStart { cursor: prev })
    }

    fn seek_amounts(&mut self, cursor: usize) -> Step {
        let next = cursor + 1;
        if next >= self.table.end {
            return Step::Done(Err(SkipReason::MissingAmounts));
        }
        let line = self.lines[next].trim();
        if line.is_empty() {
            return Step::Continue(WalkState::SeekingAmounts { cursor: next });
        }
        if !is_amounts_line(line) {
            return Step::Done(Err(SkipReason::MissingAmounts));
        }

        let amounts = extract_amounts(line);
        let (Some(&amount), Some(date), Some(reference)) = (amounts.first(), self.date, self.reference) else {
            return Step::Done(Err(SkipReason::MissingAmounts));
        };

        let description: Vec<&str> = self.description.iter().rev().copied().collect();
        Step::Done(Ok(Transaction::from_signed_amount(
            description.join(" "),
            date,
            amount,
            reference,
            self.currency,
            amounts.get(1).copied(),
        )))
    }
}

/// Extract every record in `table`. Anchors that cannot be extracted are
/// reported in `skipped`; zero extracted records is an error.
pub fn segment(lines: &[&str], table: Range<usize>, currency: &str) -> Result<Segmented> {
    let mut transactions = Vec::new();
    let mut skipped = Vec::new();

    for anchor in anchor_lines(lines, table.clone()) {
        match RecordWalker::new(lines, table.clone(), anchor, currency).run() {
            Ok(txn) => {
                debug!("line {anchor}: {} {} {}", txn.date, txn.reference, txn.signed_amount());
                transactions.push(txn);
            }
            Err(reason) => {
                warn!("skipping anchor at line {anchor}: {reason}");
                skipped.push(SkippedAnchor {
                    line: anchor,
                    text: lines[anchor].trim().to_string(),
                    reason,
                });
            }
        }
    }

    if transactions.is_empty() {
        return Err(ParseError::NoTransactionsFound);
    }

    Ok(Segmented { transactions, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    const TWO_RECORDS: &str = "\
Card transaction of 25.51 EUR issued by
Backblaze San Mateo
27 November 2025 Card ending in 1234 Jane Doe Transaction: CARD-3166196743
-25.51 1,974.49
Received money from ACME GMBH with reference INV-7
25 November 2025 Transaction: TRANSFER-1830034
2,000.00 2,000.00";

    #[test]
    fn test_anchor_lines_respect_table_bounds() {
        let ls = lines(TWO_RECORDS);
        assert_eq!(anchor_lines(&ls, 0..ls.len()), vec![2, 5]);
        assert_eq!(anchor_lines(&ls, 3..ls.len()), vec![5]);
    }

    #[test]
    fn test_reference_of() {
        assert_eq!(reference_of("x Transaction: CARD-1 more"), Some("CARD-1"));
        assert_eq!(reference_of("Jane DoeTransaction:CARD-2"), Some("CARD-2"));
        assert_eq!(reference_of("x Transaction:   "), None);
    }

    #[test]
    fn test_walker_states() {
        let ls = lines(TWO_RECORDS);
        let mut walker = RecordWalker::new(&ls, 0..ls.len(), 2, "EUR");

        assert_eq!(
            walker.step(WalkState::AtAnchor),
            Step::Continue(WalkState::SeekingDescriptionStart { cursor: 2 })
        );
        assert_eq!(
            walker.step(WalkState::SeekingDescriptionStart { cursor: 2 }),
            Step::Continue(WalkState::SeekingDescriptionStart { cursor: 1 })
        );
        assert_eq!(
            walker.step(WalkState::SeekingDescriptionStart { cursor: 1 }),
            Step::Continue(WalkState::SeekingDescriptionStart { cursor: 0 })
        );
        // Top of table reached.
        assert_eq!(
            walker.step(WalkState::SeekingDescriptionStart { cursor: 0 }),
            Step::Continue(WalkState::SeekingAmounts { cursor: 2 })
        );
        let Step::Done(Ok(txn)) = walker.step(WalkState::SeekingAmounts { cursor: 2 }) else {
            panic!("expected a record");
        };
        assert_eq!(txn.description, "Card transaction of 25.51 EUR issued by Backblaze San Mateo");
        assert_eq!(txn.outgoing, Some(25.51));
        assert_eq!(txn.balance, Some(1974.49));
    }

    #[test]
    fn test_description_stops_at_previous_amounts_line() {
        let ls = lines(TWO_RECORDS);
        let txn = RecordWalker::new(&ls, 0..ls.len(), 5, "EUR").run().unwrap();
        assert_eq!(txn.description, "Received money from ACME GMBH with reference INV-7");
        assert_eq!(txn.incoming, Some(2000.0));
        assert_eq!(txn.reference, "TRANSFER-1830034");
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 11, 25).unwrap());
    }

    #[test]
    fn test_blank_lines_are_skipped_both_ways() {
        let ls = lines("Coffee shop\n\n3 December 2025 Transaction: CARD-9\n\n\n-4.20 95.80");
        let txn = RecordWalker::new(&ls, 0..ls.len(), 2, "GBP").run().unwrap();
        assert_eq!(txn.description, "Coffee shop");
        assert_eq!(txn.amount, 4.2);
        assert_eq!(txn.currency, "GBP");
    }

    #[test]
    fn test_skip_reasons() {
        let ls = lines("Fees\nSee Transaction: details on our website\n-1.00 1.00");
        assert_eq!(
            RecordWalker::new(&ls, 0..ls.len(), 1, "EUR").run(),
            Err(SkipReason::MissingDate)
        );

        let ls = lines("Fees\n1 December 2025 Transaction: FEE-1\nnot amounts\n-1.00 1.00");
        assert_eq!(
            RecordWalker::new(&ls, 0..ls.len(), 1, "EUR").run(),
            Err(SkipReason::MissingAmounts)
        );

        // Amounts line exists but lies beyond the table.
        let ls = lines("Fees\n1 December 2025 Transaction: FEE-1\n-1.00 1.00");
        assert_eq!(
            RecordWalker::new(&ls, 0..2, 1, "EUR").run(),
            Err(SkipReason::MissingAmounts)
        );

        let ls = lines("Fees\n1 December 2025 Transaction:\n-1.00 1.00");
        assert_eq!(
            RecordWalker::new(&ls, 0..ls.len(), 1, "EUR").run(),
            Err(SkipReason::MissingReference)
        );
    }

    #[test]
    fn test_segment_reports_skips_and_keeps_order() {
        let text = format!("{TWO_RECORDS}\nDisclaimer: Transaction: fees may apply");
        let ls = lines(&text);
        let out = segment(&ls, 0..ls.len(), "EUR").unwrap();

        let refs: Vec<_> = out.transactions.iter().map(|t| t.reference.as_str()).collect();
        assert_eq!(refs, ["CARD-3166196743", "TRANSFER-1830034"]);
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].line, 7);
        assert_eq!(out.skipped[0].reason, SkipReason::MissingDate);
    }

    #[test]
    fn test_segment_without_records_fails() {
        let ls = lines("just\nsome\ntext");
        assert_eq!(segment(&ls, 0..ls.len(), "EUR"), Err(ParseError::NoTransactionsFound));

        let ls = lines("See Transaction: details\n-1.00");
        assert_eq!(segment(&ls, 0..ls.len(), "EUR"), Err(ParseError::NoTransactionsFound));
    }
}
