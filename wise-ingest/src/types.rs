use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// Normalized statement row.
///
/// Exactly one of `incoming`/`outgoing` is set and `amount` equals it.
/// Build through [`Transaction::from_signed_amount`] to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    pub date: NaiveDate,
    pub incoming: Option<f64>,
    pub outgoing: Option<f64>,
    /// Always non-negative.
    pub amount: f64,
    /// Provider reference. Not unique: linked entries (charge + refund) may share one.
    pub reference: String,
    pub currency: String,
    /// Running balance printed after the amount, if the row had one.
    pub balance: Option<f64>,
}

impl Transaction {
    /// Negative amounts are outgoing, everything else is incoming.
    pub fn from_signed_amount(
        description: impl Into<String>,
        date: NaiveDate,
        signed_amount: f64,
        reference: impl Into<String>,
        currency: impl Into<String>,
        balance: Option<f64>,
    ) -> Self {
        let amount = signed_amount.abs();
        let (incoming, outgoing) = if signed_amount < 0.0 {
            (None, Some(amount))
        } else {
            (Some(amount), None)
        };

        Self {
            description: description.into(),
            date,
            incoming,
            outgoing,
            amount,
            reference: reference.into(),
            currency: currency.into(),
            balance,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.outgoing.is_some() {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }

    /// Amount with the statement's sign convention restored (outgoing < 0).
    pub fn signed_amount(&self) -> f64 {
        match self.direction() {
            Direction::Incoming => self.amount,
            Direction::Outgoing => -self.amount,
        }
    }
}

/// Reporting period printed under the statement banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Anchor line does not start with a `D Month YYYY` date.
    MissingDate,
    /// Nothing follows the `Transaction:` marker.
    MissingReference,
    /// First non-empty line after the anchor is not an amounts line.
    MissingAmounts,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingDate => f.write_str("anchor line has no leading date"),
            SkipReason::MissingReference => f.write_str("anchor line has no reference"),
            SkipReason::MissingAmounts => f.write_str("no amounts line after anchor"),
        }
    }
}

/// An anchor line that looked like a transaction but could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAnchor {
    /// 0-based line index in the input text.
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub currency: String,
    pub date_range: DateRange,
    /// Order of appearance in the statement, not chronological.
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub skipped: Vec<SkippedAnchor>,
}

impl ParseResult {
    /// Oldest-first copy of the transactions. Same-day rows keep statement order.
    pub fn sorted_by_date(&self) -> Vec<Transaction> {
        let mut txns = self.transactions.clone();
        txns.sort_by_key(|t| t.date);
        txns
    }

    pub fn total_incoming(&self) -> f64 {
        self.transactions.iter().filter_map(|t| t.incoming).sum()
    }

    pub fn total_outgoing(&self) -> f64 {
        self.transactions.iter().filter_map(|t| t.outgoing).sum()
    }
}
