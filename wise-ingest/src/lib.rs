//! wise-ingest: turns text extracted from Wise account statement PDFs into
//! typed transactions plus statement metadata.

pub mod amount;
pub mod dates;
pub mod error;
pub mod parsers;
pub mod types;

pub use dates::{parse_date, parse_date_range};
pub use error::{NotAWiseReason, ParseError, Result};
pub use parsers::wise::{parse, parse_with, ParseOptions};
pub use types::{DateRange, Direction, ParseResult, SkipReason, SkippedAnchor, Transaction};
