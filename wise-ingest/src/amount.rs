//! Locale-formatted statement amounts ("-1,000.00").

use std::sync::OnceLock;

use regex::Regex;

const AMOUNT_PATTERN: &str = r"-?\d[\d,]*\.\d{2}";

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(AMOUNT_PATTERN).expect("amount regex"))
}

// One or two amounts filling the whole line. The second is the running
// balance; run-on layouts print it with no gap ("-10.00500.00").
fn amounts_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^{AMOUNT_PATTERN}(?:\s*{AMOUNT_PATTERN})?$"))
            .expect("amounts line regex")
    })
}

/// Strip thousands separators and parse as a signed decimal.
///
/// Callers only hand in substrings already matched by the amount grammar,
/// so `None` means the grammar and this parser disagree.
pub fn parse_amount(s: &str) -> Option<f64> {
    s.trim().replace(',', "").parse().ok()
}

/// Whether `line` is an amounts row: an amount, optionally followed by a balance.
pub fn is_amounts_line(line: &str) -> bool {
    amounts_line_re().is_match(line.trim())
}

/// Every amount-shaped substring of `line`, in order.
pub fn extract_amounts(line: &str) -> Vec<f64> {
    amount_re()
        .find_iter(line)
        .filter_map(|m| parse_amount(m.as_str()))
        .collect()
}
