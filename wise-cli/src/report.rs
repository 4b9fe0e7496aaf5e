use anyhow::Result;
use wise_ingest::{ParseResult, SkippedAnchor, Transaction};

use crate::config::OutputFormat;

pub fn print_result(result: &ParseResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Table => print_table(result),
    }
    Ok(())
}

fn print_table(result: &ParseResult) {
    println!(
        "{} statement {} - {}\n",
        result.currency, result.date_range.from, result.date_range.to
    );
    println!(
        "{:<10}  {:<22}  {:>12}  {:>12}  DESCRIPTION",
        "DATE", "REFERENCE", "INCOMING", "OUTGOING"
    );
    for t in &result.transactions {
        println!("{}", table_row(t));
    }

    println!(
        "\n{} transactions | in {:.2} | out {:.2} | {} skipped",
        result.transactions.len(),
        result.total_incoming(),
        result.total_outgoing(),
        result.skipped.len()
    );
    for s in &result.skipped {
        println!("  {}", describe_skip(s));
    }
}

fn table_row(t: &Transaction) -> String {
    let side = |v: Option<f64>| v.map(|a| format!("{a:.2}")).unwrap_or_default();
    format!(
        "{:<10}  {:<22}  {:>12}  {:>12}  {}",
        t.date.to_string(),
        t.reference,
        side(t.incoming),
        side(t.outgoing),
        t.description
    )
}

pub fn describe_skip(s: &SkippedAnchor) -> String {
    format!("line {}: {} ({})", s.line + 1, s.reason, s.text)
}
