use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;
use wise_ingest::parse_with;

mod config;
mod report;
mod state;

use config::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "wise-ingest",
    version,
    about = "Extract transactions from Wise statement text"
)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse text extracted from a Wise statement PDF and print its transactions
    Parse {
        /// Extracted statement text ("-" or omitted reads stdin)
        input: Option<PathBuf>,

        /// Output format (default from config: json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Print oldest-first instead of statement order
        #[arg(long)]
        sort_by_date: bool,

        /// Fail if any transaction line had to be skipped
        #[arg(long)]
        strict: bool,

        /// Lines after the currency banner searched for the statement period
        #[arg(long)]
        lookahead: Option<usize>,
    },

    /// Manage ~/.wise-ingest/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse {
            input,
            format,
            sort_by_date,
            strict,
            lookahead,
        } => {
            let cfg = config::load_config()?;
            let mut opts = cfg.parser.to_options();
            if let Some(n) = lookahead {
                opts.date_range_lookahead = n;
            }

            let (text, source) = state::read_statement_text(input.as_deref())?;
            debug!("read {} bytes from {source}", text.len());
            let mut result =
                parse_with(&text, &opts).with_context(|| format!("parsing {source}"))?;

            if (strict || cfg.output.strict) && !result.skipped.is_empty() {
                let details: Vec<_> = result.skipped.iter().map(report::describe_skip).collect();
                bail!(
                    "{} transaction line(s) in {source} could not be parsed:\n  {}",
                    result.skipped.len(),
                    details.join("\n  ")
                );
            }

            if sort_by_date || cfg.output.sort_by_date {
                result.transactions = result.sorted_by_date();
            }

            report::print_result(&result, format.unwrap_or(cfg.output.format))?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
