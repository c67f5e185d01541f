use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_core::{CardType, TotalsSummarizer};
use folio_import::{
    parse_document, ErrorReport, ParseOptions, StatementParser, StatementProfile,
    BUILTIN_PROFILES,
};
use folio_pdf::AutoSource;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Turn bank statements into JSON transactions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement (PDF or extracted text) and print it as JSON
    Parse {
        /// Statement file; `.pdf` needs the `pdf` feature, anything else is read as text
        file: PathBuf,

        /// Built-in bank profile (see `folio banks`)
        #[arg(long, default_value = "emirates_islamic", conflicts_with = "profile")]
        bank: String,

        /// Custom profile in TOML, used instead of --bank
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Override the profile's card type (credit or debit)
        #[arg(long)]
        card_type: Option<CardType>,

        /// Password for an encrypted PDF
        #[arg(long)]
        password: Option<String>,

        /// Year to assume when the statement period cannot be found
        #[arg(long)]
        year: Option<i32>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// List built-in bank profiles
    Banks,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { file, bank, profile, card_type, password, year, pretty } => {
            let mut profile = load_profile(&bank, profile.as_ref())?;
            if let Some(card_type) = card_type {
                profile.card_type = card_type;
            }
            let parser = StatementParser::new(profile)
                .context("building statement parser")?
                .with_options(ParseOptions { default_year: year });

            match parse_document(
                &AutoSource,
                &file,
                password.as_deref(),
                &parser,
                &TotalsSummarizer,
            ) {
                Ok(parsed) => {
                    tracing::info!(
                        "Parsed {} transaction(s) from {}",
                        parsed.transactions.len(),
                        file.display()
                    );
                    print_json(&parsed, pretty)?;
                }
                Err(e) => {
                    tracing::error!("Failed to read {}: {e}", file.display());
                    print_json(&ErrorReport::from(&e), pretty)?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Command::Banks => {
            for id in BUILTIN_PROFILES {
                let profile = StatementProfile::builtin(id)?;
                println!("{id}\t{} ({})", profile.bank, profile.card_type);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_profile(bank: &str, path: Option<&PathBuf>) -> Result<StatementProfile> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading profile {}", path.display()))?;
            StatementProfile::from_toml(&content)
                .with_context(|| format!("parsing profile {}", path.display()))
        }
        None => StatementProfile::builtin(bank)
            .with_context(|| format!("unknown bank '{bank}' (try `folio banks`)")),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
