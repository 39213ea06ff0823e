//! Command-line interface for pg-field-codecs
//!
//! # Usage Examples
//!
//! ```bash
//! # Decode an array column value
//! pg-field-codec decode array '[1,2,3]'
//!
//! # Decode a SQL NULL JSONB value
//! pg-field-codec decode jsonb --null
//!
//! # Encode from stdin with settings from a file
//! echo '{"a":1}' | pg-field-codec --config codec.yaml encode jsonb
//! ```
//!
//! Decode prints the in-memory value as pretty JSON. Encode prints the text
//! that would be stored, or `NULL`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pg_field_codecs::{decode_column, encode_column, CodecOpts, ColumnKind};

#[derive(Parser)]
#[command(name = "pg-field-codec")]
#[command(about = "Decode and encode array/JSONB column values the way the field codecs do")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: CodecOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw column value (read path)
    Decode {
        /// Column flavor
        #[arg(value_enum)]
        column: ColumnKind,

        /// Raw column text (read from stdin when omitted)
        value: Option<String>,

        /// Decode a SQL NULL
        #[arg(long, conflicts_with = "value")]
        null: bool,
    },

    /// Encode a JSON document (write path)
    Encode {
        /// Column flavor
        #[arg(value_enum)]
        column: ColumnKind,

        /// JSON document (read from stdin when omitted)
        value: Option<String>,
    },
}

fn read_input(value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => {
            let input =
                std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?;
            Ok(input.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.opts.field_config()?;

    match cli.command {
        Commands::Decode {
            column,
            value,
            null,
        } => {
            let raw = if null { None } else { Some(read_input(value)?) };
            tracing::debug!("Decoding {column:?} column value {raw:?}");
            let decoded = decode_column(column, config, raw.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
        Commands::Encode { column, value } => {
            let input = read_input(value)?;
            tracing::debug!("Encoding {column:?} column value {input}");
            match encode_column(column, config, &input)? {
                Some(stored) => println!("{stored}"),
                None => println!("NULL"),
            }
        }
    }

    Ok(())
}
