//! `tueson` CLI: convert between tueson and JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to tueson (stdin → stdout)
//! echo '{"name":"Ann","age":3}' | tueson encode
//!
//! # Encode from file to file
//! tueson encode -i data.json -o data.tueson
//!
//! # Decode tueson back to pretty-printed JSON
//! tueson decode -i data.tueson
//!
//! # Pick the direction from the file extension
//! tueson data.json
//! tueson data.tueson
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "tueson",
    version,
    about = "Convert between tueson and JSON, writing to stdout",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Input file; the direction is inferred from its .json / .tueson extension
    path: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Encode JSON to tueson
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode tueson back to pretty-printed JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Encode { input, output }) => {
            let json = read_input(input.as_deref())?;
            write_output(output.as_deref(), &encode(&json)?)
        }
        Some(Command::Decode { input, output }) => {
            let doc = read_input(input.as_deref())?;
            write_output(output.as_deref(), &decode(&doc)?)
        }
        None => {
            let path = match cli.path {
                Some(path) => path,
                None => {
                    Cli::parse_from(["tueson", "--help"]);
                    unreachable!();
                }
            };
            let input = read_input(Some(&path))?;
            if path.ends_with(".json") {
                write_output(None, &encode(&input)?)
            } else if path.ends_with(".tueson") {
                write_output(None, &decode(&input)?)
            } else {
                anyhow::bail!(
                    "cannot determine a direction from `{}`; use the encode or decode subcommand",
                    path
                );
            }
        }
    }
}

fn encode(json: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("Failed to parse JSON input")?;
    serde_tueson::to_string(&value).context("Failed to encode JSON as tueson")
}

fn decode(doc: &str) -> Result<String> {
    let value: serde_tueson::Value =
        serde_tueson::from_str(doc).context("Failed to decode tueson input")?;
    serde_json::to_string_pretty(&value).context("Failed to render JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
