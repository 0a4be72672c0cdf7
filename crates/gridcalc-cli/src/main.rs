//! gridcalc CLI - evaluate and inspect comma-delimited sheets

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridcalc::is_plain_text;
use gridcalc::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Shown in place of a cell whose evaluation failed
const ERROR_MARKER: &str = "#ERR";

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Evaluate formulas in comma-delimited sheets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every cell of a sheet and print the values
    Eval {
        /// Input sheet (comma-delimited)
        input: PathBuf,

        /// Only evaluate this cell (e.g. B3)
        #[arg(short, long)]
        cell: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate an expression against a sheet
    Calc {
        /// Input sheet (comma-delimited)
        input: PathBuf,

        /// Expression, e.g. "SUM(A1..A10)/2"
        expression: String,
    },

    /// Show how cell text is tokenized
    Tokens {
        /// Cell text
        text: String,
    },

    /// Show information about a sheet
    Info {
        /// Input sheet (comma-delimited)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            input,
            cell,
            output,
        } => eval_sheet(&input, cell.as_deref(), output.as_deref()),
        Commands::Calc { input, expression } => calc(&input, &expression),
        Commands::Tokens { text } => show_tokens(&text),
        Commands::Info { input } => show_info(&input),
    }
}

fn open(input: &Path) -> Result<Spreadsheet> {
    Spreadsheet::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

/// Plain content as-is, formulas as their value or the error marker
fn render_cell(sheet: &Spreadsheet, row: usize, col: usize) -> String {
    let text = sheet.get(row, col).unwrap_or_default();
    if is_plain_text(&sheet.engine().tokenize(text)) {
        return text.to_string();
    }

    match sheet.evaluate_cell(row, col) {
        Ok(value) => value.to_string(),
        Err(_) => ERROR_MARKER.to_string(),
    }
}

fn eval_sheet(input: &Path, cell: Option<&str>, output: Option<&Path>) -> Result<()> {
    let sheet = open(input)?;

    if let Some(cell) = cell {
        let addr: CellAddress = cell
            .parse()
            .with_context(|| format!("Invalid cell address '{}'", cell))?;
        match sheet.evaluate_cell(addr.row, addr.col) {
            Ok(value) => println!("{}", value),
            Err(e) => println!("{} ({})", ERROR_MARKER, e),
        }
        return Ok(());
    }

    let grid = sheet.grid();
    let mut text = String::new();
    for row in 1..=grid.rows() {
        let values: Vec<String> = (1..=grid.cols())
            .map(|col| render_cell(&sheet, row, col))
            .collect();
        text.push_str(&values.join(","));
        text.push('\n');
    }

    if let Some(output_path) = output {
        std::fs::write(output_path, &text)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote {} rows to '{}'", grid.rows(), output_path.display());
    } else {
        io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn calc(input: &Path, expression: &str) -> Result<()> {
    let sheet = open(input)?;
    let value = sheet
        .evaluate(expression)
        .with_context(|| format!("Failed to evaluate '{}'", expression))?;
    println!("{}", value);
    Ok(())
}

fn show_tokens(text: &str) -> Result<()> {
    let engine = FormulaEngine::default();
    for token in engine.tokenize(text) {
        println!("{:<16}{}", token.kind.to_string(), token.value);
    }
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let sheet = open(input)?;
    let grid = sheet.grid();

    let mut formulas = 0;
    let mut errors = 0;
    for row in 1..=grid.rows() {
        for col in 1..=grid.cols() {
            let text = grid.get(row, col).unwrap_or_default();
            if is_plain_text(&sheet.engine().tokenize(text)) {
                continue;
            }
            formulas += 1;
            if sheet.evaluate_cell(row, col).is_err() {
                errors += 1;
            }
        }
    }

    println!("File: {}", input.display());
    println!("Size: {} rows x {} columns", grid.rows(), grid.cols());
    println!("Formulas: {} ({} errors)", formulas, errors);
    Ok(())
}
