//! cellnote CLI - cell label conversion and CSV lookups

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cellnote::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cellnote")]
#[command(
    author,
    version,
    about = "Spreadsheet cell label conversion and CSV lookup tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the label of a cell, e.g. `label 3 731` prints ABC3
    Label {
        /// Row (1-based)
        row: u32,

        /// Column (1-based)
        col: u32,
    },

    /// Print the row and column of a label, tab separated
    Address {
        /// Cell label such as ABC3
        label: String,
    },

    /// Print cell values as `label<TAB>value` lines
    Get {
        /// Input CSV file
        input: PathBuf,

        /// Cell label (A1) or range (A1:C3)
        target: String,
    },

    /// Write a cell value and save the file
    Set {
        /// Input CSV file
        input: PathBuf,

        /// Cell label to write
        label: String,

        /// New value; plain numbers and TRUE/FALSE are typed, an empty value clears the cell
        value: String,

        /// Output CSV file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the labels of cells matching a query
    Find {
        /// Input CSV file
        input: PathBuf,

        /// Text to match, compared against the whole cell text
        query: String,

        /// Treat the query as a regular expression
        #[arg(short, long)]
        regex: bool,

        /// Print every match instead of the first
        #[arg(short, long)]
        all: bool,
    },

    /// Print rows as JSON records keyed by a header row
    Records {
        /// Input CSV file
        input: PathBuf,

        /// Header row (1-based)
        #[arg(long, default_value = "1")]
        head: u32,

        /// Read empty cells as 0
        #[arg(long)]
        empty_to_zero: bool,
    },

    /// Show information about a CSV file
    Info {
        /// Input CSV file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Label { row, col } => {
            println!("{}", to_label(row, col)?);
            Ok(())
        }
        Commands::Address { label } => {
            let address = to_address(&label)?;
            println!("{}\t{}", address.row(), address.col());
            Ok(())
        }
        Commands::Get { input, target } => get_cells(&input, &target),
        Commands::Set {
            input,
            label,
            value,
            output,
        } => set_cell(&input, &label, &value, output.as_deref()),
        Commands::Find {
            input,
            query,
            regex,
            all,
        } => find_cells(&input, &query, regex, all),
        Commands::Records {
            input,
            head,
            empty_to_zero,
        } => print_records(&input, head, empty_to_zero),
        Commands::Info { input } => show_info(&input),
    }
}

fn open(input: &Path) -> Result<Spreadsheet> {
    Spreadsheet::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn first_sheet(spreadsheet: &Spreadsheet) -> Result<&Worksheet> {
    spreadsheet
        .sheet1()
        .context("Spreadsheet has no worksheets")
}

fn get_cells(input: &Path, target: &str) -> Result<()> {
    let spreadsheet = open(input)?;
    let sheet = first_sheet(&spreadsheet)?;

    let cells = if target.contains(':') {
        sheet.range(target)
    } else {
        sheet.acell(target).map(|cell| vec![cell])
    }
    .with_context(|| format!("Failed to read '{}'", target))?;

    let mut stdout = io::stdout().lock();
    for cell in &cells {
        writeln!(stdout, "{}\t{}", cell.label(), cell.value).context("Failed to write to stdout")?;
    }

    Ok(())
}

fn set_cell(input: &Path, label: &str, value: &str, output: Option<&Path>) -> Result<()> {
    let mut spreadsheet = open(input)?;
    let address = CellAddress::parse(label)?;

    let sheet = spreadsheet
        .get_worksheet_mut(0)
        .context("Spreadsheet has no worksheets")?;

    // CSV grids are sized to their data, so grow to reach the target
    let rows = sheet.row_count().max(address.row());
    let cols = sheet.col_count().max(address.col());
    if (rows, cols) != (sheet.row_count(), sheet.col_count()) {
        sheet.resize(rows, cols)?;
    }

    sheet.update_cell(address.row(), address.col(), CellValue::from_text(value))?;

    let output = output.unwrap_or(input);
    spreadsheet
        .save(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    eprintln!("Wrote {} to '{}'", address, output.display());

    Ok(())
}

fn find_cells(input: &Path, query: &str, regex: bool, all: bool) -> Result<()> {
    let spreadsheet = open(input)?;
    let sheet = first_sheet(&spreadsheet)?;

    let query = if regex {
        CellQuery::pattern(query).with_context(|| format!("Invalid pattern '{}'", query))?
    } else {
        CellQuery::from(query)
    };

    let cells = if all {
        sheet.findall(query)
    } else {
        match sheet.find(query) {
            Ok(cell) => vec![cell],
            Err(Error::CellNotFound(_)) => Vec::new(),
            Err(e) => return Err(e.into()),
        }
    };

    if cells.is_empty() {
        bail!("No matching cells");
    }
    for cell in &cells {
        println!("{}", cell.label());
    }

    Ok(())
}

fn print_records(input: &Path, head: u32, empty_to_zero: bool) -> Result<()> {
    let spreadsheet = open(input)?;
    let sheet = first_sheet(&spreadsheet)?;

    let options = RecordOptions::default()
        .with_head(head)
        .with_empty_to_zero(empty_to_zero);
    let records = sheet
        .get_all_records(&options)
        .with_context(|| format!("Failed to read records with header row {}", head))?;

    let json = serde_json::to_string_pretty(&records).context("Failed to encode records")?;
    println!("{}", json);

    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let spreadsheet = open(input)?;

    println!("File: {}", input.display());
    println!("Title: {}", spreadsheet.title());

    for sheet in spreadsheet.worksheets() {
        println!();
        println!("  Sheet {}: \"{}\"", sheet.id(), sheet.title());
        println!(
            "    Grid: {} rows x {} columns",
            sheet.row_count(),
            sheet.col_count()
        );

        match sheet.used_range() {
            Some(range) => println!("    Used range: {}", range),
            None => println!("    Used range: empty"),
        }
        println!("    Values: {}", sheet.cell_count());
    }

    Ok(())
}
