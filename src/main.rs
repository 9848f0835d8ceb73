use clap::{Parser, Subcommand};
use sheetconv::cli::{self, ConvertArgs};
use sheetconv::error::ConvertResult;
use sheetconv::{KeyCollision, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetconv")]
#[command(about = "Convert a spreadsheet worksheet to JSON, YAML or XML")]
#[command(long_about = "sheetconv - spreadsheet rows to structured text

The header row becomes the field names (normalized to slugs such as
'First Name' -> 'first-name'); every row below it becomes one record.

COMMANDS:
  convert  - Convert a worksheet to JSON, YAML or XML
  sheets   - List the sheets of a workbook
  headers  - Show headers and the keys they normalize to

EXAMPLES:
  sheetconv convert people.xlsx                     # JSON to stdout
  sheetconv convert people.xlsx -o people.yaml      # format from extension
  sheetconv convert book.ods -s Staff -f xml --root staff --row person")]
#[command(version)]
struct Cli {
    /// Show debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert a worksheet to JSON, YAML or XML.

Reads the header row (default 1) and every row from the first data row
(default 2) through the last used row. Columns run from A through the last
used column; empty cells become null (JSON/YAML) or empty elements (XML).

OUTPUT:
  Without --output the result is written to stdout.
  With --output the format defaults to the file extension
  (.json, .yaml/.yml, .xml), falling back to JSON.

DUPLICATE KEYS:
  Headers such as 'Name' and 'name' normalize to the same key.
    overwrite - later column wins (default)
    suffix    - later columns become name-2, name-3, ...
    error     - refuse to convert

CONFIG FILE:
  --config reads options from YAML; flags override it.
    root: people
    row: person
    header_row: 1
    data_row: 2
    yaml_depth: 10
    on_collision: suffix")]
    /// Convert a worksheet to JSON, YAML or XML
    Convert {
        /// Path to the workbook (.xlsx, .xlsm, .xlsb, .xls, .ods)
        input: PathBuf,

        /// Worksheet name (default: the active sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML file with conversion options
        #[arg(short, long, env = "SHEETCONV_CONFIG")]
        config: Option<PathBuf>,

        /// XML root element name [default: data]
        #[arg(long, env = "SHEETCONV_ROOT")]
        root: Option<String>,

        /// XML element name for each record [default: entry]
        #[arg(long, env = "SHEETCONV_ROW")]
        row: Option<String>,

        /// 1-based header row [default: 1]
        #[arg(long)]
        header_row: Option<u32>,

        /// 1-based first data row [default: 2]
        #[arg(long)]
        data_row: Option<u32>,

        /// Maximum YAML nesting depth [default: 10]
        #[arg(long)]
        yaml_depth: Option<usize>,

        /// Policy for headers that normalize to the same key [default: overwrite]
        #[arg(long, value_enum)]
        on_collision: Option<KeyCollision>,
    },

    /// List the sheets of a workbook (active sheet marked with *)
    Sheets {
        /// Path to the workbook
        input: PathBuf,
    },

    /// Show each column's header and its normalized key
    Headers {
        /// Path to the workbook
        input: PathBuf,

        /// Worksheet name (default: the active sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// 1-based header row
        #[arg(long, default_value = "1")]
        header_row: u32,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "sheetconv=debug"
    } else {
        "sheetconv=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ConvertResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            sheet,
            format,
            output,
            config,
            root,
            row,
            header_row,
            data_row,
            yaml_depth,
            on_collision,
        } => cli::convert(ConvertArgs {
            input,
            sheet,
            format,
            output,
            config,
            root,
            row,
            header_row,
            data_row,
            yaml_depth,
            on_collision,
            verbose: cli.verbose,
        }),

        Commands::Sheets { input } => cli::sheets(input),

        Commands::Headers {
            input,
            sheet,
            header_row,
        } => cli::headers(input, sheet, header_row),
    }
}
