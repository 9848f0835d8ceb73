//! sheetconv - spreadsheet worksheets to JSON, YAML or XML
//!
//! Reads one worksheet, takes a header row and the rows below it as records,
//! and renders the records in a structured text format.
//!
//! # Features
//!
//! - xlsx, xlsm, xlsb, xls and ods input (via calamine)
//! - Header normalization to slug keys (`First Name` → `first-name`)
//! - Explicit policy for headers that normalize to the same key
//! - JSON, YAML and XML output, as strings or written to files
//!
//! # Example
//!
//! ```no_run
//! use sheetconv::Converter;
//!
//! let converter = Converter::open("people.xlsx", None)?;
//! println!("{}", converter.to_json()?);
//! converter.save_xml("people.xml")?;
//! # Ok::<(), sheetconv::error::ConvertError>(())
//! ```

pub mod builder;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod excel;
pub mod normalize;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::{ConvertOptions, KeyCollision};
pub use converter::Converter;
pub use error::{ConvertError, ConvertResult};
pub use excel::list_sheets;
pub use normalize::slugify;
pub use types::{CellValue, Record};
pub use writer::OutputFormat;
