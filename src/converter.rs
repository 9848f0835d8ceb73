//! Converter: workbook → records → JSON / YAML / XML

use crate::builder::build;
use crate::config::ConvertOptions;
use crate::error::ConvertResult;
use crate::excel::{extract, Loader};
use crate::types::Record;
use crate::writer::{self, OutputFormat};
use std::path::{Path, PathBuf};

/// A completed conversion of one worksheet
///
/// All loading and extraction happens in the constructor; the workbook is
/// released before it returns. Rendering afterwards is read-only.
#[derive(Debug, Clone)]
pub struct Converter {
    source: PathBuf,
    sheet_name: String,
    headers: Vec<String>,
    keys: Vec<String>,
    records: Vec<Record>,
    options: ConvertOptions,
}

impl Converter {
    /// Convert `sheet` (or the active sheet) with default options
    pub fn open<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> ConvertResult<Self> {
        Self::with_options(path, sheet, ConvertOptions::default())
    }

    pub fn with_options<P: AsRef<Path>>(
        path: P,
        sheet: Option<&str>,
        options: ConvertOptions,
    ) -> ConvertResult<Self> {
        options.validate()?;

        let (source, worksheet) = {
            let mut loader = Loader::open(path)?;
            let worksheet = loader.select(sheet)?;
            (loader.path().to_path_buf(), worksheet)
        };

        let grid = extract(&worksheet.range, options.header_row, options.data_row);
        let structure = build(&grid, &options)?;

        tracing::info!(
            file = %source.display(),
            sheet = %worksheet.name,
            records = structure.records.len(),
            "converted worksheet"
        );

        Ok(Self {
            source,
            sheet_name: worksheet.name,
            headers: grid.headers,
            keys: structure.keys,
            records: structure.records,
            options,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Raw header text, one per column
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Output key for each column, after collision handling
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn to_json(&self) -> ConvertResult<String> {
        writer::render_json(&self.records)
    }

    pub fn to_yaml(&self) -> ConvertResult<String> {
        writer::render_yaml(&self.records, self.options.yaml_depth)
    }

    pub fn to_xml(&self) -> ConvertResult<String> {
        writer::render_xml(&self.records, &self.options.root, &self.options.row)
    }

    pub fn render(&self, format: OutputFormat) -> ConvertResult<String> {
        writer::render(&self.records, format, &self.options)
    }

    pub fn save<P: AsRef<Path>>(&self, format: OutputFormat, path: P) -> ConvertResult<()> {
        writer::save(&self.records, format, &self.options, path.as_ref())
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConvertResult<()> {
        self.save(OutputFormat::Json, path)
    }

    pub fn save_yaml<P: AsRef<Path>>(&self, path: P) -> ConvertResult<()> {
        self.save(OutputFormat::Yaml, path)
    }

    pub fn save_xml<P: AsRef<Path>>(&self, path: P) -> ConvertResult<()> {
        self.save(OutputFormat::Xml, path)
    }
}
