use crate::config::{ConvertOptions, KeyCollision};
use crate::converter::Converter;
use crate::error::ConvertResult;
use crate::excel::{extract, list_sheets, Loader};
use crate::normalize::slugify;
use crate::writer::OutputFormat;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments of the convert command; `None` leaves the configured value alone
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub root: Option<String>,
    pub row: Option<String>,
    pub header_row: Option<u32>,
    pub data_row: Option<u32>,
    pub yaml_depth: Option<usize>,
    pub on_collision: Option<KeyCollision>,
    pub verbose: bool,
}

impl ConvertArgs {
    /// Options from `--config` (or defaults) with command-line overrides applied
    pub fn options(&self) -> ConvertResult<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => ConvertOptions::from_yaml_file(path)?,
            None => ConvertOptions::default(),
        };
        if let Some(root) = &self.root {
            options.root = root.clone();
        }
        if let Some(row) = &self.row {
            options.row = row.clone();
        }
        if let Some(n) = self.header_row {
            options.header_row = n;
        }
        if let Some(n) = self.data_row {
            options.data_row = n;
        }
        if let Some(depth) = self.yaml_depth {
            options.yaml_depth = depth;
        }
        if let Some(policy) = self.on_collision {
            options.on_collision = policy;
        }
        Ok(options)
    }

    /// Explicit format, else the output extension, else JSON
    pub fn resolved_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or(OutputFormat::Json)
    }
}

/// Convert column index to Excel column letter (0→A, 25→Z, 26→AA)
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn write_stdout(text: &str) -> ConvertResult<()> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Execute the convert command
pub fn convert(args: ConvertArgs) -> ConvertResult<()> {
    let options = args.options()?;
    let format = args.resolved_format();

    if args.verbose {
        eprintln!("{}", "📖 Reading workbook...".cyan());
        eprintln!("   Input:  {}", args.input.display());
    }

    let converter = Converter::with_options(&args.input, args.sheet.as_deref(), options)?;

    if args.verbose {
        eprintln!("   Opened: {}", converter.source().display());
        eprintln!(
            "   Sheet:  {} ({} columns, {} records)",
            converter.sheet_name().bright_blue(),
            converter.headers().len(),
            converter.records().len()
        );
    }

    match &args.output {
        Some(output) => {
            converter.save(format, output)?;
            eprintln!(
                "{} {} records → {} ({})",
                "✅".green(),
                converter.records().len(),
                output.display(),
                format
            );
        }
        None => write_stdout(&converter.render(format)?)?,
    }

    Ok(())
}

/// Execute the sheets command: list sheet names, marking the active one
pub fn sheets(input: PathBuf) -> ConvertResult<()> {
    let (names, active) = list_sheets(&input)?;

    let mut listing = String::new();
    for (idx, name) in names.iter().enumerate() {
        if Some(idx) == active {
            listing.push_str(&format!("* {}\n", name));
        } else {
            listing.push_str(&format!("  {}\n", name));
        }
    }
    if names.is_empty() {
        eprintln!("{}", "⚠️  Workbook contains no sheets".yellow());
    }
    write_stdout(&listing)
}

/// Execute the headers command: raw header text and the key it normalizes to
pub fn headers(input: PathBuf, sheet: Option<String>, header_row: u32) -> ConvertResult<()> {
    let options = ConvertOptions {
        header_row,
        data_row: header_row.saturating_add(1),
        ..Default::default()
    };
    options.validate()?;

    let worksheet = Loader::open(&input)?.select(sheet.as_deref())?;
    let grid = extract(&worksheet.range, options.header_row, options.data_row);

    eprintln!(
        "{} {} (row {})",
        "📊 Headers of".bold(),
        worksheet.name.bright_blue(),
        header_row
    );

    let width = grid.headers.iter().map(|h| h.chars().count()).max().unwrap_or(0);
    let mut listing = String::new();
    for (idx, header) in grid.headers.iter().enumerate() {
        listing.push_str(&format!(
            "{:<4}{:<width$}  →  {}\n",
            column_letter(idx),
            header,
            slugify(header),
            width = width
        ));
    }
    write_stdout(&listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_format_resolution() {
        let mut args = ConvertArgs::default();
        assert_eq!(args.resolved_format(), OutputFormat::Json);

        args.output = Some(PathBuf::from("out.yml"));
        assert_eq!(args.resolved_format(), OutputFormat::Yaml);

        args.format = Some(OutputFormat::Xml);
        assert_eq!(args.resolved_format(), OutputFormat::Xml);

        args.format = None;
        args.output = Some(PathBuf::from("out.txt"));
        assert_eq!(args.resolved_format(), OutputFormat::Json);
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("options.yaml");
        std::fs::write(&config, "root: people\nrow: person\nheader_row: 3\n").unwrap();

        let args = ConvertArgs {
            config: Some(config),
            row: Some("item".to_string()),
            data_row: Some(5),
            ..Default::default()
        };
        let options = args.options().unwrap();
        assert_eq!(options.root, "people");
        assert_eq!(options.row, "item");
        assert_eq!(options.header_row, 3);
        assert_eq!(options.data_row, 5);
    }

    #[test]
    fn test_missing_config_is_config_error() {
        let args = ConvertArgs {
            config: Some(Path::new("nope/options.yaml").to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            args.options(),
            Err(crate::error::ConvertError::Config(_))
        ));
    }
}
