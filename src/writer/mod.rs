//! Renderers for the output structure
//!
//! Each format has a string renderer and a save operation that writes the
//! rendered text to a path. Nothing is written if rendering fails.

mod xml;

pub use xml::{is_valid_xml_name, render_xml};

use crate::config::ConvertOptions;
use crate::error::{ConvertError, ConvertResult};
use crate::types::Record;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Nesting depth of the output structure: sequence → record
const STRUCTURE_DEPTH: usize = 2;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Xml,
}

impl OutputFormat {
    /// Infer the format from a file extension (`.json`, `.yaml`/`.yml`, `.xml`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "xml" => Some(OutputFormat::Xml),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Xml => "xml",
        };
        f.write_str(name)
    }
}

/// Pretty-printed JSON array of objects
pub fn render_json(records: &[Record]) -> ConvertResult<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| ConvertError::Render(format!("JSON: {}", e)))
}

/// Block-style YAML sequence of mappings
pub fn render_yaml(records: &[Record], max_depth: usize) -> ConvertResult<String> {
    let depth = if records.is_empty() { 1 } else { STRUCTURE_DEPTH };
    if depth > max_depth {
        return Err(ConvertError::Render(format!(
            "YAML: structure depth {} exceeds the limit of {}",
            depth, max_depth
        )));
    }
    serde_yaml::to_string(records).map_err(|e| ConvertError::Render(format!("YAML: {}", e)))
}

/// Render in any format, taking names and limits from `options`
pub fn render(
    records: &[Record],
    format: OutputFormat,
    options: &ConvertOptions,
) -> ConvertResult<String> {
    match format {
        OutputFormat::Json => render_json(records),
        OutputFormat::Yaml => render_yaml(records, options.yaml_depth),
        OutputFormat::Xml => render_xml(records, &options.root, &options.row),
    }
}

/// Render and write to `path`
pub fn save(
    records: &[Record],
    format: OutputFormat,
    options: &ConvertOptions,
    path: &Path,
) -> ConvertResult<()> {
    let text = render(records, format, options)?;
    fs::write(path, text).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), %format, records = records.len(), "saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn sample() -> Vec<Record> {
        vec![vec![
            ("first-name", CellValue::from("Ana")),
            ("age", CellValue::Int(30)),
        ]
        .into_iter()
        .collect()]
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.JSON")),
            Some(OutputFormat::Json)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.yml")),
            Some(OutputFormat::Yaml)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("a/b.xml")),
            Some(OutputFormat::Xml)
        );
        assert_eq!(OutputFormat::from_path(Path::new("out.txt")), None);
        assert_eq!(OutputFormat::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample()).unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"first-name\": \"Ana\",\n    \"age\": 30\n  }\n]"
        );
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render_yaml(&sample(), 10).unwrap();
        assert_eq!(yaml, "- first-name: Ana\n  age: 30\n");
    }

    #[test]
    fn test_render_yaml_depth_limit() {
        assert!(matches!(
            render_yaml(&sample(), 1),
            Err(ConvertError::Render(_))
        ));
        // An empty sequence is only one level deep
        assert_eq!(render_yaml(&[], 1).unwrap(), "[]\n");
    }

    #[test]
    fn test_empty_structure() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
        assert_eq!(render_yaml(&[], 10).unwrap(), "[]\n");
    }

    #[test]
    fn test_save_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = save(
            &sample(),
            OutputFormat::Json,
            &ConvertOptions::default(),
            &path,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_nothing_written_on_render_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.xml");
        let options = ConvertOptions {
            root: "1bad".to_string(),
            ..Default::default()
        };
        let err = save(&sample(), OutputFormat::Xml, &options, &path).unwrap_err();
        assert!(matches!(err, ConvertError::Render(_)));
        assert!(!path.exists());
    }
}
