//! Conversion options
//!
//! Everything that shapes a conversion lives in [`ConvertOptions`], which is
//! passed explicitly to the builder and the renderers.

use crate::error::{ConvertError, ConvertResult};
use crate::writer::is_valid_xml_name;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do when two headers normalize to the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyCollision {
    /// Last column wins; the key keeps the position of its first occurrence
    #[default]
    Overwrite,
    /// Later duplicates become `key-2`, `key-3`, ...
    Suffix,
    /// Fail the conversion
    Error,
}

/// Conversion options
///
/// | field          | default     |
/// |----------------|-------------|
/// | `root`         | `data`      |
/// | `row`          | `entry`     |
/// | `header_row`   | `1`         |
/// | `data_row`     | `2`         |
/// | `yaml_depth`   | `10`        |
/// | `on_collision` | `overwrite` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// XML root element name
    pub root: String,
    /// XML element name for each record
    pub row: String,
    /// 1-based row holding the headers
    pub header_row: u32,
    /// 1-based first data row
    pub data_row: u32,
    /// Maximum nesting depth accepted by the YAML renderer
    pub yaml_depth: usize,
    pub on_collision: KeyCollision,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            root: "data".to_string(),
            row: "entry".to_string(),
            header_row: 1,
            data_row: 2,
            yaml_depth: 10,
            on_collision: KeyCollision::Overwrite,
        }
    }
}

impl ConvertOptions {
    /// Load options from a YAML file; missing fields take their defaults
    pub fn from_yaml_file(path: &Path) -> ConvertResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let options: ConvertOptions = serde_yaml::from_str(&content).map_err(|e| {
            ConvertError::Config(format!("Invalid options in {}: {}", path.display(), e))
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> ConvertResult<()> {
        if self.header_row == 0 {
            return Err(ConvertError::Config(
                "header_row is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.data_row == 0 {
            return Err(ConvertError::Config(
                "data_row is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.yaml_depth == 0 {
            return Err(ConvertError::Config(
                "yaml_depth must be at least 1".to_string(),
            ));
        }
        for (field, name) in [("root", &self.root), ("row", &self.row)] {
            if !is_valid_xml_name(name) {
                return Err(ConvertError::Config(format!(
                    "{} '{}' is not a valid XML element name",
                    field, name
                )));
            }
        }
        if self.data_row <= self.header_row {
            tracing::warn!(
                header_row = self.header_row,
                data_row = self.data_row,
                "data row is not below the header row; headers will be read as data"
            );
        }
        Ok(())
    }
}
