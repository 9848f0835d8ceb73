//! Workbook loader: existence check, parsing, worksheet selection

use super::active::active_sheet_index;
use crate::error::{ConvertError, ConvertResult};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A selected worksheet, detached from its workbook
#[derive(Debug, Clone)]
pub struct Worksheet {
    pub name: String,
    pub range: Range<Data>,
}

/// Open workbook. Dropping the loader releases the file.
pub struct Loader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
    active: Option<usize>,
}

impl Loader {
    /// Open a workbook (xlsx, xlsm, xlsb, xls, ods)
    ///
    /// Fails with `NotFound` before any parsing if the path is not an existing file.
    pub fn open<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let path = path.as_ref();
        let path = path
            .canonicalize()
            .ok()
            .filter(|p| p.is_file())
            .ok_or_else(|| {
                ConvertError::NotFound(format!("File {} does not exist", path.display()))
            })?;

        let workbook = open_workbook_auto(&path).map_err(|e| {
            ConvertError::Format(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let active = active_sheet_index(&path);

        tracing::debug!(path = %path.display(), ?active, "opened workbook");

        Ok(Self {
            path,
            workbook,
            active,
        })
    }

    /// Canonical path of the opened file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Name of the sheet used when no name is given
    pub fn active_sheet_name(&self) -> Option<String> {
        let names = self.sheet_names();
        let index = self.active.filter(|i| *i < names.len()).unwrap_or(0);
        names.into_iter().nth(index)
    }

    /// Select a worksheet by exact name, or the active sheet when `name` is `None`
    pub fn select(&mut self, name: Option<&str>) -> ConvertResult<Worksheet> {
        let names = self.sheet_names();
        let name = match name {
            Some(name) => {
                if !names.iter().any(|n| n == name) {
                    return Err(ConvertError::NotFound(format!(
                        "Worksheet '{}' does not exist (available: {})",
                        name,
                        names.join(", ")
                    )));
                }
                name.to_string()
            }
            None => self.active_sheet_name().ok_or_else(|| {
                ConvertError::Format(format!("{} contains no worksheets", self.path.display()))
            })?,
        };

        let range = self.workbook.worksheet_range(&name).map_err(|e| {
            ConvertError::Format(format!("Failed to read worksheet '{}': {}", name, e))
        })?;

        tracing::debug!(sheet = %name, end = ?range.end(), "selected worksheet");

        Ok(Worksheet { name, range })
    }
}

/// Sheet names of a workbook plus the index of the active one
pub fn list_sheets<P: AsRef<Path>>(path: P) -> ConvertResult<(Vec<String>, Option<usize>)> {
    let loader = Loader::open(path)?;
    let names = loader.sheet_names();
    let active = loader
        .active_sheet_name()
        .and_then(|active| names.iter().position(|n| *n == active));
    Ok((names, active))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let result = Loader::open("definitely/not/here.xlsx");
        match result {
            Err(e) => assert!(e.is_not_found(), "unexpected error: {}", e),
            Ok(_) => panic!("missing file should fail"),
        }
    }

    #[test]
    fn test_open_directory_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            Loader::open(dir.path()),
            Err(ConvertError::NotFound(_))
        ));
    }

    #[test]
    fn test_open_garbage_is_format_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        assert!(matches!(Loader::open(&path), Err(ConvertError::Format(_))));
    }
}
