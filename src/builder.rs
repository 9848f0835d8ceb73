//! Output structure builder: grid rows → ordered records

use crate::config::{ConvertOptions, KeyCollision};
use crate::error::{ConvertError, ConvertResult};
use crate::normalize::slugify;
use crate::types::{CellValue, Grid, Record};
use std::collections::{HashMap, HashSet};

/// Column index → output key, resolved once per conversion
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPlan {
    pub keys: Vec<String>,
    /// Overwrite policy left repeated keys in `keys`
    repeated: bool,
}

impl KeyPlan {
    /// Normalize headers and resolve collisions according to `policy`
    pub fn new(headers: &[String], policy: KeyCollision) -> ConvertResult<Self> {
        let slugs: Vec<String> = headers.iter().map(|h| slugify(h)).collect();
        // Generated suffixes never take a key some header normalizes to
        let natural: HashSet<&str> = slugs.iter().map(String::as_str).collect();

        let mut keys = Vec::with_capacity(headers.len());
        let mut repeated = false;
        // key → header text that first claimed it
        let mut seen: HashMap<String, &str> = HashMap::new();

        for (header, slug) in headers.iter().zip(&slugs) {
            let key = match seen.get(slug) {
                None => slug.clone(),
                Some(first) => match policy {
                    KeyCollision::Overwrite => {
                        tracing::warn!(
                            key = %slug,
                            first = %first,
                            second = %header,
                            "headers collide; later column overwrites earlier"
                        );
                        repeated = true;
                        slug.clone()
                    }
                    KeyCollision::Suffix => {
                        let mut n = 2;
                        loop {
                            let candidate = format!("{}-{}", slug, n);
                            if !seen.contains_key(&candidate)
                                && !natural.contains(candidate.as_str())
                            {
                                break candidate;
                            }
                            n += 1;
                        }
                    }
                    KeyCollision::Error => {
                        return Err(ConvertError::DuplicateKey {
                            key: slug.clone(),
                            first: first.to_string(),
                            second: header.clone(),
                        })
                    }
                },
            };
            seen.entry(key.clone()).or_insert(header.as_str());
            keys.push(key);
        }

        Ok(Self { keys, repeated })
    }

    /// Build one record from a grid row
    pub fn record(&self, row: &[CellValue]) -> Record {
        let mut record = Record::with_capacity(self.keys.len());
        for (col, key) in self.keys.iter().enumerate() {
            let value = row.get(col).cloned().unwrap_or(CellValue::Null);
            if self.repeated {
                record.insert(key.as_str(), value);
            } else {
                record.push(key.as_str(), value);
            }
        }
        record
    }
}

/// Keys and records produced from one grid
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Output key per column, after collision handling
    pub keys: Vec<String>,
    /// One record per data row, in sheet order
    pub records: Vec<Record>,
}

/// Build the output structure: one record per data row, in sheet order
pub fn build(grid: &Grid, options: &ConvertOptions) -> ConvertResult<Structure> {
    let plan = KeyPlan::new(&grid.headers, options.on_collision)?;
    let records: Vec<Record> = grid.rows.iter().map(|row| plan.record(row)).collect();
    tracing::debug!(records = records.len(), keys = ?plan.keys, "built records");
    Ok(Structure {
        keys: plan.keys,
        records,
    })
}
