use calamine::Data;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Integral floats inside this magnitude are emitted as integers
const INTEGRAL_LIMIT: f64 = 1e15;

//==============================================================================
// Cell values
//==============================================================================

/// A single cell as read from the worksheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty or unset cell
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Build from a float, collapsing integral values (Excel stores every number as f64)
    pub fn from_number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < INTEGRAL_LIMIT {
            CellValue::Int(n as i64)
        } else {
            CellValue::Float(n)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Null,
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::from_number(*f),
            Data::String(s) => CellValue::String(s.clone()),
            // Raw serial number, same as the cell stores it
            Data::DateTime(dt) => CellValue::from_number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(e) => CellValue::String(e.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Text form used for XML element content (empty for `Null`)
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::String(s) => serializer.serialize_str(s),
        }
    }
}

//==============================================================================
// Records
//==============================================================================

/// One output row: an insertion-ordered list of (key, value) pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Set a field. An existing key is overwritten in place and keeps its position.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) -> Option<CellValue> {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    /// Append without checking for an existing key; callers guarantee uniqueness
    pub(crate) fn push(&mut self, key: impl Into<String>, value: CellValue) {
        self.fields.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

//==============================================================================
// Extracted grid
//==============================================================================

/// Header row and data rectangle pulled out of a worksheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// Raw header text, one per column from column 0
    pub headers: Vec<String>,
    /// Data rows in sheet order, each as wide as `headers`
    pub rows: Vec<Vec<CellValue>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number_collapses_integral_floats() {
        assert_eq!(CellValue::from_number(30.0), CellValue::Int(30));
        assert_eq!(CellValue::from_number(-2.0), CellValue::Int(-2));
        assert_eq!(CellValue::from_number(1.5), CellValue::Float(1.5));
        assert_eq!(CellValue::from_number(1e20), CellValue::Float(1e20));
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Null);
        assert_eq!(CellValue::from(&Data::Float(42.0)), CellValue::Int(42));
        assert_eq!(
            CellValue::from(&Data::String("Ana".to_string())),
            CellValue::String("Ana".to_string())
        );
        assert_eq!(CellValue::from(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_record_insert_keeps_first_position() {
        let mut record = Record::new();
        record.insert("a", CellValue::Int(1));
        record.insert("b", CellValue::Int(2));
        let previous = record.insert("a", CellValue::Int(3));

        assert_eq!(previous, Some(CellValue::Int(1)));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&CellValue::Int(3)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut record = Record::with_capacity(2);
        record.push("b", CellValue::Int(1));
        record.push("a", CellValue::Int(2));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_record_serializes_in_insertion_order() {
        let record: Record = vec![
            ("zeta", CellValue::from("z")),
            ("alpha", CellValue::from(1i64)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":"z","alpha":1}"#);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
    }
}
