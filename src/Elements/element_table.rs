//! # Element Table
//!
//! ## Purpose
//! Read-only lookup of per-element attributes keyed by element symbol. The table is loaded once
//! at startup from a JSON library file and passed by reference to every computation.
//!
//! ## Data Format
//! ```json
//! {
//!   "H":  { "EN": 2.2,   "Atomic#": 1,  "Group": 1 },
//!   "He": { "EN": "N/A", "Atomic#": 2,  "Group": 18 },
//!   "Ce": { "EN": 1.12,  "Atomic#": 58 }
//! }
//! ```
//! `EN` is either a number or a "not applicable" marker string, `Group` may be absent or `null`
//! for f-block and unclassified elements. Extra fields are ignored.
//!
//! ## Failure Policy
//! Any failure to read or parse the library is a [`DataUnavailable`] error, callers treat it as
//! fatal. Lookups of unknown symbols are not errors, they return `None`.
use crate::Elements::octet_rule::{OctetNeed, OctetRange, octet_need};
use crate::errors::{DataError, DataUnavailable};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;

/// marker used by the shipped library for elements without a Pauling electronegativity
pub const NOT_APPLICABLE: &str = "N/A";

/// Electronegativity as stored in the library: a number or an explicit "not applicable" marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Electronegativity {
    Value(f64),
    NotApplicable(String),
}

impl Electronegativity {
    pub fn value(&self) -> Option<f64> {
        match self {
            Electronegativity::Value(v) => Some(*v),
            Electronegativity::NotApplicable(_) => None,
        }
    }
    /// value used for ranking, elements without electronegativity rank lowest
    pub fn rank_value(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl Default for Electronegativity {
    fn default() -> Self {
        Electronegativity::NotApplicable(NOT_APPLICABLE.to_string())
    }
}

impl fmt::Display for Electronegativity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // keeps the decimal point on whole values: 3.0, not 3
            Electronegativity::Value(v) => write!(f, "{:?}", v),
            Electronegativity::NotApplicable(marker) => write!(f, "{}", marker),
        }
    }
}

/// attributes of a single element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// filled from the key of the library document
    #[serde(skip)]
    pub symbol: String,
    #[serde(rename = "EN", default)]
    pub electronegativity: Electronegativity,
    #[serde(rename = "Atomic#")]
    pub atomic_number: u32,
    /// periodic group 1-18, None for f-block and unclassified elements
    #[serde(rename = "Group", default)]
    pub group: Option<u8>,
}

impl ElementRecord {
    pub fn new(
        symbol: &str,
        electronegativity: Option<f64>,
        atomic_number: u32,
        group: Option<u8>,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            electronegativity: electronegativity
                .map(Electronegativity::Value)
                .unwrap_or_default(),
            atomic_number,
            group,
        }
    }

    pub fn octet_need(&self, range: OctetRange) -> OctetNeed {
        octet_need(self.group, range)
    }
}

/// Immutable mapping symbol -> ElementRecord
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    records: HashMap<String, ElementRecord>,
}

impl ElementTable {
    /// Loads the element library from a JSON file.
    ///
    /// # Returns
    /// * `Ok(ElementTable)` - table with one record per key of the document
    /// * `Err(DataUnavailable)` - if the file is missing, unreadable or malformed
    pub fn load_from_file(path: &str) -> Result<Self, DataUnavailable> {
        let unavailable = |source: DataError| DataUnavailable {
            path: path.to_string(),
            source,
        };
        let content = fs::read_to_string(path).map_err(|e| unavailable(DataError::from(e)))?;
        let table = Self::from_json_str(&content).map_err(unavailable)?;
        info!("loaded {} elements from '{}'", table.len(), path);
        Ok(table)
    }

    pub fn from_json_str(content: &str) -> Result<Self, DataError> {
        let raw: HashMap<String, ElementRecord> = serde_json::from_str(content)?;
        let records = raw
            .into_iter()
            .map(|(symbol, mut record)| {
                record.symbol = symbol.clone();
                (symbol, record)
            })
            .collect();
        Ok(Self { records })
    }

    /// builds a table from ready records, handy for fixture tables
    pub fn from_records<I: IntoIterator<Item = ElementRecord>>(records: I) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.symbol.clone(), record))
            .collect();
        Self { records }
    }

    /// None for symbols absent from the library, never fails
    pub fn lookup(&self, symbol: &str) -> Option<&ElementRecord> {
        let record = self.records.get(symbol);
        if record.is_none() {
            debug!("element '{}' not found in the library", symbol);
        }
        record
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.records.contains_key(symbol)
    }

    /// electronegativity used for ranking, 0.0 for unknown symbols or missing values
    pub fn rank_value(&self, symbol: &str) -> f64 {
        self.records
            .get(symbol)
            .map(|record| record.electronegativity.rank_value())
            .unwrap_or(0.0)
    }

    pub fn group_of(&self, symbol: &str) -> Option<u8> {
        self.records.get(symbol).and_then(|record| record.group)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// symbols sorted by atomic number
    pub fn symbols(&self) -> Vec<&str> {
        let mut records: Vec<&ElementRecord> = self.records.values().collect();
        records.sort_by_key(|record| record.atomic_number);
        records.iter().map(|record| record.symbol.as_str()).collect()
    }
}
