use crate::errors::FormulaError;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// one uppercase letter, any lowercase letters, optional digit run
const ELEMENT_TOKEN: &str = r"([A-Z][a-z]*)(\d*)";

fn element_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ELEMENT_TOKEN).expect("element token pattern is a valid regex"))
}

/// What to do when the same symbol appears more than once, e.g. "CH3COOH"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// the later count replaces the earlier one, the symbol keeps its first position
    #[default]
    Overwrite,
    /// counts are summed
    Accumulate,
}

/// Element symbol -> count, in order of first appearance in the formula
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFormula {
    entries: Vec<(String, u32)>,
}

impl ParsedFormula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, u32)]) -> Self {
        let mut formula = Self::new();
        for (symbol, count) in pairs {
            formula.insert(symbol, *count, DuplicatePolicy::Overwrite);
        }
        formula
    }

    pub fn insert(&mut self, symbol: &str, count: u32, policy: DuplicatePolicy) {
        match self.entries.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, existing)) => match policy {
                DuplicatePolicy::Overwrite => *existing = count,
                DuplicatePolicy::Accumulate => *existing = existing.saturating_add(count),
            },
            None => self.entries.push((symbol.to_string(), count)),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), *c))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    /// number of distinct elements
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes symbol/count pairs back as a formula, counts of 1 are omitted
    pub fn to_formula_string(&self) -> String {
        self.entries
            .iter()
            .map(|(symbol, count)| {
                if *count == 1 {
                    symbol.clone()
                } else {
                    format!("{}{}", symbol, count)
                }
            })
            .collect()
    }
}

/// Scans `formula` left to right for tokens shaped like element symbols with an optional count.
/// Anything else (lowercase runs, brackets, charges, spaces) is skipped silently. A missing count
/// means 1.
///
/// # Returns
/// * `Ok(ParsedFormula)` - possibly empty if nothing looked like an element
/// * `Err(FormulaError)` - if a count is zero or does not fit into u32
pub fn parse_formula(formula: &str, policy: DuplicatePolicy) -> Result<ParsedFormula, FormulaError> {
    let mut parsed = ParsedFormula::new();
    for caps in element_token_regex().captures_iter(formula) {
        let symbol = &caps[1];
        let digits = &caps[2];
        let count = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| FormulaError::CountOverflow {
                    symbol: symbol.to_string(),
                    digits: digits.to_string(),
                })?
        };
        if count == 0 {
            return Err(FormulaError::ZeroCount {
                symbol: symbol.to_string(),
            });
        }
        parsed.insert(symbol, count, policy);
    }
    debug!("parsed formula '{}' into {:?}", formula, parsed);
    Ok(parsed)
}
