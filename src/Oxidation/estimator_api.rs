use crate::Elements::element_table::ElementTable;
use crate::Elements::octet_rule::OctetRange;
use crate::Oxidation::central_atom_estimator::CentralAtomEstimator;
use crate::Oxidation::formula_parser::ParsedFormula;
use crate::Oxidation::simple_estimator::SimpleEstimator;
use crate::errors::{ConfigError, EstimationError};
use enum_dispatch::enum_dispatch;

/// fluorine is always -1
pub const FLUORINE: &str = "F";

/// Element symbol -> signed oxidation state, in the order of the parsed formula,
/// together with the weighted charge left over by the heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OxidationAssignment {
    states: Vec<(String, i64)>,
    residual_charge: i64,
}

impl OxidationAssignment {
    pub(crate) fn new(formula: &ParsedFormula, states: Vec<i64>) -> Self {
        let residual_charge = weighted_total(formula, &states);
        let states = formula
            .symbols()
            .map(str::to_string)
            .zip(states)
            .collect();
        Self {
            states,
            residual_charge,
        }
    }

    pub fn get(&self, symbol: &str) -> Option<i64> {
        self.states
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, state)| *state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.states.iter().map(|(s, state)| (s.as_str(), *state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Σ(state × count) after the estimator finished
    pub fn residual_charge(&self) -> i64 {
        self.residual_charge
    }

    /// true if the heuristic reached a neutral total
    pub fn is_neutral(&self) -> bool {
        self.residual_charge == 0
    }
}

#[enum_dispatch]
pub trait OxidationEstimator {
    /// short name used in configuration and messages
    fn name(&self) -> &'static str;
    fn octet_range(&self) -> OctetRange;
    /// Best-effort oxidation states for every element of `formula`.
    /// Pure: the same formula and table always give the same assignment.
    fn estimate(
        &self,
        formula: &ParsedFormula,
        table: &ElementTable,
    ) -> Result<OxidationAssignment, EstimationError>;
}

#[derive(Debug, Clone)]
#[enum_dispatch(OxidationEstimator)]
pub enum EstimatorEnum {
    Simple(SimpleEstimator),
    CentralAtom(CentralAtomEstimator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorType {
    Simple,
    CentralAtom,
}

pub fn create_estimator(estimator_type: EstimatorType) -> EstimatorEnum {
    match estimator_type {
        EstimatorType::Simple => EstimatorEnum::Simple(SimpleEstimator::new()),
        EstimatorType::CentralAtom => EstimatorEnum::CentralAtom(CentralAtomEstimator::new()),
    }
}

pub fn create_estimator_by_name(name: &str) -> Result<EstimatorEnum, ConfigError> {
    match name.trim().to_lowercase().as_str() {
        "simple" | "a" | "policy_a" => Ok(create_estimator(EstimatorType::Simple)),
        "central_atom" | "central" | "b" | "policy_b" => {
            Ok(create_estimator(EstimatorType::CentralAtom))
        }
        _ => Err(ConfigError::UnknownPolicy(name.to_string())),
    }
}

/// Most electronegative symbol of the formula. Unknown symbols and elements without
/// electronegativity rank as 0.0, ties go to the element seen first.
pub fn most_electronegative<'a>(formula: &'a ParsedFormula, table: &ElementTable) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for symbol in formula.symbols() {
        let rank = table.rank_value(symbol);
        match best {
            Some((_, best_rank)) if rank <= best_rank => {}
            _ => best = Some((symbol, rank)),
        }
    }
    best.map(|(symbol, _)| symbol)
}

/// Octet need of the symbol read as an unsigned state, 0 for unknown symbols or groups
pub fn provisional_state(symbol: &str, table: &ElementTable, range: OctetRange) -> i64 {
    table
        .lookup(symbol)
        .map(|record| record.octet_need(range).or_zero())
        .unwrap_or(0)
}

/// Σ(state × count), `states` is aligned with the formula order
pub fn weighted_total(formula: &ParsedFormula, states: &[i64]) -> i64 {
    formula
        .iter()
        .zip(states)
        .map(|((_, count), state)| state * count as i64)
        .sum()
}

/// Integer division rounding toward negative infinity. Counts are always positive, so the
/// Euclidean quotient is the floor quotient.
pub fn floor_div(value: i64, count: u32) -> i64 {
    value.div_euclid(count as i64)
}
