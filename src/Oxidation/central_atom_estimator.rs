use crate::Elements::element_table::ElementTable;
use crate::Elements::octet_rule::OctetRange;
use crate::Oxidation::estimator_api::{
    FLUORINE, OxidationAssignment, OxidationEstimator, floor_div, most_electronegative,
    provisional_state, weighted_total,
};
use crate::Oxidation::formula_parser::ParsedFormula;
use crate::Oxidation::simple_estimator::SimpleEstimator;
use crate::errors::EstimationError;
use log::{debug, info};

/// position of the central atom among three distinct elements (H2SO4 -> S, KNO3 -> N)
const CENTRAL_POSITION: usize = 1;

/// Three-element refinement on top of the global adjustment heuristic.
///
/// Formulae with exactly three distinct elements whose second symbol is a known, non-fluorine
/// element are solved directly: the two outer elements are fixed from octet need and the
/// electronegativity ranking (alkali metals capped to ±1, alkaline earth metals to ±2), the
/// central atom takes `floor(-(outer charge) / central count)` and one corrective pass removes
/// what rounding left. Every other formula goes through [`SimpleEstimator`] with the extended
/// octet range (groups 1-12 lose electrons).
#[derive(Debug, Clone)]
pub struct CentralAtomEstimator {
    fallback: SimpleEstimator,
}

impl Default for CentralAtomEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CentralAtomEstimator {
    pub fn new() -> Self {
        Self {
            fallback: SimpleEstimator::with_octet_range(OctetRange::Extended),
        }
    }

    fn has_central_atom(formula: &ParsedFormula, table: &ElementTable) -> bool {
        if formula.len() != 3 {
            return false;
        }
        formula
            .symbols()
            .nth(CENTRAL_POSITION)
            .is_some_and(|central| central != FLUORINE && table.contains(central))
    }

    fn outer_state(&self, symbol: &str, table: &ElementTable, most_en: &str) -> i64 {
        if symbol == FLUORINE {
            return -1;
        }
        let Some(record) = table.lookup(symbol) else {
            return 0;
        };
        let mut state = provisional_state(symbol, table, self.octet_range());
        if symbol == most_en {
            state = -state;
        }
        match record.group {
            Some(1) => state.clamp(-1, 1),
            Some(2) => state.clamp(-2, 2),
            _ => state,
        }
    }

    fn solve_central(
        &self,
        formula: &ParsedFormula,
        table: &ElementTable,
        most_en: &str,
    ) -> Vec<i64> {
        let mut states: Vec<i64> = formula
            .symbols()
            .enumerate()
            .map(|(i, symbol)| {
                if i == CENTRAL_POSITION {
                    0
                } else {
                    self.outer_state(symbol, table, most_en)
                }
            })
            .collect();

        let central_count = formula
            .iter()
            .nth(CENTRAL_POSITION)
            .map(|(_, count)| count)
            .unwrap_or(1);
        // central state is 0 here, so this is the outer charge alone
        let outer_charge = weighted_total(formula, &states);
        states[CENTRAL_POSITION] = floor_div(-outer_charge, central_count);

        let residual = weighted_total(formula, &states);
        if residual != 0 {
            states[CENTRAL_POSITION] -= floor_div(residual, central_count);
        }
        debug!(
            "central atom state {} after outer charge {}",
            states[CENTRAL_POSITION], outer_charge
        );
        states
    }
}

impl OxidationEstimator for CentralAtomEstimator {
    fn name(&self) -> &'static str {
        "central_atom"
    }

    fn octet_range(&self) -> OctetRange {
        OctetRange::Extended
    }

    fn estimate(
        &self,
        formula: &ParsedFormula,
        table: &ElementTable,
    ) -> Result<OxidationAssignment, EstimationError> {
        if !Self::has_central_atom(formula, table) {
            return self.fallback.estimate(formula, table);
        }
        let most_en = most_electronegative(formula, table).ok_or(EstimationError::EmptyFormula)?;
        let states = self.solve_central(formula, table, most_en);

        let assignment = OxidationAssignment::new(formula, states);
        if !assignment.is_neutral() {
            info!(
                "central atom refinement left residual charge {} for {}",
                assignment.residual_charge(),
                formula.to_formula_string()
            );
        }
        Ok(assignment)
    }
}
