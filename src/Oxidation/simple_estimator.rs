use crate::Elements::element_table::ElementTable;
use crate::Elements::octet_rule::{OctetRange, max_adjustment};
use crate::Oxidation::estimator_api::{
    FLUORINE, OxidationAssignment, OxidationEstimator, floor_div, most_electronegative,
    provisional_state, weighted_total,
};
use crate::Oxidation::formula_parser::ParsedFormula;
use crate::errors::EstimationError;
use log::{debug, info};

/// Global adjustment heuristic.
///
/// 1) every element but fluorine starts from its octet need (0 if unknown), fluorine is -1
/// 2) the most electronegative element is negated (it accepts electrons)
/// 3) one pass over the elements in formula order: while the weighted total Σ(state × count) is
///    nonzero, the element's state is decreased by `min(floor(total / count), max_adjustment)`.
///    Fluorine and symbols missing from the table are left alone.
///
/// The pass is capped at the number of distinct elements, so the result may keep a nonzero
/// residual charge.
#[derive(Debug, Clone, Default)]
pub struct SimpleEstimator {
    octet_range: OctetRange,
}

impl SimpleEstimator {
    pub fn new() -> Self {
        Self {
            octet_range: OctetRange::MainGroup,
        }
    }

    pub fn with_octet_range(octet_range: OctetRange) -> Self {
        Self { octet_range }
    }

    fn initial_states(
        &self,
        formula: &ParsedFormula,
        table: &ElementTable,
        most_en: &str,
    ) -> Vec<i64> {
        formula
            .symbols()
            .map(|symbol| {
                if symbol == FLUORINE {
                    -1
                } else if symbol == most_en {
                    -provisional_state(symbol, table, self.octet_range)
                } else {
                    provisional_state(symbol, table, self.octet_range)
                }
            })
            .collect()
    }

    fn balance(&self, formula: &ParsedFormula, table: &ElementTable, states: &mut [i64]) {
        let mut total = weighted_total(formula, states);
        for (i, (symbol, count)) in formula.iter().enumerate() {
            if total == 0 {
                break;
            }
            if symbol == FLUORINE {
                continue;
            }
            let Some(record) = table.lookup(symbol) else {
                continue;
            };
            let limit = max_adjustment(record.group, self.octet_range);
            let adjustment = floor_div(total, count).min(limit);
            states[i] -= adjustment;
            total = weighted_total(formula, states);
            debug!(
                "adjusted {} by {} (limit {}), total charge now {}",
                symbol, -adjustment, limit, total
            );
        }
    }
}

impl OxidationEstimator for SimpleEstimator {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn octet_range(&self) -> OctetRange {
        self.octet_range
    }

    fn estimate(
        &self,
        formula: &ParsedFormula,
        table: &ElementTable,
    ) -> Result<OxidationAssignment, EstimationError> {
        let most_en = most_electronegative(formula, table).ok_or(EstimationError::EmptyFormula)?;
        debug!("most electronegative element: {}", most_en);

        let mut states = self.initial_states(formula, table, most_en);
        self.balance(formula, table, &mut states);

        let assignment = OxidationAssignment::new(formula, states);
        if !assignment.is_neutral() {
            info!(
                "heuristic left residual charge {} for {}",
                assignment.residual_charge(),
                formula.to_formula_string()
            );
        }
        Ok(assignment)
    }
}
