use crate::Elements::element_table::ElementTable;
use crate::Elements::octet_rule::OctetRange;
use crate::Oxidation::estimator_api::OxidationAssignment;
use crate::Oxidation::formula_parser::ParsedFormula;
use prettytable::{Table, row};

/// shown instead of any value the element library does not have
pub const PLACEHOLDER: &str = "unknown";

/// "+2" for positive states, bare number otherwise
pub fn format_state(state: i64) -> String {
    if state > 0 {
        format!("+{}", state)
    } else {
        state.to_string()
    }
}

/// (electronegativity, atomic number, group) of a symbol as display strings
fn element_fields(symbol: &str, table: &ElementTable) -> (String, String, String) {
    match table.lookup(symbol) {
        Some(record) => (
            record.electronegativity.to_string(),
            record.atomic_number.to_string(),
            record
                .group
                .map(|g| g.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ),
        None => (
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
            PLACEHOLDER.to_string(),
        ),
    }
}

fn state_of(symbol: &str, assignment: &OxidationAssignment) -> String {
    assignment
        .get(symbol)
        .map(format_state)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Plain text report: one line of element data per element, then the oxidation states.
/// Never fails, missing data is shown as [`PLACEHOLDER`].
pub fn format_report(
    formula: &ParsedFormula,
    table: &ElementTable,
    assignment: &OxidationAssignment,
) -> String {
    let info: Vec<String> = formula
        .iter()
        .map(|(symbol, count)| {
            let (en, number, group) = element_fields(symbol, table);
            format!(
                "{}: electronegativity={}, atomic number={}, group {}, {} per formula unit",
                symbol, en, number, group, count
            )
        })
        .collect();
    let oxidation: Vec<String> = formula
        .symbols()
        .map(|symbol| format!("{}: {}", symbol, state_of(symbol, assignment)))
        .collect();

    let mut report = format!(
        "{}\n\nOxidation states:\n{}",
        info.join("\n"),
        oxidation.join("\n")
    );
    if !assignment.is_neutral() {
        report.push_str(&format!(
            "\nResidual charge: {} (heuristic did not reach neutrality)",
            format_state(assignment.residual_charge())
        ));
    }
    report
}

/// Same data as [`format_report`] as a terminal table, with the octet need of every element
pub fn report_table(
    formula: &ParsedFormula,
    table: &ElementTable,
    assignment: &OxidationAssignment,
    range: OctetRange,
) -> Table {
    let mut out = Table::new();
    out.add_row(row![
        "element",
        "EN",
        "Z",
        "group",
        "count",
        "octet need",
        "oxidation state"
    ]);
    for (symbol, count) in formula.iter() {
        let (en, number, group) = element_fields(symbol, table);
        let octet = table
            .lookup(symbol)
            .map(|record| record.octet_need(range).to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        out.add_row(row![
            symbol,
            en,
            number,
            group,
            count,
            octet,
            state_of(symbol, assignment)
        ]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Elements::element_table::ElementRecord;
    use crate::Oxidation::estimator_api::OxidationEstimator;
    use crate::Oxidation::simple_estimator::SimpleEstimator;

    fn table() -> ElementTable {
        ElementTable::from_records(vec![
            ElementRecord::new("H", Some(2.2), 1, Some(1)),
            ElementRecord::new("O", Some(3.44), 8, Some(16)),
            ElementRecord::new("Na", Some(0.93), 11, Some(1)),
            ElementRecord::new("Cl", Some(3.16), 17, Some(17)),
            ElementRecord::new("Ce", Some(1.12), 58, None),
            ElementRecord::new("He", None, 2, Some(18)),
        ])
    }

    #[test]
    fn test_format_state() {
        assert_eq!(format_state(2), "+2");
        assert_eq!(format_state(0), "0");
        assert_eq!(format_state(-3), "-3");
    }

    #[test]
    fn test_water_report() {
        let table = table();
        let formula = ParsedFormula::from_pairs(&[("H", 2), ("O", 1)]);
        let assignment = SimpleEstimator::new().estimate(&formula, &table).unwrap();
        let report = format_report(&formula, &table, &assignment);
        let expected = "H: electronegativity=2.2, atomic number=1, group 1, 2 per formula unit\n\
                        O: electronegativity=3.44, atomic number=8, group 16, 1 per formula unit\n\
                        \n\
                        Oxidation states:\n\
                        H: +1\n\
                        O: -2";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_placeholders() {
        let table = table();
        let formula = ParsedFormula::from_pairs(&[("Xx", 2), ("Ce", 1), ("He", 1)]);
        let assignment = SimpleEstimator::new().estimate(&formula, &table).unwrap();
        let report = format_report(&formula, &table, &assignment);
        assert!(report.contains(
            "Xx: electronegativity=unknown, atomic number=unknown, group unknown, 2 per formula unit"
        ));
        assert!(report.contains("Ce: electronegativity=1.12, atomic number=58, group unknown"));
        assert!(report.contains("He: electronegativity=N/A, atomic number=2, group 18"));
        assert!(report.contains("Xx: 0"));
    }

    #[test]
    fn test_residual_line() {
        let table = table();
        let formula = ParsedFormula::from_pairs(&[("Na", 3), ("Cl", 1)]);
        let assignment = SimpleEstimator::new().estimate(&formula, &table).unwrap();
        let report = format_report(&formula, &table, &assignment);
        assert!(report.ends_with("Residual charge: +1 (heuristic did not reach neutrality)"));
    }

    #[test]
    fn test_report_table() {
        let table = table();
        let formula = ParsedFormula::from_pairs(&[("Na", 1), ("Cl", 1), ("Xx", 1)]);
        let assignment = SimpleEstimator::new().estimate(&formula, &table).unwrap();
        let rendered = report_table(&formula, &table, &assignment, OctetRange::MainGroup);
        assert_eq!(rendered.len(), 4);
        let text = rendered.to_string();
        assert!(text.contains("oxidation state"));
        assert!(text.contains("loses 1"));
        assert!(text.contains("gains 1"));
        assert!(text.contains("unknown"));
    }
}
