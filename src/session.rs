//! Query handling for one user session: the element table is loaded once, every submitted
//! formula is parsed, estimated and rendered into a fresh report. Per-query failures are
//! turned into text here and never leave the query boundary.
use crate::Elements::element_table::ElementTable;
use crate::Oxidation::estimator_api::{EstimatorEnum, OxidationAssignment, OxidationEstimator};
use crate::Oxidation::formula_parser::{DuplicatePolicy, ParsedFormula, parse_formula};
use crate::Oxidation::report::{format_report, report_table};
use crate::errors::{EstimationError, InputError, OxiError};
use crate::settings::{OutputFormat, Settings};
use log::{error, info, warn};

/// Parsed formula and its oxidation states
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub formula: ParsedFormula,
    pub assignment: OxidationAssignment,
}

#[derive(Debug, Clone)]
pub struct OxiSession {
    table: ElementTable,
    estimator: EstimatorEnum,
    duplicate_policy: DuplicatePolicy,
    output: OutputFormat,
}

impl OxiSession {
    pub fn new(table: ElementTable, estimator: EstimatorEnum) -> Self {
        Self {
            table,
            estimator,
            duplicate_policy: DuplicatePolicy::default(),
            output: OutputFormat::default(),
        }
    }

    /// Loads the element library named in the settings.
    ///
    /// # Returns
    /// * `Err(OxiError::DataUnavailable)` - the library cannot be loaded, the session must stop
    /// * `Err(OxiError::Config)` - the configured policy does not exist
    pub fn from_settings(settings: &Settings) -> Result<Self, OxiError> {
        let estimator = settings.estimator()?;
        let table = ElementTable::load_from_file(settings.element_data_path())?;
        info!(
            "session started with {} estimator and {} elements",
            estimator.name(),
            table.len()
        );
        Ok(Self::new(table, estimator)
            .with_duplicate_policy(settings.duplicate_policy())
            .with_output(settings.output()))
    }

    pub fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn table(&self) -> &ElementTable {
        &self.table
    }

    pub fn estimator(&self) -> &EstimatorEnum {
        &self.estimator
    }

    pub fn set_estimator(&mut self, estimator: EstimatorEnum) {
        info!("switched to {} estimator", estimator.name());
        self.estimator = estimator;
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    pub fn set_output(&mut self, output: OutputFormat) {
        self.output = output;
    }

    /// Parses and estimates one formula. Blank input is an [`InputError`].
    pub fn run_query(&self, text: &str) -> Result<QueryResult, OxiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InputError::EmptyFormula.into());
        }
        let formula = parse_formula(text, self.duplicate_policy)?;
        if formula.is_empty() {
            return Err(EstimationError::EmptyFormula.into());
        }
        let assignment = self.estimator.estimate(&formula, &self.table)?;
        Ok(QueryResult {
            formula,
            assignment,
        })
    }

    /// Renders a result in the configured output format
    pub fn render(&self, result: &QueryResult) -> String {
        match self.output {
            OutputFormat::Text => format_report(&result.formula, &self.table, &result.assignment),
            OutputFormat::Table => report_table(
                &result.formula,
                &self.table,
                &result.assignment,
                self.estimator.octet_range(),
            )
            .to_string(),
        }
    }

    /// Report text for a submitted formula, or the error message that replaces it
    pub fn handle_query(&self, text: &str) -> String {
        match self.run_query(text) {
            Ok(result) => self.render(&result),
            Err(OxiError::Input(e)) => {
                warn!("rejected input: {}", e);
                format!("Input Error: {}", e)
            }
            Err(e) => {
                error!("query '{}' failed: {}", text.trim(), e);
                format!("Error: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Oxidation::estimator_api::{EstimatorType, create_estimator};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn library() -> ElementTable {
        ElementTable::load_from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/element_data.json"))
            .unwrap()
    }

    fn session() -> OxiSession {
        OxiSession::new(library(), create_estimator(EstimatorType::Simple))
    }

    #[test]
    fn test_water_query() {
        let result = session().run_query("  H2O \n").unwrap();
        assert_eq!(result.formula, ParsedFormula::from_pairs(&[("H", 2), ("O", 1)]));
        assert_eq!(result.assignment.get("H"), Some(1));
        assert_eq!(result.assignment.get("O"), Some(-2));
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let session = session();
        assert!(matches!(
            session.run_query(""),
            Err(OxiError::Input(InputError::EmptyFormula))
        ));
        assert!(matches!(
            session.run_query("   \t"),
            Err(OxiError::Input(InputError::EmptyFormula))
        ));
        assert_eq!(session.handle_query(""), "Input Error: Please enter a formula!");
    }

    #[test]
    fn test_nothing_parsed_is_an_estimation_error() {
        let session = session();
        assert!(matches!(
            session.run_query("123"),
            Err(OxiError::Estimation(EstimationError::EmptyFormula))
        ));
        assert_eq!(
            session.handle_query("123"),
            "Error: no element symbols found in the formula"
        );
        assert!(session.handle_query("H0").starts_with("Error: "));
    }

    #[test]
    fn test_unknown_symbol_report() {
        let report = session().handle_query("Xx2O");
        assert!(report.contains("Xx: electronegativity=unknown, atomic number=unknown"));
        assert!(report.contains("O: electronegativity=3.44, atomic number=8, group 16"));
        assert!(report.contains("Xx: 0"));
    }

    #[test]
    fn test_duplicate_policy() {
        let overwrite = session().run_query("CH3COOH").unwrap();
        assert_eq!(overwrite.formula.get("H"), Some(1));
        let accumulate = session()
            .with_duplicate_policy(DuplicatePolicy::Accumulate)
            .run_query("CH3COOH")
            .unwrap();
        assert_eq!(accumulate.formula.get("H"), Some(4));
    }

    #[test]
    fn test_table_output() {
        let session = session().with_output(OutputFormat::Table);
        let report = session.handle_query("NaCl");
        assert!(report.contains("oxidation state"));
        assert!(report.contains("+1"));
        assert!(report.contains("-1"));
    }

    #[test]
    fn test_from_settings() {
        let mut temp_config = NamedTempFile::new().unwrap();
        let config = format!(
            r#"{{"element_data": "{}", "policy": "central_atom"}}"#,
            concat!(env!("CARGO_MANIFEST_DIR"), "/element_data.json").replace('\\', "/")
        );
        temp_config.write_all(config.as_bytes()).unwrap();
        let settings = Settings::with_config_file(temp_config.path().to_str().unwrap()).unwrap();

        let session = OxiSession::from_settings(&settings).unwrap();
        assert_eq!(session.estimator().name(), "central_atom");
        assert_eq!(session.table().len(), 118);
        assert!(session.handle_query("H2SO4").contains("S: +6"));
    }

    #[test]
    fn test_from_settings_without_library() {
        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config
            .write_all(br#"{"element_data": "no_such_element_data.json"}"#)
            .unwrap();
        let settings = Settings::with_config_file(temp_config.path().to_str().unwrap()).unwrap();
        assert!(matches!(
            OxiSession::from_settings(&settings),
            Err(OxiError::DataUnavailable(_))
        ));
    }
}
