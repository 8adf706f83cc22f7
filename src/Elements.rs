/// eng
/// Periodic table library used by the oxidation state estimator.
/// Element records (electronegativity, atomic number, periodic group) are loaded once from a JSON
/// document keyed by element symbol and are read-only afterwards. The table is an explicit value
/// passed by reference to the parser, estimator and report, there is no global element state.
pub mod element_table;
/// Octet rule heuristics: how many electrons an element of a given periodic group tends to
/// lose or gain to complete its outer shell
pub mod octet_rule;
