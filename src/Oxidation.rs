/// eng
/// Scanning of a molecular formula into element counts. The scan is a heuristic, tokens that do not
/// look like element symbols are skipped, there is no bracket, charge or isotope support.
pub mod formula_parser;
/// Common interface of oxidation state estimators (strategy pattern via enum_dispatch) and the
/// shared heuristics: electronegativity ranking, provisional octet states, weighted charge
pub mod estimator_api;
/// Simple policy: every element starts from its octet need, the most electronegative one is negated,
/// then one pass of local corrections drives the weighted total towards zero
pub mod simple_estimator;
/// Central atom policy: like the simple one, but formulae with exactly three distinct elements treat the second
/// symbol as a central atom that absorbs the remaining charge
pub mod central_atom_estimator;
/// Rendering of element data and oxidation states into a plain text report or a table
pub mod report;
