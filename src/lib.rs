#[allow(non_snake_case)]
pub mod Elements;
#[allow(non_snake_case)]
pub mod Oxidation;
pub mod cli;
pub mod errors;
pub mod session;
pub mod settings;
