use OxiState::cli::cli_main::run_interactive_menu;
use OxiState::session::OxiSession;
use OxiState::settings::{DEFAULT_CONFIG_FILE, Settings};
use log::{LevelFilter, error, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process::ExitCode;

pub fn main() -> ExitCode {
    let (settings, config_error) = Settings::load_or_default(DEFAULT_CONFIG_FILE);
    let level = settings.log_level_filter().unwrap_or(LevelFilter::Warn);
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        eprintln!("logger already initialised");
    }
    // reported only now, the logger did not exist while the file was read
    if let Some(e) = config_error {
        warn!("{}, using default settings", e);
    }
    if let Err(e) = settings.log_level_filter() {
        warn!("{}", e);
    }

    // without the element library nothing can be computed
    let mut session = match OxiSession::from_settings(&settings) {
        Ok(session) => session,
        Err(e) => {
            error!("{}", e);
            eprintln!("File Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // `oxistate H2SO4` handles a single formula, no arguments starts the menu
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        println!("{}", session.handle_query(&args.join(" ")));
        return ExitCode::SUCCESS;
    }
    match run_interactive_menu(&mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("terminal i/o failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
