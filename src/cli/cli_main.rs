use crate::Oxidation::estimator_api::{EstimatorType, OxidationEstimator, create_estimator};
use crate::session::OxiSession;
use crate::settings::OutputFormat;
use std::io::{self, BufRead, Write};

/// Runs the menu on the terminal until the user leaves or stdin is closed
pub fn run_interactive_menu(session: &mut OxiSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    run_menu(session, &mut input, &mut out)
}

/// Main menu loop over any input/output pair
pub fn run_menu<R: BufRead, W: Write>(
    session: &mut OxiSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        show_main_menu(session, out)?;
        let Some(choice) = get_user_input(input)? else {
            break;
        };
        let choice = choice.trim();
        if is_leave_command(choice) {
            writeln!(out, "Goodbye!")?;
            break;
        }
        match choice {
            "1" => formula_prompt(session, input, out)?,
            "2" => policy_menu(session, input, out)?,
            "3" => {
                let next = match session.output() {
                    OutputFormat::Text => OutputFormat::Table,
                    OutputFormat::Table => OutputFormat::Text,
                };
                session.set_output(next);
                writeln!(out, "Output format: {:?}", next)?;
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
    Ok(())
}

/* colors
Blue (\x1b[34m) - Welcome header text
Yellow (\x1b[33m) - Menu options
Cyan (\x1b[36m) - prompts
Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu<W: Write>(session: &OxiSession, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\x1b[34m\n OxiState: oxidation states from electronegativity and the octet rule\n \
         estimator: {}, {} elements loaded \x1b[0m",
        session.estimator().name(),
        session.table().len()
    )?;
    writeln!(out, "\x1b[33m1. Calculate oxidation states\x1b[0m")?;
    writeln!(out, "\x1b[33m2. Choose estimator policy\x1b[0m")?;
    writeln!(out, "\x1b[33m3. Toggle text/table output\x1b[0m")?;
    writeln!(out, "\x1b[33m0. Exit\x1b[0m")?;
    write!(out, "\x1b[36mEnter your choice: \x1b[0m")?;
    out.flush()
}

/// Each submitted formula replaces the previous report. "0", "exit" or "quit" goes back to the
/// main menu.
fn formula_prompt<R: BufRead, W: Write>(
    session: &OxiSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        write!(out, "\x1b[36m\nFormula (0 to go back): \x1b[0m")?;
        out.flush()?;
        let Some(formula) = get_user_input(input)? else {
            return Ok(());
        };
        if is_leave_command(formula.trim()) {
            return Ok(());
        }
        writeln!(out, "{}", session.handle_query(&formula))?;
    }
}

fn policy_menu<R: BufRead, W: Write>(
    session: &mut OxiSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\n=== Estimator policy ===")?;
    writeln!(out, "1. Simple (global adjustment)")?;
    writeln!(out, "2. Central atom (three-element refinement)")?;
    write!(out, "Enter your choice: ")?;
    out.flush()?;
    let Some(choice) = get_user_input(input)? else {
        return Ok(());
    };
    match choice.trim() {
        "1" => session.set_estimator(create_estimator(EstimatorType::Simple)),
        "2" => session.set_estimator(create_estimator(EstimatorType::CentralAtom)),
        _ => {
            writeln!(out, "Invalid choice, policy unchanged.")?;
            return Ok(());
        }
    }
    writeln!(out, "Estimator: {}", session.estimator().name())
}

/// "0", "exit" and "quit" in any case
fn is_leave_command(choice: &str) -> bool {
    choice == "0" || choice.eq_ignore_ascii_case("exit") || choice.eq_ignore_ascii_case("quit")
}

/// None once the input is exhausted
fn get_user_input<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
