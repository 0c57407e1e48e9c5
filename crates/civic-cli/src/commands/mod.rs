pub mod action;
pub mod render;
pub mod shell;

use colored::Colorize;

/// Prints the outcome of an action.
///
/// Storage failures happen after the change is already applied in memory, so
/// they are shown as warnings rather than errors.
pub fn report(outcome: civic_core::Result<String>) {
    match outcome {
        Ok(message) => println!("{}", message.green()),
        Err(e) if e.is_persistence() => {
            eprintln!("{}", format!("warning: change not saved: {e}").yellow())
        }
        Err(e) => eprintln!("{}", format!("error: {e}").red()),
    }
}
