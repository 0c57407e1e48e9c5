//! Interactive shell over one open dashboard.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use civic_core::Dashboard;

use super::action::Action;
use super::{render, report};

const SHELL_COMMANDS: [&str; 5] = ["undo", "redo", "show", "modules", "quit"];

const ACTION_COMMANDS: [&str; 12] = [
    "search",
    "category",
    "mode",
    "favorite",
    "density",
    "velocity",
    "save-query",
    "apply-query",
    "remove-query",
    "toggle-module",
    "privacy",
    "vote",
];

/// One shell line parsed as an action.
#[derive(Parser, Debug)]
#[command(name = "civic", no_binary_name = true, disable_help_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    action: Action,
}

/// rustyline helper providing command completion, hints and highlighting.
struct ShellHelper {
    commands: Vec<&'static str>,
}

impl ShellHelper {
    fn new() -> Self {
        let mut commands: Vec<&'static str> = SHELL_COMMANDS
            .iter()
            .chain(ACTION_COMMANDS.iter())
            .copied()
            .collect();
        commands.sort_unstable();
        Self { commands }
    }

    fn matches<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.commands
            .iter()
            .copied()
            .filter(move |cmd| cmd.starts_with(prefix))
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .matches(line)
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.matches(line)
            .find(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let first = line.split_whitespace().next().unwrap_or_default();
        if SHELL_COMMANDS.contains(&first) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }
}

impl Validator for ShellHelper {}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(dashboard: &mut Dashboard) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new()));

    println!("{}", "=== civic-dash shell ===".bright_magenta().bold());
    println!(
        "{}",
        "Type an action (e.g. 'favorite src-1'), 'undo', 'redo', 'show', or 'quit'."
            .bright_black()
    );
    println!();

    loop {
        match rl.readline("civic> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if handle_line(dashboard, trimmed)? == Flow::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }
    Ok(())
}

fn handle_line(dashboard: &mut Dashboard, line: &str) -> Result<Flow> {
    match line {
        "quit" | "exit" => return Ok(Flow::Quit),
        "undo" => {
            let moved = dashboard.undo_any();
            report_history_move("Undid", moved);
        }
        "redo" => {
            let moved = dashboard.redo_any();
            report_history_move("Redid", moved);
        }
        "show" => render::show(dashboard, false)?,
        "modules" => render::modules(dashboard),
        _ => match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => report(parsed.action.apply(dashboard)),
            Err(e) => eprintln!("{}", e.to_string().trim_end().red()),
        },
    }
    Ok(Flow::Continue)
}

fn report_history_move(verb: &str, moved: usize) {
    if moved == 0 {
        println!("{}", "Nothing to do".bright_black());
    } else {
        println!("{}", format!("{verb} {moved} store(s)").green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_core::{DashboardConfig, MemoryStore};
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        Dashboard::open(Arc::new(MemoryStore::new()), &DashboardConfig::default())
    }

    #[test]
    fn test_shell_line_parses_actions() {
        let parsed = ShellLine::try_parse_from("favorite src-1".split_whitespace()).unwrap();
        assert!(matches!(parsed.action, Action::Favorite { id } if id == "src-1"));

        let parsed = ShellLine::try_parse_from("search city council".split_whitespace()).unwrap();
        assert!(matches!(parsed.action, Action::Search { words } if words.len() == 2));

        assert!(ShellLine::try_parse_from("mode sideways".split_whitespace()).is_err());
    }

    #[test]
    fn test_lines_drive_undo_and_redo() {
        let mut dashboard = dashboard();
        assert_eq!(handle_line(&mut dashboard, "favorite src-1").unwrap(), Flow::Continue);
        assert_eq!(handle_line(&mut dashboard, "toggle-module sports").unwrap(), Flow::Continue);

        handle_line(&mut dashboard, "undo").unwrap();
        assert!(!dashboard.view.is_favorite("src-1"));
        assert!(dashboard.modules.present().is_enabled("sports"));

        handle_line(&mut dashboard, "redo").unwrap();
        assert!(dashboard.view.is_favorite("src-1"));
        assert_eq!(handle_line(&mut dashboard, "quit").unwrap(), Flow::Quit);
    }

    #[test]
    fn test_completion_candidates() {
        let helper = ShellHelper::new();
        let matches: Vec<&str> = helper.matches("re").collect();
        assert_eq!(matches, vec!["redo", "remove-query"]);
    }
}
