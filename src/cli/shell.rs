use std::{
    borrow::Cow,
    io::{self, BufRead, StdinLock},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::CompletionTable;

pub const SCRIPT_ENV: &str = "BUDGET_DASH_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    catch_up_recurring(&mut context);

    match mode {
        CliMode::Interactive => {
            let mut editor = Editor::<DashHelper, DefaultHistory>::new()?;
            editor.set_helper(Some(DashHelper {
                table: context.registry.completion_table(),
            }));
            editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
            output::info("Type `help` to list commands.");
            drive(&mut context, &mut editor)
        }
        CliMode::Script => drive(&mut context, &mut io::stdin().lock()),
    }
}

/// Generates transactions for recurring rules that fell due while the shell was closed.
/// They stay in memory until the user saves.
pub(crate) fn catch_up_recurring(context: &mut ShellContext) -> usize {
    let generated = context.dashboard.apply_recurring();
    if generated > 0 {
        output::info(format!(
            "{generated} recurring transaction(s) generated. Use `save` to keep them."
        ));
    }
    generated
}

enum Input {
    Line(String),
    Interrupted,
    Closed,
}

/// Where command lines come from: the line editor or piped stdin.
trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError>;
}

impl LineSource for Editor<DashHelper, DefaultHistory> {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError> {
        match self.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.add_history_entry(line.trim()).ok();
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                Ok(Input::Closed)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl LineSource for StdinLock<'_> {
    fn next_line(&mut self, _prompt: &str) -> Result<Input, CliError> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(Input::Closed);
        }
        Ok(Input::Line(line))
    }
}

fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        match source.next_line(&context.prompt())? {
            Input::Line(line) => match handle_line(context, &line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err)?,
            },
            Input::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Input::Closed => break,
        }
    }
    Ok(())
}

/// Runs one command line. Blank lines and `#` comments are skipped.
pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let tokens = tokenize(line)?;
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    let outcome = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if outcome == LoopControl::Exit {
        context.running = false;
    }
    Ok(outcome)
}

/// Splits a line with shell quoting rules, so descriptions can contain spaces.
pub(crate) fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    shell_words::split(line)
        .map_err(|err| CommandError::InvalidArguments(format!("Cannot read line: {err}.")))
}

struct DashHelper {
    table: CompletionTable,
}

impl Helper for DashHelper {}

impl Completer for DashHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.table.complete(&line[..pos]);
        let candidates = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for DashHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let usage = self.table.usage_hint(line)?;
        let name_len = line.len().saturating_sub(1);
        usage.get(name_len..).map(|rest| rest.trim_start().to_string())
    }
}

impl Highlighter for DashHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for DashHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_config::Config;
    use dash_core::{Dashboard, FixedClock, MemoryStore, StoreSettings};
    use dash_domain::{Frequency, RecurringRule, TransactionKind, DAY_MS};

    const NOW: i64 = 1_717_243_200_000;

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = tokenize(r#"add expense 12.5 "Weekly groceries" Food"#).unwrap();
        assert_eq!(
            tokens,
            vec!["add", "expense", "12.5", "Weekly groceries", "Food"]
        );
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert!(matches!(
            tokenize(r#"add expense 5 "oops"#),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn startup_catch_up_generates_due_rules() {
        let mut dashboard = Dashboard::open(
            Box::new(MemoryStore::new()),
            StoreSettings::default(),
            Box::new(FixedClock::from_millis(NOW)),
        );
        dashboard.save_recurring(vec![RecurringRule::new(
            1,
            TransactionKind::Income,
            100.0,
            "Allowance",
            Frequency::Weekly,
            NOW - 15 * DAY_MS,
        )]);
        let mut context = ShellContext::with_dashboard(CliMode::Script, dashboard, Config::default());

        assert_eq!(catch_up_recurring(&mut context), 3);
        assert_eq!(catch_up_recurring(&mut context), 0);
        assert_eq!(context.dashboard.state().income.len(), 5);
    }

    #[test]
    fn comments_and_blank_lines_do_nothing() {
        let dashboard = Dashboard::open(
            Box::new(MemoryStore::new()),
            StoreSettings::default(),
            Box::new(FixedClock::from_millis(NOW)),
        );
        let mut context = ShellContext::with_dashboard(CliMode::Script, dashboard, Config::default());
        assert_eq!(handle_line(&mut context, "   ").unwrap(), LoopControl::Continue);
        assert_eq!(
            handle_line(&mut context, "# delete expense 1").unwrap(),
            LoopControl::Continue
        );
        assert_eq!(context.dashboard.state().expenses.len(), 6);
    }
}
