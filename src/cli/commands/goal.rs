use dash_core::currency;
use dash_domain::{Goal, TransactionKind};

use super::{next_id, parse_amount, parse_kind, require_text};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::output;
use crate::cli::registry::{ArgHint, CommandEntry, KIND_CHOICES};

const GOAL_USAGE: &str =
    "goal set <expense|income> <category> <target> | goal remove <expense|income> <category>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("goals", "Show progress toward every goal", "goals", cmd_goals),
        CommandEntry::new("goal", "Add, change or remove a goal", GOAL_USAGE, cmd_goal)
            .with_args(&[
                ArgHint::Choices(&["set", "remove"]),
                ArgHint::Choices(KIND_CHOICES),
            ]),
    ]
}

fn cmd_goals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = &context.dashboard;
    for (title, rows) in [
        ("Expense goals", dashboard.expense_goals()),
        ("Income goals", dashboard.income_goals()),
    ] {
        output::section(title);
        if rows.is_empty() {
            output::info("No goals set.");
        }
        for progress in &rows {
            println!("{}", formatters::goal_row(dashboard, progress));
        }
    }
    Ok(())
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["set", kind, category, target] => {
            let kind = parse_kind(kind)?;
            let category = require_text(category, "Category")?;
            let target = parse_amount(target, context.dashboard.currency())?;
            let mut goals = goals_in_display(context, kind);
            match goals.iter_mut().find(|goal| goal.category == category) {
                Some(goal) => goal.target = target,
                None => {
                    let id = next_id(goals.iter().map(|goal| goal.id))?;
                    goals.push(Goal::new(id, category.clone(), target));
                }
            }
            replace_goals(context, kind, goals);
            output::success(format!(
                "{} goal `{}` set to {}.",
                kind.label(),
                category,
                currency::format_display(target, context.dashboard.currency())
            ));
            Ok(())
        }
        ["remove", kind, category] => {
            let kind = parse_kind(kind)?;
            let mut goals = goals_in_display(context, kind);
            let before = goals.len();
            goals.retain(|goal| goal.category != *category);
            if goals.len() == before {
                output::warning(format!("No {} goal named `{}`.", kind.label().to_lowercase(), category));
                return Ok(());
            }
            replace_goals(context, kind, goals);
            output::success(format!("{} goal `{}` removed.", kind.label(), category));
            Ok(())
        }
        _ => Err(CommandError::usage(GOAL_USAGE)),
    }
}

/// Current goals with targets converted to the display currency, ready to be
/// handed back to the gateway.
fn goals_in_display(context: &ShellContext, kind: TransactionKind) -> Vec<Goal> {
    let dashboard = &context.dashboard;
    dashboard
        .state()
        .goals(kind)
        .iter()
        .map(|goal| Goal {
            target: dashboard.display_amount(goal.target),
            ..goal.clone()
        })
        .collect()
}

fn replace_goals(context: &mut ShellContext, kind: TransactionKind, goals: Vec<Goal>) {
    match kind {
        TransactionKind::Expense => context.dashboard.set_expense_goals(goals),
        TransactionKind::Income => context.dashboard.set_income_goals(goals),
    }
}
