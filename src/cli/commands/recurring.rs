use chrono::NaiveDate;
use dash_domain::{Frequency, RecurringRule};

use super::{next_id, parse_amount, parse_id, parse_kind, require_text};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::output;
use crate::cli::registry::{ArgHint, CommandEntry, KIND_CHOICES};

const RECURRING_USAGE: &str = "recurring list | recurring add <income|expense> <amount> \
<daily|weekly|monthly> <start YYYY-MM-DD> <description> [category] | recurring remove <id> \
| recurring apply";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "recurring",
        "Manage rules that generate transactions on a schedule",
        RECURRING_USAGE,
        cmd_recurring,
    )
    .with_args(&[
        ArgHint::Choices(&["list", "add", "remove", "apply"]),
        ArgHint::Choices(KIND_CHOICES),
        ArgHint::Choices(&[]),
        ArgHint::Choices(&["daily", "weekly", "monthly"]),
    ])]
}

fn cmd_recurring(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => list(context),
        ["add", kind, amount, frequency, start, description, rest @ ..] if rest.len() <= 1 => {
            let kind = parse_kind(kind)?;
            let amount = parse_amount(amount, context.dashboard.currency())?;
            let frequency: Frequency = frequency
                .parse()
                .map_err(|err: dash_domain::UnknownVariant| {
                    CommandError::InvalidArguments(err.to_string())
                })?;
            let start = parse_start(start)?;
            let description = require_text(description, "Description")?;
            let category = match rest.first() {
                Some(raw) => Some(require_text(raw, "Category")?),
                None => None,
            };

            let mut rules = rules_in_display(context);
            let id = next_id(rules.iter().map(|rule| rule.id))?;
            let mut rule = RecurringRule::new(id, kind, amount, description.clone(), frequency, start);
            rule.category = category;
            rules.push(rule);
            context.dashboard.save_recurring(rules);
            output::success(format!(
                "{} rule `{}` added (id {}).",
                frequency.label(),
                description,
                id
            ));
            Ok(())
        }
        ["remove", id] => {
            let id = parse_id(id)?;
            let mut rules = rules_in_display(context);
            let before = rules.len();
            rules.retain(|rule| rule.id != id);
            if rules.len() == before {
                output::warning(format!("No recurring rule with id {}.", id));
                return Ok(());
            }
            context.dashboard.save_recurring(rules);
            output::success(format!("Recurring rule {} removed.", id));
            Ok(())
        }
        ["apply"] => {
            let generated = context.dashboard.apply_recurring();
            output::success(format!("{} recurring transaction(s) generated.", generated));
            Ok(())
        }
        _ => Err(CommandError::usage(RECURRING_USAGE)),
    }
}

fn list(context: &ShellContext) -> CommandResult {
    let dashboard = &context.dashboard;
    output::section("Recurring rules");
    let rules = &dashboard.state().recurring;
    if rules.is_empty() {
        output::info("No recurring rules.");
    }
    for rule in rules {
        println!("{}", formatters::recurring_row(dashboard, rule));
    }
    Ok(())
}

fn parse_start(raw: &str) -> Result<i64, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc().timestamp_millis())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{raw}` is not a date (YYYY-MM-DD)."))
        })
}

fn rules_in_display(context: &ShellContext) -> Vec<RecurringRule> {
    let dashboard = &context.dashboard;
    dashboard
        .state()
        .recurring
        .iter()
        .map(|rule| RecurringRule {
            amount: dashboard.display_amount(rule.amount),
            ..rule.clone()
        })
        .collect()
}
