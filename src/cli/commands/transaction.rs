use dash_domain::TransactionKind;

use super::{parse_amount, parse_id, parse_kind, require_text};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::output;
use crate::cli::registry::{ArgHint, CommandEntry, KIND_CHOICES};

const LIST_USAGE: &str = "list <income|expense>";
const ADD_USAGE: &str = "add <income|expense> <amount> <description> [category]";
const EDIT_USAGE: &str = "edit <income|expense> <id> <amount> <description> [category]";
const DELETE_USAGE: &str = "delete <income|expense> <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "List transactions in the active date filter, newest first",
            LIST_USAGE,
            cmd_list,
        )
        .with_args(&[ArgHint::Choices(KIND_CHOICES)]),
        CommandEntry::new(
            "add",
            "Record income or an expense in the display currency",
            ADD_USAGE,
            cmd_add,
        )
        .with_args(&[ArgHint::Choices(KIND_CHOICES)]),
        CommandEntry::new("edit", "Change an existing transaction", EDIT_USAGE, cmd_edit)
            .with_args(&[ArgHint::Choices(KIND_CHOICES)]),
        CommandEntry::new("delete", "Remove a transaction", DELETE_USAGE, cmd_delete)
            .with_args(&[ArgHint::Choices(KIND_CHOICES)]),
    ]
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind] = args else {
        return Err(CommandError::usage(LIST_USAGE));
    };
    let kind = parse_kind(kind)?;
    let dashboard = &context.dashboard;
    let rows = dashboard.filtered(kind);

    output::section(format!(
        "{} ({})",
        kind.label(),
        dashboard.date_range().label()
    ));
    if rows.is_empty() {
        output::info(format!("No {} transactions found.", kind.label().to_lowercase()));
        return Ok(());
    }
    for txn in &rows {
        println!("{}", formatters::transaction_row(dashboard, txn));
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, amount, description, category) = match args {
        [kind, amount, description] => (*kind, *amount, *description, None),
        [kind, amount, description, category] => (*kind, *amount, *description, Some(*category)),
        _ => return Err(CommandError::usage(ADD_USAGE)),
    };
    let kind = parse_kind(kind)?;
    let amount = parse_amount(amount, context.dashboard.currency())?;
    let description = require_text(description, "Description")?;
    let category = parse_category(context, kind, category)?;

    let id = context
        .dashboard
        .submit_transaction(kind, None, amount, &description, category)?;
    output::success(format!("{} `{}` added (id {}).", kind.label(), description, id));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, id, amount, description, category) = match args {
        [kind, id, amount, description] => (*kind, *id, *amount, *description, None),
        [kind, id, amount, description, category] => {
            (*kind, *id, *amount, *description, Some(*category))
        }
        _ => return Err(CommandError::usage(EDIT_USAGE)),
    };
    let kind = parse_kind(kind)?;
    let id = parse_id(id)?;
    let amount = parse_amount(amount, context.dashboard.currency())?;
    let description = require_text(description, "Description")?;
    let category = parse_category(context, kind, category)?;

    context
        .dashboard
        .submit_transaction(kind, Some(id), amount, &description, category)?;
    output::success(format!("{} {} updated.", kind.label(), id));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, id] = args else {
        return Err(CommandError::usage(DELETE_USAGE));
    };
    let kind = parse_kind(kind)?;
    let id = parse_id(id)?;

    if !context.confirm(&format!("Delete {} {}?", kind.label().to_lowercase(), id))? {
        output::info("Delete cancelled.");
        return Ok(());
    }
    if context.dashboard.delete_transaction(kind, id) {
        output::success(format!("{} {} deleted.", kind.label(), id));
    } else {
        output::warning(format!("No {} with id {}.", kind.label().to_lowercase(), id));
    }
    Ok(())
}

/// Blank categories are rejected. Categories without a goal are accepted but
/// will not count toward any goal.
fn parse_category(
    context: &ShellContext,
    kind: TransactionKind,
    raw: Option<&str>,
) -> Result<Option<String>, CommandError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let category = require_text(raw, "Category")?;
    if !context
        .dashboard
        .category_options(kind)
        .iter()
        .any(|option| option == &category)
    {
        output::warning(format!(
            "Category `{}` has no {} goal.",
            category,
            kind.label().to_lowercase()
        ));
    }
    Ok(Some(category))
}
