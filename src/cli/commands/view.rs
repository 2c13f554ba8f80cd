use dash_core::DateRange;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::output;
use crate::cli::registry::{ArgHint, CommandEntry};

const FILTER_USAGE: &str = "filter <start|-> <end|-> | filter clear";
const OPEN_BOUND: &str = "-";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show totals, savings and the expense/savings split",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "filter",
            "Restrict lists and exports to a date range (UTC, inclusive)",
            FILTER_USAGE,
            cmd_filter,
        )
        .with_args(&[ArgHint::Choices(&["clear", "-"]), ArgHint::Choices(&["-"])]),
        CommandEntry::new(
            "history",
            "Show income, expenses and savings per month",
            "history",
            cmd_history,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = &context.dashboard;
    let totals = dashboard.totals();

    output::section(format!("Summary ({})", dashboard.currency().code()));
    output::info(format!("Total income   : {}", dashboard.format_amount(totals.income)));
    output::info(format!("Total expenses : {}", dashboard.format_amount(totals.expenses)));
    output::info(format!("Savings        : {}", dashboard.format_amount(totals.savings)));
    match dashboard.distribution() {
        Some(split) => output::info(format!(
            "Distribution   : expenses {:.1}% / savings {:.1}%",
            split.expenses_pct, split.savings_pct
        )),
        None => output::info("Distribution   : add income and expenses to see the split"),
    }
    output::info(format!("Filter         : {}", dashboard.date_range().label()));
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["clear"] => {
            context.dashboard.clear_filter();
            output::success("Date filter cleared.");
        }
        [start, end] => {
            let range = DateRange::parse(open_bound(start), open_bound(end))?;
            context.dashboard.apply_filter(range);
            output::success(format!("Date filter set: {}.", range.label()));
        }
        _ => return Err(CommandError::usage(FILTER_USAGE)),
    }
    Ok(())
}

fn open_bound(raw: &str) -> &str {
    if raw.trim() == OPEN_BOUND {
        ""
    } else {
        raw
    }
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = &context.dashboard;
    let months = dashboard.history();
    output::section("Monthly history");
    if months.is_empty() {
        output::info("No transactions yet.");
    }
    for month in &months {
        println!("{}", formatters::history_row(dashboard, month));
    }
    Ok(())
}
