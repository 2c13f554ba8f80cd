use std::path::PathBuf;

use dash_core::{CoreError, ExportService};

use super::parse_kind;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{ArgHint, CommandEntry, KIND_CHOICES};

const EXPORT_USAGE: &str = "export <income|expense> [path]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write the filtered list as CSV",
            EXPORT_USAGE,
            cmd_export,
        )
        .with_args(&[ArgHint::Choices(KIND_CHOICES)]),
        CommandEntry::new("save", "Persist all dashboard data", "save", cmd_save),
        CommandEntry::new(
            "reset",
            "Discard saved data and restore the sample dashboard",
            "reset",
            cmd_reset,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, path) = match args {
        [kind] => (parse_kind(kind)?, None),
        [kind, path] => (parse_kind(kind)?, Some(PathBuf::from(*path))),
        _ => return Err(CommandError::usage(EXPORT_USAGE)),
    };

    let csv = match context.dashboard.export_csv(kind) {
        Ok(csv) => csv,
        Err(CoreError::EmptyExport) => {
            output::warning(CoreError::EmptyExport);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let path = match path {
        Some(path) => {
            ExportService::write_to(&path, &csv)?;
            path
        }
        None => ExportService::write(&context.config.resolve_export_dir(), kind, &csv)?,
    };
    output::success(format!("Exported to {}.", path.display()));
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    // The failure is already captured in the status message.
    let _ = context.dashboard.save();
    context.report_status();
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Clear all saved data and restore the sample dashboard?")? {
        output::info("Reset cancelled.");
        return Ok(());
    }
    let _ = context.dashboard.reset();
    context.report_status();
    Ok(())
}
