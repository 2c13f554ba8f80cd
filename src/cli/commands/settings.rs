use dash_config::Config;
use dash_domain::Currency;

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{ArgHint, CommandEntry};

const CONFIG_USAGE: &str = "config [show] | config set <key> <value>";

/// Keys read only when the dashboard opens.
const STARTUP_KEYS: [&str; 4] = ["default-currency", "default-theme", "status-ttl-ms", "data-dir"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "currency",
            "Show or change the display currency",
            "currency [PKR|USD|EUR|GBP]",
            cmd_currency,
        )
        .with_args(&[ArgHint::Choices(&["PKR", "USD", "EUR", "GBP"])]),
        CommandEntry::new("theme", "Toggle between light and dark", "theme", cmd_theme),
        CommandEntry::new(
            "config",
            "Show or change startup preferences in config.json",
            CONFIG_USAGE,
            cmd_config,
        )
        .with_args(&[ArgHint::Choices(&["show", "set"]), ArgHint::Choices(&Config::KEYS)]),
    ]
}

fn cmd_currency(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(code) = args.first() else {
        let current = context.dashboard.currency();
        output::info(format!("Display currency: {}", current.code()));
        let codes: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
        output::info(format!("Available: {}", codes.join(", ")));
        return Ok(());
    };
    let currency: Currency = code
        .parse()
        .map_err(|err: dash_domain::UnknownVariant| {
            CommandError::InvalidArguments(err.to_string())
        })?;
    match context.dashboard.set_currency(currency) {
        Ok(()) => output::success(format!("Display currency set to {}.", currency.code())),
        Err(_) => context.report_status(),
    }
    Ok(())
}

fn cmd_theme(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.dashboard.toggle_theme() {
        Ok(theme) => output::success(format!("Theme switched to {}.", theme)),
        Err(_) => context.report_status(),
    }
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section("Configuration");
            if let Some(manager) = &context.config_manager {
                println!("  file: {}", manager.path().display());
            }
            for (key, value) in context.config.entries() {
                println!("  {key:<16}  {value}");
            }
            Ok(())
        }
        ["set", key, value] => {
            let key = key.to_ascii_lowercase();
            let updated = match &context.config_manager {
                Some(manager) => manager.update(|cfg| cfg.set(&key, value))?,
                None => {
                    let mut cfg = context.config.clone();
                    cfg.set(&key, value)?;
                    cfg
                }
            };
            context.config = updated;
            if key == "color" {
                output::set_color_enabled(
                    context.config.ui_color_enabled && context.mode == CliMode::Interactive,
                );
            }
            output::success(format!("`{key}` set to {}.", value.trim()));
            if STARTUP_KEYS.contains(&key.as_str()) {
                output::info("Takes effect the next time the dashboard opens.");
            }
            Ok(())
        }
        _ => Err(CommandError::usage(CONFIG_USAGE)),
    }
}
