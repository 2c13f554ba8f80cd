pub mod data;
pub mod goal;
pub mod recurring;
pub mod settings;
pub mod system;
pub mod transaction;
pub mod view;

use std::str::FromStr;

use dash_core::currency;
use dash_domain::{Currency, TransactionKind};

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "summary", "list", "add", "edit", "delete", "goals", "goal", "recurring", "filter",
    "history", "currency", "theme", "config", "export", "save", "reset", "help", "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(view::definitions());
    commands.extend(transaction::definitions());
    commands.extend(goal::definitions());
    commands.extend(recurring::definitions());
    commands.extend(settings::definitions());
    commands.extend(data::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

pub(crate) fn parse_kind(raw: &str) -> Result<TransactionKind, CommandError> {
    TransactionKind::from_str(raw).map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

/// A strictly positive amount in `currency` whose base-unit value is finite.
pub(crate) fn parse_amount(raw: &str, currency: Currency) -> Result<f64, CommandError> {
    let amount: f64 = raw.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a valid amount."))
    })?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CommandError::InvalidArguments(
            "Amount must be greater than zero.".into(),
        ));
    }
    currency::to_base_checked(amount, currency)
        .map_err(|_| CommandError::InvalidArguments(format!("Amount `{raw}` is too large.")))?;
    Ok(amount)
}

/// One past the largest id in `ids`, or 1 for an empty list.
pub(crate) fn next_id(ids: impl Iterator<Item = i64>) -> Result<i64, CommandError> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| CommandError::InvalidArguments("No ids left to assign.".into()))
}

pub(crate) fn parse_id(raw: &str) -> Result<i64, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid id.")))
}

pub(crate) fn require_text(raw: &str, field: &str) -> Result<String, CommandError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "{field} cannot be empty."
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_positive_numbers() {
        assert_eq!(parse_amount("12.50", Currency::Pkr).unwrap(), 12.5);
        assert!(parse_amount("0", Currency::Pkr).is_err());
        assert!(parse_amount("-3", Currency::Pkr).is_err());
        assert!(parse_amount("NaN", Currency::Pkr).is_err());
        assert!(parse_amount("abc", Currency::Pkr).is_err());
    }

    #[test]
    fn amounts_that_overflow_the_base_unit_are_rejected() {
        assert!(parse_amount("1e306", Currency::Pkr).is_ok());
        let err = parse_amount("1e306", Currency::Usd).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn next_id_refuses_to_wrap() {
        assert_eq!(next_id(std::iter::empty()).unwrap(), 1);
        assert_eq!(next_id([3, 9, 4].into_iter()).unwrap(), 10);
        assert!(next_id([1, i64::MAX].into_iter()).is_err());
    }

    #[test]
    fn registry_follows_root_order() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ROOT_COMMAND_ORDER);
    }
}
