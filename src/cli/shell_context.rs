//! Shared runtime state for CLI interactions and command execution.

use dash_config::{Config, ConfigManager};
use dash_core::{Dashboard, StatusLevel};
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::{
    cli::{
        commands,
        core::{CliError, CommandError, LoopControl},
        output,
        registry::{CommandEntry, CommandRegistry},
    },
    open_dashboard, utils, DashError,
};

const MAX_SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub dashboard: Dashboard,
    pub config: Config,
    /// Absent for in-memory sessions; `config set` then edits only this session.
    pub config_manager: Option<ConfigManager>,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Opens the dashboard and config file under the application home.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let home = utils::app_data_dir();
        let (dashboard, config) = open_dashboard(&home)?;
        let manager = ConfigManager::for_home(&home).map_err(DashError::from)?;
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);
        let mut context = Self::with_dashboard(mode, dashboard, config);
        context.config_manager = Some(manager);
        Ok(context)
    }

    pub fn with_dashboard(mode: CliMode, dashboard: Dashboard, config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            dashboard,
            config,
            config_manager: None,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        format!("dash [{}]> ", self.dashboard.currency().code())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        if let Some(name) = self.registry.closest(input, MAX_SUGGESTION_DISTANCE) {
            output::info(format!("Suggestion: `{}`?", name));
        }
    }

    /// Asks before a destructive action. Script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        self.ask(prompt, false).map_err(CommandError::from)
    }

    /// Ctrl-C in the prompt. Defaults to leaving.
    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.ask("Exit shell?", true).map_err(CliError::from)
    }

    fn ask(&self, prompt: &str, default: bool) -> Result<bool, dialoguer::Error> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
    }

    /// Prints the dashboard's transient status message, if one is live.
    pub(crate) fn report_status(&self) {
        if let Some(status) = self.dashboard.status() {
            match status.level {
                StatusLevel::Success => output::success(&status.text),
                StatusLevel::Error => output::error(&status.text),
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::shell::handle_line;
    use dash_core::{FixedClock, MemoryStore, StoreSettings};
    use dash_domain::TransactionKind;

    const NOW: i64 = 1_717_243_200_000;

    fn script_context() -> ShellContext {
        let dashboard = Dashboard::open(
            Box::new(MemoryStore::new()),
            StoreSettings::default(),
            Box::new(FixedClock::from_millis(NOW)),
        );
        ShellContext::with_dashboard(CliMode::Script, dashboard, Config::default())
    }

    #[test]
    fn add_command_goes_through_the_gateway() {
        let mut context = script_context();
        let outcome = handle_line(&mut context, r#"add expense 100 "Coffee beans" Food"#).unwrap();

        assert_eq!(outcome, LoopControl::Continue);
        let added = context
            .dashboard
            .state()
            .transaction(TransactionKind::Expense, NOW)
            .expect("added expense");
        assert_eq!(added.description, "Coffee beans");
        assert_eq!(added.category.as_deref(), Some("Food"));
        assert_eq!(context.dashboard.totals().expenses, 27_300.0);
    }

    #[test]
    fn invalid_amount_is_rejected_before_mutation() {
        let mut context = script_context();
        let err = handle_line(&mut context, "add income -5 Refund").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert_eq!(context.dashboard.state().income.len(), 2);
    }

    #[test]
    fn script_mode_deletes_without_prompting() {
        let mut context = script_context();
        handle_line(&mut context, "delete expense 1").unwrap();
        assert_eq!(context.dashboard.state().expenses.len(), 5);
    }

    #[test]
    fn unknown_commands_keep_the_loop_running() {
        let mut context = script_context();
        assert_eq!(
            handle_line(&mut context, "sumary").unwrap(),
            LoopControl::Continue
        );
        assert_eq!(handle_line(&mut context, "exit").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn oversized_or_unnumbered_entries_are_refused() {
        let mut context = script_context();
        handle_line(&mut context, "currency usd").unwrap();
        let err = handle_line(&mut context, "add expense 1e306 Big").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert_eq!(context.dashboard.state().expenses.len(), 6);

        context
            .dashboard
            .set_expense_goals(vec![dash_domain::Goal::new(i64::MAX, "Food", 10.0)]);
        let err = handle_line(&mut context, "goal set expense Travel 10").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert_eq!(context.dashboard.state().expense_goals.len(), 1);
    }

    #[test]
    fn config_set_without_file_changes_session_only() {
        let mut context = script_context();
        handle_line(&mut context, "config set status-ttl-ms 500").unwrap();
        assert_eq!(context.config.status_ttl_ms, 500);

        let err = handle_line(&mut context, "config set locale fr").unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn goal_set_replaces_one_entry() {
        let mut context = script_context();
        handle_line(&mut context, "currency usd").unwrap();
        handle_line(&mut context, "goal set expense Travel 10").unwrap();
        handle_line(&mut context, "goal remove expense Bills").unwrap();

        let goals = &context.dashboard.state().expense_goals;
        assert_eq!(goals.len(), 5);
        let travel = goals.iter().find(|g| g.category == "Travel").unwrap();
        assert!((travel.target - 2_780.0).abs() < 1e-6);
        assert!(goals.iter().all(|g| g.category != "Bills"));
        let food = goals.iter().find(|g| g.category == "Food").unwrap();
        assert!((food.target - 10_000.0).abs() < 1e-6);
    }
}
