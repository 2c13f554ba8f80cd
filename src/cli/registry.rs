//! Command table plus the completion data the line editor works from.

use strsim::levenshtein;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub const KIND_CHOICES: &[&str] = &["income", "expense"];

/// What may follow a command at one argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgHint {
    Choices(&'static [&'static str]),
    CommandName,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgHint],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            args: &[],
            handler,
        }
    }

    pub fn with_args(mut self, args: &'static [ArgHint]) -> Self {
        self.args = args;
        self
    }
}

/// Commands in help order. Names match exactly; the shell lowercases input first.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`. A later entry with the same name replaces the earlier one in place.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// The registered name nearest to `input`, if within `max_distance` edits.
    pub fn closest(&self, input: &str, max_distance: usize) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= max_distance)
            .map(|(_, name)| name)
    }

    /// Snapshot handed to the line editor, which cannot borrow the shell context.
    pub fn completion_table(&self) -> CompletionTable {
        CompletionTable {
            commands: self
                .entries
                .iter()
                .map(|entry| (entry.name, entry.usage, entry.args))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionTable {
    commands: Vec<(&'static str, &'static str, &'static [ArgHint])>,
}

impl CompletionTable {
    /// Candidates for the word being typed at the end of `line`, and the byte
    /// offset where that word starts.
    pub fn complete(&self, line: &str) -> (usize, Vec<String>) {
        let start = line
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let partial = line[start..].to_ascii_lowercase();
        let before: Vec<&str> = line[..start].split_whitespace().collect();

        let pool: Vec<&str> = match before.split_first() {
            None => self.commands.iter().map(|(name, _, _)| *name).collect(),
            Some((command, args)) => match self.hint_for(command, args.len()) {
                Some(ArgHint::Choices(choices)) => choices.to_vec(),
                Some(ArgHint::CommandName) => {
                    self.commands.iter().map(|(name, _, _)| *name).collect()
                }
                None => Vec::new(),
            },
        };

        let candidates = pool
            .into_iter()
            .filter(|word| word.to_ascii_lowercase().starts_with(&partial))
            .map(str::to_string)
            .collect();
        (start, candidates)
    }

    /// Usage text shown after a bare command name followed by a space.
    pub fn usage_hint(&self, line: &str) -> Option<&'static str> {
        let name = line.strip_suffix(' ')?;
        self.commands
            .iter()
            .find(|(command, _, _)| command.eq_ignore_ascii_case(name))
            .map(|(_, usage, _)| *usage)
    }

    fn hint_for(&self, command: &str, position: usize) -> Option<ArgHint> {
        self.commands
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(command))
            .and_then(|(_, _, args)| args.get(position).copied())
    }
}
