use std::sync::{Arc, Mutex};

use cursive::reexports::log::{debug, info};

use crate::assembly::stages::EngineContext;
use crate::model::environment::Environment;
use crate::requisition::builtin::register_builtins;
use crate::requisition::command::{Command, CommandOutcome, CommandRegistry, ExecutionContext};
use crate::requisition::hint::{CommandHint, Hint};
use crate::requisition::output::{Outcome, OutputEntry};
use crate::requisition::parser::{assign, tokenize};
use crate::ui::surface::Surface;
use crate::util::error::CmdlineError;
use crate::util::ui::common_prefix;

pub mod builtin;
pub mod command;
pub mod hint;
pub mod output;
pub mod parser;

pub const MAX_HISTORY: usize = 100;

pub type SharedRequisition = Arc<Mutex<Requisition>>;

type Listener = Box<dyn Fn(&Requisition, RequisitionEvent) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequisitionEvent {
    InputChanged,
    OutputAdded,
    OutputCleared,
}

/// The command engine: owns the registry, the current input, history and
/// the output log. Knows nothing about views; components subscribe to it.
pub struct Requisition {
    environment: Environment,
    surface: Surface,
    registry: CommandRegistry,
    typed: String,
    history: Vec<String>,
    history_cursor: Option<usize>,
    outputs: Vec<OutputEntry>,
    listeners: Vec<Listener>,
}

impl Requisition {
    pub fn new(environment: Environment, surface: Surface) -> Result<Self, CmdlineError> {
        let mut registry = CommandRegistry::default();
        register_builtins(&mut registry)?;

        Ok(Self {
            environment,
            surface,
            registry,
            typed: String::new(),
            history: vec![],
            history_cursor: None,
            outputs: vec![],
            listeners: vec![],
        })
    }

    /// Default construction used when no command engine was supplied.
    pub fn create(context: &EngineContext) -> anyhow::Result<SharedRequisition> {
        let requisition = Self::new(context.environment.clone(), context.surface.clone())?;
        Ok(Arc::new(Mutex::new(requisition)))
    }

    pub fn register(&mut self, command: Command) -> Result<(), CmdlineError> {
        debug!("Registering command {}", command.name);
        self.registry.register(command)
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Requisition, RequisitionEvent) + Send + 'static,
    ) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, event: RequisitionEvent) {
        for listener in &self.listeners {
            listener(self, event);
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn outputs(&self) -> &[OutputEntry] {
        &self.outputs
    }

    pub fn update(&mut self, typed: &str) {
        if self.typed != typed {
            self.typed = typed.to_string();
        }
        self.notify(RequisitionEvent::InputChanged);
    }

    pub fn hint(&self) -> Hint {
        let mut hint = Hint {
            typed: self.typed.clone(),
            ..Hint::default()
        };

        let tokens = match tokenize(&self.typed) {
            Ok(tokens) => tokens,
            Err(err) => {
                hint.error = Some(err.to_string());
                return hint;
            }
        };

        let Some((name, args)) = tokens.split_first() else {
            hint.completions = self.registry.names().map(str::to_string).collect();
            return hint;
        };

        let still_typing_name = args.is_empty() && !self.ends_with_separator();
        if still_typing_name {
            hint.completions = self
                .registry
                .matching(name)
                .filter(|candidate| *candidate != name.as_str())
                .map(str::to_string)
                .collect();
        }

        match self.registry.get(name) {
            Some(command) => {
                let filled = if self.ends_with_separator() {
                    args.len()
                } else {
                    args.len().saturating_sub(1)
                };
                hint.command = Some(CommandHint::new(command, filled));
                match assign(command, args) {
                    Ok(_) | Err(CmdlineError::MissingArgument { .. }) => {}
                    Err(err) => hint.error = Some(err.to_string()),
                }
            }
            None if still_typing_name && !hint.completions.is_empty() => {}
            None => hint.error = Some(CmdlineError::UnknownCommand(name.clone()).to_string()),
        }

        hint
    }

    fn ends_with_separator(&self) -> bool {
        self.typed.ends_with(char::is_whitespace)
    }

    /// Completes a partially typed command name. Returns the new input when
    /// anything changed.
    pub fn complete(&mut self) -> Option<String> {
        let tokens = tokenize(&self.typed).ok()?;
        let [name] = tokens.as_slice() else {
            return None;
        };
        if self.ends_with_separator() {
            return None;
        }

        let matches: Vec<&str> = self.registry.matching(name).collect();
        let completed = match matches.as_slice() {
            [] => return None,
            [single] => format!("{single} "),
            several => common_prefix(several.iter().copied()),
        };

        if completed.len() <= self.typed.trim_start().len() {
            return None;
        }

        self.typed = completed.clone();
        self.notify(RequisitionEvent::InputChanged);
        Some(completed)
    }

    /// Runs the current input, records it and clears the input line.
    pub fn exec(&mut self) -> Option<&OutputEntry> {
        let typed = std::mem::take(&mut self.typed);
        self.history_cursor = None;
        if typed.trim().is_empty() {
            self.notify(RequisitionEvent::InputChanged);
            return None;
        }

        self.push_history(&typed);
        info!("Executing: {typed}");

        let outcome = match self.run(&typed) {
            Ok(CommandOutcome::Text(text)) => Some(Outcome::Text(text)),
            Ok(CommandOutcome::Silent) => None,
            Ok(CommandOutcome::Clear) => {
                self.outputs.clear();
                self.notify(RequisitionEvent::InputChanged);
                self.notify(RequisitionEvent::OutputCleared);
                return None;
            }
            Err(err) => {
                debug!("Command {typed:?} failed: {err}");
                Some(Outcome::Error(err.to_string()))
            }
        };

        self.notify(RequisitionEvent::InputChanged);
        let outcome = outcome?;
        self.outputs.push(OutputEntry::new(typed, outcome));
        self.notify(RequisitionEvent::OutputAdded);
        self.outputs.last()
    }

    fn run(&mut self, typed: &str) -> Result<CommandOutcome, CmdlineError> {
        let tokens = tokenize(typed)?;
        let Some((name, args)) = tokens.split_first() else {
            return Ok(CommandOutcome::Silent);
        };

        let command = self
            .registry
            .get(name)
            .ok_or_else(|| CmdlineError::UnknownCommand(name.clone()))?;
        let arguments = assign(command, args)?;

        let mut context = ExecutionContext {
            environment: &mut self.environment,
            surface: &self.surface,
            registry: &self.registry,
            history: &self.history,
        };
        command.exec(&mut context, &arguments)
    }

    fn push_history(&mut self, typed: &str) {
        if self.history.last().map(String::as_str) == Some(typed) {
            return;
        }
        self.history.push(typed.to_string());
        if self.history.len() > MAX_HISTORY {
            let overflow = self.history.len() - MAX_HISTORY;
            self.history.drain(..overflow);
        }
    }

    pub fn recall_previous(&mut self) -> Option<String> {
        if self.history.is_empty() {
            return None;
        }
        let cursor = match self.history_cursor {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(cursor) => cursor - 1,
        };
        self.recall(Some(cursor))
    }

    pub fn recall_next(&mut self) -> Option<String> {
        let cursor = self.history_cursor?;
        if cursor + 1 < self.history.len() {
            self.recall(Some(cursor + 1))
        } else {
            self.recall(None)
        }
    }

    fn recall(&mut self, cursor: Option<usize>) -> Option<String> {
        self.history_cursor = cursor;
        self.typed = cursor
            .and_then(|cursor| self.history.get(cursor).cloned())
            .unwrap_or_default();
        self.notify(RequisitionEvent::InputChanged);
        Some(self.typed.clone())
    }
}
