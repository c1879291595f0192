use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use strum_macros::AsRefStr;

use crate::model::environment::Environment;
use crate::ui::surface::Surface;
use crate::util::error::CmdlineError;

pub type Exec =
    dyn Fn(&mut ExecutionContext<'_>, &Arguments) -> Result<CommandOutcome, CmdlineError>
        + Send
        + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Number,
    Boolean,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub description: String,
    pub kind: ParamKind,
    pub default: Option<String>,
    pub greedy: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            default: None,
            greedy: false,
        }
    }

    pub fn text(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParamKind::Text)
    }

    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParamKind::Number)
    }

    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, ParamKind::Boolean)
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// An optional parameter whose absence is not filled with anything.
    pub fn optional(self) -> Self {
        self.default_value("")
    }

    /// Takes every remaining token. Only meaningful on the last parameter.
    pub fn greedy(mut self) -> Self {
        self.greedy = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub fn convert(&self, raw: &str) -> Result<Value, CmdlineError> {
        let invalid = |expected| CmdlineError::InvalidArgument {
            param: self.name.clone(),
            value: raw.to_string(),
            expected,
        };

        match self.kind {
            ParamKind::Text => Ok(Value::Text(raw.to_string())),
            ParamKind::Number => raw
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| invalid("a number")),
            ParamKind::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" => Ok(Value::Boolean(true)),
                "false" | "no" | "off" => Ok(Value::Boolean(false)),
                _ => Err(invalid("true or false")),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Boolean(bool),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<String, Value>,
}

impl Arguments {
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Text value, with the empty string of an omitted optional param as `None`.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Value::Text(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(Value::Number(number)) => Some(*number),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(Value::Boolean(flag)) => Some(*flag),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Text(String),
    Clear,
    Silent,
}

pub struct ExecutionContext<'a> {
    pub environment: &'a mut Environment,
    pub surface: &'a Surface,
    pub registry: &'a CommandRegistry,
    pub history: &'a [String],
}

#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: String,
    pub params: Vec<Param>,
    exec: Arc<Exec>,
}

impl Command {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, exec: F) -> Self
    where
        F: Fn(&mut ExecutionContext<'_>, &Arguments) -> Result<CommandOutcome, CmdlineError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            params: vec![],
            exec: Arc::new(exec),
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn exec(
        &self,
        context: &mut ExecutionContext<'_>,
        arguments: &Arguments,
    ) -> Result<CommandOutcome, CmdlineError> {
        (self.exec)(context, arguments)
    }

    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        for param in &self.params {
            let dots = if param.greedy { "..." } else { "" };
            if param.is_required() {
                usage.push_str(&format!(" <{}{dots}>", param.name));
            } else {
                usage.push_str(&format!(" [{}{dots}]", param.name));
            }
        }
        usage
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn register(&mut self, command: Command) -> Result<(), CmdlineError> {
        if self.commands.contains_key(&command.name) {
            return Err(CmdlineError::DuplicateCommand(command.name));
        }
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.names().filter(move |name| name.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Command {
        Command::new("noop", "Does nothing", |_, _| Ok(CommandOutcome::Silent))
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = CommandRegistry::default();
        registry.register(noop()).unwrap();
        assert!(matches!(
            registry.register(noop()),
            Err(CmdlineError::DuplicateCommand(name)) if name == "noop"
        ));
    }

    #[test]
    fn test_matching_is_prefix_based_and_sorted() {
        let mut registry = CommandRegistry::default();
        for name in ["help", "history", "echo"] {
            registry
                .register(Command::new(name, "", |_, _| Ok(CommandOutcome::Silent)))
                .unwrap();
        }
        let matched: Vec<_> = registry.matching("h").collect();
        assert_eq!(matched, vec!["help", "history"]);
        assert_eq!(registry.matching("x").count(), 0);
    }

    #[test]
    fn test_usage() {
        let command = noop()
            .param(Param::text("name", "Name"))
            .param(Param::text("rest", "Rest").optional().greedy());
        assert_eq!(command.usage(), "noop <name> [rest...]");
    }

    #[test]
    fn test_param_conversion() {
        let number = Param::number("count", "");
        assert_eq!(number.convert("2.5").unwrap(), Value::Number(2.5));
        assert!(matches!(
            number.convert("two"),
            Err(CmdlineError::InvalidArgument { expected: "a number", .. })
        ));

        let flag = Param::boolean("flag", "");
        assert_eq!(flag.convert("Yes").unwrap(), Value::Boolean(true));
        assert_eq!(flag.convert("off").unwrap(), Value::Boolean(false));
        assert!(flag.convert("maybe").is_err());
    }
}
