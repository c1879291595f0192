use cursive::reexports::log::info;
use itertools::Itertools;

use crate::requisition::command::{
    Arguments, Command, CommandOutcome, CommandRegistry, ExecutionContext, Param,
};
use crate::util::error::CmdlineError;

pub fn register_builtins(registry: &mut CommandRegistry) -> Result<(), CmdlineError> {
    registry.register(help())?;
    registry.register(echo())?;
    registry.register(env())?;
    registry.register(history())?;
    registry.register(clear())?;
    registry.register(quit())?;
    Ok(())
}

fn help() -> Command {
    Command::new("help", "Show available commands or the usage of one", exec_help)
        .param(Param::text("command", "Command to describe").optional())
}

fn exec_help(
    ctx: &mut ExecutionContext<'_>,
    args: &Arguments,
) -> Result<CommandOutcome, CmdlineError> {
    if let Some(name) = args.text("command") {
        let command = ctx
            .registry
            .get(name)
            .ok_or_else(|| CmdlineError::UnknownCommand(name.to_string()))?;

        let mut text = format!("{}\n  {}", command.usage(), command.description);
        for param in &command.params {
            text.push_str(&format!(
                "\n  {} ({}): {}",
                param.name,
                param.kind.as_ref(),
                param.description
            ));
        }
        return Ok(CommandOutcome::Text(text));
    }

    let width = ctx.registry.names().map(str::len).max().unwrap_or(0);
    let text = ctx
        .registry
        .commands()
        .map(|command| format!("{:width$}  {}", command.name, command.description))
        .join("\n");
    Ok(CommandOutcome::Text(text))
}

fn echo() -> Command {
    Command::new("echo", "Print a message", |_, args| {
        Ok(CommandOutcome::Text(
            args.text("message").unwrap_or_default().to_string(),
        ))
    })
    .param(Param::text("message", "Message to print").greedy())
}

fn env() -> Command {
    Command::new("env", "List, read or set environment variables", exec_env)
        .param(Param::text("name", "Variable name").optional())
        .param(Param::text("value", "New value").optional().greedy())
}

fn exec_env(
    ctx: &mut ExecutionContext<'_>,
    args: &Arguments,
) -> Result<CommandOutcome, CmdlineError> {
    match (args.text("name"), args.text("value")) {
        (None, _) => Ok(CommandOutcome::Text(
            ctx.environment
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .join("\n"),
        )),
        (Some(name), None) => ctx
            .environment
            .get(name)
            .map(|value| CommandOutcome::Text(value.to_string()))
            .ok_or_else(|| CmdlineError::UnknownVariable(name.to_string())),
        (Some(name), Some(value)) => {
            ctx.environment.set(name, value);
            Ok(CommandOutcome::Text(format!("{name}={value}")))
        }
    }
}

fn history() -> Command {
    Command::new("history", "Show previously executed commands", |ctx, _| {
        Ok(CommandOutcome::Text(
            ctx.history
                .iter()
                .enumerate()
                .map(|(idx, typed)| format!("{:>4}  {typed}", idx + 1))
                .join("\n"),
        ))
    })
}

fn clear() -> Command {
    Command::new("clear", "Clear the output log", |_, _| Ok(CommandOutcome::Clear))
}

fn quit() -> Command {
    Command::new("quit", "Leave the command line", |ctx, _| {
        info!("Quit requested");
        ctx.surface.send_box(|siv| siv.quit());
        Ok(CommandOutcome::Silent)
    })
}

#[cfg(test)]
mod tests {
    use cursive::Cursive;

    use super::*;
    use crate::model::environment::Environment;
    use crate::requisition::parser::{assign, tokenize};
    use crate::ui::surface::Surface;

    struct Fixture {
        registry: CommandRegistry,
        environment: Environment,
        surface: Surface,
        history: Vec<String>,
        _siv: Cursive,
    }

    impl Fixture {
        fn new() -> Self {
            let siv = Cursive::new();
            let mut registry = CommandRegistry::default();
            register_builtins(&mut registry).unwrap();
            Self {
                registry,
                environment: Environment::from_pairs(["HOME=/home/me", "SHELL=zsh"]).unwrap(),
                surface: Surface::from(&siv),
                history: vec!["echo one".to_string(), "env".to_string()],
                _siv: siv,
            }
        }

        fn run(&mut self, input: &str) -> Result<CommandOutcome, CmdlineError> {
            let tokens = tokenize(input)?;
            let command = self.registry.get(&tokens[0]).unwrap().clone();
            let args = assign(&command, &tokens[1..])?;
            let mut ctx = ExecutionContext {
                environment: &mut self.environment,
                surface: &self.surface,
                registry: &self.registry,
                history: &self.history,
            };
            command.exec(&mut ctx, &args)
        }
    }

    fn text(outcome: Result<CommandOutcome, CmdlineError>) -> String {
        match outcome.unwrap() {
            CommandOutcome::Text(text) => text,
            other => panic!("Expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_echo_joins_words() {
        let mut fixture = Fixture::new();
        assert_eq!(text(fixture.run("echo  hello   'big world'")), "hello big world");
    }

    #[test]
    fn test_help_lists_everything() {
        let mut fixture = Fixture::new();
        let listing = text(fixture.run("help"));
        let names: Vec<_> = listing
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(names, vec!["clear", "echo", "env", "help", "history", "quit"]);
    }

    #[test]
    fn test_help_for_one_command() {
        let mut fixture = Fixture::new();
        let usage = text(fixture.run("help env"));
        assert!(usage.starts_with("env [name] [value...]"));
        assert!(usage.contains("name (text): Variable name"));

        assert!(matches!(
            fixture.run("help nope"),
            Err(CmdlineError::UnknownCommand(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_env() {
        let mut fixture = Fixture::new();
        assert_eq!(text(fixture.run("env")), "HOME=/home/me\nSHELL=zsh");
        assert_eq!(text(fixture.run("env SHELL")), "zsh");
        assert_eq!(text(fixture.run("env GREETING hi there")), "GREETING=hi there");
        assert_eq!(fixture.environment.get("GREETING"), Some("hi there"));
        assert!(matches!(
            fixture.run("env MISSING"),
            Err(CmdlineError::UnknownVariable(name)) if name == "MISSING"
        ));
    }

    #[test]
    fn test_history_and_clear() {
        let mut fixture = Fixture::new();
        assert_eq!(text(fixture.run("history")), "   1  echo one\n   2  env");
        assert_eq!(fixture.run("clear").unwrap(), CommandOutcome::Clear);
    }

    #[test]
    fn test_quit_posts_to_surface() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run("quit").unwrap(), CommandOutcome::Silent);
        assert_eq!(fixture.surface.pending(), 1);
    }
}
