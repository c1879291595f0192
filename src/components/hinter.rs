use std::sync::{Arc, Mutex};

use cursive::reexports::log::error;
use cursive::traits::Nameable;
use cursive::views::{Panel, TextView};
use cursive::View;
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use itertools::Itertools;

use crate::assembly::stages::ChildContext;
use crate::components::{Component, SharedComponent};
use crate::requisition::hint::Hint;
use crate::requisition::{RequisitionEvent, SharedRequisition};
use crate::traits::ext::mutex::MutexExt;
use crate::util::error::CmdlineError;

pub const HINT_NAME: &str = "cmdline.hint";
const TEMPLATE_NAME: &str = "hint";

pub const DEFAULT_HINT_TEMPLATE: &str = "\
{{#if command}}{{command.usage}}
  {{command.description}}{{#each command.params}}
{{#if current}}> {{else}}  {{/if}}{{name}} ({{kind}}): {{description}}{{/each}}\
{{else}}{{#if completions}}{{join completions \"  \"}}\
{{else}}Type a command, or 'help' to list them all.{{/if}}{{/if}}\
{{#if error}}
! {{error}}{{/if}}";

/// Describes the command being typed. Re-rendered on every input change.
pub struct Hinter {
    name: String,
    hbs: Arc<Handlebars<'static>>,
    requisition: SharedRequisition,
}

impl Hinter {
    pub fn new(context: &ChildContext) -> Result<Self, CmdlineError> {
        let template = context
            .settings
            .hint_template
            .as_deref()
            .unwrap_or(DEFAULT_HINT_TEMPLATE);
        let hbs = Arc::new(build_handlebars(template)?);
        let name = HINT_NAME.to_string();

        {
            let hbs = Arc::clone(&hbs);
            let surface = context.surface.clone();
            let name = name.clone();
            context
                .requisition
                .lock_sync()?
                .subscribe(move |requisition, event| {
                    if event != RequisitionEvent::InputChanged {
                        return;
                    }
                    match render_hint(&hbs, &requisition.hint()) {
                        Ok(text) => {
                            surface.call_on_name(&name, move |view: &mut TextView| {
                                view.set_content(text)
                            })
                        }
                        Err(err) => error!("Failed to render hint: {err}"),
                    }
                });
        }

        Ok(Self {
            name,
            hbs,
            requisition: Arc::clone(&context.requisition),
        })
    }

    pub fn create(context: &ChildContext) -> anyhow::Result<SharedComponent> {
        Ok(Arc::new(Mutex::new(Self::new(context)?)))
    }
}

impl Component for Hinter {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_view(&mut self) -> Box<dyn View> {
        let hint = self.requisition.lock_unwrap().hint();
        let text = render_hint(&self.hbs, &hint).unwrap_or_else(|err| err.to_string());

        Box::new(Panel::new(TextView::new(text).with_name(&self.name)).title("Hint"))
    }
}

pub fn render_hint(hbs: &Handlebars, hint: &Hint) -> Result<String, CmdlineError> {
    Ok(hbs.render(TEMPLATE_NAME, hint)?)
}

fn build_handlebars(template: &str) -> Result<Handlebars<'static>, CmdlineError> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs.register_helper("join", Box::new(join));
    hbs.register_template_string(TEMPLATE_NAME, template)?;
    Ok(hbs)
}

fn join(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let items = h
        .param(0)
        .and_then(|param| param.value().as_array())
        .map(|items| &items[..])
        .unwrap_or_default();
    let delim = h
        .param(1)
        .and_then(|param| param.value().as_str())
        .unwrap_or(", ");

    let joined = items.iter().filter_map(|item| item.as_str()).join(delim);
    out.write(&joined)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use cursive::Cursive;

    use super::*;
    use crate::components::fixtures::child_context;
    use crate::config::settings::WidgetSettings;
    use crate::requisition::command::{Command, CommandOutcome, Param};
    use crate::requisition::hint::CommandHint;

    fn default_hbs() -> Handlebars<'static> {
        build_handlebars(DEFAULT_HINT_TEMPLATE).unwrap()
    }

    #[test]
    fn test_renders_completions() {
        let hint = Hint {
            typed: "h".to_string(),
            completions: vec!["help".to_string(), "history".to_string()],
            ..Hint::default()
        };
        assert_eq!(render_hint(&default_hbs(), &hint).unwrap(), "help  history");
    }

    #[test]
    fn test_renders_idle_message() {
        let rendered = render_hint(&default_hbs(), &Hint::default()).unwrap();
        assert_eq!(rendered, "Type a command, or 'help' to list them all.");
    }

    #[test]
    fn test_renders_command_and_error() {
        let command = Command::new("greet", "Say hello <politely>", |_, _| {
            Ok(CommandOutcome::Silent)
        })
        .param(Param::text("name", "Who"))
        .param(Param::number("times", "How often").default_value("1"));

        let hint = Hint {
            typed: "greet bob x".to_string(),
            command: Some(CommandHint::new(&command, 1)),
            completions: vec![],
            error: Some("Invalid value".to_string()),
        };

        let rendered = render_hint(&default_hbs(), &hint).unwrap();
        assert_eq!(
            rendered,
            "greet <name> [times]\n  Say hello <politely>\n  name (text): Who\n> times (number): How often\n! Invalid value"
        );
    }

    #[test]
    fn test_custom_template_from_settings() {
        let siv = Cursive::new();
        let settings = WidgetSettings {
            hint_template: Some("[{{typed}}] {{join completions \"|\"}}".to_string()),
            ..WidgetSettings::default()
        };
        let context = child_context(&siv, settings);
        context.requisition.lock().unwrap().update("h");

        let hinter = Hinter::new(&context).unwrap();
        let hint = context.requisition.lock().unwrap().hint();
        assert_eq!(render_hint(&hinter.hbs, &hint).unwrap(), "[h] help|history");
    }

    #[test]
    fn test_invalid_template_fails_construction() {
        let siv = Cursive::new();
        let settings = WidgetSettings {
            hint_template: Some("{{#if command}}unclosed".to_string()),
            ..WidgetSettings::default()
        };
        assert!(matches!(
            Hinter::new(&child_context(&siv, settings)),
            Err(CmdlineError::TemplateError(_))
        ));
    }

    #[test]
    fn test_refreshes_on_input_change() {
        let siv = Cursive::new();
        let context = child_context(&siv, WidgetSettings::default());
        let _hinter = Hinter::create(&context).unwrap();

        let mut requisition = context.requisition.lock().unwrap();
        requisition.update("ec");
        requisition.update("echo");
        assert_eq!(context.surface.pending(), 2);
    }
}
