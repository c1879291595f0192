use std::sync::{Arc, Mutex};

use cursive::event::Key;
use cursive::reexports::log::error;
use cursive::traits::Resizable;
use cursive::views::{EditView, LinearLayout, OnEventView, TextView};
use cursive::{Cursive, View};

use crate::assembly::stages::InputterContext;
use crate::components::{Component, InputHandler, SharedInputHandler};
use crate::requisition::{Requisition, SharedRequisition};
use crate::traits::ext::mutex::MutexExt;
use crate::ui::surface::Surface;
use crate::util::ui::build_edit_view;

pub const INPUT_NAME: &str = "cmdline.input";

/// Prompt plus edit line. Every edit is forwarded to the requisition; Enter
/// executes, Tab completes, Up/Down walk the history.
pub struct Inputter {
    name: String,
    prompt: String,
    requisition: SharedRequisition,
    surface: Surface,
}

impl Inputter {
    pub fn new(context: &InputterContext) -> Self {
        Self {
            name: INPUT_NAME.to_string(),
            prompt: context.settings.prompt.clone(),
            requisition: Arc::clone(&context.requisition),
            surface: context.surface.clone(),
        }
    }

    pub fn create(context: &InputterContext) -> anyhow::Result<SharedInputHandler> {
        Ok(Arc::new(Mutex::new(Self::new(context))))
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    fn on_key(
        &self,
        action: impl Fn(&mut Requisition) -> Option<String> + 'static,
    ) -> impl Fn(&mut Cursive) + 'static {
        let requisition = Arc::clone(&self.requisition);
        let name = self.name.clone();
        move |siv| {
            let changed = action(&mut *requisition.lock_unwrap());
            if let Some(typed) = changed {
                set_input(siv, &name, &typed);
            }
        }
    }
}

impl Component for Inputter {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_view(&mut self) -> Box<dyn View> {
        let typed = self.requisition.lock_unwrap().typed().to_string();

        let on_edit = {
            let requisition = Arc::clone(&self.requisition);
            move |_: &mut Cursive, text: &str, _: usize| {
                requisition.lock_unwrap().update(text);
            }
        };

        let on_submit = {
            let requisition = Arc::clone(&self.requisition);
            let name = self.name.clone();
            move |siv: &mut Cursive, text: &str| {
                {
                    let mut requisition = requisition.lock_unwrap();
                    requisition.update(text);
                    requisition.exec();
                }
                set_input(siv, &name, "");
            }
        };

        let edit_view = OnEventView::new(build_edit_view(&self.name, typed, on_edit, on_submit))
            .on_pre_event(Key::Tab, self.on_key(Requisition::complete))
            .on_pre_event(Key::Up, self.on_key(Requisition::recall_previous))
            .on_pre_event(Key::Down, self.on_key(Requisition::recall_next));

        Box::new(
            LinearLayout::horizontal()
                .child(TextView::new(self.prompt.clone()))
                .child(edit_view.full_width()),
        )
    }
}

impl InputHandler for Inputter {
    fn update(&mut self) -> anyhow::Result<()> {
        let typed = self.requisition.lock_sync()?.typed().to_string();
        let name = self.name.clone();
        self.surface.send_box(move |siv| set_input(siv, &name, &typed));
        Ok(())
    }
}

/// Replaces the edit line content and fires its edit callback, so every
/// subscriber sees the new input.
fn set_input(siv: &mut Cursive, name: &str, content: &str) {
    match siv.call_on_name(name, |view: &mut EditView| view.set_content(content)) {
        Some(callback) => callback(siv),
        None => error!("Could not find input view: {name}"),
    }
}
