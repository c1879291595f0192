use std::sync::{Arc, Mutex};

use cursive::theme::BaseColor;
use cursive::traits::{Nameable, Resizable, Scrollable};
use cursive::utils::markup::StyledString;
use cursive::view::ScrollStrategy;
use cursive::views::Panel;
use cursive::View;
use cursive_cached_text_view::CachedTextView;

use crate::assembly::stages::ChildContext;
use crate::components::{Component, SharedComponent};
use crate::requisition::output::{Outcome, OutputEntry};
use crate::requisition::{RequisitionEvent, SharedRequisition};
use crate::traits::ext::mutex::MutexExt;
use crate::util::error::CmdlineError;
use crate::util::ui::format_clock;

pub const OUTPUT_NAME: &str = "cmdline.output";

pub struct OutputLog {
    name: String,
    requisition: SharedRequisition,
}

impl OutputLog {
    pub fn new(context: &ChildContext) -> Result<Self, CmdlineError> {
        let name = OUTPUT_NAME.to_string();

        {
            let surface = context.surface.clone();
            let name = name.clone();
            context
                .requisition
                .lock_sync()?
                .subscribe(move |requisition, event| match event {
                    RequisitionEvent::OutputAdded | RequisitionEvent::OutputCleared => {
                        let styled = render_outputs(requisition.outputs());
                        surface.call_on_name(&name, move |view: &mut CachedTextView| {
                            view.set_content(styled)
                        });
                    }
                    RequisitionEvent::InputChanged => {}
                });
        }

        Ok(Self {
            name,
            requisition: Arc::clone(&context.requisition),
        })
    }

    pub fn create(context: &ChildContext) -> anyhow::Result<SharedComponent> {
        Ok(Arc::new(Mutex::new(Self::new(context)?)))
    }
}

impl Component for OutputLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_view(&mut self) -> Box<dyn View> {
        let styled = render_outputs(self.requisition.lock_unwrap().outputs());

        let tv = CachedTextView::new(styled, 5)
            .with_name(&self.name)
            .full_screen()
            .scrollable()
            .scroll_x(true)
            .scroll_y(true)
            .scroll_strategy(ScrollStrategy::StickToBottom);

        Box::new(Panel::new(tv).title("Output"))
    }
}

pub fn render_outputs(outputs: &[OutputEntry]) -> StyledString {
    let mut styled = StyledString::new();

    for (idx, entry) in outputs.iter().enumerate() {
        if idx > 0 {
            styled.append_plain("\n");
        }
        styled.append_styled(
            format!("[{}] » {}", format_clock(&entry.started_at), entry.typed),
            BaseColor::Cyan.light(),
        );

        match &entry.outcome {
            Outcome::Text(text) if text.is_empty() => {}
            Outcome::Text(text) => {
                styled.append_plain("\n");
                styled.append_plain(text);
            }
            Outcome::Error(message) => {
                styled.append_plain("\n");
                styled.append_styled(message, BaseColor::Red.light());
            }
        }
    }

    styled
}
