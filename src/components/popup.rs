use std::sync::{Arc, Mutex};

use cursive::reexports::log::{debug, warn};
use cursive::traits::Nameable;
use cursive::views::{HideableView, LinearLayout, Panel};
use cursive::View;

use crate::assembly::stages::PopupContext;
use crate::components::{Component, PopupContainer, SharedComponent, SharedPopup};
use crate::traits::ext::mutex::MutexExt;
use crate::ui::surface::Surface;
use crate::util::error::CmdlineError;

pub const POPUP_NAME: &str = "cmdline.popup";

type PopupView = HideableView<Panel<LinearLayout>>;

/// Stacks the child components in one panel that can be hidden. Hiding it
/// hands focus back to the input line.
pub struct Popup {
    name: String,
    title: String,
    surface: Surface,
    children: Vec<SharedComponent>,
    inputter_name: String,
    visible: bool,
}

impl Popup {
    pub fn new(context: &PopupContext) -> Result<Self, CmdlineError> {
        let inputter_name = context.inputter.lock_sync()?.name().to_string();

        Ok(Self {
            name: POPUP_NAME.to_string(),
            title: context.settings.popup_title.clone(),
            surface: context.surface.clone(),
            children: context.children.clone(),
            inputter_name,
            visible: context.settings.popup_visible,
        })
    }

    pub fn create(context: &PopupContext) -> anyhow::Result<SharedPopup> {
        Ok(Arc::new(Mutex::new(Self::new(context)?)))
    }

    pub fn children(&self) -> &[SharedComponent] {
        &self.children
    }
}

impl Component for Popup {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_view(&mut self) -> Box<dyn View> {
        let mut layout = LinearLayout::vertical();
        for child in &self.children {
            layout.add_child(child.lock_unwrap().build_view());
        }

        let mut view: PopupView = HideableView::new(Panel::new(layout).title(&self.title));
        view.set_visible(self.visible);

        Box::new(view.with_name(&self.name))
    }
}

impl PopupContainer for Popup {
    fn set_visible(&mut self, visible: bool) {
        debug!("Popup visible: {visible}");
        self.visible = visible;

        let name = self.name.clone();
        let inputter_name = self.inputter_name.clone();
        self.surface.send_box(move |siv| {
            if siv
                .call_on_name(&name, |view: &mut PopupView| view.set_visible(visible))
                .is_none()
            {
                warn!("Could not find popup view: {name}");
            }
            if !visible && siv.focus_name(&inputter_name).is_err() {
                warn!("Could not focus input view: {inputter_name}");
            }
        });
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
