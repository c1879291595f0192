use crate::assembly::slot::Slot;
use crate::assembly::stages::{ChildContext, EngineContext, InputterContext, PopupContext};
use crate::components::{SharedComponent, SharedInputHandler, SharedPopup};
use crate::config::settings::WidgetSettings;
use crate::model::environment::Environment;
use crate::requisition::SharedRequisition;
use crate::ui::surface::Surface;

/// Input of [`assemble`](super::assemble). Every field may be left out.
#[derive(Debug, Default)]
pub struct CommandLineOptions {
    /// Falls back to the caller's default-surface provider.
    pub surface: Option<Surface>,
    pub environment: Environment,
    pub settings: WidgetSettings,
    pub requisition: Slot<SharedRequisition, EngineContext>,
    pub inputter: Slot<SharedInputHandler, InputterContext>,
    /// `None` means the default pair: hinter, then output log.
    pub children: Option<Vec<Slot<SharedComponent, ChildContext>>>,
    pub popup: Slot<SharedPopup, PopupContext>,
}

impl CommandLineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_settings(mut self, settings: WidgetSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_requisition(mut self, requisition: Slot<SharedRequisition, EngineContext>) -> Self {
        self.requisition = requisition;
        self
    }

    pub fn with_inputter(mut self, inputter: Slot<SharedInputHandler, InputterContext>) -> Self {
        self.inputter = inputter;
        self
    }

    pub fn with_children(mut self, children: Vec<Slot<SharedComponent, ChildContext>>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_popup(mut self, popup: Slot<SharedPopup, PopupContext>) -> Self {
        self.popup = popup;
        self
    }
}
