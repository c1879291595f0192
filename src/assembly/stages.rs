//! Records threaded through assembly. Each step consumes the record of the
//! previous step and returns one that additionally holds what it resolved,
//! so a factory can only ever see dependencies that already exist.

use crate::assembly::options::CommandLineOptions;
use crate::assembly::slot::Slot;
use crate::components::{SharedComponent, SharedInputHandler, SharedPopup};
use crate::config::settings::WidgetSettings;
use crate::model::environment::Environment;
use crate::requisition::SharedRequisition;
use crate::ui::surface::Surface;

/// What the command engine is built from. Nothing else is resolved yet.
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub environment: Environment,
    pub surface: Surface,
}

impl EngineContext {
    pub(crate) fn with_requisition(
        self,
        settings: WidgetSettings,
        requisition: SharedRequisition,
    ) -> InputterContext {
        InputterContext {
            environment: self.environment,
            surface: self.surface,
            settings,
            requisition,
        }
    }
}

pub struct InputterContext {
    pub environment: Environment,
    pub surface: Surface,
    pub settings: WidgetSettings,
    pub requisition: SharedRequisition,
}

impl InputterContext {
    pub(crate) fn with_inputter(self, inputter: SharedInputHandler) -> ChildContext {
        ChildContext {
            environment: self.environment,
            surface: self.surface,
            settings: self.settings,
            requisition: self.requisition,
            inputter,
        }
    }
}

/// Seen by every child factory. Holds no children, so siblings are built
/// independently of each other.
pub struct ChildContext {
    pub environment: Environment,
    pub surface: Surface,
    pub settings: WidgetSettings,
    pub requisition: SharedRequisition,
    pub inputter: SharedInputHandler,
}

impl ChildContext {
    pub(crate) fn with_children(self, children: Vec<SharedComponent>) -> PopupContext {
        PopupContext {
            environment: self.environment,
            surface: self.surface,
            settings: self.settings,
            requisition: self.requisition,
            inputter: self.inputter,
            children,
        }
    }
}

pub struct PopupContext {
    pub environment: Environment,
    pub surface: Surface,
    pub settings: WidgetSettings,
    pub requisition: SharedRequisition,
    pub inputter: SharedInputHandler,
    pub children: Vec<SharedComponent>,
}

impl PopupContext {
    pub(crate) fn with_popup(self, popup: SharedPopup) -> Assembled {
        Assembled {
            environment: self.environment,
            surface: self.surface,
            settings: self.settings,
            requisition: self.requisition,
            inputter: self.inputter,
            children: self.children,
            popup,
        }
    }
}

/// The fully wired widget.
pub struct Assembled {
    pub environment: Environment,
    pub surface: Surface,
    pub settings: WidgetSettings,
    pub requisition: SharedRequisition,
    pub inputter: SharedInputHandler,
    pub children: Vec<SharedComponent>,
    pub popup: SharedPopup,
}

impl Assembled {
    /// Turns every resolved component back into an instance slot.
    pub fn into_options(self) -> CommandLineOptions {
        CommandLineOptions {
            surface: Some(self.surface),
            environment: self.environment,
            settings: self.settings,
            requisition: Slot::Instance(self.requisition),
            inputter: Slot::Instance(self.inputter),
            children: Some(self.children.into_iter().map(Slot::Instance).collect()),
            popup: Slot::Instance(self.popup),
        }
    }
}

macro_rules! debug_record {
    ($record:ident { $($field:ident),* }) => {
        impl std::fmt::Debug for $record {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($record))
                    .field("environment", &self.environment)
                    .field("surface", &self.surface)
                    .field("settings", &self.settings)
                    $(.field(stringify!($field), &"<resolved>"))*
                    .finish()
            }
        }
    };
}

debug_record!(InputterContext { requisition });
debug_record!(ChildContext { requisition, inputter });
debug_record!(PopupContext { requisition, inputter, children });
debug_record!(Assembled { requisition, inputter, children, popup });
