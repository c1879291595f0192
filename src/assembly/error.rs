use strum_macros::Display;

use crate::assembly::stages::{Assembled, ChildContext, EngineContext, InputterContext, PopupContext};
use crate::components::{SharedComponent, SharedInputHandler, SharedPopup};
use crate::requisition::SharedRequisition;
use crate::ui::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Requisition,
    Inputter,
    Children,
    Popup,
    Refresh,
}

/// Everything resolved before the failing step. Nothing is rolled back.
pub enum PartialAssembly {
    Requisition(EngineContext),
    Inputter(InputterContext),
    Children {
        context: ChildContext,
        resolved: Vec<SharedComponent>,
    },
    Popup(PopupContext),
    Refresh(Assembled),
}

impl std::fmt::Debug for PartialAssembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartialAssembly::Requisition(context) => {
                f.debug_tuple("Requisition").field(context).finish()
            }
            PartialAssembly::Inputter(context) => f.debug_tuple("Inputter").field(context).finish(),
            PartialAssembly::Children { context, resolved } => f
                .debug_struct("Children")
                .field("context", context)
                .field("resolved", &resolved.len())
                .finish(),
            PartialAssembly::Popup(context) => f.debug_tuple("Popup").field(context).finish(),
            PartialAssembly::Refresh(assembled) => {
                f.debug_tuple("Refresh").field(assembled).finish()
            }
        }
    }
}

impl PartialAssembly {
    pub fn surface(&self) -> &Surface {
        match self {
            PartialAssembly::Requisition(context) => &context.surface,
            PartialAssembly::Inputter(context) => &context.surface,
            PartialAssembly::Children { context, .. } => &context.surface,
            PartialAssembly::Popup(context) => &context.surface,
            PartialAssembly::Refresh(assembled) => &assembled.surface,
        }
    }

    pub fn requisition(&self) -> Option<&SharedRequisition> {
        match self {
            PartialAssembly::Requisition(_) => None,
            PartialAssembly::Inputter(context) => Some(&context.requisition),
            PartialAssembly::Children { context, .. } => Some(&context.requisition),
            PartialAssembly::Popup(context) => Some(&context.requisition),
            PartialAssembly::Refresh(assembled) => Some(&assembled.requisition),
        }
    }

    pub fn inputter(&self) -> Option<&SharedInputHandler> {
        match self {
            PartialAssembly::Requisition(_) | PartialAssembly::Inputter(_) => None,
            PartialAssembly::Children { context, .. } => Some(&context.inputter),
            PartialAssembly::Popup(context) => Some(&context.inputter),
            PartialAssembly::Refresh(assembled) => Some(&assembled.inputter),
        }
    }

    pub fn children(&self) -> &[SharedComponent] {
        match self {
            PartialAssembly::Requisition(_) | PartialAssembly::Inputter(_) => &[],
            PartialAssembly::Children { resolved, .. } => resolved.as_slice(),
            PartialAssembly::Popup(context) => context.children.as_slice(),
            PartialAssembly::Refresh(assembled) => assembled.children.as_slice(),
        }
    }

    pub fn popup(&self) -> Option<&SharedPopup> {
        match self {
            PartialAssembly::Refresh(assembled) => Some(&assembled.popup),
            _ => None,
        }
    }
}

/// A component failed to build, or the final refresh failed. `source` is the
/// error exactly as the component returned it.
#[derive(thiserror::Error)]
#[error("Failed to assemble the command line at {stage}: {source}")]
pub struct AssemblyError {
    pub stage: Stage,
    pub partial: Box<PartialAssembly>,
    #[source]
    pub source: anyhow::Error,
}

impl AssemblyError {
    pub(crate) fn new(stage: Stage, partial: PartialAssembly, source: anyhow::Error) -> Self {
        Self {
            stage,
            partial: Box::new(partial),
            source,
        }
    }
}

impl std::fmt::Debug for AssemblyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssemblyError")
            .field("stage", &self.stage)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
