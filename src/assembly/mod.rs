//! Wires the command-line widget together.
//!
//! Every component field of [`CommandLineOptions`] is resolved in dependency
//! order: requisition, inputter, children, popup. Each step hands its factory
//! a stage record holding only what was resolved before it. Once everything
//! exists the inputter is refreshed exactly once.

use cursive::reexports::log::debug;

use crate::assembly::error::{AssemblyError, PartialAssembly, Stage};
use crate::assembly::options::CommandLineOptions;
use crate::assembly::slot::Slot;
use crate::assembly::stages::{Assembled, ChildContext, EngineContext};
use crate::components::hinter::Hinter;
use crate::components::inputter::Inputter;
use crate::components::output_log::OutputLog;
use crate::components::popup::Popup;
use crate::components::SharedComponent;
use crate::requisition::Requisition;
use crate::traits::ext::mutex::MutexExt;
use crate::ui::surface::Surface;

pub mod error;
pub mod options;
pub mod slot;
pub mod stages;

type ChildConstructor = fn(&ChildContext) -> anyhow::Result<SharedComponent>;

/// Children built when none are given, in display order.
pub const DEFAULT_CHILDREN: [ChildConstructor; 2] = [Hinter::create, OutputLog::create];

pub fn assemble(
    options: CommandLineOptions,
    default_surface: impl FnOnce() -> Surface,
) -> Result<Assembled, AssemblyError> {
    let CommandLineOptions {
        surface,
        environment,
        settings,
        requisition,
        inputter,
        children,
        popup,
    } = options;

    let surface = match surface {
        Some(surface) => surface,
        None => {
            debug!("surface: default");
            default_surface()
        }
    };

    let context = EngineContext {
        environment,
        surface,
    };

    debug!("requisition: {}", requisition.kind());
    let requisition = match requisition.resolve(&context, Requisition::create) {
        Ok(requisition) => requisition,
        Err(err) => {
            return Err(AssemblyError::new(
                Stage::Requisition,
                PartialAssembly::Requisition(context),
                err,
            ))
        }
    };
    let context = context.with_requisition(settings, requisition);

    debug!("inputter: {}", inputter.kind());
    let inputter = match inputter.resolve(&context, Inputter::create) {
        Ok(inputter) => inputter,
        Err(err) => {
            return Err(AssemblyError::new(
                Stage::Inputter,
                PartialAssembly::Inputter(context),
                err,
            ))
        }
    };
    let context = context.with_inputter(inputter);

    let slots = children.unwrap_or_else(|| {
        debug!("children: default");
        DEFAULT_CHILDREN.iter().map(|_| Slot::Unset).collect()
    });
    let mut resolved = Vec::with_capacity(slots.len());
    for (idx, slot) in slots.into_iter().enumerate() {
        debug!("children[{idx}]: {}", slot.kind());
        match slot.resolve(&context, |context| default_child(idx, context)) {
            Ok(child) => resolved.push(child),
            Err(err) => {
                return Err(AssemblyError::new(
                    Stage::Children,
                    PartialAssembly::Children { context, resolved },
                    err,
                ))
            }
        }
    }
    let context = context.with_children(resolved);

    debug!("popup: {}", popup.kind());
    let popup = match popup.resolve(&context, Popup::create) {
        Ok(popup) => popup,
        Err(err) => {
            return Err(AssemblyError::new(
                Stage::Popup,
                PartialAssembly::Popup(context),
                err,
            ))
        }
    };
    let assembled = context.with_popup(popup);

    if let Err(err) = refresh(&assembled) {
        return Err(AssemblyError::new(
            Stage::Refresh,
            PartialAssembly::Refresh(assembled),
            err,
        ));
    }

    Ok(assembled)
}

fn refresh(assembled: &Assembled) -> anyhow::Result<()> {
    assembled.inputter.lock_sync()?.update()
}

/// An unset element of an explicit children list takes the default child at
/// the same position.
fn default_child(idx: usize, context: &ChildContext) -> anyhow::Result<SharedComponent> {
    match DEFAULT_CHILDREN.get(idx) {
        Some(constructor) => constructor(context),
        None => anyhow::bail!(
            "No default child at position {idx}, only {} exist",
            DEFAULT_CHILDREN.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use cursive::{Cursive, View};

    use super::*;
    use crate::assembly::stages::{InputterContext, PopupContext};
    use crate::components::hinter::HINT_NAME;
    use crate::components::output_log::OUTPUT_NAME;
    use crate::components::popup::POPUP_NAME;
    use crate::components::{Component, InputHandler, SharedInputHandler};
    use crate::model::environment::Environment;

    #[derive(Debug, thiserror::Error)]
    #[error("broken: {0}")]
    struct Broken(&'static str);

    struct Stub {
        name: &'static str,
        fail_update: bool,
    }

    impl Component for Stub {
        fn name(&self) -> &str {
            self.name
        }

        fn build_view(&mut self) -> Box<dyn View> {
            Box::new(cursive::views::DummyView)
        }
    }

    impl InputHandler for Stub {
        fn update(&mut self) -> anyhow::Result<()> {
            if self.fail_update {
                Err(Broken("update").into())
            } else {
                Ok(())
            }
        }
    }

    fn stub(name: &'static str) -> SharedComponent {
        Arc::new(Mutex::new(Stub {
            name,
            fail_update: false,
        }))
    }

    fn child_names(children: &[SharedComponent]) -> Vec<String> {
        children
            .iter()
            .map(|child| child.lock().unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_defaults() {
        let siv = Cursive::new();
        let options = CommandLineOptions::new().with_surface(Surface::from(&siv));

        let assembled = assemble(options, || panic!("surface was given")).unwrap();
        assert_eq!(child_names(&assembled.children), vec![HINT_NAME, OUTPUT_NAME]);
        assert_eq!(assembled.popup.lock().unwrap().name(), POPUP_NAME);
        assert!(assembled.popup.lock().unwrap().is_visible());
        assert_eq!(assembled.surface.pending(), 1);
    }

    #[test]
    fn test_default_surface_provider() {
        let siv = Cursive::new();
        let called = Rc::new(RefCell::new(0));

        let assembled = {
            let called = Rc::clone(&called);
            let surface = Surface::from(&siv);
            assemble(CommandLineOptions::new(), move || {
                *called.borrow_mut() += 1;
                surface
            })
            .unwrap()
        };

        assert_eq!(*called.borrow(), 1);
        assert!(assembled.surface.same_as(&Surface::from(&siv)));
    }

    #[test]
    fn test_instances_keep_identity() {
        let siv = Cursive::new();
        let surface = Surface::from(&siv);
        let engine = EngineContext {
            environment: Environment::new(),
            surface: surface.clone(),
        };
        let requisition = Requisition::create(&engine).unwrap();
        let child = stub("mine");

        let options = CommandLineOptions::new()
            .with_surface(surface)
            .with_requisition(Slot::instance(Arc::clone(&requisition)))
            .with_children(vec![Slot::instance(Arc::clone(&child))]);

        let assembled = assemble(options, || panic!("surface was given")).unwrap();
        assert!(Arc::ptr_eq(&assembled.requisition, &requisition));
        assert!(Arc::ptr_eq(&assembled.children[0], &child));
        assert_eq!(assembled.children.len(), 1);
    }

    #[test]
    fn test_requisition_factory_receives_environment_and_surface() {
        let siv = Cursive::new();
        let surface = Surface::from(&siv);
        let environment = Environment::from_pairs(["E=1"]).unwrap();
        let seen = Rc::new(RefCell::new(None));

        let options = {
            let seen = Rc::clone(&seen);
            let expected = surface.clone();
            CommandLineOptions::new()
                .with_surface(surface)
                .with_environment(environment)
                .with_requisition(Slot::factory(move |context: &EngineContext| {
                    *seen.borrow_mut() = Some((
                        context.environment.get("E").map(str::to_string),
                        context.surface.same_as(&expected),
                    ));
                    Requisition::create(context)
                }))
        };

        let assembled = assemble(options, || panic!("surface was given")).unwrap();
        assert_eq!(*seen.borrow(), Some((Some("1".to_string()), true)));
        assert_eq!(
            assembled.requisition.lock().unwrap().environment().get("E"),
            Some("1")
        );
    }

    #[test]
    fn test_resolution_order() {
        struct RecordingInputter {
            log: Arc<Mutex<Vec<&'static str>>>,
        }

        impl Component for RecordingInputter {
            fn name(&self) -> &str {
                "recording.input"
            }

            fn build_view(&mut self) -> Box<dyn View> {
                Box::new(cursive::views::DummyView)
            }
        }

        impl InputHandler for RecordingInputter {
            fn update(&mut self) -> anyhow::Result<()> {
                self.log.lock().unwrap().push("refresh");
                Ok(())
            }
        }

        let siv = Cursive::new();
        let log = Arc::new(Mutex::new(vec![]));
        let record = |label: &'static str| {
            let log = Arc::clone(&log);
            move || log.lock().unwrap().push(label)
        };

        let options = {
            let on_requisition = record("requisition");
            let on_inputter = record("inputter");
            let on_first = record("child 1");
            let on_second = record("child 2");
            let on_popup = record("popup");
            let inputter_log = Arc::clone(&log);
            CommandLineOptions::new()
                .with_surface(Surface::from(&siv))
                .with_requisition(Slot::factory(move |context: &EngineContext| {
                    on_requisition();
                    Requisition::create(context)
                }))
                .with_inputter(Slot::factory(move |_: &InputterContext| {
                    on_inputter();
                    let inputter: SharedInputHandler = Arc::new(Mutex::new(RecordingInputter {
                        log: inputter_log,
                    }));
                    Ok(inputter)
                }))
                .with_children(vec![
                    Slot::factory(move |context: &ChildContext| {
                        on_first();
                        OutputLog::create(context)
                    }),
                    Slot::factory(move |context: &ChildContext| {
                        on_second();
                        Hinter::create(context)
                    }),
                ])
                .with_popup(Slot::factory(move |context: &PopupContext| {
                    on_popup();
                    assert_eq!(child_names(&context.children), vec![OUTPUT_NAME, HINT_NAME]);
                    Popup::create(context)
                }))
        };

        assemble(options, || panic!("surface was given")).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["requisition", "inputter", "child 1", "child 2", "popup", "refresh"]
        );
    }

    #[test]
    fn test_inputter_failure_keeps_requisition() {
        let siv = Cursive::new();
        let options = CommandLineOptions::new()
            .with_surface(Surface::from(&siv))
            .with_inputter(Slot::factory(|_: &InputterContext| {
                Err(Broken("inputter").into())
            }));

        let err = assemble(options, || panic!("surface was given")).unwrap_err();
        assert_eq!(err.stage, Stage::Inputter);
        assert!(err.partial.requisition().is_some());
        assert!(err.partial.inputter().is_none());
        assert!(matches!(
            err.source.downcast_ref::<Broken>(),
            Some(Broken("inputter"))
        ));
        assert_eq!(err.partial.surface().pending(), 0);
    }

    #[test]
    fn test_second_child_failure_keeps_first() {
        let siv = Cursive::new();
        let options = CommandLineOptions::new()
            .with_surface(Surface::from(&siv))
            .with_children(vec![
                Slot::instance(stub("first")),
                Slot::factory(|_: &ChildContext| Err(Broken("second").into())),
                Slot::factory(|_: &ChildContext| panic!("must not be built after a failure")),
            ]);

        let err = assemble(options, || panic!("surface was given")).unwrap_err();
        assert_eq!(err.stage, Stage::Children);
        assert_eq!(child_names(err.partial.children()), vec!["first"]);
        assert!(err.partial.inputter().is_some());
        assert!(err.partial.popup().is_none());
        assert!(format!("{:?}", err.partial).contains("resolved: 1"));
        assert!(format!("{err:?}").contains("stage: Children"));
        assert_eq!(
            err.to_string(),
            "Failed to assemble the command line at children: broken: second"
        );
    }

    #[test]
    fn test_unset_child_takes_positional_default() {
        let siv = Cursive::new();
        let options = CommandLineOptions::new()
            .with_surface(Surface::from(&siv))
            .with_children(vec![Slot::instance(stub("first")), Slot::Unset]);

        let assembled = assemble(options, || panic!("surface was given")).unwrap();
        assert_eq!(child_names(&assembled.children), vec!["first", OUTPUT_NAME]);

        let options = CommandLineOptions::new()
            .with_surface(Surface::from(&siv))
            .with_children(vec![Slot::Unset, Slot::Unset, Slot::Unset]);
        let err = assemble(options, || panic!("surface was given")).unwrap_err();
        assert_eq!(err.stage, Stage::Children);
        assert_eq!(err.partial.children().len(), 2);
    }

    #[test]
    fn test_refresh_failure_has_everything_resolved() {
        let siv = Cursive::new();
        let inputter: SharedInputHandler = Arc::new(Mutex::new(Stub {
            name: "stub.input",
            fail_update: true,
        }));
        let options = CommandLineOptions::new()
            .with_surface(Surface::from(&siv))
            .with_inputter(Slot::instance(inputter));

        let err = assemble(options, || panic!("surface was given")).unwrap_err();
        assert_eq!(err.stage, Stage::Refresh);
        assert!(err.partial.requisition().is_some());
        assert!(err.partial.inputter().is_some());
        assert_eq!(err.partial.children().len(), 2);
        assert!(err.partial.popup().is_some());
        assert!(err.source.downcast_ref::<Broken>().is_some());
    }

    #[test]
    fn test_reassembly_only_refreshes() {
        let siv = Cursive::new();
        let options = CommandLineOptions::new().with_surface(Surface::from(&siv));
        let first = assemble(options, || panic!("surface was given")).unwrap();

        let requisition = Arc::clone(&first.requisition);
        let inputter = Arc::clone(&first.inputter);
        let children = first.children.clone();
        let popup = Arc::clone(&first.popup);

        let second = assemble(first.into_options(), || panic!("surface was given")).unwrap();
        assert!(Arc::ptr_eq(&second.requisition, &requisition));
        assert!(Arc::ptr_eq(&second.inputter, &inputter));
        assert!(Arc::ptr_eq(&second.popup, &popup));
        assert!(second
            .children
            .iter()
            .zip(children.iter())
            .all(|(a, b)| Arc::ptr_eq(a, b)));
        assert_eq!(second.surface.pending(), 2);
    }

    #[test]
    fn test_environment_reaches_commands() {
        let siv = Cursive::new();
        let options = CommandLineOptions::new()
            .with_surface(Surface::from(&siv))
            .with_environment(Environment::from_pairs(["GREETING=hello"]).unwrap());

        let assembled = assemble(options, || panic!("surface was given")).unwrap();
        let mut requisition = assembled.requisition.lock().unwrap();
        requisition.update("env GREETING");
        let entry = requisition.exec().unwrap();
        assert_eq!(entry.outcome.message(), "hello");
    }
}
