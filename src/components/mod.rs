use std::sync::{Arc, Mutex};

use cursive::View;

pub mod hinter;
pub mod inputter;
pub mod output_log;
pub mod popup;

pub type SharedComponent = Arc<Mutex<dyn Component>>;
pub type SharedInputHandler = Arc<Mutex<dyn InputHandler>>;
pub type SharedPopup = Arc<Mutex<dyn PopupContainer>>;

/// A piece of the command-line widget.
pub trait Component: Send {
    /// Name the component's view is registered under.
    fn name(&self) -> &str;

    fn build_view(&mut self) -> Box<dyn View>;
}

pub trait InputHandler: Component {
    /// Pushes the engine's current input into the view.
    fn update(&mut self) -> anyhow::Result<()>;
}

pub trait PopupContainer: Component {
    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    fn toggle(&mut self) {
        let visible = !self.is_visible();
        self.set_visible(visible);
    }
}
