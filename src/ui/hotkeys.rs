use cursive::{event, Cursive};
use cursive_flexi_logger_view::toggle_flexi_logger_debug_console;

use crate::components::SharedPopup;
use crate::traits::ext::mutex::MutexExt;

pub fn register_hotkeys(ui: &mut Cursive, popup: SharedPopup) {
    ui.add_global_callback(event::Key::F12, toggle_flexi_logger_debug_console);
    ui.add_global_callback(event::Key::F2, move |_| {
        popup.lock_unwrap().toggle();
    });
    ui.add_global_callback(event::Event::CtrlChar('q'), |siv| siv.quit());
}
