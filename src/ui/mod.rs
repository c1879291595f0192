pub mod hotkeys;
pub mod layout;
pub mod surface;
