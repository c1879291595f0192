pub(crate) mod error;
pub(crate) mod panics;
pub(crate) mod paths;
pub(crate) mod ui;
