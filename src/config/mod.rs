pub mod args;
pub mod cmdline_configuration;
pub mod settings;
