use anyhow::Result;
use clap::Parser;
use cursive::reexports::log::{info, warn};
use cursive::CursiveRunnable;

use crate::assembly::assemble;
use crate::assembly::options::CommandLineOptions;
use crate::components::inputter::INPUT_NAME;
use crate::config::args::Args;
use crate::config::cmdline_configuration::CmdlineConfiguration;
use crate::config::settings::{load_embedded_settings, load_settings};
use crate::theme::get_theme;
use crate::traits::ext::cursive::SivLogExt;
use crate::ui::hotkeys::register_hotkeys;
use crate::ui::layout::build_widget;
use crate::ui::surface::Surface;

pub mod assembly;
pub mod components;
pub mod config;
pub mod model;
pub mod requisition;
pub mod theme;
pub mod traits;
pub mod ui;
pub mod util;

fn init_cursive_backend() -> std::io::Result<Box<dyn cursive::backend::Backend>> {
    let backend = cursive::backends::termion::Backend::init()?;
    let buffered_backend = cursive_buffered_backend::BufferedBackend::new(backend);
    Ok(Box::new(buffered_backend))
}

fn main() -> Result<()> {
    let configuration = CmdlineConfiguration::try_from(Args::parse())?;
    println!("{:?}", configuration);

    let mut ui = CursiveRunnable::default();
    ui.setup_logger(configuration.logs_dir.clone())?;
    ui.set_theme(get_theme(configuration.theme));

    let settings_file = match load_settings(&configuration.settings_file) {
        Ok(settings_file) => settings_file,
        Err(err) => {
            warn!(
                "Could not read settings from {:?}: {}",
                configuration.settings_file.as_os_str(),
                err
            );
            load_embedded_settings()?
        }
    };
    let (settings, environment) = settings_file.resolve(&configuration)?;

    let options = CommandLineOptions::new()
        .with_environment(environment)
        .with_settings(settings);
    let assembled = assemble(options, || Surface::from(&*ui))?;
    info!("Assembled command line with {} children", assembled.children.len());

    let widget = build_widget(&assembled)?;
    ui.add_fullscreen_layer(widget);
    if let Err(err) = ui.focus_name(INPUT_NAME) {
        warn!("Could not focus {INPUT_NAME}: {err:?}");
    }

    register_hotkeys(&mut ui, assembled.popup.clone());

    ui.try_run_with(init_cursive_backend)?;

    Ok(())
}
