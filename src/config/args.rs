use std::path::{Path, PathBuf};

use clap::Parser;
use cursive::reexports::log::{error, info};

use crate::config::cmdline_configuration::CmdlineConfiguration;
use crate::theme::ThemeKind;
use crate::util::error::CmdlineError;
use crate::util::paths::{CMDLINE_HOME_DIR, SETTINGS_FILE_NAME};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = r###"cmdline: an interactive command line with hints and an output log
"###
)]
pub struct Args {
    /// A directory where cmdline settings are located.
    #[arg(long, default_value_os_t = CMDLINE_HOME_DIR.clone())]
    home_dir: PathBuf,

    /// A directory where cmdline logs will be stored. If not specified, it will be set to
    /// [<cmdline-home-dir>/logs]
    #[arg(long)]
    logs_dir: Option<PathBuf>,

    /// A YAML settings file. If not specified, it will be set to
    /// <cmdline-home-dir>/settings.yaml. If it can't be read, built-in settings are used.
    #[arg(long)]
    settings_file: Option<PathBuf>,

    /// Overrides the prompt from the settings file.
    #[arg(long)]
    prompt: Option<String>,

    /// Sets an environment variable visible to commands, as KEY=VALUE. Can be repeated.
    #[arg(long = "env", value_name = "KEY=VALUE")]
    env: Vec<String>,

    #[arg(long, value_enum, default_value_t = ThemeKind::Dark)]
    theme: ThemeKind,

    /// Start with the popup (hints and output) hidden. F2 toggles it.
    #[arg(long)]
    hide_popup: bool,
}

pub fn get_logs_dir(cmdline_home_dir: &Path) -> PathBuf {
    cmdline_home_dir.join("logs")
}

pub fn get_settings_file(cmdline_home_dir: &Path) -> PathBuf {
    cmdline_home_dir.join(SETTINGS_FILE_NAME)
}

impl TryFrom<Args> for CmdlineConfiguration {
    type Error = CmdlineError;

    fn try_from(value: Args) -> Result<Self, Self::Error> {
        let home_dir = value.home_dir;
        let logs_dir = value.logs_dir.unwrap_or_else(|| get_logs_dir(&home_dir));
        let settings_file = value
            .settings_file
            .unwrap_or_else(|| get_settings_file(&home_dir));

        if let Some(pair) = value.env.iter().find(|pair| !pair.contains('=')) {
            return Err(CmdlineError::InvalidEnvPair(pair.clone()));
        }

        Ok(Self {
            home_dir: wrap_opt(home_dir, "home dir"),
            logs_dir: wrap_opt(logs_dir, "logs dir"),
            settings_file,
            prompt: value.prompt,
            env: value.env,
            theme: value.theme,
            hide_popup: value.hide_popup,
        })
    }
}

fn wrap_opt(dir: PathBuf, name: &str) -> Option<PathBuf> {
    if create_dir(&dir, name) {
        Some(dir)
    } else {
        None
    }
}

fn create_dir(dir: &Path, name: &str) -> bool {
    match std::fs::create_dir_all(dir) {
        Ok(_) => {
            info!("Ensured existence of {name} {}", dir.display());
            true
        }
        Err(err) => {
            error!("Failed to create {name} {}: {err}", dir.display());
            false
        }
    }
}
