use std::path::PathBuf;

use crate::theme::ThemeKind;

#[derive(Debug)]
pub struct CmdlineConfiguration {
    pub home_dir: Option<PathBuf>,
    pub logs_dir: Option<PathBuf>,
    pub settings_file: PathBuf,
    pub prompt: Option<String>,
    pub env: Vec<String>,
    pub theme: ThemeKind,
    pub hide_popup: bool,
}
