use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::cmdline_configuration::CmdlineConfiguration;
use crate::model::environment::Environment;
use crate::util::error::CmdlineError;

pub const DEFAULT_PROMPT: &str = "» ";
pub const DEFAULT_POPUP_TITLE: &str = "Command line";

/// Contents of `settings.yaml`. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub prompt: Option<String>,
    pub popup_title: Option<String>,
    pub popup_visible: Option<bool>,
    pub hint_template: Option<String>,
    pub environment: BTreeMap<String, String>,
}

impl TryFrom<&Path> for SettingsFile {
    type Error = CmdlineError;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        let f = File::open(value)?;
        Ok(serde_yaml::from_reader(f)?)
    }
}

impl TryFrom<&str> for SettingsFile {
    type Error = CmdlineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(serde_yaml::from_str(value)?)
    }
}

pub fn load_settings(path: &Path) -> Result<SettingsFile, CmdlineError> {
    SettingsFile::try_from(path)
}

pub fn load_embedded_settings() -> Result<SettingsFile, CmdlineError> {
    SettingsFile::try_from(include_str!("../../settings/default.yaml"))
}

/// Look of the widget, read by the default components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSettings {
    pub prompt: String,
    pub popup_title: String,
    pub popup_visible: bool,
    /// `None` selects the built-in hint template.
    pub hint_template: Option<String>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            popup_title: DEFAULT_POPUP_TITLE.to_string(),
            popup_visible: true,
            hint_template: None,
        }
    }
}

impl From<&SettingsFile> for WidgetSettings {
    fn from(value: &SettingsFile) -> Self {
        let defaults = Self::default();
        Self {
            prompt: value.prompt.clone().unwrap_or(defaults.prompt),
            popup_title: value.popup_title.clone().unwrap_or(defaults.popup_title),
            popup_visible: value.popup_visible.unwrap_or(defaults.popup_visible),
            hint_template: value.hint_template.clone(),
        }
    }
}

impl SettingsFile {
    pub fn environment(&self) -> Environment {
        let mut environment = Environment::new();
        for (key, value) in &self.environment {
            environment.set(key, value);
        }
        environment
    }

    /// Applies command line overrides: `--prompt`, `--hide-popup` and `--env`.
    pub fn resolve(
        &self,
        configuration: &CmdlineConfiguration,
    ) -> Result<(WidgetSettings, Environment), CmdlineError> {
        let mut settings = WidgetSettings::from(self);
        if let Some(prompt) = &configuration.prompt {
            settings.prompt = prompt.clone();
        }
        if configuration.hide_popup {
            settings.popup_visible = false;
        }

        let mut environment = self.environment();
        environment.extend(Environment::from_pairs(&configuration.env)?);

        Ok((settings, environment))
    }
}
