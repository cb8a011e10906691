use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::warn;

use crate::{bills::DEFAULT_PREVIEW_WIDTH, new_bill::NumericParsing};

pub const SETTINGS_FILE: &str = "billed.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_url: String,
    pub session_file: PathBuf,
    pub numeric_parsing: NumericParsing,
    pub preview_width: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5678".into(),
            session_file: default_session_file(),
            numeric_parsing: NumericParsing::Lenient,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    session_file: Option<PathBuf>,
    numeric_parsing: Option<NumericParsing>,
    preview_width: Option<u32>,
}

fn default_session_file() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join("billed").join("session.json"),
        None => PathBuf::from("billed-session.json"),
    }
}

/// Defaults, then `billed.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();
    apply_file(&mut settings, Path::new(SETTINGS_FILE));
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut ClientSettings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    let file_cfg = match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(path = %path.display(), %err, "config: ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.session_file {
        settings.session_file = v;
    }
    if let Some(v) = file_cfg.numeric_parsing {
        settings.numeric_parsing = v;
    }
    if let Some(v) = file_cfg.preview_width {
        settings.preview_width = v;
    }
}

fn apply_env(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("BILLED_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("BILLED_SESSION_FILE") {
        settings.session_file = PathBuf::from(v);
    }
    if let Some(v) = lookup("APP__SESSION_FILE") {
        settings.session_file = PathBuf::from(v);
    }

    if let Some(v) = lookup("APP__NUMERIC_PARSING") {
        if let Ok(parsed) = v.parse::<NumericParsing>() {
            settings.numeric_parsing = parsed;
        }
    }

    if let Some(v) = lookup("APP__PREVIEW_WIDTH") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.preview_width = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
