use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::annotation::DEFAULT_TEXT_FONT_SIZE;
use crate::geometry::AnnotationColor;
use crate::history::DEFAULT_MAX_SESSIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigPathError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
}

pub(crate) const APP_DIR: &str = "quickmark";
const APP_CONFIG_FILE: &str = "config.json";

/// Annotator settings from `config.json`. Every field is optional in the
/// file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    pub default_color: AnnotationColor,
    pub text_font_size: f64,
    pub max_history_sessions: usize,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            default_color: AnnotationColor::default(),
            text_font_size: DEFAULT_TEXT_FONT_SIZE,
            max_history_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl AnnotatorConfig {
    fn sanitized(mut self) -> Self {
        if !self.text_font_size.is_finite() || self.text_font_size < 1.0 {
            tracing::warn!(
                text_font_size = self.text_font_size,
                "invalid text_font_size in config.json; using default"
            );
            self.text_font_size = DEFAULT_TEXT_FONT_SIZE;
        }
        self.max_history_sessions = self.max_history_sessions.max(1);
        self
    }
}

pub fn load_annotator_config() -> AnnotatorConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_annotator_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_annotator_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> AnnotatorConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AnnotatorConfig::default(),
    };
    if !path.exists() {
        return AnnotatorConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str::<AnnotatorConfig>(&contents)
            .map(AnnotatorConfig::sanitized)
            .unwrap_or_else(|err| {
                tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
                AnnotatorConfig::default()
            }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AnnotatorConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn data_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = xdg_root(xdg_config_home, home, ".config")?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

/// Same lookup as [`app_config_path`] but rooted at the XDG data directory
/// (`$HOME/.local/share` fallback).
pub(crate) fn app_data_path(
    app_dir: &str,
    file_name: &str,
    xdg_data_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = xdg_root(xdg_data_home, home, ".local/share")?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn xdg_root(
    xdg_home: Option<&Path>,
    home: Option<&Path>,
    home_fallback: &str,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(home_fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("config dir should be created");
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).expect("config should be written");
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "quickmark",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/quickmark/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("quickmark", "config.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/quickmark/config.json"));
    }

    #[test]
    fn app_config_path_ignores_empty_xdg_value() {
        let path = app_config_path(
            "quickmark",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/quickmark/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("quickmark", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn app_data_path_falls_back_to_home_local_share() {
        let path = app_data_path(
            "quickmark",
            "annotation_history.json",
            None,
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.local/share/quickmark/annotation_history.json")
        );
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = load_annotator_config_with(Some(root.path()), None);
        assert_eq!(config, AnnotatorConfig::default());
        assert_eq!(config.default_color, AnnotationColor::Red);
        assert_eq!(config.max_history_sessions, 100);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), r#"{ "default_color": "cyan" }"#);

        let config = load_annotator_config_with(Some(root.path()), None);
        assert_eq!(config.default_color, AnnotationColor::Cyan);
        assert_eq!(config.text_font_size, DEFAULT_TEXT_FONT_SIZE);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), "{ not json");

        let config = load_annotator_config_with(Some(root.path()), None);
        assert_eq!(config, AnnotatorConfig::default());
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(
            root.path(),
            r#"{ "text_font_size": -4.0, "max_history_sessions": 0 }"#,
        );

        let config = load_annotator_config_with(Some(root.path()), None);
        assert_eq!(config.text_font_size, DEFAULT_TEXT_FONT_SIZE);
        assert_eq!(config.max_history_sessions, 1);
    }
}
