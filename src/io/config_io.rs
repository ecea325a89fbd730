use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::config::Settings;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize config.toml: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),
    #[error("could not parse filters.json: {0}")]
    FilterParseError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Where the persisted settings and filter state live: the
/// `SIFT_CONFIG_DIR` override, or `~/.config/sift`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SIFT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    std::env::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("sift")
}

/// Read the settings, returning both the parsed values and the raw
/// toml_edit document for round-trip-safe editing. A missing file
/// yields defaults and an empty document.
pub fn read_config(config_dir: &Path) -> Result<(Settings, toml_edit::DocumentMut), StoreError> {
    let config_path = config_dir.join("config.toml");
    if !config_path.exists() {
        return Ok((Settings::default(), toml_edit::DocumentMut::new()));
    }
    let config_text = fs::read_to_string(&config_path).map_err(|e| StoreError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let settings: Settings = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text
        .parse()
        .map_err(|_: toml_edit::TomlError| {
            StoreError::ConfigParseError(toml::from_str::<Settings>("=").unwrap_err())
        })?;
    Ok((settings, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(config_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), StoreError> {
    fs::create_dir_all(config_dir)?;
    let config_path = config_dir.join("config.toml");
    fs::write(&config_path, doc.to_string()).map_err(|e| StoreError::ReadError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

/// Replace the whole settings value in the document. Used when an edit
/// touches structured fields (the file list, sorting keys) that are not
/// worth patching entry by entry.
pub fn replace_settings(
    doc: &mut toml_edit::DocumentMut,
    settings: &Settings,
) -> Result<(), StoreError> {
    let text = toml::to_string_pretty(settings)?;
    let fresh: toml_edit::DocumentMut = text
        .parse()
        .map_err(|_: toml_edit::TomlError| {
            StoreError::ConfigParseError(toml::from_str::<Settings>("=").unwrap_err())
        })?;
    *doc = fresh;
    Ok(())
}

/// Set one boolean option in the config document.
pub fn set_bool_option(doc: &mut toml_edit::DocumentMut, key: &str, value: bool) {
    doc[key] = toml_edit::value(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let (settings, doc) = read_config(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(doc.to_string().is_empty());
    }

    #[test]
    fn bool_edit_preserves_unrelated_content() {
        let dir = TempDir::new().unwrap();
        let text = "# my settings\nshow_completed = true\nfile_sorting = false\n";
        fs::write(dir.path().join("config.toml"), text).unwrap();

        let (_, mut doc) = read_config(dir.path()).unwrap();
        set_bool_option(&mut doc, "show_completed", false);
        write_config(dir.path(), &doc).unwrap();

        let written = fs::read_to_string(dir.path().join("config.toml")).unwrap();
        assert!(written.contains("# my settings"));
        assert!(written.contains("show_completed = false"));

        let (settings, _) = read_config(dir.path()).unwrap();
        assert!(!settings.show_completed);
    }

    #[test]
    fn replace_settings_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.append_creation_date = true;
        settings.future_window_days = 3;

        let mut doc = toml_edit::DocumentMut::new();
        replace_settings(&mut doc, &settings).unwrap();
        write_config(dir.path(), &doc).unwrap();

        let (read_back, _) = read_config(dir.path()).unwrap();
        assert_eq!(read_back, settings);
    }
}
