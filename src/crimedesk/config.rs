use crate::error::{DeskError, Result};
use crate::officers::DEFAULT_OFFICERS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ATTACHMENTS_DIR: &str = "uploads";
const DEFAULT_EXPORT_DIR: &str = "exports";

/// Configuration for a desk, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeskConfig {
    /// Where evidence files are written. Relative paths resolve against the data dir.
    #[serde(default = "default_attachments_dir")]
    pub attachments_dir: PathBuf,

    /// Where CSV exports and JSON backups are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Officers the registry starts with
    #[serde(default = "default_officers")]
    pub officers: Vec<String>,

    /// Extensions accepted for evidence uploads
    #[serde(default = "default_attachment_extensions")]
    pub attachment_extensions: Vec<String>,
}

fn default_attachments_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ATTACHMENTS_DIR)
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

fn default_officers() -> Vec<String> {
    DEFAULT_OFFICERS.iter().map(|s| s.to_string()).collect()
}

fn default_attachment_extensions() -> Vec<String> {
    ["pdf", "jpg", "jpeg", "png", "docx", "txt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            attachments_dir: default_attachments_dir(),
            export_dir: default_export_dir(),
            officers: default_officers(),
            attachment_extensions: default_attachment_extensions(),
        }
    }
}

pub const CONFIG_KEYS: [&str; 4] = [
    "attachments-dir",
    "export-dir",
    "officers",
    "attachment-extensions",
];

impl DeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DeskError::Io)?;
        let config: DeskConfig =
            serde_json::from_str(&content).map_err(DeskError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DeskError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DeskError::Serialization)?;
        fs::write(config_path, content).map_err(DeskError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "attachments-dir" => Some(self.attachments_dir.display().to_string()),
            "export-dir" => Some(self.export_dir.display().to_string()),
            "officers" => Some(self.officers.join(", ")),
            "attachment-extensions" => Some(self.attachment_extensions.join(", ")),
            _ => None,
        }
    }

    /// Comma-separated values for the list keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "attachments-dir" => self.attachments_dir = non_empty_path(key, value)?,
            "export-dir" => self.export_dir = non_empty_path(key, value)?,
            "officers" => self.officers = split_list(value),
            "attachment-extensions" => {
                self.attachment_extensions = split_list(value)
                    .into_iter()
                    .map(|e| e.trim_start_matches('.').to_lowercase())
                    .collect()
            }
            other => return Err(DeskError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    pub fn attachments_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.attachments_dir)
    }

    pub fn export_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.export_dir)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn non_empty_path(key: &str, value: &str) -> Result<PathBuf> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DeskError::Config(format!("{} cannot be empty", key)));
    }
    Ok(PathBuf::from(value))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert_eq!(config.attachments_dir, PathBuf::from("uploads"));
        assert_eq!(config.officers.len(), 5);
        assert!(config.attachment_extensions.contains(&"docx".to_string()));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = DeskConfig::load(temp.path()).unwrap();
        assert_eq!(config, DeskConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = DeskConfig::default();
        config.set("export-dir", "/tmp/desk-exports").unwrap();
        config.set("officers", "Officer Lee, Officer Kim,").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = DeskConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.export_dir, PathBuf::from("/tmp/desk-exports"));
        assert_eq!(loaded.officers, vec!["Officer Lee", "Officer Kim"]);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{"attachments_dir": "evidence"}"#,
        )
        .unwrap();
        let config = DeskConfig::load(temp.path()).unwrap();
        assert_eq!(config.attachments_dir, PathBuf::from("evidence"));
        assert_eq!(config.export_dir, PathBuf::from("exports"));
    }

    #[test]
    fn test_extensions_are_normalized() {
        let mut config = DeskConfig::default();
        config.set("attachment-extensions", ".PDF, txt").unwrap();
        assert_eq!(config.attachment_extensions, vec!["pdf", "txt"]);
    }

    #[test]
    fn test_unknown_key() {
        let mut config = DeskConfig::default();
        assert!(config.get("color").is_none());
        assert!(matches!(
            config.set("color", "blue"),
            Err(DeskError::Config(_))
        ));
    }

    #[test]
    fn test_relative_paths_resolve_against_data_dir() {
        let config = DeskConfig::default();
        let base = Path::new("/data/desk");
        assert_eq!(
            config.attachments_path(base),
            PathBuf::from("/data/desk/uploads")
        );
    }
}
