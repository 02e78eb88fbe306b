// src/config.rs

use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  Text,
  Json,
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
  /// `error`, `warn`, `info`, `debug`, `trace` or `off`.
  pub log_level: String,
  pub output: OutputFormat,
  pub check_symmetry: bool,
  pub cartesian: bool,
  pub summary_rows: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      log_level: "warn".to_string(),
      output: OutputFormat::Text,
      check_symmetry: false,
      cartesian: false,
      summary_rows: 20,
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/cifxtal/settings.json)
  pub fn load() -> (Self, String) {
    Self::load_from(&Self::get_path())
  }

  /// Loads config from an explicit file. Falls back to defaults on any failure.
  pub fn load_from(path: &Path) -> (Self, String) {
    if path.exists() {
      match File::open(path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader(reader) {
            Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    self.save_to(&Self::get_path())
  }

  pub fn save_to(&self, path: &Path) -> String {
    if let Some(parent) = path.parent() {
      let _ = fs::create_dir_all(parent);
    }

    match File::create(path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Config saved to {:?}", path),
          Err(e) => format!("Failed to save config: {}", e),
        }
      }
      Err(e) => format!("Could not create config file: {}", e),
    }
  }

  pub fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "cifxtal", "cifxtal") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_file_keeps_defaults() {
    let cfg: Config = serde_json::from_str(r#"{ "output": "json", "summary_rows": 5 }"#).unwrap();
    assert_eq!(cfg.output, OutputFormat::Json);
    assert_eq!(cfg.summary_rows, 5);
    assert_eq!(cfg.log_level, "warn");
    assert!(!cfg.check_symmetry);
  }

  #[test]
  fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let cfg = Config {
      cartesian: true,
      log_level: "debug".to_string(),
      ..Config::default()
    };
    assert!(cfg.save_to(&path).starts_with("Config saved"));
    let (back, msg) = Config::load_from(&path);
    assert_eq!(back, cfg, "{}", msg);
  }

  #[test]
  fn missing_or_broken_files_fall_back() {
    let (cfg, msg) = Config::load_from(Path::new("/nonexistent/cifxtal/settings.json"));
    assert_eq!(cfg, Config::default());
    assert!(msg.starts_with("No config"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    let (cfg, msg) = Config::load_from(&path);
    assert_eq!(cfg, Config::default());
    assert!(msg.starts_with("Error parsing"));
  }
}
