use serde::Deserialize;
use std::path::PathBuf;

use crate::evaluate::EvaluationMode;

fn default_store_path() -> PathBuf {
    PathBuf::from("zones.json")
}

fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default)]
    pub evaluation_mode: EvaluationMode,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            evaluation_mode: EvaluationMode::default(),
            verbose: default_verbose(),
        }
    }
}

impl FileConfig {
    /// Load the first config file found on the search path
    ///
    /// Runs before logging is set up, so parse problems go straight to stderr.
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("gosafe.toml"));
    paths.push(PathBuf::from(".gosafe.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("gosafe").join("config.toml"));
        paths.push(config_dir.join("gosafe.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".gosafe.toml"));
        paths.push(home.join(".config").join("gosafe").join("config.toml"));
    }

    paths
}
