// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration discovery and loading.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, LintError, Result};

use super::schema::LintConfig;

/// File stems to search for, in order of priority.
const CONFIG_STEMS: &[&str] = &["cml", ".cml"];

/// Supported config file extensions, in order of priority.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Find the configuration file in the current directory or any parent,
/// falling back to the user's home and XDG config directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;

    if let Some(path) = find_config_file_from(&current_dir) {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir() {
        for name in candidate_names() {
            let config_path = home.join(&name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let cml_config = config_dir.join("cml").join("config.toml");
        if cml_config.exists() {
            return Some(cml_config);
        }
    }

    None
}

/// Find the configuration file walking upward from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let names = candidate_names();
    let mut current = start_dir.to_path_buf();

    loop {
        for name in &names {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

fn candidate_names() -> Vec<String> {
    let mut names = Vec::with_capacity(CONFIG_STEMS.len() * CONFIG_EXTENSIONS.len());
    for stem in CONFIG_STEMS {
        for extension in CONFIG_EXTENSIONS {
            names.push(format!("{stem}.{extension}"));
        }
    }
    names
}

/// Load configuration from the default search locations. A run without
/// any configuration source is an error, not a silent pass.
pub async fn load_config() -> Result<LintConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path).await,
        None => Err(ConfigError::NotFound.into()),
    }
}

/// Load configuration from a specific path.
pub async fn load_config_from(path: &Path) -> Result<LintConfig> {
    tracing::debug!("loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ConfigError::NotFoundAt {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            path: path.to_path_buf(),
            message: format!("failed to read config file: {e}"),
        })
    })?;

    parse_config(&content, path)
}

/// Parse configuration content, dispatching on the file extension.
pub fn parse_config(content: &str, path: &Path) -> Result<LintConfig> {
    let parse_err = |message: String| {
        LintError::Config(ConfigError::ParseError {
            path: path.to_path_buf(),
            message,
        })
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))
        }
        Some("json") => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }
        .into()),
    }
}
