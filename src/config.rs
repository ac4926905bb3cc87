use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::extract::InterpolatedId;

pub const CONFIG_FILE_NAME: &str = ".intlxrc.json";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns of input files to skip.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Pattern used to derive ids for descriptors written without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_interpolation_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_file: Option<String>,
    /// Functions besides `defineMessage`/`formatMessage` taking a descriptor.
    #[serde(default)]
    pub additional_function_names: Vec<String>,
    /// Components besides `FormattedMessage` taking descriptor attributes.
    #[serde(default)]
    pub additional_component_names: Vec<String>,
    #[serde(default)]
    pub preserve_whitespace: bool,
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or the id
    /// interpolation pattern is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if let Some(pattern) = &self.id_interpolation_pattern {
            InterpolatedId::new(pattern.as_str()).with_context(|| {
                format!("Invalid 'idInterpolationPattern': \"{}\"", pattern)
            })?;
        }

        Ok(())
    }

    /// Whether `path` matches one of the `ignores` patterns.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignores
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .any(|p| p.matches(path))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config {
        ignores: vec!["**/node_modules/**".to_string()],
        ..Default::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
