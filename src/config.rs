use crate::errors::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the directory holding the global `config.yml`
pub const CONFIG_DIR_ENV: &str = "RDASH_CONFIG_DIR";

pub const GLOBAL_FILE: &str = "config.yml";
pub const LOCAL_FILE: &str = ".repodash.yml";
pub const LOCAL_OVERRIDE_FILE: &str = ".repodash.local.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub scan: ScanConfig,
    pub detail: DetailConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Deepest directory level (root is 0) checked for repositories
    pub max_depth: usize,
    /// Report repositories whose status cannot be read as `unknown`
    pub include_unreadable: bool,
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            include_unreadable: false,
            follow_symlinks: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailConfig {
    pub recent_commits: usize,
    pub file_history: usize,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            recent_commits: 5,
            file_history: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitConfig {
    pub binary: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: "git".to_string(),
        }
    }
}

/// One config file; every field is optional so layers only override what they set
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    #[serde(default)]
    scan: ScanLayer,
    #[serde(default)]
    detail: DetailLayer,
    #[serde(default)]
    git: GitLayer,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ScanLayer {
    max_depth: Option<usize>,
    include_unreadable: Option<bool>,
    follow_symlinks: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DetailLayer {
    recent_commits: Option<usize>,
    file_history: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct GitLayer {
    binary: Option<String>,
}

impl Config {
    /// Load defaults, then the global config, then `.repodash.yml` and
    /// `.repodash.local.yml` from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();
        if let Some(global) = Self::global_dir() {
            paths.push(global.join(GLOBAL_FILE));
        }
        paths.push(dir.join(LOCAL_FILE));
        paths.push(dir.join(LOCAL_OVERRIDE_FILE));

        Self::load_layers(&paths)
    }

    /// Load the given files in order, skipping the ones that don't exist
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !path.exists() {
                continue;
            }

            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                continue;
            }

            let layer: ConfigLayer = serde_yml::from_str(&content).map_err(|e| {
                DashError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            tracing::debug!(path = %path.display(), "applied config layer");
            config.apply(layer);
        }

        config.validate()?;
        Ok(config)
    }

    /// Directory of the global config (`$RDASH_CONFIG_DIR` or the platform config dir)
    pub fn global_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        dirs::config_dir().map(|d| d.join("repodash"))
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(v) = layer.scan.max_depth {
            self.scan.max_depth = v;
        }
        if let Some(v) = layer.scan.include_unreadable {
            self.scan.include_unreadable = v;
        }
        if let Some(v) = layer.scan.follow_symlinks {
            self.scan.follow_symlinks = v;
        }
        if let Some(v) = layer.detail.recent_commits {
            self.detail.recent_commits = v;
        }
        if let Some(v) = layer.detail.file_history {
            self.detail.file_history = v;
        }
        if let Some(v) = layer.git.binary {
            self.git.binary = v;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.git.binary.trim().is_empty() {
            return Err(DashError::ConfigError(
                "git.binary must not be empty".to_string(),
            ));
        }
        if self.detail.recent_commits == 0 || self.detail.file_history == 0 {
            return Err(DashError::ConfigError(
                "detail.recent_commits and detail.file_history must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self)
            .map_err(|e| DashError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
