use std::path::{Path, PathBuf};

use sdl_forge_dsl::PrintOptions;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration loaded from `sdl-forge.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub printer: PrinterConfig,
    #[serde(default)]
    pub cli: CliSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterConfig {
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

impl PrinterConfig {
    pub fn options(&self) -> PrintOptions {
        PrintOptions {
            indent: self.indent,
        }
    }
}

/// CLI-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliSettings {
    #[serde(default = "default_schema_dir")]
    pub default_schema_dir: String,
    /// File extensions searched for when a directory is given.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            default_schema_dir: default_schema_dir(),
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_indent() -> usize {
    2
}

fn default_schema_dir() -> String {
    "schema/".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["graphql".to_string(), "gql".to_string()]
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Discovery order for the config file:
/// 1. `--config <path>` (explicit, also fed by `SDL_FORGE_CONFIG`)
/// 2. `SDL_FORGE_CONFIG` env var
/// 3. `./sdl-forge.toml` (project-local)
/// 4. `$XDG_CONFIG_HOME/sdl-forge/config.toml`
/// 5. `~/.config/sdl-forge/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    if let Ok(env_path) = std::env::var("SDL_FORGE_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    let local = PathBuf::from("sdl-forge.toml");
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("sdl-forge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/sdl-forge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Ok(CliConfig::default())
}

fn load_config_from_path(path: &Path) -> Result<CliConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: CliConfig = toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
