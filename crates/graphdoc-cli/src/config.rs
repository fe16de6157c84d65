//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use graphdoc_core::values::ValueHandler;

use crate::error::CliError;

/// Application configuration: source and documentation paths, rendering
/// options, and the text defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Source and documentation tree locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Rendering options.
    #[serde(default)]
    pub docs: DocsConfig,

    /// Text defaults and the placeholder (for localized trees).
    #[serde(default)]
    pub values: ValueHandler,
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_doc_root() -> PathBuf {
    PathBuf::from("docs")
}

fn default_scripts_folder() -> String {
    "Scripts".to_string()
}

fn default_packages_folder() -> String {
    "Packages".to_string()
}

/// Where sources live and where documentation goes.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Root of the source tree holding the scripts and packages subtrees.
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Root of the documentation tree.
    #[serde(default = "default_doc_root")]
    pub doc_root: PathBuf,

    /// Name of the scripts subtree beneath the source root.
    #[serde(default = "default_scripts_folder")]
    pub scripts_folder: String,

    /// Name of the packages subtree beneath the source root.
    #[serde(default = "default_packages_folder")]
    pub packages_folder: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            doc_root: default_doc_root(),
            scripts_folder: default_scripts_folder(),
            packages_folder: default_packages_folder(),
        }
    }
}

impl PathsConfig {
    /// The scripts subtree.
    pub fn script_src(&self) -> PathBuf {
        self.source_root.join(&self.scripts_folder)
    }

    /// The packages subtree.
    pub fn package_src(&self) -> PathBuf {
        self.source_root.join(&self.packages_folder)
    }
}

fn default_code_blocks() -> bool {
    true
}

/// Rendering options.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    /// Whether script documents list code block nodes.
    #[serde(default = "default_code_blocks")]
    pub code_blocks: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            code_blocks: default_code_blocks(),
        }
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (graphdoc/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns an error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("graphdoc/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "graphdoc", "graphdoc") {
        let system_config = proj_dirs.config_dir().join("config.toml");
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(&system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CliError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CliError::MissingConfig(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| CliError::ConfigParse(err.to_string()))
}
