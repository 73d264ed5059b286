//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["nion.toml", ".nion.toml"];
const ENV_PREFIX: &str = "NION_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `NION_`-prefixed environment variables (`NION_REASONING__MODE=rules`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./nion.toml` or `./.nion.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/nion/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// The merged provider stack, before extraction
    pub fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/nion/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("nion").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let env_keys: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if env_keys.is_empty() {
            println!("  [     ] Env:      {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:      {}", env_keys.join(", "));
        }

        if let Some(path) = config_path {
            println!("  [{}] Explicit: {}", found(path), path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project:  {}", path.display()),
            None => println!("  [     ] Project:  ./nion.toml or ./.nion.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            println!("  [{}] Global:   {}", found(&path), path.display());
        }

        println!("  [     ] Default:  built-in defaults");
    }
}

fn found(path: &Path) -> &'static str {
    if path.exists() { "FOUND" } else { "     " }
}
