//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Project-level config file names, checked in order.
const PROJECT_FILES: [&str; 2] = ["sentinel.toml", ".sentinel.toml"];

/// Prefix for `SENTINEL_RUN__MAX_MESSAGES`-style overrides.
const ENV_PREFIX: &str = "SENTINEL_";

/// Conventional provider variables and the config keys they map to.
const CONVENTIONAL_ENV: [(&str, &str); 7] = [
    ("OPENAI_API_KEY", "engine.openai_api_key"),
    ("AZURE_OPENAI_API_KEY", "engine.azure_api_key"),
    ("AZURE_OPENAI_ENDPOINT", "engine.azure_endpoint"),
    ("AZURE_OPENAI_API_VERSION", "engine.azure_api_version"),
    ("AZURE_OPENAI_DEPLOYMENT", "engine.azure_deployment"),
    ("MODEL_NAME", "engine.model"),
    ("TEMPERATURE", "engine.temperature"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `SENTINEL_*` (with `__` nesting), then `OPENAI_API_KEY`,
    ///    `AZURE_OPENAI_*`, `MODEL_NAME`, `TEMPERATURE`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./sentinel.toml` or `./.sentinel.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/sentinel/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::files(config_path)
            .merge(Self::conventional_env())
            .merge(Self::prefixed_env())
            .extract()
            .map_err(Box::new)
    }

    /// Load only defaults and the environment (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Self::conventional_env())
            .merge(Self::prefixed_env())
            .extract()
            .map_err(Box::new)
    }

    /// Defaults merged with every config file that exists.
    pub fn files(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    fn prefixed_env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    fn conventional_env() -> Env {
        Env::raw()
            .filter_map(|key| {
                CONVENTIONAL_ENV
                    .iter()
                    .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                    .map(|(_, target)| (*target).into())
            })
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/sentinel/config.toml` (or the platform
    /// equivalent).
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sentinel").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}* and provider variables", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./sentinel.toml or ./.sentinel.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
