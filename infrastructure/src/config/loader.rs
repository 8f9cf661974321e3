//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "grove";
const PROJECT_FILES: [&str; 2] = ["grove.toml", ".grove.toml"];
const ENV_PREFIX: &str = "GROVE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GROVE_*` environment variables (`__` separates nested keys)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./grove.toml` or `./.grove.toml`
    /// 4. Global: `<config dir>/grove/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Ok(Self::figment(config_path)?.extract()?)
    }

    fn figment(config_path: Option<&Path>) -> Result<Figment, ConfigError> {
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
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Variables: {ENV_PREFIX}* (e.g. GROVE_CHAT__TEMPERATURE)");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{mark}] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./grove.toml or ./.grove.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{mark}] Global:  {}", path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn isolate(jail: &mut Jail) {
        let dir = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", dir.display());
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.chat.temperature, 0.7);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.ends_with("grove/config.toml"));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("grove.toml", "[chat]\nhistory_length = 2\n")?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.chat.history_length, 2);
            assert_eq!(config.chat.temperature, 0.7);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("grove.toml", "[chat]\nhistory_length = 2\ntemperature = 0.5\n")?;
            jail.create_file("custom.toml", "[chat]\nhistory_length = 8\n")?;

            let config =
                ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.chat.history_length, 8);
            assert_eq!(config.chat.temperature, 0.5);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("grove.toml", "debug_mode = false\n[chat]\ntemperature = 0.5\n")?;
            jail.set_env("GROVE_CHAT__TEMPERATURE", "0.2");
            jail.set_env("GROVE_DEBUG_MODE", "true");
            jail.set_env("GROVE_PROVIDER__DEFAULT_ENDPOINT", "http://localhost:8080/v1");

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.chat.temperature, 0.2);
            assert!(config.debug_mode);
            assert_eq!(config.provider.default_endpoint, "http://localhost:8080/v1");
            Ok(())
        });
    }

    #[test]
    fn test_global_file_is_lowest_file_priority() {
        Jail::expect_with(|jail| {
            isolate(jail);
            std::fs::create_dir_all(jail.directory().join("xdg/grove"))
                .map_err(|e| e.to_string())?;
            jail.create_file("xdg/grove/config.toml", "[chat]\nmodel_id = 3\nhistory_length = 1\n")?;
            jail.create_file(".grove.toml", "[chat]\nhistory_length = 6\n")?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            if cfg!(target_os = "linux") {
                assert_eq!(config.chat.model_id, Some(3));
            }
            assert_eq!(config.chat.history_length, 6);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let result = ConfigLoader::load(Some(Path::new("nope.toml")));
            assert!(matches!(result, Err(ConfigError::MissingFile(_))));
            Ok(())
        });
    }

    #[test]
    fn test_type_mismatch_is_invalid() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("grove.toml", "[chat]\nhistory_length = \"many\"\n")?;
            let result = ConfigLoader::load(None);
            assert!(matches!(result, Err(ConfigError::Invalid(_))));
            Ok(())
        });
    }
}
