//! Configuration file loading, discovery and environment overlay.

use super::defaults::env;
use super::types::AppConfig;
use super::validation::ConfigError;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Toolbox-wide config file, relative to the working directory.
const TOOLBOX_CONFIG: &str = "config/config.yml";

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".ntl-systoolbox.yaml",
    ".ntl-systoolbox.yml",
    "ntl-systoolbox.yaml",
    "ntl-systoolbox.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. `./config/config.yml`
/// 3. Current directory
/// 4. User config directory (~/.config/ntl-systoolbox/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Config file {} not found, searching defaults", path.display());
    }

    if let Ok(cwd) = std::env::current_dir() {
        // 2. Toolbox config shared with the other modules
        let toolbox = cwd.join(TOOLBOX_CONFIG);
        if toolbox.exists() {
            return Some(toolbox);
        }

        // 3. Search current directory
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    // 4. Search user config directory
    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("ntl-systoolbox")) {
            return Some(path);
        }
    }

    // 5. Search home directory
    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Default location written by `config init`.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ntl-systoolbox")
        .join("ntl-systoolbox.yaml")
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
///
/// An empty file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// File layer of the configuration and where it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Defaults, or the discovered file's contents
    pub config: AppConfig,
    /// File the settings were read from, if any
    pub loaded_from: Option<PathBuf>,
    /// Why a discovered file was ignored
    pub load_warning: Option<String>,
}

/// Load config from the discovered file, or fall back to the defaults.
///
/// Nothing is logged here: the log level itself comes from the result, so
/// the caller reports `load_warning` once logging is set up.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> LoadedConfig {
    let Some(path) = discover_config_file(explicit_path) else {
        return LoadedConfig::default();
    };
    match load_config_file(&path) {
        Ok(config) => LoadedConfig {
            config,
            loaded_from: Some(path),
            load_warning: None,
        },
        Err(e) => LoadedConfig {
            load_warning: Some(format!(
                "Failed to load config from {}: {e}; using defaults",
                path.display()
            )),
            ..LoadedConfig::default()
        },
    }
}

// ============================================================================
// Environment Overlay
// ============================================================================

impl AppConfig {
    /// Overlay settings from the process environment.
    pub fn apply_env(&mut self) -> Vec<ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay settings from `lookup`. Empty values are ignored; numbers
    /// that do not parse are reported and leave the setting untouched.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Vec<ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut errors = Vec::new();

        if let Some(path) = get(env::REPORTS_PATH) {
            self.reports.path = PathBuf::from(path);
        }
        if let Some(api) = get(env::EOL_API_URL) {
            self.audit.eol_api = api;
        }
        if let Some(value) = get(env::EOL_API_TIMEOUT) {
            match value.trim().parse() {
                Ok(secs) => self.audit.timeout_secs = secs,
                Err(_) => errors.push(ConfigError::new(
                    env::EOL_API_TIMEOUT,
                    format!("'{value}' is not a number of seconds"),
                )),
            }
        }
        if let Some(value) = get(env::EOL_CACHE_HOURS) {
            match value.trim().parse() {
                Ok(hours) => self.audit.cache_ttl_hours = hours,
                Err(_) => errors.push(ConfigError::new(
                    env::EOL_CACHE_HOURS,
                    format!("'{value}' is not a number of hours"),
                )),
            }
        }
        if let Some(level) = get(env::LOG_LEVEL) {
            self.logging.level = level;
        }

        errors
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# NTL-SysToolbox Configuration File
# ==================================
#
# Searched, in order:
#   - the path given with --config
#   - ./config/config.yml
#   - .ntl-systoolbox.yaml or ntl-systoolbox.yaml in the working directory
#   - ~/.config/ntl-systoolbox/ntl-systoolbox.yaml
#
# Environment variables override this file, command-line flags override both.

# Report output
reports:
  # Directory for JSON and HTML reports (env: REPORTS_PATH)
  path: ./reports

# End-of-life audit
audit:
  # Lifecycle catalog base URL (env: EOL_API_URL)
  eol_api: https://endoflife.date/api
  # Per-request timeout in seconds, 1 to 10 (env: EOL_API_TIMEOUT)
  timeout_secs: 10
  # Catalog cache lifetime in hours, 0 disables (env: EOL_CACHE_HOURS)
  cache_ttl_hours: 24
  # Cache directory, defaults to the user cache directory
  # cache_dir: /var/cache/ntl-systoolbox
  # Look up distinct products in parallel
  parallel: true

# Logging (env: NTL_LOG_LEVEL, RUST_LOG takes precedence)
logging:
  # trace, debug, info, warn, error
  level: info

# Console output
output:
  # Disable colored output (NO_COLOR is honored as well)
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".ntl-systoolbox.yaml");
        std::fs::write(&config_path, "reports:\n  path: /srv/reports\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yml");

        let yaml = r"
reports:
  path: /srv/reports
audit:
  eol_api: http://mirror.local/api
  timeout_secs: 5
mysql:
  host: 192.168.10.21
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.reports.path, PathBuf::from("/srv/reports"));
        assert_eq!(config.audit.eol_api, "http://mirror.local/api");
        assert_eq!(config.audit.timeout_secs, 5);
        assert_eq!(config.audit.cache_ttl_hours, 24);
    }

    #[test]
    fn test_load_empty_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yml");
        std::fs::write(&config_path, "audit: [unclosed").unwrap();

        let loaded = load_or_default(Some(config_path.as_path()));
        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.loaded_from.is_none());
        let warning = loaded.load_warning.unwrap();
        assert!(warning.contains("broken.yml"), "{warning}");
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom.yaml");
        std::fs::write(&config_path, "logging:\n  level: debug\n").unwrap();

        assert_eq!(discover_config_file(Some(config_path.as_path())), Some(config_path));
    }

    #[test]
    fn test_env_overlay() {
        let vars: HashMap<&str, &str> = [
            ("REPORTS_PATH", "/var/reports"),
            ("EOL_API_URL", "http://127.0.0.1:8080/api"),
            ("EOL_API_TIMEOUT", "3"),
            ("EOL_CACHE_HOURS", "0"),
            ("NTL_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        let errors = config.apply_env_with(|k| vars.get(k).map(|v| (*v).to_string()));
        assert!(errors.is_empty());
        assert_eq!(config.reports.path, PathBuf::from("/var/reports"));
        assert_eq!(config.audit.eol_api, "http://127.0.0.1:8080/api");
        assert_eq!(config.audit.timeout_secs, 3);
        assert_eq!(config.audit.cache_ttl_hours, 0);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_overlay_reports_bad_numbers() {
        let mut config = AppConfig::default();
        let errors = config.apply_env_with(|k| (k == "EOL_API_TIMEOUT").then(|| "ten".to_string()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "EOL_API_TIMEOUT");
        assert_eq!(config.audit.timeout_secs, 10);
    }

    #[test]
    fn test_env_overlay_ignores_empty_values() {
        let mut config = AppConfig::default();
        let errors = config.apply_env_with(|_| Some(String::new()));
        assert!(errors.is_empty());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_full_example_parses_to_defaults() {
        let config: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
