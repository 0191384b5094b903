//! Configuration management.

use crate::{ConfigResult, Paths};
use alibuild_ops::AliBuild;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback executable name, looked up on `PATH` by the shell.
pub const DEFAULT_EXECUTABLE: &str = "aliBuild";

/// Default package: the O2 framework.
pub const DEFAULT_PACKAGE: &str = "O2";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const EXECUTABLE_ENV: &str = "ALIBUILD_PATH";
const LOG_LEVEL_ENV: &str = "ALIBUILD_OPS_LOG_LEVEL";
const PACKAGE_ENV: &str = "ALIBUILD_OPS_PACKAGE";

const WELL_KNOWN_EXECUTABLES: [&str; 3] = [
    "/usr/local/bin/aliBuild",
    "/usr/bin/aliBuild",
    "/opt/homebrew/bin/aliBuild",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Explicit aliBuild executable. Resolved at use time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(default = "default_package")]
    pub package: String,
    /// Ordered `KEY=VALUE` assignments for build and doctor.
    #[serde(default)]
    pub default_env: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_package() -> String {
    DEFAULT_PACKAGE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable: None,
            package: default_package(),
            default_env: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load from the config file when present, then apply environment overrides.
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_overrides(
            std::env::var(LOG_LEVEL_ENV).ok(),
            std::env::var(PACKAGE_ENV).ok(),
        );

        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, paths: &Paths) -> ConfigResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    fn apply_overrides(&mut self, log_level: Option<String>, package: Option<String>) {
        if let Some(log_level) = log_level.and_then(non_empty) {
            self.log_level = log_level;
        }
        if let Some(package) = package.and_then(non_empty) {
            self.package = package;
        }
    }

    /// The executable this config resolves to.
    pub fn executable(&self) -> String {
        resolve_executable(self.executable.as_deref())
    }

    /// Build a handle from this configuration.
    pub fn handle(&self) -> AliBuild {
        AliBuild::new(
            self.executable(),
            self.package.clone(),
            self.default_env.clone(),
        )
    }
}

/// Pick the aliBuild executable.
///
/// Order: non-blank `configured`, then `ALIBUILD_PATH`, then the first
/// existing well-known install location, then a bare `aliBuild`.
pub fn resolve_executable(configured: Option<&str>) -> String {
    resolve_executable_from(
        configured,
        std::env::var(EXECUTABLE_ENV).ok(),
        &WELL_KNOWN_EXECUTABLES,
    )
}

fn resolve_executable_from(
    configured: Option<&str>,
    from_env: Option<String>,
    candidates: &[&str],
) -> String {
    if let Some(path) = configured.map(str::to_string).and_then(non_empty) {
        return path;
    }

    if let Some(path) = from_env.and_then(non_empty) {
        return path;
    }

    candidates
        .iter()
        .copied()
        .find(|candidate| Path::new(candidate).exists())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string())
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.executable, None);
        assert_eq!(config.package, DEFAULT_PACKAGE);
        assert!(config.default_env.is_empty());
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        let config_json = r#"{
            "executable": "/opt/alice/bin/aliBuild",
            "package": "AliPhysics",
            "default_env": ["GITHUB_USER=", "ALIBUILD_WORK_DIR=sw"]
        }"#;
        std::fs::write(&config_path, config_json).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.executable.as_deref(), Some("/opt/alice/bin/aliBuild"));
        assert_eq!(config.package, "AliPhysics");
        assert_eq!(config.default_env, vec!["GITHUB_USER=", "ALIBUILD_WORK_DIR=sw"]);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_config_load_from_invalid_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, "{ not json").unwrap();

        let err = Config::load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, crate::ConfigError::Json(_)));
    }

    #[test]
    fn test_config_save_and_reload() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("nested"));

        let config = Config {
            executable: Some("alibuild".to_string()),
            package: "O2Physics".to_string(),
            default_env: vec!["A=1".to_string(), "B=2".to_string()],
            log_level: "debug".to_string(),
        };
        config.save(&paths).unwrap();

        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let mut config = Config::default();
        config.apply_overrides(Some("  ".to_string()), None);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.package, DEFAULT_PACKAGE);

        config.apply_overrides(Some("trace".to_string()), Some(" AliRoot ".to_string()));
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.package, "AliRoot");
    }

    #[test]
    fn configured_executable_wins() {
        let resolved = resolve_executable_from(
            Some("/custom/aliBuild"),
            Some("/env/aliBuild".to_string()),
            &[],
        );
        assert_eq!(resolved, "/custom/aliBuild");
    }

    #[test]
    fn env_executable_used_when_not_configured() {
        let resolved =
            resolve_executable_from(Some("   "), Some("/env/aliBuild".to_string()), &[]);
        assert_eq!(resolved, "/env/aliBuild");
    }

    #[test]
    fn first_existing_candidate_is_used() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("aliBuild");
        std::fs::write(&present, "").unwrap();
        let present = present.to_string_lossy().to_string();

        let resolved = resolve_executable_from(
            None,
            None,
            &["/nonexistent/alibuild-ops/aliBuild", present.as_str()],
        );
        assert_eq!(resolved, present);
    }

    #[test]
    fn falls_back_to_bare_name() {
        let resolved = resolve_executable_from(None, None, &["/nonexistent/aliBuild"]);
        assert_eq!(resolved, DEFAULT_EXECUTABLE);
    }

    #[test]
    fn handle_reflects_config() {
        let config = Config {
            executable: Some("alibuild".to_string()),
            package: "O2".to_string(),
            default_env: vec!["GITHUB_USER=".to_string()],
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        };
        let handle = config.handle();
        assert_eq!(handle.which(), "alibuild");
        assert_eq!(handle.package(), "O2");
        assert_eq!(handle.default_env().to_vec(), vec!["GITHUB_USER=".to_string()]);
    }
}
