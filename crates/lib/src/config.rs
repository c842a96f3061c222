//! Resolver configuration.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `BUILDLAYOUT_*` environment variables. Command-line flags are applied
//! on top by the caller.
//!
//! ```toml
//! [layout]
//! base_prefix = "_build"
//! policy = "sanitizer-aware"
//! ```

use std::env::VarError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigurationError;
use crate::paths::{LOCAL_CONFIG_FILENAME, user_config_path};

/// Default base prefix for build folders.
pub const DEFAULT_BASE_PREFIX: &str = "_build";

/// Environment variable overriding the base prefix.
pub const ENV_BASE_PREFIX: &str = "BUILDLAYOUT_BASE_PREFIX";

/// Environment variable overriding the layout policy.
pub const ENV_POLICY: &str = "BUILDLAYOUT_POLICY";

/// How the build folder name is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPolicy {
  /// Always use the base prefix, regardless of sanitizer.
  Fixed,
  /// Append the sanitizer suffix to the base prefix.
  #[default]
  SanitizerAware,
}

impl LayoutPolicy {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Fixed => "fixed",
      Self::SanitizerAware => "sanitizer-aware",
    }
  }
}

impl FromStr for LayoutPolicy {
  type Err = ConfigurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "fixed" => Ok(Self::Fixed),
      "sanitizer-aware" | "sanitizer_aware" | "sanitizer" => Ok(Self::SanitizerAware),
      _ => Err(ConfigurationError::UnknownPolicy { value: s.to_string() }),
    }
  }
}

impl fmt::Display for LayoutPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Settings for a [`BuildLayoutResolver`](crate::layout::BuildLayoutResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutConfig {
  /// Prefix every build folder name starts with
  pub base_prefix: String,
  /// Whether the sanitizer selects a suffix
  pub policy: LayoutPolicy,
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      base_prefix: DEFAULT_BASE_PREFIX.to_string(),
      policy: LayoutPolicy::default(),
    }
  }
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  #[serde(default)]
  layout: LayoutSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutSection {
  base_prefix: Option<String>,
  policy: Option<String>,
}

impl LayoutConfig {
  /// Parse a config from TOML text, filling missing keys with defaults.
  ///
  /// `path` is only used for error reporting.
  pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigurationError> {
    let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigurationError::ParseConfig {
      path: path.to_path_buf(),
      source,
    })?;

    let mut config = Self::default();
    if let Some(prefix) = file.layout.base_prefix {
      config.base_prefix = prefix;
    }
    if let Some(policy) = file.layout.policy {
      config.policy = policy.parse()?;
    }
    Ok(config)
  }

  /// Read and parse a config file.
  pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigurationError::ReadConfig {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from_toml(&content, path)?;
    info!(path = %path.display(), policy = %config.policy, "loaded layout config");
    Ok(config)
  }

  /// Apply `BUILDLAYOUT_BASE_PREFIX` and `BUILDLAYOUT_POLICY` if set.
  pub fn apply_env(&mut self) -> Result<(), ConfigurationError> {
    if let Some(prefix) = env_override(ENV_BASE_PREFIX)? {
      debug!(prefix = %prefix, "base prefix overridden from environment");
      self.base_prefix = prefix;
    }
    if let Some(policy) = env_override(ENV_POLICY)? {
      self.policy = policy.parse()?;
      debug!(policy = %self.policy, "layout policy overridden from environment");
    }
    Ok(())
  }
}

/// Read an override variable. Unset means no override; a set but
/// non-unicode value is an error.
fn env_override(var: &'static str) -> Result<Option<String>, ConfigurationError> {
  match std::env::var(var) {
    Ok(value) => Ok(Some(value)),
    Err(VarError::NotPresent) => Ok(None),
    Err(VarError::NotUnicode(raw)) => Err(ConfigurationError::InvalidEnv {
      var,
      value: raw.to_string_lossy().into_owned(),
    }),
  }
}

/// Find the config file path, with fallback resolution.
///
/// Priority order:
/// 1. Explicit path if provided (must exist)
/// 2. `./buildlayout.toml` in the current directory
/// 3. `config.toml` in the user config directory
///
/// Returns `Ok(None)` when no file is found and no explicit path was given;
/// built-in defaults apply in that case.
pub fn find_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigurationError> {
  if let Some(path) = explicit {
    if path.exists() {
      return Ok(Some(path.to_path_buf()));
    }
    return Err(ConfigurationError::ConfigNotFound {
      path: path.to_path_buf(),
    });
  }

  let cwd_config = PathBuf::from(".").join(LOCAL_CONFIG_FILENAME);
  if cwd_config.exists() {
    return Ok(Some(cwd_config));
  }

  Ok(user_config_path().filter(|p| p.exists()))
}

/// A config together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
  pub config: LayoutConfig,
  /// `None` when built-in defaults were used
  pub path: Option<PathBuf>,
}

/// Discover, load, and apply environment overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigurationError> {
  let path = find_config_path(explicit)?;
  let mut config = match &path {
    Some(p) => LayoutConfig::load(p)?,
    None => {
      debug!("no config file found, using defaults");
      LayoutConfig::default()
    }
  };
  config.apply_env()?;
  Ok(LoadedConfig { config, path })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use tempfile::TempDir;

  #[test]
  fn defaults() {
    let config = LayoutConfig::default();
    assert_eq!(config.base_prefix, "_build");
    assert_eq!(config.policy, LayoutPolicy::SanitizerAware);
  }

  #[test]
  fn empty_file_uses_defaults() {
    let config = LayoutConfig::from_toml("", Path::new("empty.toml")).unwrap();
    assert_eq!(config, LayoutConfig::default());
  }

  #[test]
  fn parses_full_file() {
    let content = r#"
[layout]
base_prefix = "out"
policy = "fixed"
"#;
    let config = LayoutConfig::from_toml(content, Path::new("c.toml")).unwrap();
    assert_eq!(config.base_prefix, "out");
    assert_eq!(config.policy, LayoutPolicy::Fixed);
  }

  #[test]
  fn unknown_policy_is_rejected() {
    let content = "[layout]\npolicy = \"per-compiler\"\n";
    let err = LayoutConfig::from_toml(content, Path::new("c.toml")).unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownPolicy { ref value } if value == "per-compiler"));
  }

  #[test]
  fn unknown_key_is_a_parse_error() {
    let content = "[layout]\nbase = \"_build\"\n";
    let err = LayoutConfig::from_toml(content, Path::new("c.toml")).unwrap_err();
    assert!(matches!(err, ConfigurationError::ParseConfig { .. }));
  }

  #[test]
  fn load_reports_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.toml");
    let err = LayoutConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigurationError::ReadConfig { .. }));
  }

  #[test]
  fn explicit_missing_path_is_not_found() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.toml");
    let err = find_config_path(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigurationError::ConfigNotFound { .. }));
  }

  #[test]
  #[serial]
  fn env_overrides_file_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("buildlayout.toml");
    fs::write(&path, "[layout]\nbase_prefix = \"out\"\npolicy = \"fixed\"\n").unwrap();

    temp_env::with_vars(
      [(ENV_BASE_PREFIX, Some("build-ci")), (ENV_POLICY, Some("sanitizer-aware"))],
      || {
        let loaded = load_config(Some(path.as_path())).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config.base_prefix, "build-ci");
        assert_eq!(loaded.config.policy, LayoutPolicy::SanitizerAware);
      },
    );
  }

  #[test]
  #[serial]
  fn invalid_env_policy_fails() {
    temp_env::with_vars([(ENV_POLICY, Some("sometimes"))], || {
      let mut config = LayoutConfig::default();
      assert!(matches!(
        config.apply_env(),
        Err(ConfigurationError::UnknownPolicy { .. })
      ));
    });
  }

  #[test]
  #[serial]
  #[cfg(unix)]
  fn non_unicode_env_policy_fails() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let raw = OsStr::from_bytes(b"fix\xffed");
    temp_env::with_vars([(ENV_POLICY, Some(raw)), (ENV_BASE_PREFIX, None)], || {
      let mut config = LayoutConfig::default();
      assert!(matches!(
        config.apply_env(),
        Err(ConfigurationError::InvalidEnv { var, .. }) if var == ENV_POLICY
      ));
    });
  }

  #[test]
  #[serial]
  #[cfg(unix)]
  fn non_unicode_env_prefix_fails() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let raw = OsStr::from_bytes(b"_bu\xfeild");
    temp_env::with_vars([(ENV_BASE_PREFIX, Some(raw)), (ENV_POLICY, None)], || {
      let mut config = LayoutConfig::default();
      assert!(matches!(
        config.apply_env(),
        Err(ConfigurationError::InvalidEnv { var, .. }) if var == ENV_BASE_PREFIX
      ));
      assert_eq!(config.base_prefix, DEFAULT_BASE_PREFIX);
    });
  }

  #[test]
  #[serial]
  fn user_config_is_discovered() {
    let temp = TempDir::new().unwrap();
    let config_home = temp.path().join("xdg");
    let user_dir = config_home.join("buildlayout");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join("config.toml"), "[layout]\nbase_prefix = \"_user\"\n").unwrap();

    temp_env::with_vars(
      [
        ("XDG_CONFIG_HOME", Some(config_home.to_str().unwrap())),
        ("APPDATA", Some(config_home.to_str().unwrap())),
        (ENV_BASE_PREFIX, None),
        (ENV_POLICY, None),
      ],
      || {
        // The working directory of the test runner has no buildlayout.toml.
        let loaded = load_config(None).unwrap();
        assert_eq!(loaded.config.base_prefix, "_user");
        assert!(loaded.path.is_some());
      },
    );
  }
}
