//! Build folder resolution.
//!
//! Maps a sanitizer selection and a base prefix to the folder that isolates
//! the artifacts of one build configuration. Nothing here touches the
//! filesystem; callers create the directories.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LayoutConfig, LayoutPolicy};
use crate::error::ConfigurationError;
use crate::sanitizer::SanitizerMode;

/// Name of the directory, inside the build folder, that receives generated
/// toolchain and dependency files.
pub const GENERATORS_DIR: &str = "generators";

/// Compute the build folder name for `sanitizer`.
///
/// Returns `base_prefix` followed by the sanitizer's suffix, e.g.
/// `resolve("_build", SanitizerMode::Address)` is `"_build_asan"`.
///
/// # Errors
///
/// Returns [`ConfigurationError::EmptyPrefix`] if `base_prefix` is empty or
/// only whitespace, and [`ConfigurationError::InvalidPrefix`] if it has
/// leading or trailing whitespace.
pub fn resolve(base_prefix: &str, sanitizer: SanitizerMode) -> Result<String, ConfigurationError> {
  let trimmed = base_prefix.trim();
  if trimmed.is_empty() {
    return Err(ConfigurationError::EmptyPrefix);
  }
  if trimmed.len() != base_prefix.len() {
    return Err(ConfigurationError::InvalidPrefix {
      value: base_prefix.to_string(),
    });
  }

  let folder = format!("{}{}", base_prefix, sanitizer.suffix());
  debug!(prefix = base_prefix, sanitizer = %sanitizer, folder = %folder, "resolved build folder");
  Ok(folder)
}

/// Like [`resolve`], but takes the sanitizer as a raw string-typed setting.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnrecognizedSanitizer`] if `raw` names no
/// known mode. No folder name is produced in that case.
pub fn resolve_setting(base_prefix: &str, raw: Option<&str>) -> Result<String, ConfigurationError> {
  let sanitizer = SanitizerMode::from_setting(raw)?;
  resolve(base_prefix, sanitizer)
}

/// Build settings handed over by the invoking orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSettings {
  /// Sanitizer setting as the orchestrator spells it. `None` means no sanitizer.
  #[serde(default)]
  pub sanitizer: Option<String>,
}

impl BuildSettings {
  pub fn with_sanitizer(sanitizer: impl Into<String>) -> Self {
    Self {
      sanitizer: Some(sanitizer.into()),
    }
  }
}

/// Resolves build folder names under a configured [`LayoutPolicy`].
#[derive(Debug, Clone, Default)]
pub struct BuildLayoutResolver {
  config: LayoutConfig,
}

impl BuildLayoutResolver {
  pub fn new(config: LayoutConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &LayoutConfig {
    &self.config
  }

  /// Resolve the folder name for `settings`.
  ///
  /// The sanitizer setting is validated under both policies, so a typo is
  /// reported even when the fixed policy would ignore it.
  pub fn resolve(&self, settings: &BuildSettings) -> Result<String, ConfigurationError> {
    let sanitizer = SanitizerMode::from_setting(settings.sanitizer.as_deref())?;
    self.resolve_mode(sanitizer)
  }

  /// Resolve the folder name for an already parsed sanitizer mode.
  pub fn resolve_mode(&self, sanitizer: SanitizerMode) -> Result<String, ConfigurationError> {
    match self.config.policy {
      LayoutPolicy::Fixed => resolve(&self.config.base_prefix, SanitizerMode::None),
      LayoutPolicy::SanitizerAware => resolve(&self.config.base_prefix, sanitizer),
    }
  }

  /// Resolve the full folder set for `settings` under `root`.
  pub fn layout(&self, root: &Path, settings: &BuildSettings) -> Result<BuildLayout, ConfigurationError> {
    let folder = self.resolve(settings)?;
    Ok(BuildLayout::new(root, &folder))
  }
}

/// Concrete directories for one build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildLayout {
  /// Root the build folder is placed under
  pub root: PathBuf,
  /// `<root>/<folder>`
  pub build_dir: PathBuf,
  /// `<root>/<folder>/generators`
  pub generators_dir: PathBuf,
}

impl BuildLayout {
  pub fn new(root: &Path, folder: &str) -> Self {
    let build_dir = root.join(folder);
    let generators_dir = build_dir.join(GENERATORS_DIR);
    Self {
      root: root.to_path_buf(),
      build_dir,
      generators_dir,
    }
  }
}
