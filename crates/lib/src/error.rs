use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or resolving a build layout.
///
/// None of these are transient. Callers abort the configuration step and
/// report the offending value instead of substituting a default.
#[derive(Debug, Error)]
pub enum ConfigurationError {
  /// The sanitizer setting is not one of the known modes.
  #[error("unrecognized sanitizer mode: '{value}' (expected one of: none, address, thread, memory, undefinedbehavior)")]
  UnrecognizedSanitizer { value: String },

  /// The base prefix is empty or whitespace.
  #[error("build folder prefix must not be empty")]
  EmptyPrefix,

  /// The base prefix has leading or trailing whitespace.
  #[error("build folder prefix must not start or end with whitespace: '{value}'")]
  InvalidPrefix { value: String },

  /// The layout policy is not one of the known policies.
  #[error("unknown layout policy: '{value}' (expected 'fixed' or 'sanitizer-aware')")]
  UnknownPolicy { value: String },

  /// An override variable is set but not valid unicode.
  #[error("environment variable {var} is not valid unicode: '{value}'")]
  InvalidEnv { var: &'static str, value: String },

  #[error("config file not found: {}", path.display())]
  ConfigNotFound { path: PathBuf },

  #[error("failed to read config file {}: {source}", path.display())]
  ReadConfig {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config file {}: {source}", path.display())]
  ParseConfig {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}
