//! Compiler sanitizer modes and their build folder suffixes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigurationError;

/// Runtime instrumentation mode a build is compiled with.
///
/// Binaries built under different sanitizers are not interchangeable, so
/// each mode gets its own build folder suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizerMode {
  #[default]
  None,
  Address,
  Thread,
  Memory,
  UndefinedBehavior,
}

impl SanitizerMode {
  /// Every mode, in table order.
  pub const ALL: [SanitizerMode; 5] = [
    Self::None,
    Self::Address,
    Self::Thread,
    Self::Memory,
    Self::UndefinedBehavior,
  ];

  /// Suffix appended to the base prefix for this mode.
  pub fn suffix(self) -> &'static str {
    match self {
      Self::None => "",
      Self::Address => "_asan",
      Self::Thread => "_tsan",
      Self::Memory => "_msan",
      Self::UndefinedBehavior => "_ubsan",
    }
  }

  /// Returns the canonical lowercase name for this mode
  pub fn as_str(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Address => "address",
      Self::Thread => "thread",
      Self::Memory => "memory",
      Self::UndefinedBehavior => "undefinedbehavior",
    }
  }

  /// Parse an optional string-typed setting. An absent setting means no sanitizer.
  pub fn from_setting(raw: Option<&str>) -> Result<Self, ConfigurationError> {
    raw.map_or(Ok(Self::None), str::parse)
  }
}

impl FromStr for SanitizerMode {
  type Err = ConfigurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "" | "none" | "off" => Ok(Self::None),
      "address" | "asan" => Ok(Self::Address),
      "thread" | "tsan" => Ok(Self::Thread),
      "memory" | "msan" => Ok(Self::Memory),
      "undefinedbehavior" | "undefined" | "undefined-behavior" | "undefined_behavior" | "ubsan" => {
        Ok(Self::UndefinedBehavior)
      }
      _ => Err(ConfigurationError::UnrecognizedSanitizer { value: s.to_string() }),
    }
  }
}

impl fmt::Display for SanitizerMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn suffix_table() {
    assert_eq!(SanitizerMode::None.suffix(), "");
    assert_eq!(SanitizerMode::Address.suffix(), "_asan");
    assert_eq!(SanitizerMode::Thread.suffix(), "_tsan");
    assert_eq!(SanitizerMode::Memory.suffix(), "_msan");
    assert_eq!(SanitizerMode::UndefinedBehavior.suffix(), "_ubsan");
  }

  #[test]
  fn suffixes_are_distinct() {
    let suffixes: HashSet<_> = SanitizerMode::ALL.iter().map(|m| m.suffix()).collect();
    assert_eq!(suffixes.len(), SanitizerMode::ALL.len());
  }

  #[test]
  fn parses_canonical_names_and_aliases() {
    assert_eq!("Address".parse::<SanitizerMode>().unwrap(), SanitizerMode::Address);
    assert_eq!("tsan".parse::<SanitizerMode>().unwrap(), SanitizerMode::Thread);
    assert_eq!(" MEMORY ".parse::<SanitizerMode>().unwrap(), SanitizerMode::Memory);
    assert_eq!(
      "UndefinedBehavior".parse::<SanitizerMode>().unwrap(),
      SanitizerMode::UndefinedBehavior
    );
    assert_eq!("ubsan".parse::<SanitizerMode>().unwrap(), SanitizerMode::UndefinedBehavior);
    assert_eq!("".parse::<SanitizerMode>().unwrap(), SanitizerMode::None);
  }

  #[test]
  fn canonical_name_round_trips() {
    for mode in SanitizerMode::ALL {
      assert_eq!(mode.as_str().parse::<SanitizerMode>().unwrap(), mode);
    }
  }

  #[test]
  fn unknown_mode_is_rejected() {
    let err = "hwaddress".parse::<SanitizerMode>().unwrap_err();
    assert!(matches!(
      err,
      ConfigurationError::UnrecognizedSanitizer { ref value } if value == "hwaddress"
    ));
  }

  #[test]
  fn absent_setting_means_none() {
    assert_eq!(SanitizerMode::from_setting(None).unwrap(), SanitizerMode::None);
    assert_eq!(
      SanitizerMode::from_setting(Some("address")).unwrap(),
      SanitizerMode::Address
    );
  }
}
