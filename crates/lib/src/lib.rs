//! buildlayout-lib: build folder resolution for native builds
//!
//! This crate decides where the artifacts of one build configuration live:
//! - `SanitizerMode`: the compiler sanitizer a build is instrumented with
//! - `resolve`: base prefix + sanitizer suffix, e.g. `_build_asan`
//! - `BuildLayoutResolver`: applies a fixed or sanitizer-aware `LayoutPolicy`
//! - `LayoutConfig`: resolver settings loaded from TOML and the environment

pub mod config;
pub mod error;
pub mod layout;
pub mod paths;
pub mod sanitizer;

pub use config::{LayoutConfig, LayoutPolicy, LoadedConfig, load_config};
pub use error::ConfigurationError;
pub use layout::{BuildLayout, BuildLayoutResolver, BuildSettings, resolve, resolve_setting};
pub use sanitizer::SanitizerMode;
