mod info;
mod layout;
mod modes;
mod resolve;

pub use info::cmd_info;
pub use layout::cmd_layout;
pub use modes::cmd_modes;
pub use resolve::cmd_resolve;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use buildlayout_lib::{BuildSettings, LayoutPolicy, LoadedConfig, load_config};

/// Flags shared by commands that resolve a single build folder.
#[derive(Args, Debug, Default)]
pub struct LayoutArgs {
  /// Base prefix for build folders (default: _build)
  #[arg(long)]
  pub prefix: Option<String>,

  /// Sanitizer the build uses: none, address, thread, memory, undefinedbehavior
  #[arg(short, long)]
  pub sanitizer: Option<String>,

  /// Layout policy: fixed or sanitizer-aware
  #[arg(long)]
  pub policy: Option<String>,
}

impl LayoutArgs {
  pub fn settings(&self) -> BuildSettings {
    BuildSettings {
      sanitizer: self.sanitizer.clone(),
    }
  }
}

/// Load the config and apply command-line overrides on top.
pub fn effective_config(config: Option<&Path>, prefix: Option<&str>, policy: Option<&str>) -> Result<LoadedConfig> {
  let mut loaded = load_config(config).context("Failed to load configuration")?;

  if let Some(prefix) = prefix {
    loaded.config.base_prefix = prefix.to_string();
  }
  if let Some(policy) = policy {
    loaded.config.policy = policy.parse::<LayoutPolicy>().context("Invalid --policy")?;
  }

  debug!(
    source = ?loaded.path,
    prefix = %loaded.config.base_prefix,
    policy = %loaded.config.policy,
    "effective layout config"
  );

  Ok(loaded)
}
