use std::path::Path;

use anyhow::Result;

use buildlayout_lib::config::{ENV_BASE_PREFIX, ENV_POLICY};

use super::effective_config;
use crate::output::{print_info, print_stat};

pub fn cmd_info(config: Option<&Path>) -> Result<()> {
  let loaded = effective_config(config, None, None)?;

  print_info(&format!("blayout v{}", env!("CARGO_PKG_VERSION")));
  println!();
  match &loaded.path {
    Some(path) => print_stat("Config", &path.display().to_string()),
    None => print_stat("Config", "(defaults)"),
  }
  print_stat("Prefix", &loaded.config.base_prefix);
  print_stat("Policy", loaded.config.policy.as_str());

  for var in [ENV_BASE_PREFIX, ENV_POLICY] {
    if let Ok(value) = std::env::var(var) {
      print_stat(var, &value);
    }
  }

  Ok(())
}
