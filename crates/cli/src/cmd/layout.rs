//! Implementation of the `blayout layout` command.

use std::path::Path;

use anyhow::{Context, Result};

use buildlayout_lib::BuildLayoutResolver;

use super::{LayoutArgs, effective_config};
use crate::output::{OutputFormat, print_json, print_stat};

/// Print the directories a build configuration uses under `root`.
///
/// Only computes paths; nothing is created.
pub fn cmd_layout(config: Option<&Path>, root: &Path, args: &LayoutArgs, output: OutputFormat) -> Result<()> {
  let loaded = effective_config(config, args.prefix.as_deref(), args.policy.as_deref())?;
  let resolver = BuildLayoutResolver::new(loaded.config);

  let layout = resolver
    .layout(root, &args.settings())
    .context("Failed to resolve build layout")?;

  if output.is_json() {
    print_json(&layout)?;
  } else {
    print_stat("Build", &layout.build_dir.display().to_string());
    print_stat("Generators", &layout.generators_dir.display().to_string());
  }

  Ok(())
}
