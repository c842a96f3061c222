//! Implementation of the `blayout resolve` command.
//!
//! Prints the build folder name for the given sanitizer. Text output is the
//! bare name so build scripts can capture it directly.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use buildlayout_lib::{BuildLayoutResolver, LayoutPolicy, SanitizerMode};

use super::{LayoutArgs, effective_config};
use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
struct ResolveOutput<'a> {
  folder: &'a str,
  prefix: &'a str,
  sanitizer: SanitizerMode,
  policy: LayoutPolicy,
}

pub fn cmd_resolve(config: Option<&Path>, args: &LayoutArgs, output: OutputFormat) -> Result<()> {
  let loaded = effective_config(config, args.prefix.as_deref(), args.policy.as_deref())?;
  let settings = args.settings();

  // Parsed separately so JSON output can report the mode.
  let sanitizer =
    SanitizerMode::from_setting(settings.sanitizer.as_deref()).context("Failed to resolve build folder")?;
  let resolver = BuildLayoutResolver::new(loaded.config);
  let folder = resolver
    .resolve_mode(sanitizer)
    .context("Failed to resolve build folder")?;

  if output.is_json() {
    print_json(&ResolveOutput {
      folder: &folder,
      prefix: &resolver.config().base_prefix,
      sanitizer,
      policy: resolver.config().policy,
    })?;
  } else {
    println!("{}", folder);
  }

  Ok(())
}
