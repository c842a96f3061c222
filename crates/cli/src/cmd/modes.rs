//! Implementation of the `blayout modes` command.
//!
//! Lists the sanitizer suffix table together with the folder each mode
//! resolves to under the effective configuration.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use buildlayout_lib::{BuildLayoutResolver, SanitizerMode};

use super::effective_config;
use crate::output::{OutputFormat, display_suffix, print_json, symbols};

#[derive(Serialize)]
struct ModeRow {
  mode: SanitizerMode,
  suffix: &'static str,
  folder: String,
}

pub fn cmd_modes(
  config: Option<&Path>,
  prefix: Option<String>,
  policy: Option<String>,
  output: OutputFormat,
) -> Result<()> {
  let loaded = effective_config(config, prefix.as_deref(), policy.as_deref())?;
  let resolver = BuildLayoutResolver::new(loaded.config);

  let rows = SanitizerMode::ALL
    .iter()
    .map(|&mode| -> Result<ModeRow> {
      let folder = resolver
        .resolve_mode(mode)
        .with_context(|| format!("Failed to resolve build folder for {}", mode))?;
      Ok(ModeRow {
        mode,
        suffix: mode.suffix(),
        folder,
      })
    })
    .collect::<Result<Vec<_>>>()?;

  if output.is_json() {
    print_json(&rows)?;
    return Ok(());
  }

  println!("Policy: {}", resolver.config().policy);
  for row in &rows {
    println!(
      "  {:<18} {:<8} {} {}",
      row.mode.as_str().if_supports_color(Stream::Stdout, |s| s.cyan()),
      display_suffix(row.suffix).if_supports_color(Stream::Stdout, |s| s.dimmed()),
      symbols::ARROW,
      row.folder
    );
  }

  Ok(())
}
