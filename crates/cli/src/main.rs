mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{LayoutArgs, cmd_info, cmd_layout, cmd_modes, cmd_resolve};
use output::OutputFormat;

/// blayout - Build folder resolution for sanitizer-isolated builds
#[derive(Parser)]
#[command(name = "blayout")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose (debug) logging on stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to a config file (default: ./buildlayout.toml, then the user config dir)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the build folder name for a sanitizer
  Resolve {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Print the build and generators directories under a source root
  Layout {
    /// Source root the build folder is placed under
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// List every sanitizer mode with its suffix and build folder
  Modes {
    /// Base prefix for build folders
    #[arg(long)]
    prefix: Option<String>,

    /// Layout policy: fixed or sanitizer-aware
    #[arg(long)]
    policy: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the effective configuration
  Info,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let config = cli.config.as_deref();

  match cli.command {
    Commands::Resolve { layout, output } => cmd_resolve(config, &layout, output),
    Commands::Layout { root, layout, output } => cmd_layout(config, &root, &layout, output),
    Commands::Modes { prefix, policy, output } => cmd_modes(config, prefix, policy, output),
    Commands::Info => cmd_info(config),
  }
}
