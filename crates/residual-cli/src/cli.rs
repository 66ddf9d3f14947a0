use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use residual_types::DocumentFormat;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(
    name = "residual",
    about = "Show which parts of a declared configuration are missing from live state",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format [default: text, or the config file's `format`]
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// TOML config file
    #[arg(long, global = true, env = "RESIDUAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl From<InputFormat> for DocumentFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => DocumentFormat::Json,
            InputFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the part of DESIRED that OBSERVED does not satisfy
    Diff(DiffArgs),
    /// Exit 0 if OBSERVED satisfies DESIRED, 1 otherwise
    Check(CheckArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Declared configuration (JSON or YAML file, `-` for stdin)
    pub desired: PathBuf,
    /// Live state (JSON or YAML file, `-` for stdin)
    pub observed: PathBuf,
    #[arg(long)]
    pub desired_format: Option<InputFormat>,
    #[arg(long)]
    pub observed_format: Option<InputFormat>,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
    /// Exit with status 1 when the residual is not empty
    #[arg(long)]
    pub exit_code: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
    #[arg(short, long)]
    pub quiet: bool,
}
