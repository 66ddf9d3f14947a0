use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use residual_diff::{diff_documents, DiffError, Residual};
use residual_types::DocumentFormat;

use crate::cli::*;
use crate::config::CliConfig;
use crate::report;

/// Exit status when the residual is not empty and the command reports drift.
pub const EXIT_DRIFT: u8 = 1;
/// Exit status for unreadable or malformed input.
pub const EXIT_ERROR: u8 = 2;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref())?;
    if cli.no_color || !config.color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    let format = cli.format.unwrap_or(config.format);

    match cli.command {
        Command::Diff(args) => cmd_diff(args, format, &config),
        Command::Check(args) => cmd_check(args),
    }
}

fn cmd_diff(args: DiffArgs, format: OutputFormat, config: &CliConfig) -> anyhow::Result<ExitCode> {
    let residual = compute_residual(&args.inputs)?;
    print!("{}", report::render(&residual, format)?);

    let fail_on_drift = args.exit_code || config.fail_on_drift;
    Ok(ExitCode::from(exit_status(&residual, fail_on_drift)))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let residual = compute_residual(&args.inputs)?;
    if !args.quiet {
        println!("{}", report::verdict(&residual));
    }
    Ok(ExitCode::from(exit_status(&residual, true)))
}

fn exit_status(residual: &Residual, fail_on_drift: bool) -> u8 {
    if fail_on_drift && !residual.is_satisfied() {
        EXIT_DRIFT
    } else {
        0
    }
}

fn compute_residual(inputs: &InputArgs) -> anyhow::Result<Residual> {
    if is_stdin(&inputs.desired) && is_stdin(&inputs.observed) {
        bail!("only one of DESIRED and OBSERVED can be read from stdin");
    }

    let desired = read_input(&inputs.desired)?;
    let observed = read_input(&inputs.observed)?;
    let desired_format = input_format(&inputs.desired, inputs.desired_format);
    let observed_format = input_format(&inputs.observed, inputs.observed_format);
    tracing::debug!(?desired_format, ?observed_format, "input formats");

    diff_documents(&desired, desired_format, &observed, observed_format).map_err(|err| {
        let source = match &err {
            DiffError::InvalidDesired(_) => &inputs.desired,
            DiffError::InvalidObserved(_) => &inputs.observed,
        };
        anyhow::Error::new(err).context(format!("cannot compare {}", display_input(source)))
    })
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn display_input(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// An explicit format wins; otherwise the extension decides, and inputs
/// without a known extension are sniffed.
fn input_format(path: &Path, explicit: Option<InputFormat>) -> Option<DocumentFormat> {
    explicit
        .map(DocumentFormat::from)
        .or_else(|| DocumentFormat::from_path(path))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn explicit_format_wins_over_extension() {
        let path = PathBuf::from("live.json");
        assert_eq!(
            input_format(&path, Some(InputFormat::Yaml)),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(input_format(&path, None), Some(DocumentFormat::Json));
        assert_eq!(input_format(Path::new("-"), None), None);
    }

    #[test]
    fn stdin_is_displayed_by_name() {
        assert_eq!(display_input(Path::new("-")), "<stdin>");
        assert_eq!(display_input(Path::new("a.yaml")), "a.yaml");
    }

    #[test]
    fn drift_exit_only_when_requested() {
        let drift = Residual::new(residual_types::Node::from("x"));
        let clean = Residual::default();
        assert_eq!(exit_status(&drift, true), EXIT_DRIFT);
        assert_eq!(exit_status(&drift, false), 0);
        assert_eq!(exit_status(&clean, true), 0);
    }
}
