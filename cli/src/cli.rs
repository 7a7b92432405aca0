//! CLI argument parsing with clap derive

use clap::Parser;

use crate::domain::{InstallError, Invocation, InvocationMode};

/// Usage text printed for `-h` and for every usage error.
pub const USAGE: &str = "\
Usage: logsim-install [-i | -u] [-s] [-h]

Installs the log simulator agent from /tmp/log_simulator.

Options:
  -i    install and register the agent as a systemd service
  -u    uninstall the agent and its service
  -s    unattended: never prompt, decline every question
  -h    print this help and exit
";

/// Log simulator installer
#[derive(Parser, Debug)]
#[command(
    name = "logsim-install",
    disable_help_flag = true,
    disable_version_flag = true,
    color = clap::ColorChoice::Never
)]
pub struct Cli {
    /// Install and register as a service
    #[arg(short = 'i', conflicts_with = "uninstall")]
    pub service: bool,

    /// Uninstall
    #[arg(short = 'u')]
    pub uninstall: bool,

    /// Unattended mode
    #[arg(short = 's')]
    pub unattended: bool,

    /// Print usage
    #[arg(short = 'h')]
    pub help: bool,
}

impl Cli {
    /// Map parsed flags onto a run mode. `-h` wins over everything else.
    #[must_use]
    pub fn invocation(&self) -> Invocation {
        let mode = if self.help {
            InvocationMode::Help
        } else if self.uninstall {
            InvocationMode::Uninstall
        } else if self.service {
            InvocationMode::InstallAsService
        } else {
            InvocationMode::Install
        };
        Invocation::new(mode, self.unattended)
    }
}

/// Resolve raw process arguments (program name first) into an `Invocation`.
///
/// # Errors
///
/// Returns `InstallError::Usage` for unknown flags, positional arguments,
/// and `-i` combined with `-u`.
pub fn resolve<I, T>(args: I) -> Result<Invocation, InstallError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| {
        let rendered = e.to_string();
        let first = rendered
            .lines()
            .next()
            .unwrap_or("invalid arguments")
            .trim_start_matches("error: ")
            .to_string();
        InstallError::Usage(first)
    })?;
    Ok(cli.invocation())
}
