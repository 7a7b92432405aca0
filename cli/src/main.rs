//! Log simulator installer

use logsim_installer::cli::{self, USAGE};
use logsim_installer::domain::{InstallError, InvocationMode};
use logsim_installer::output::OutputContext;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let invocation = match cli::resolve(std::env::args_os()) {
        Ok(invocation) if invocation.mode != InvocationMode::Help => invocation,
        Ok(_) => usage_exit(None),
        Err(e) => usage_exit(Some(&e)),
    };

    if let Err(e) = logsim_installer::app::run(invocation).await {
        if let Some(kind) = e.downcast_ref::<InstallError>().map(InstallError::kind) {
            tracing::debug!(kind, "run failed");
        }
        OutputContext::new(false).error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn usage_exit(error: Option<&InstallError>) -> ! {
    if let Some(e) = error {
        OutputContext::new(false).error(&e.to_string());
    }
    eprint!("{USAGE}");
    std::process::exit(1);
}
