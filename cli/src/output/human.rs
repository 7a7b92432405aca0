//! Human-readable terminal renderer.

use crate::application::services::orchestrator::InstallOutcome;
use crate::domain::InstallationPaths;
use crate::output::OutputContext;

/// Renders run outcomes as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the summary printed after a successful run.
    pub fn render_outcome(&self, outcome: &InstallOutcome, paths: &InstallationPaths) {
        println!();
        match outcome {
            InstallOutcome::Installed { service } => {
                self.ctx.header("Installed");
                self.ctx
                    .kv("Agent:", &paths.agent_dest().display().to_string());
                self.ctx
                    .kv("Config:", &paths.config_dest().display().to_string());
                if let Some(state) = service {
                    self.ctx
                        .kv("Unit:", &paths.unit_dest().display().to_string());
                    self.ctx.kv("Service:", state.describe());
                } else {
                    self.ctx.info(&format!(
                        "Run the agent manually: python3 {}",
                        paths.agent_dest().display()
                    ));
                }
            }
            InstallOutcome::Uninstalled {
                unit_removed,
                agent_dir_removed,
            } => {
                self.ctx.header("Uninstalled");
                if !unit_removed && !agent_dir_removed {
                    self.ctx.info("Nothing was installed; no changes made");
                    return;
                }
                self.ctx.kv("Unit:", removal_display(*unit_removed));
                self.ctx.kv("Agent:", removal_display(*agent_dir_removed));
            }
        }
    }
}

fn removal_display(removed: bool) -> &'static str {
    if removed { "removed" } else { "not present" }
}
