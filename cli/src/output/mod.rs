//! Output formatting module

pub mod human;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for stdout messages.
    pub styles: Styles,
    /// Stylesheet for stderr messages; colored only when stderr is a TTY.
    pub err_styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
}

impl OutputContext {
    /// Create output context based on the environment.
    ///
    /// Colors are enabled per stream, only on a TTY and when `NO_COLOR` is unset.
    #[must_use]
    pub fn new(no_color: bool) -> Self {
        Self::with_terminals(no_color, Term::stdout().is_term(), Term::stderr().is_term())
    }

    /// Create output context for known stdout / stderr TTY states.
    #[must_use]
    pub fn with_terminals(no_color: bool, stdout_tty: bool, stderr_tty: bool) -> Self {
        let allowed = !no_color && std::env::var_os("NO_COLOR").is_none();
        Self {
            styles: stream_styles(allowed && stdout_tty),
            err_styles: stream_styles(allowed && stderr_tty),
            is_tty: stdout_tty,
        }
    }

    /// Print a success message prefixed with `✓`.
    pub fn success(&self, msg: &str) {
        println!("  {} {msg}", "✓".style(self.styles.success));
    }

    /// Print a warning message prefixed with `⚠`.
    pub fn warn(&self, msg: &str) {
        println!("  {} {msg}", "⚠".style(self.styles.warning));
    }

    /// Print an error message prefixed with `✗` to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.err_styles.error));
    }

    /// Print an info message prefixed with `ℹ`.
    pub fn info(&self, msg: &str) {
        println!("  {} {msg}", "ℹ".style(self.styles.info));
    }

    /// Print a section header.
    pub fn header(&self, msg: &str) {
        println!("  {}", msg.style(self.styles.header));
    }

    /// Print a key-value pair with the key dimmed.
    pub fn kv(&self, key: &str, value: &str) {
        println!("  {}  {value}", key.style(self.styles.dim));
    }
}

fn stream_styles(colored: bool) -> Styles {
    let mut styles = Styles::default();
    if colored {
        styles.colorize();
    }
    styles
}
