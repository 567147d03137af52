//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::dispatcher::{DispatchReport, ProviderOutcome};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a section heading
    pub fn heading(&self, title: &str) {
        println!("{}", title.bold());
    }

    /// Print a key-value pair
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// One line per provider: check mark or cross plus the error
    pub fn format_outcome(&self, outcome: &ProviderOutcome) -> String {
        match &outcome.result {
            Ok(()) => format!("{} {}", "✓".green(), outcome.provider),
            Err(e) => format!("{} {}: {}", "✗".red(), outcome.provider, e),
        }
    }

    pub fn dispatch_report(&self, report: &DispatchReport) {
        for outcome in &report.outcomes {
            println!("  {}", self.format_outcome(outcome));
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::DeliveryError;

    #[test]
    fn format_successful_outcome() {
        colored::control::set_override(false);
        let outcome = ProviderOutcome {
            provider: "Ntfy".to_string(),
            result: Ok(()),
        };
        assert_eq!(Presenter::new().format_outcome(&outcome), "✓ Ntfy");
    }

    #[test]
    fn format_failed_outcome_includes_error() {
        colored::control::set_override(false);
        let outcome = ProviderOutcome {
            provider: "FCM".to_string(),
            result: Err(DeliveryError::Http {
                status: 500,
                body: "boom".to_string(),
            }),
        };
        assert_eq!(
            Presenter::new().format_outcome(&outcome),
            "✗ FCM: HTTP 500: boom"
        );
    }
}
