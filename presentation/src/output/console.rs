//! Console output formatter for status and project listings

use colony_domain::{CycleState, StatusSnapshot};
use colored::Colorize;

/// Formats orchestrator snapshots and listings for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a status snapshot
    pub fn format_status(status: &StatusSnapshot) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Colony Status"));

        let state_label = match status.state {
            CycleState::Running => status.state.as_str().green().bold(),
            CycleState::Paused => status.state.as_str().yellow().bold(),
            _ => status.state.as_str().dimmed().bold(),
        };
        output.push_str(&format!("{} {}\n", "State:".cyan().bold(), state_label));
        output.push_str(&format!(
            "{} {}\n",
            "Active agents:".cyan().bold(),
            status.agents_active
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Tasks completed:".cyan().bold(),
            status.tasks_completed
        ));
        output.push_str(&format!("{} {}\n", "Errors:".cyan().bold(), status.errors));
        output.push_str(&format!(
            "{} {}\n",
            "Knowledge entries:".cyan().bold(),
            status.ledger_size
        ));

        output
    }

    /// Format the workspace-relative project listing
    pub fn format_tree(paths: &[String]) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Project Tree"));

        if paths.is_empty() {
            output.push_str("(empty workspace)\n");
            return output;
        }

        for path in paths {
            output.push_str(&format!("  {}\n", path));
        }
        output.push_str(&format!("\n{} files\n", paths.len()));
        output
    }

    /// The shell command reference
    pub fn format_help() -> String {
        let mut output = String::new();
        output.push_str("Available commands:\n");
        output.push_str("  start     - Start the autonomous cycle\n");
        output.push_str("  pause     - Pause or resume the current cycle\n");
        output.push_str("  status    - Show scheduler state and agent metrics\n");
        output.push_str("  inspect   - Show the workspace project tree\n");
        output.push_str("  exit      - Shut down and leave the shell\n");
        output.push_str("  help      - Show this help message\n");
        output
    }

    fn header(title: &str) -> String {
        format!("{}\n{}\n", title.bold(), "-".repeat(40))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_status_lists_core_fields() {
        plain();
        let mut status = StatusSnapshot::idle();
        status.running = true;
        status.state = CycleState::Running;
        status.agents_active = 3;
        status.ledger_size = 7;

        let text = ConsoleFormatter::format_status(&status);
        assert!(text.contains("State: running"));
        assert!(text.contains("Active agents: 3"));
        assert!(text.contains("Knowledge entries: 7"));
    }

    #[test]
    fn test_tree_formats_paths_or_placeholder() {
        plain();
        let text = ConsoleFormatter::format_tree(&[]);
        assert!(text.contains("(empty workspace)"));

        let text = ConsoleFormatter::format_tree(&[
            "README.md".to_string(),
            "src/main.rs".to_string(),
        ]);
        assert!(text.contains("  README.md"));
        assert!(text.contains("  src/main.rs"));
        assert!(text.contains("2 files"));
    }

    #[test]
    fn test_help_names_every_command() {
        plain();
        let text = ConsoleFormatter::format_help();
        for command in ["start", "pause", "status", "inspect", "exit", "help"] {
            assert!(text.contains(command));
        }
    }
}
