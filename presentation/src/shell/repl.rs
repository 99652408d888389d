//! Interactive command shell for the orchestrator.

use crate::output::console::ConsoleFormatter;
use crate::progress::ticker::StatusTicker;
use colony_application::Orchestrator;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use std::time::Duration;

/// Interactive control shell: start, pause, status, inspect, exit.
pub struct CommandShell {
    orchestrator: Arc<Orchestrator>,
    refresh: Duration,
    show_ticker: bool,
}

impl CommandShell {
    /// Create a new shell over an orchestrator
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            refresh: Duration::from_secs(2),
            show_ticker: true,
        }
    }

    /// Set the status ticker refresh interval
    pub fn with_refresh(mut self, refresh: Duration) -> Self {
        self.refresh = refresh;
        self
    }

    /// Set whether a live status ticker runs alongside the cycle
    pub fn with_ticker(mut self, show: bool) -> Self {
        self.show_ticker = show;
        self
    }

    /// Starts a cycle session and, when enabled, its status ticker.
    fn start_session(&self) {
        let already_live = self.orchestrator.status().running;
        self.orchestrator.start();
        if self.show_ticker && !already_live {
            // The ticker dies with the session: it selects on the
            // session's own cancellation token.
            StatusTicker::new(self.refresh).spawn(
                Arc::clone(&self.orchestrator),
                self.orchestrator.shutdown_signal(),
            );
        }
        println!("Cycle started. Type 'status' for progress, 'help' for commands.");
    }

    fn handle_command(&self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();

        match command.as_str() {
            "start" => self.start_session(),
            "pause" => {
                self.orchestrator.pause();
                let status = self.orchestrator.status();
                if status.paused {
                    println!("Cycle paused.");
                } else if status.running {
                    println!("Cycle resumed.");
                } else {
                    println!("No cycle session is live.");
                }
            }
            "status" => {
                print!(
                    "{}",
                    ConsoleFormatter::format_status(&self.orchestrator.status())
                );
            }
            "inspect" => match self.orchestrator.project_tree() {
                Ok(tree) => print!("{}", ConsoleFormatter::format_tree(&tree)),
                Err(e) => eprintln!("Could not scan workspace: {e}"),
            },
            "help" => print!("{}", ConsoleFormatter::format_help()),
            "exit" | "quit" => {
                self.orchestrator.shutdown();
                return true;
            }
            other => println!("Unknown command: {other}. Type 'help' for commands."),
        }
        false
    }

    fn print_welcome(&self) {
        println!("Colony command shell ready. Type 'help' for commands.");
    }

    /// Run the interactive shell until exit or end of input.
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("colony").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("colony > ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);
                    if self.handle_command(line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    self.orchestrator.shutdown();
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    self.orchestrator.shutdown();
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }
}
