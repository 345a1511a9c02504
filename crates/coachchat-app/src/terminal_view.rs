use colored::Colorize;
use std::io::{self, Write};

use coachchat_chat::ChatView;
use coachchat_types::USER_SENDER;

/// Renders the conversation as `sender: text` lines on a terminal
pub struct TerminalView<W: Write> {
    out: W,
    color: bool,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: String) {
        // Display is best effort; a closed stdout must not abort the session.
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            log::debug!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn clear(&mut self) {
        let rule = "─".repeat(40);
        let line = if self.color {
            rule.bright_black().to_string()
        } else {
            rule
        };
        self.write_line(line);
    }

    fn show_message(&mut self, sender: &str, text: &str) {
        let line = if !self.color {
            format!("{}: {}", sender, text)
        } else if sender == USER_SENDER {
            format!("{} {}", format!("{}:", sender).bright_blue().bold(), text)
        } else if text.starts_with("Error: ") || text == coachchat_types::GENERIC_FAILURE_MESSAGE {
            format!("{} {}", format!("{}:", sender).bright_green().bold(), text.red())
        } else {
            format!("{} {}", format!("{}:", sender).bright_green().bold(), text)
        };
        self.write_line(line);
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            let line = if self.color {
                "…".bright_black().to_string()
            } else {
                "…".to_string()
            };
            self.write_line(line);
        }
    }
}
