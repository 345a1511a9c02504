use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use coachchat_chat::render_history;

use crate::app::setup::open_session;
use crate::cli::Commands;
use crate::config::AppConfig;
use crate::terminal_view::TerminalView;

impl Commands {
    pub fn execute(&self, config: &AppConfig, out: &mut dyn Write) -> Result<()> {
        match self {
            Commands::History => print_history(config, out),
            Commands::Clear => clear_history(config, out),
            Commands::Coaches => list_coaches(config, out),
        }
    }
}

fn print_history(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let session = open_session(config, TerminalView::new(&mut *out, config.color));
    if session.history().is_empty() {
        drop(session);
        writeln!(out, "No stored conversation.")?;
        return Ok(());
    }
    let (store, mut view) = session.into_parts();
    render_history(&mut view, store.history());
    Ok(())
}

fn clear_history(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let mut session = open_session(config, TerminalView::new(std::io::sink(), false));
    let removed = session.history().len();
    session.clear_history();
    writeln!(
        out,
        "Cleared {} stored turns from {}",
        removed,
        config.history_file.display()
    )?;
    Ok(())
}

fn list_coaches(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    for coach in &config.coaches {
        if coach == &config.coach {
            let line = format!("* {} ({})", coach.name, coach.url_name);
            if config.color {
                writeln!(out, "{}", line.bright_green())?;
            } else {
                writeln!(out, "{}", line)?;
            }
        } else {
            writeln!(out, "  {} ({})", coach.name, coach.url_name)?;
        }
    }
    Ok(())
}
