use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use coachchat_api::HttpChatClient;
use coachchat_types::{Coach, FeedbackRequest};

use crate::app::setup::{build_client, coach_names, open_session};
use crate::config::coaches::find_coach;
use crate::config::AppConfig;
use crate::terminal_view::TerminalView;
use crate::transcript_logger::TranscriptLogger;

/// One line of REPL input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    Help,
    Coaches,
    SwitchCoach(String),
    History,
    Clear,
    Feedback { rating: i32, comment: Option<String> },
    Invalid(String),
    Message(String),
}

pub fn parse_command(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    match trimmed {
        "exit" | "quit" | "/exit" | "/quit" => return ReplCommand::Exit,
        "/help" => return ReplCommand::Help,
        "/coaches" => return ReplCommand::Coaches,
        "/history" => return ReplCommand::History,
        "/clear" => return ReplCommand::Clear,
        _ => {}
    }

    if let Some(rest) = trimmed.strip_prefix("/coach ") {
        let name = rest.trim();
        return if name.is_empty() {
            ReplCommand::Invalid("Usage: /coach <name>".to_string())
        } else {
            ReplCommand::SwitchCoach(name.to_string())
        };
    }

    if trimmed == "/feedback" || trimmed.starts_with("/feedback ") {
        let rest = trimmed["/feedback".len()..].trim();
        let (rating, comment) = match rest.split_once(char::is_whitespace) {
            Some((rating, comment)) => (rating, Some(comment.trim().to_string())),
            None => (rest, None),
        };
        return match rating.parse::<i32>() {
            Ok(rating) => ReplCommand::Feedback {
                rating,
                comment: comment.filter(|c| !c.is_empty()),
            },
            Err(_) => ReplCommand::Invalid("Usage: /feedback <rating> [comment]".to_string()),
        };
    }

    if trimmed.starts_with('/') && !trimmed.contains(char::is_whitespace) {
        return ReplCommand::Invalid(format!("Unknown command: {} (try /help)", trimmed));
    }

    ReplCommand::Message(line.to_string())
}

const HELP: &str = "\
Commands:
  /coach <name>                switch coach
  /coaches                     list coaches
  /history                     show the stored conversation
  /clear                       forget the stored conversation
  /feedback <rating> [comment] rate the last answer
  exit | quit                  leave";

/// Run interactive REPL mode
pub async fn run_repl_mode(config: AppConfig) -> Result<()> {
    let client = build_client(&config)?;
    let mut session = open_session(&config, TerminalView::stdout(config.color));
    let mut coach: Coach = config.coach.clone();

    println!("{}", "Coachchat".bright_cyan().bold());
    println!("{}", format!("Endpoint: {}", config.endpoint).bright_black());
    println!("{}", format!("History: {}", config.history_file.display()).bright_black());
    println!("{}", "Type 'exit' or 'quit' to leave, '/help' for commands\n".bright_black());

    let mut logger = match &config.transcript_dir {
        Some(dir) => match TranscriptLogger::new(dir).await {
            Ok(logger) => {
                println!("{}", format!("Transcript: {}", logger.path().display()).bright_black());
                Some(logger)
            }
            Err(e) => {
                eprintln!("Transcript logging disabled: {}", e);
                None
            }
        },
        None => None,
    };

    session.mount();

    let mut rl = DefaultEditor::new()?;

    loop {
        let prompt = format!("{}> ", coach.url_name);
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "Use 'exit' or Ctrl-D to leave".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{} {}", "Input error:".bright_red().bold(), e);
                break;
            }
        };

        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match parse_command(&line) {
            ReplCommand::Exit => break,
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Coaches => {
                for c in &config.coaches {
                    let marker = if c == &coach { "*" } else { " " };
                    println!("{} {}", marker, c.name);
                }
            }
            ReplCommand::SwitchCoach(name) => match find_coach(&config.coaches, &name) {
                Some(found) => {
                    coach = found.clone();
                    println!("{}", format!("Now talking to {}", coach.name).green());
                }
                None => println!(
                    "{} Unknown coach '{}'. Available: {}",
                    "⚠️".yellow(),
                    name,
                    coach_names(&config.coaches)
                ),
            },
            ReplCommand::History => session.mount(),
            ReplCommand::Clear => {
                session.clear_history();
                println!("{}", "Conversation cleared".bright_black());
            }
            ReplCommand::Feedback { rating, comment } => {
                send_feedback(&client, session.last_message_id(), rating, comment).await;
            }
            ReplCommand::Invalid(message) => println!("{}", message.yellow()),
            ReplCommand::Message(message) => {
                let Some(outcome) = session.submit(&client, &message, &coach.name).await else {
                    continue;
                };
                if let Some(logger) = logger.as_mut() {
                    logger.log_exchange(&coach.name, message.trim(), &outcome).await;
                }
            }
        }
    }

    println!("{}", "Goodbye".bright_black());
    Ok(())
}

async fn send_feedback(
    client: &HttpChatClient,
    message_id: Option<&str>,
    rating: i32,
    comment: Option<String>,
) {
    let Some(message_id) = message_id else {
        println!("{}", "No answer to rate yet".yellow());
        return;
    };

    let request = FeedbackRequest {
        message_id: message_id.to_string(),
        rating,
        comment,
    };
    match client.send_feedback(&request).await {
        Ok(reply) => println!(
            "{}",
            reply
                .message
                .unwrap_or_else(|| "Feedback sent".to_string())
                .green()
        ),
        Err(e) => eprintln!("{} {:#}", "Feedback failed:".bright_red().bold(), e),
    }
}
