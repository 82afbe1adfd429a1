//! portal-chat - line client for the parent-teacher portal
//!
//! Reads commands and messages from stdin and prints conversation updates
//! to stdout. Delayed replies are printed as they arrive, interleaved with
//! input. Logs go to stderr.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use libportal::config::parse_delay;
use libportal::logging::{LogFormat, LogSettings};
use libportal::{Config, PortalService};
use portal_chat::input::{InputEvent, InputReader};
use portal_chat::{ChatError, Session};

#[derive(Parser, Debug)]
#[command(name = "portal-chat")]
#[command(version, about = "Chat with teachers and manage the parent-teacher portal")]
#[command(long_about = r#"Chat with teachers and manage the parent-teacher portal.

Lines starting with / are commands (see /help); any other line is sent as a
message to the active contact. A canned reply arrives after the reply delay.

EXAMPLES:
    # Interactive session
    portal-chat

    # Scripted session; waits for pending replies at end of input
    printf 'Hi\n/contacts\n' | portal-chat --reply-delay 10ms

EXIT CODES:
    0 - Success
    1 - Configuration or terminal error
    2 - Invalid command line arguments
"#)]
struct Cli {
    /// Configuration file (defaults to $PORTAL_CONFIG or the user config dir)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Delay before replies arrive, e.g. "1500ms" or "2s"
    #[arg(long, value_name = "DURATION", value_parser = reply_delay_arg)]
    reply_delay: Option<String>,

    /// Log output format: text, json or pretty
    #[arg(long, value_name = "FORMAT", value_parser = LogFormat::from_str)]
    log_format: Option<LogFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<ChatError>()
            .map(ChatError::exit_code)
            .or_else(|| e.downcast_ref::<libportal::PortalError>().map(|e| e.exit_code()))
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };

    if let Some(delay) = cli.reply_delay {
        config.messaging.reply_delay = delay;
    }

    let mut logging = LogSettings::resolve(&config.logging, cli.verbose);
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    logging.init();

    let service = PortalService::from_config(config)?;
    let today = chrono::Local::now().date_naive();
    let mut session = Session::new(service, today);

    print_lines(&session.greeting());

    let mut input = InputReader::stdin();
    while !session.should_exit() {
        let waiting = session.is_waiting();
        let input_open = !session.state().input_closed;

        tokio::select! {
            event = input.next(), if input_open => match event {
                InputEvent::Line(line) => print_lines(&session.handle_line(&line)),
                InputEvent::Closed => {
                    tracing::debug!("Input closed");
                    session.close_input();
                }
                InputEvent::Error(e) => {
                    session.shutdown();
                    return Err(ChatError::from(e).into());
                }
            },
            Some(out) = session.next_reply(), if waiting => print_lines(&out),
            else => break,
        }
    }

    session.shutdown();
    Ok(())
}

// Rejected values exit through clap with its usage error code
fn reply_delay_arg(value: &str) -> Result<String, libportal::PortalError> {
    parse_delay(value)?;
    Ok(value.to_string())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
