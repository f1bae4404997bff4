//! Guide console - line-oriented client for the relay server.
//!
//! Loads every panel's opening question, then reads commands from stdin:
//!
//! ```text
//! objective Improve motivation in first-year physics
//! outcomes #2
//! progress
//! synthesize
//! ```

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use proposal_builder::adapters::HttpConversationGateway;
use proposal_builder::application::client::{GuideSession, IntegrationError, PanelController};
use proposal_builder::config::{AppConfig, ClientConfig};
use proposal_builder::domain::foundation::Purpose;
use proposal_builder::ports::ConversationGateway;
use proposal_builder::telemetry::init_tracing;

/// Terminal client for the proposal builder relay
#[derive(Parser, Debug)]
#[command(name = "guide-console", about = "Build a curriculum proposal panel by panel")]
struct Cli {
    /// Relay chat endpoint (overrides PROPOSAL_BUILDER__CLIENT__ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConsoleCommand {
    Submit(Purpose, String),
    Select(Purpose, usize),
    Show(Option<Purpose>),
    Synthesize,
    Progress,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  <purpose> <text>   answer a panel (objective, outcomes, pedagogy,
                     development, implementation, evaluation)
  <purpose> #<n>     choose option n of a panel
  show [<purpose>]   print one panel, or all of them
  progress           print completion
  synthesize         build the proposal from completed panels
  help               print this help
  quit               exit";

fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "" => Err("empty command".to_string()),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        "progress" => Ok(ConsoleCommand::Progress),
        "synthesize" => Ok(ConsoleCommand::Synthesize),
        "show" if rest.is_empty() => Ok(ConsoleCommand::Show(None)),
        "show" => panel_purpose(rest).map(|p| ConsoleCommand::Show(Some(p))),
        other => {
            let purpose = panel_purpose(other)?;
            if rest.is_empty() {
                return Err(format!("nothing to send to {}", purpose));
            }
            match rest.strip_prefix('#') {
                Some(number) => {
                    let n: usize = number
                        .trim()
                        .parse()
                        .map_err(|_| format!("'{}' is not an option number", number))?;
                    if n == 0 {
                        return Err("options are numbered from 1".to_string());
                    }
                    Ok(ConsoleCommand::Select(purpose, n - 1))
                }
                None => Ok(ConsoleCommand::Submit(purpose, rest.to_string())),
            }
        }
    }
}

fn panel_purpose(word: &str) -> Result<Purpose, String> {
    match Purpose::from_str(word) {
        Ok(purpose) if !purpose.is_integrator() => Ok(purpose),
        _ => Err(format!("unknown panel '{}' (try 'help')", word)),
    }
}

fn print_panel<G: ?Sized + ConversationGateway>(panel: &PanelController<G>) {
    let view = panel.view();
    let marker = if panel.is_complete() { "x" } else { " " };
    println!("[{}] {}", marker, panel.purpose().label());
    if let Some(question) = &view.guiding_question {
        println!("    {}", question);
    }
    for (i, option) in view.options.iter().enumerate() {
        println!("    #{} {}", i + 1, option);
    }
    let output = view.output.text();
    if !output.is_empty() {
        for line in output.lines() {
            println!("  > {}", line);
        }
    }
}

fn print_progress<G: ?Sized + ConversationGateway>(session: &GuideSession<G>) {
    let progress = session.progress();
    println!(
        "{} Complete ({}/{})",
        progress.percent_complete(),
        progress.completed(),
        progress.total()
    );
}

fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.server);

    if let Some(endpoint) = &cli.endpoint {
        config.client.endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout_secs {
        config.client.timeout_secs = timeout;
    }
    config.client.validate().context("Invalid client configuration")?;
    Ok(config.client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = client_config(&cli)?;

    let gateway = HttpConversationGateway::from_config(&config)
        .context("Failed to create gateway")?;
    let mut session = GuideSession::new(Arc::new(gateway));

    println!("Loading panels from {} ...", config.endpoint);
    session.initialize_all().await;
    for panel in session.panels() {
        print_panel(panel);
    }
    print_progress(&session);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) if line.trim().is_empty() => {
                tracing::trace!(%message, "blank line");
                continue;
            }
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            ConsoleCommand::Submit(purpose, text) => {
                match session.submit(purpose, &text).await {
                    Ok(_) => {
                        if let Some(panel) = session.panel(purpose) {
                            print_panel(panel);
                        }
                        print_progress(&session);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            ConsoleCommand::Select(purpose, index) => {
                match session.select_option(purpose, index).await {
                    Ok(_) => {
                        if let Some(panel) = session.panel(purpose) {
                            print_panel(panel);
                        }
                        print_progress(&session);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            ConsoleCommand::Show(Some(purpose)) => {
                if let Some(panel) = session.panel(purpose) {
                    print_panel(panel);
                }
            }
            ConsoleCommand::Show(None) => {
                for panel in session.panels() {
                    print_panel(panel);
                }
            }
            ConsoleCommand::Progress => print_progress(&session),
            ConsoleCommand::Synthesize => {
                println!("Synthesizing...");
                match session.synthesize().await {
                    Ok(_) | Err(IntegrationError::NoCompletedSteps) => {
                        println!("{}", session.integration().view().output.text());
                    }
                    Err(e) => println!("{}", e),
                }
            }
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => break,
        }
    }

    Ok(())
}
