use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use competition::Catalog;
use shared::protocol::{ClientCommand, ServerEvent};

mod client;

use client::{parse_server_url, QuizConnection};

const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:3001/ws";

#[derive(Parser, Debug)]
#[command(about = "Operate a live quiz server from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a question catalog file (.json or .toml).
    CheckCatalog { path: PathBuf },
    /// Send one controller command.
    Send {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
        #[arg(value_enum)]
        action: Action,
    },
    /// Print every event the server broadcasts.
    Watch {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Action {
    Start,
    End,
    Next,
    Previous,
    ShowAnswer,
}

impl From<Action> for ClientCommand {
    fn from(action: Action) -> Self {
        match action {
            Action::Start => ClientCommand::StartCompetition,
            Action::End => ClientCommand::EndCompetition,
            Action::Next => ClientCommand::NextQuestion,
            Action::Previous => ClientCommand::PreviousQuestion,
            Action::ShowAnswer => ClientCommand::ShowAnswer,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::CheckCatalog { path } => {
            let catalog = Catalog::load(&path)?;
            println!(
                "{}: {} questions (ids {}..{})",
                path.display(),
                catalog.len(),
                catalog.questions()[0].id,
                catalog.questions()[catalog.last_index()].id,
            );
        }
        Command::Send { server_url, action } => {
            let url = parse_server_url(&server_url)?;
            let mut connection = QuizConnection::connect(&url).await?;
            connection.read_snapshot().await?;
            let command = ClientCommand::from(action);
            connection.send(command).await?;
            connection.close().await?;
            println!("sent {}", command.name());
        }
        Command::Watch { server_url } => {
            let url = parse_server_url(&server_url)?;
            let mut connection = QuizConnection::connect(&url).await?;
            while let Some(event) = connection.next_event().await? {
                println!("{}", describe(&event));
            }
        }
    }

    Ok(())
}

fn describe(event: &ServerEvent) -> String {
    match event {
        ServerEvent::CompetitionStatus(true) => "competition started".to_string(),
        ServerEvent::CompetitionStatus(false) => "competition not running".to_string(),
        ServerEvent::QuestionsUpdate(questions) => {
            format!("catalog: {} questions", questions.len())
        }
        ServerEvent::QuestionUpdate(question) => {
            format!("question {}:\n{}", question.id, question.text)
        }
        ServerEvent::ShowAnswer => "answer revealed".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
