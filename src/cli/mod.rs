//! Command-line interface for mcqdesk.
//!
//! Without a subcommand the TUI starts. Each subcommand runs a single API
//! call against the configured service and prints the result.

mod commands;
mod common;
pub mod completions;

pub use common::*;

use crate::api::{Difficulty, QuestionSource};
use crate::ui::ViewId;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Terminal client for the MCQ question bank service
#[derive(Parser, Debug)]
#[command(name = "mcqdesk", version, about = "Terminal client for the MCQ question bank service", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the service for this run, e.g. http://127.0.0.1:8000/api/v1
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,

    /// View to open the TUI on (home, generate, allQuestions, createQuestion, takeQuiz, uploadDocument, exportOptions)
    #[arg(long, value_name = "VIEW")]
    pub view: Option<ViewId>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the service is reachable
    Health,
    /// List stored questions
    List {
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        #[arg(short, long)]
        category: Option<String>,
        /// ai_generated, manual or document_upload
        #[arg(short, long)]
        source: Option<QuestionSource>,
        /// Print the raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Show a single question with its answer
    Show { id: String },
    /// Generate questions on a topic with the AI backend
    Generate {
        topic: String,
        #[arg(short, long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        /// Number of questions (1-50)
        #[arg(short = 'n', long, default_value = "3")]
        count: String,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a question
    Delete { id: String },
    /// List uploaded documents
    Documents,
    /// Upload a PDF, TXT or DOCX document and generate questions from it
    Upload {
        path: PathBuf,
        /// Questions generated per chunk of text (1-5)
        #[arg(long, default_value = "2")]
        per_chunk: String,
        #[arg(short, long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Export questions as JSON
    Export {
        /// Directory to save into (defaults to the configured export directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Only export these question ids
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List submitted quiz results
    Results,
    /// Generate shell completions
    Completions {
        /// Target shell (detected from $SHELL when omitted)
        shell: Option<Shell>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_starts_tui() {
        let cli = Cli::try_parse_from(["mcqdesk", "--view", "takeQuiz"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.view, Some(ViewId::TakeQuiz));
    }

    #[test]
    fn test_list_filters_parse() {
        let cli = Cli::try_parse_from([
            "mcqdesk",
            "list",
            "--difficulty",
            "hard",
            "--source",
            "manual",
            "--api-url",
            "http://localhost:9000/api/v1",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000/api/v1"));
        match cli.command {
            Some(Commands::List {
                difficulty, source, ..
            }) => {
                assert_eq!(difficulty, Some(Difficulty::Hard));
                assert_eq!(source, Some(QuestionSource::Manual));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_accepts_repeated_ids() {
        let cli = Cli::try_parse_from(["mcqdesk", "export", "--id", "a", "--id", "b"]).unwrap();
        match cli.command {
            Some(Commands::Export { ids, .. }) => assert_eq!(ids, vec!["a", "b"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(Cli::try_parse_from(["mcqdesk", "generate", "rust", "-d", "extreme"]).is_err());
    }
}
