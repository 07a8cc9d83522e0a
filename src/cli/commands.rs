//! Subcommand implementations.

use super::common::{print_info, print_success, print_warning, CliContext};
use super::{completions, Cli, Commands};
use crate::api::{
    DocumentMeta, DocumentUpload, ExportFilter, GenerateRequest, Question, QuestionFilter,
    QuizResult,
};
use crate::config::Config;
use crate::screens::document_upload::{
    is_accepted_file, upload_success_message, DEFAULT_PER_CHUNK, MAX_PER_CHUNK, MIN_PER_CHUNK,
};
use crate::screens::generate::{generation_error_message, MAX_COUNT, MIN_COUNT};
use crate::services::save_export;
use crate::utils::form::clamp_count;
use crate::utils::text::{option_letter, truncate};
use crate::utils::{expand_path, format_path_for_display};
use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

impl Cli {
    /// Run the parsed subcommand. Does nothing when none was given.
    pub fn execute(self, config: Config) -> Result<()> {
        let Some(command) = self.command else {
            return Ok(());
        };
        if let Commands::Completions { shell } = command {
            return completions::generate(shell);
        }

        let ctx = CliContext::new(config)?;
        info!("CLI command against {}", ctx.client.base_url());

        match command {
            Commands::Health => {
                let status = ctx.block_on(ctx.client.health())?;
                print_success(&format!("{}: {}", status.status, status.message));
            }
            Commands::List {
                difficulty,
                category,
                source,
                json,
            } => {
                let filter = QuestionFilter {
                    difficulty,
                    category: category.filter(|c| !c.trim().is_empty()),
                    source,
                };
                let questions = ctx.block_on(ctx.client.list_questions(&filter))?;
                if json {
                    let out = serde_json::to_string_pretty(&questions)
                        .context("Failed to serialize questions")?;
                    println!("{}", out);
                } else if questions.is_empty() {
                    print_info("No questions found.");
                } else {
                    for question in &questions {
                        println!("{}", question_line(question));
                    }
                    println!("\n{} question(s)", questions.len());
                }
            }
            Commands::Show { id } => {
                let question = ctx.block_on(ctx.client.get_question(&id))?;
                print!("{}", question_detail(&question));
            }
            Commands::Generate {
                topic,
                difficulty,
                count,
                category,
            } => {
                let topic = topic.trim().to_string();
                if topic.is_empty() {
                    bail!("Please enter a topic.");
                }
                let request = GenerateRequest {
                    topic,
                    difficulty,
                    num_questions: clamp_count(&count, MIN_COUNT, MAX_COUNT),
                    category: category.filter(|c| !c.trim().is_empty()),
                };
                let questions = ctx
                    .block_on(ctx.client.generate_mcqs(&request))
                    .map_err(|e| anyhow!(generation_error_message(e.message())))?;
                for question in &questions {
                    println!("{}", question_detail(question));
                }
                print_success(&format!("Generated {} question(s)", questions.len()));
            }
            Commands::Delete { id } => {
                ctx.block_on(ctx.client.delete_question(&id))?;
                print_success(&format!("Deleted question {}", id));
            }
            Commands::Documents => {
                let documents = ctx.block_on(ctx.client.list_documents())?;
                if documents.is_empty() {
                    print_info("No documents uploaded yet.");
                }
                for document in &documents {
                    println!("{}", document_line(document));
                }
            }
            Commands::Upload {
                path,
                per_chunk,
                difficulty,
                category,
            } => {
                let path = expand_path(&path.to_string_lossy());
                if !is_accepted_file(&path) {
                    bail!("Please select a PDF, TXT or DOCX document.");
                }
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("Failed to read {:?}", path))?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "document".to_string());
                let per_chunk = if per_chunk.trim().is_empty() {
                    DEFAULT_PER_CHUNK
                } else {
                    clamp_count(&per_chunk, MIN_PER_CHUNK, MAX_PER_CHUNK)
                };
                let upload = DocumentUpload {
                    file_name,
                    bytes,
                    num_questions_per_chunk: per_chunk,
                    difficulty,
                    category: category.filter(|c| !c.trim().is_empty()),
                };
                let document = ctx.block_on(ctx.client.upload_document(&upload))?;
                print_success(&upload_success_message(&document.filename));
            }
            Commands::Export {
                out,
                ids,
                difficulty,
                category,
            } => {
                let filter = ExportFilter {
                    question_ids: ids,
                    difficulty,
                    category: category.filter(|c| !c.trim().is_empty()),
                };
                let bytes = ctx.block_on(ctx.client.export_questions_json(&filter))?;
                let dir = out
                    .map(|dir| expand_path(&dir.to_string_lossy()))
                    .unwrap_or_else(|| ctx.config.export_dir.clone());
                let path = save_export(&dir, &bytes)?;
                print_success(&format!("Exported to {}", format_path_for_display(&path)));
            }
            Commands::Results => {
                let results = ctx.block_on(ctx.client.list_quiz_results())?;
                if results.is_empty() {
                    print_warning("No quiz results recorded yet.");
                }
                for result in &results {
                    println!("{}", result_line(result));
                }
            }
            Commands::Completions { .. } => {}
        }
        Ok(())
    }
}

fn question_line(question: &Question) -> String {
    format!(
        "{:<26} {:<6} {}",
        question.id,
        question.difficulty.as_str(),
        truncate(&question.question_text, 70)
    )
}

fn question_detail(question: &Question) -> String {
    let mut out = format!("{}\n", question.question_text);
    for (i, option) in question.options.iter().enumerate() {
        let mark = if i == question.correct_answer_index { "\u{2713}" } else { " " };
        out.push_str(&format!("  {} {}. {}\n", mark, option_letter(i), option));
    }
    if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.is_empty()) {
        out.push_str(&format!("  Explanation: {}\n", explanation));
    }
    out.push_str(&format!("  Difficulty: {}", question.difficulty.label()));
    if !question.categories.is_empty() {
        out.push_str(&format!(" | Categories: {}", question.categories.join(", ")));
    }
    if let Some(source) = question.source {
        out.push_str(&format!(" | Source: {}", source));
    }
    out.push('\n');
    out
}

fn document_line(document: &DocumentMeta) -> String {
    let uploaded = document
        .uploaded_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| document.upload_date.clone());
    format!(
        "{:<26} {:<40} {:>8}  {}",
        document.id,
        truncate(&document.filename, 40),
        document.size_label(),
        uploaded
    )
}

fn result_line(result: &QuizResult) -> String {
    format!(
        "{}  {}/{} correct  {:.2}%",
        result.quiz_date.as_deref().unwrap_or("-"),
        result.correct_answers,
        result.total_questions,
        result.score
    )
}
