//! Wire models for the MCQ service.
//!
//! Every entity here is owned by the remote service. The client only holds
//! transient copies, so identifiers are never generated locally.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel sent for a quiz question the user left unanswered.
pub const UNANSWERED: i64 = -1;

/// Minimum number of options a question may carry.
pub const MIN_OPTIONS: usize = 2;
/// Maximum number of options a question may carry.
pub const MAX_OPTIONS: usize = 6;

/// Question difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}' (expected easy, medium or hard)",
                other
            )),
        }
    }
}

/// Where a stored question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionSource {
    #[serde(rename = "AI_Generated")]
    AiGenerated,
    Manual,
    #[serde(rename = "Document_Upload")]
    DocumentUpload,
}

impl QuestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionSource::AiGenerated => "AI_Generated",
            QuestionSource::Manual => "Manual",
            QuestionSource::DocumentUpload => "Document_Upload",
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "ai_generated" | "ai" => Ok(QuestionSource::AiGenerated),
            "manual" => Ok(QuestionSource::Manual),
            "document_upload" | "document" => Ok(QuestionSource::DocumentUpload),
            other => Err(format!(
                "unknown source '{}' (expected ai_generated, manual or document_upload)",
                other
            )),
        }
    }
}

/// A stored multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<QuestionSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_from_doc_id: Option<String>,
}

impl Question {
    /// The text of the correct option, if the index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_answer_index)
            .map(String::as_str)
    }

    /// Editable fields of this question, without server metadata.
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            question_text: self.question_text.clone(),
            options: self.options.clone(),
            correct_answer_index: self.correct_answer_index,
            explanation: self.explanation.clone(),
            difficulty: self.difficulty,
            categories: self.categories.clone(),
        }
    }
}

/// Question fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
    pub categories: Vec<String>,
}

impl QuestionDraft {
    /// Verify the structural invariants the service relies on.
    pub fn check(&self) -> Result<(), String> {
        if self.options.len() < MIN_OPTIONS {
            return Err(format!(
                "a question needs at least {} options, got {}",
                MIN_OPTIONS,
                self.options.len()
            ));
        }
        if self.options.len() > MAX_OPTIONS {
            return Err(format!(
                "a question may have at most {} options, got {}",
                MAX_OPTIONS,
                self.options.len()
            ));
        }
        if self.correct_answer_index >= self.options.len() {
            return Err(format!(
                "correct answer index {} is out of range for {} options",
                self.correct_answer_index,
                self.options.len()
            ));
        }
        Ok(())
    }
}

/// Filters accepted by the question list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<QuestionSource>,
}

/// Filters accepted by the JSON export endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub question_ids: Vec<String>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
}

impl ExportFilter {
    /// Query pairs in the form the export endpoint expects (`question_ids` repeated).
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .question_ids
            .iter()
            .map(|id| ("question_ids", id.clone()))
            .collect();
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty", difficulty.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub num_questions: u32,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    pub num_questions: u32,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
}

/// A quiz question as served to the taker: the answer is withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub user_answer_index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSubmission {
    pub answers: Vec<AnswerRecord>,
    pub user_id: Option<String>,
}

/// Score summary returned by the service for a submitted quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub quiz_date: Option<String>,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub score: f64,
}

/// Metadata of a document uploaded for question generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub filename: String,
    pub file_size: u64,
    pub upload_date: String,
}

impl DocumentMeta {
    /// Upload time converted to the local timezone.
    ///
    /// The service emits naive UTC timestamps; RFC 3339 values are accepted too.
    pub fn uploaded_at(&self) -> Option<DateTime<Local>> {
        parse_timestamp(&self.upload_date).map(|utc| utc.with_timezone(&Local))
    }

    /// Size in whole kilobytes, rounded.
    pub fn size_label(&self) -> String {
        format!("{} KB", (self.file_size as f64 / 1024.0).round() as u64)
    }
}

/// A file to upload, already read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub num_questions_per_chunk: u32,
    pub difficulty: Difficulty,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Parse a service timestamp as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
