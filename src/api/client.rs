use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{
    DocumentMeta, DocumentUpload, ExportFilter, GenerateRequest, HealthStatus, Question,
    QuestionDraft, QuestionFilter, QuizQuestion, QuizRequest, QuizResult, QuizSubmission,
};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// HTTP client for the MCQ service.
///
/// One method per remote operation. Every call is a fresh request; nothing is
/// cached or retried. Failures collapse into [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = http_client_builder().build().unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });
        Self {
            http_client,
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Create a client with an optional per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = http_client_builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---------------------------------------------------------------------
    // Questions
    // ---------------------------------------------------------------------

    pub async fn generate_mcqs(&self, request: &GenerateRequest) -> ApiResult<Vec<Question>> {
        let url = self.url("/mcq/generate-from-text");
        info!(
            "Generating {} {} question(s) about '{}'",
            request.num_questions, request.difficulty, request.topic
        );
        let builder = self.http_client.post(&url).json(request);
        let response = send(builder, "POST", &url, "Failed to generate MCQs from backend.").await?;
        read_json(response).await
    }

    pub async fn list_questions(&self, filter: &QuestionFilter) -> ApiResult<Vec<Question>> {
        let url = self.url("/mcq/questions");
        let builder = self.http_client.get(&url).query(filter);
        let response = send(builder, "GET", &url, "Failed to fetch questions from backend.").await?;
        read_json(response).await
    }

    pub async fn get_question(&self, id: &str) -> ApiResult<Question> {
        let url = self.url(&format!("/mcq/questions/{}", id));
        let builder = self.http_client.get(&url);
        let response = send(builder, "GET", &url, "Failed to fetch question.").await?;
        read_json(response).await
    }

    pub async fn create_question(&self, draft: &QuestionDraft) -> ApiResult<Question> {
        let url = self.url("/mcq/questions");
        let builder = self.http_client.post(&url).json(draft);
        let response = send(builder, "POST", &url, "Failed to create question.").await?;
        read_json(response).await
    }

    pub async fn update_question(&self, id: &str, draft: &QuestionDraft) -> ApiResult<Question> {
        let url = self.url(&format!("/mcq/questions/{}", id));
        let builder = self.http_client.put(&url).json(draft);
        let response = send(builder, "PUT", &url, "Failed to update question.").await?;
        read_json(response).await
    }

    pub async fn delete_question(&self, id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/mcq/questions/{}", id));
        let builder = self.http_client.delete(&url);
        send(builder, "DELETE", &url, "Failed to delete question.").await?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Quiz
    // ---------------------------------------------------------------------

    /// Draw a quiz. An empty list is a valid outcome.
    pub async fn generate_quiz(&self, request: &QuizRequest) -> ApiResult<Vec<QuizQuestion>> {
        let url = self.url("/quiz/generate");
        let builder = self.http_client.post(&url).json(request);
        let response = send(builder, "POST", &url, "Failed to generate quiz.").await?;
        read_json(response).await
    }

    pub async fn submit_quiz(&self, submission: &QuizSubmission) -> ApiResult<QuizResult> {
        let url = self.url("/quiz/submit");
        info!("Submitting quiz with {} answer(s)", submission.answers.len());
        let builder = self.http_client.post(&url).json(submission);
        let response = send(builder, "POST", &url, "Failed to submit quiz.").await?;
        read_json(response).await
    }

    pub async fn list_quiz_results(&self) -> ApiResult<Vec<QuizResult>> {
        let url = self.url("/quiz/results");
        let builder = self.http_client.get(&url);
        let response = send(builder, "GET", &url, "Failed to fetch quiz results.").await?;
        read_json(response).await
    }

    // ---------------------------------------------------------------------
    // Documents
    // ---------------------------------------------------------------------

    /// Upload a document. Question generation continues on the server afterwards.
    pub async fn upload_document(&self, upload: &DocumentUpload) -> ApiResult<DocumentMeta> {
        let url = self.url("/documents/upload");
        info!(
            "Uploading '{}' ({} bytes)",
            upload.file_name,
            upload.bytes.len()
        );

        let part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        let mut form = Form::new()
            .part("file", part)
            .text(
                "num_questions_per_chunk",
                upload.num_questions_per_chunk.to_string(),
            )
            .text("difficulty", upload.difficulty.to_string());
        if let Some(category) = &upload.category {
            form = form.text("category", category.clone());
        }

        let builder = self.http_client.post(&url).multipart(form);
        let response = send(
            builder,
            "POST",
            &url,
            "Failed to upload document and generate MCQs.",
        )
        .await?;
        read_json(response).await
    }

    pub async fn list_documents(&self) -> ApiResult<Vec<DocumentMeta>> {
        let url = self.url("/documents/uploaded");
        let builder = self.http_client.get(&url);
        let response = send(builder, "GET", &url, "Failed to fetch uploaded documents.").await?;
        read_json(response).await
    }

    // ---------------------------------------------------------------------
    // Export & health
    // ---------------------------------------------------------------------

    /// Download the JSON export as raw bytes.
    pub async fn export_questions_json(&self, filter: &ExportFilter) -> ApiResult<Vec<u8>> {
        let url = self.url("/export/json");
        let builder = self.http_client.get(&url).query(&filter.query_pairs());
        let response = send(builder, "GET", &url, "Failed to export questions.").await?;
        let bytes = response.bytes().await.map_err(|e| ApiError::transport(&e))?;
        debug!("Export payload: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    pub async fn health(&self) -> ApiResult<HealthStatus> {
        let url = self.url("/health");
        let builder = self.http_client.get(&url);
        let response = send(builder, "GET", &url, "Failed to reach the MCQ service.").await?;
        read_json(response).await
    }
}

const USER_AGENT: &str = concat!("mcqdesk/", env!("CARGO_PKG_VERSION"));

fn http_client_builder() -> reqwest::ClientBuilder {
    Client::builder().user_agent(USER_AGENT)
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

/// Send a request and turn non-success statuses into [`ApiError`].
async fn send(
    builder: RequestBuilder,
    method: &str,
    url: &str,
    fallback: &str,
) -> ApiResult<Response> {
    info!("{} {}", method, url);
    let response = builder.send().await.map_err(|e| {
        warn!("{} {} failed: {}", method, url, e);
        ApiError::transport(&e)
    })?;

    let status = response.status();
    if status.is_success() {
        debug!("{} {} -> {}", method, url, status.as_u16());
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_body(&body, fallback);
    warn!(
        "{} {} -> {}: {}",
        method,
        url,
        status.as_u16(),
        err.message()
    );
    Err(err)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await.map_err(|e| ApiError::transport(&e))?;
    serde_json::from_slice(&body).map_err(ApiError::unexpected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slashes_are_dropped() {
        let client = ApiClient::new("http://localhost:8000/api/v1//");
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(
            client.url("/mcq/questions"),
            "http://localhost:8000/api/v1/mcq/questions"
        );
    }

    #[test]
    fn test_with_timeout_builds() {
        let client = ApiClient::with_timeout(DEFAULT_BASE_URL, Some(Duration::from_secs(5)));
        assert!(client.is_ok());
    }
}
