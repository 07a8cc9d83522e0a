//! Background execution of API calls for the TUI.
//!
//! Views never await the network themselves. They hand an [`ApiRequest`] to the
//! [`Dispatcher`], which runs it on a tokio task and delivers the matching
//! [`ApiResponse`] back over a channel that the event loop drains every tick.
//! Responses are tagged with the mount generation that issued them, and
//! [`Dispatcher::remount`] aborts outstanding work so a view that has been left
//! never sees a late result.

use crate::api::{
    ApiClient, ApiError, ApiResult, Difficulty, DocumentMeta, DocumentUpload, ExportFilter,
    GenerateRequest, Question, QuestionDraft, QuestionFilter, QuizQuestion, QuizRequest,
    QuizResult, QuizSubmission,
};
use crate::services::export::save_export;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Work a view asks the dispatcher to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    GenerateMcqs(GenerateRequest),
    ListQuestions(QuestionFilter),
    CreateQuestion(QuestionDraft),
    UpdateQuestion { id: String, draft: QuestionDraft },
    DeleteQuestion { id: String },
    GenerateQuiz(QuizRequest),
    SubmitQuiz(QuizSubmission),
    /// Read `path` from disk and upload it.
    UploadDocument {
        path: PathBuf,
        num_questions_per_chunk: u32,
        difficulty: Difficulty,
        category: Option<String>,
    },
    ListDocuments,
    /// Download the JSON export and save it under `dir`.
    ExportJson { filter: ExportFilter, dir: PathBuf },
}

impl ApiRequest {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::GenerateMcqs(_) => "generate-mcqs",
            ApiRequest::ListQuestions(_) => "list-questions",
            ApiRequest::CreateQuestion(_) => "create-question",
            ApiRequest::UpdateQuestion { .. } => "update-question",
            ApiRequest::DeleteQuestion { .. } => "delete-question",
            ApiRequest::GenerateQuiz(_) => "generate-quiz",
            ApiRequest::SubmitQuiz(_) => "submit-quiz",
            ApiRequest::UploadDocument { .. } => "upload-document",
            ApiRequest::ListDocuments => "list-documents",
            ApiRequest::ExportJson { .. } => "export-json",
        }
    }
}

/// Outcome of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    McqsGenerated(ApiResult<Vec<Question>>),
    Questions(ApiResult<Vec<Question>>),
    QuestionCreated(ApiResult<Question>),
    QuestionUpdated {
        id: String,
        result: ApiResult<Question>,
    },
    QuestionDeleted {
        id: String,
        result: ApiResult<()>,
    },
    QuizGenerated(ApiResult<Vec<QuizQuestion>>),
    QuizSubmitted(ApiResult<QuizResult>),
    DocumentUploaded(ApiResult<DocumentMeta>),
    Documents(ApiResult<Vec<DocumentMeta>>),
    Exported(ApiResult<PathBuf>),
}

struct Envelope {
    mount: u64,
    response: ApiResponse,
}

/// Runs API requests off the UI thread and routes results to the mounted view.
pub struct Dispatcher {
    runtime: Runtime,
    client: Arc<ApiClient>,
    sender: Sender<Envelope>,
    receiver: Receiver<Envelope>,
    in_flight: Vec<JoinHandle<()>>,
    mount: u64,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to start async runtime")?;
        let (sender, receiver) = mpsc::channel();
        Ok(Self {
            runtime,
            client: Arc::new(client),
            sender,
            receiver,
            in_flight: Vec::new(),
            mount: 0,
        })
    }

    /// Current mount generation.
    pub fn mount(&self) -> u64 {
        self.mount
    }

    /// Spawn `request` for the current mount.
    pub fn dispatch(&mut self, request: ApiRequest) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let mount = self.mount;
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        debug!("Dispatching {} (mount {})", request.name(), mount);

        let handle = self.runtime.spawn(async move {
            let response = execute(&client, request).await;
            // The receiver lives as long as the dispatcher; a send error only
            // happens during shutdown.
            let _ = sender.send(Envelope { mount, response });
        });
        self.in_flight.push(handle);
    }

    /// Abort outstanding requests and start a new mount generation.
    pub fn remount(&mut self) -> u64 {
        let mut aborted = 0;
        for handle in self.in_flight.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            info!("Cancelled {} in-flight request(s) on navigation", aborted);
        }
        self.mount += 1;
        self.mount
    }

    /// Whether any request for the current mount is still running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.iter().any(|handle| !handle.is_finished())
    }

    /// Next response for the current mount, if one has arrived.
    pub fn try_recv(&self) -> Option<ApiResponse> {
        while let Ok(envelope) = self.receiver.try_recv() {
            if let Some(response) = self.accept(envelope) {
                return Some(response);
            }
        }
        None
    }

    /// Block up to `timeout` for the next response for the current mount.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ApiResponse> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(envelope) => {
                    if let Some(response) = self.accept(envelope) {
                        return Some(response);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    fn accept(&self, envelope: Envelope) -> Option<ApiResponse> {
        if envelope.mount == self.mount {
            Some(envelope.response)
        } else {
            debug!(
                "Dropping stale response from mount {} (current {})",
                envelope.mount, self.mount
            );
            None
        }
    }
}

async fn execute(client: &ApiClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::GenerateMcqs(req) => ApiResponse::McqsGenerated(client.generate_mcqs(&req).await),
        ApiRequest::ListQuestions(filter) => {
            ApiResponse::Questions(client.list_questions(&filter).await)
        }
        ApiRequest::CreateQuestion(draft) => {
            ApiResponse::QuestionCreated(client.create_question(&draft).await)
        }
        ApiRequest::UpdateQuestion { id, draft } => {
            let result = client.update_question(&id, &draft).await;
            ApiResponse::QuestionUpdated { id, result }
        }
        ApiRequest::DeleteQuestion { id } => {
            let result = client.delete_question(&id).await;
            ApiResponse::QuestionDeleted { id, result }
        }
        ApiRequest::GenerateQuiz(req) => ApiResponse::QuizGenerated(client.generate_quiz(&req).await),
        ApiRequest::SubmitQuiz(submission) => {
            ApiResponse::QuizSubmitted(client.submit_quiz(&submission).await)
        }
        ApiRequest::UploadDocument {
            path,
            num_questions_per_chunk,
            difficulty,
            category,
        } => {
            let result = async {
                let bytes = tokio::fs::read(&path).await.map_err(|e| {
                    ApiError::new(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| "document".to_string());
                let upload = DocumentUpload {
                    file_name,
                    bytes,
                    num_questions_per_chunk,
                    difficulty,
                    category,
                };
                client.upload_document(&upload).await
            }
            .await;
            ApiResponse::DocumentUploaded(result)
        }
        ApiRequest::ListDocuments => ApiResponse::Documents(client.list_documents().await),
        ApiRequest::ExportJson { filter, dir } => {
            let result = match client.export_questions_json(&filter).await {
                Ok(bytes) => save_export(&dir, &bytes).map_err(|e| ApiError::new(format!("{:#}", e))),
                Err(err) => Err(err),
            };
            ApiResponse::Exported(result)
        }
    }
}
