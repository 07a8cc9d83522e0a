//! Document upload for background question generation, plus the list of
//! documents uploaded so far.

use crate::api::{Difficulty, DocumentMeta};
use crate::components::form_fields::FormFields;
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::message_box::MessageBox;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{ApiRequest, ApiResponse};
use crate::styles::theme;
use crate::utils::form::{cycle_index, NumberField};
use crate::utils::path::expand_path;
use crate::utils::text_input::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_PER_CHUNK: u32 = 2;
pub const MIN_PER_CHUNK: u32 = 1;
pub const MAX_PER_CHUNK: u32 = 5;
/// File types the service can parse.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "docx"];
pub const NO_FILE_MESSAGE: &str = "Please select a file to upload.";

/// Whether `path` has one of the accepted extensions (case-insensitive).
pub fn is_accepted_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

pub fn upload_success_message(filename: &str) -> String {
    format!(
        "Document \"{}\" uploaded successfully! MCQs are being generated in the background.",
        filename
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    File,
    PerChunk,
    Difficulty,
    Category,
    Submit,
}

const FIELDS: [Field; 5] = [
    Field::File,
    Field::PerChunk,
    Field::Difficulty,
    Field::Category,
    Field::Submit,
];

pub struct DocumentUploadScreen {
    file_path: TextInput,
    per_chunk: NumberField,
    difficulty: Difficulty,
    category: TextInput,
    focus: usize,
    uploading: bool,
    error: Option<String>,
    success: Option<String>,
    documents: Vec<DocumentMeta>,
    fetching_documents: bool,
    documents_error: Option<String>,
}

impl Default for DocumentUploadScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentUploadScreen {
    pub fn new() -> Self {
        Self {
            file_path: TextInput::new(),
            per_chunk: NumberField::new(DEFAULT_PER_CHUNK, MIN_PER_CHUNK, MAX_PER_CHUNK),
            difficulty: Difficulty::default(),
            category: TextInput::new(),
            focus: 0,
            uploading: false,
            error: None,
            success: None,
            documents: Vec::new(),
            fetching_documents: false,
            documents_error: None,
        }
    }

    pub fn documents(&self) -> &[DocumentMeta] {
        &self.documents
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn file_path(&self) -> &str {
        self.file_path.text()
    }

    fn focused(&self) -> Field {
        FIELDS[self.focus]
    }

    fn fetch_documents(&mut self) -> ScreenAction {
        self.fetching_documents = true;
        self.documents_error = None;
        ScreenAction::Request(ApiRequest::ListDocuments)
    }

    /// Check the selected file and build the upload request.
    pub fn submit(&mut self) -> ScreenAction {
        if self.uploading {
            return ScreenAction::None;
        }
        self.error = None;
        self.success = None;

        let Some(raw) = self.file_path.non_empty() else {
            self.error = Some(NO_FILE_MESSAGE.to_string());
            return ScreenAction::None;
        };
        let path: PathBuf = expand_path(&raw);
        if !is_accepted_file(&path) {
            self.error = Some("Please select a PDF, TXT or DOCX document.".to_string());
            return ScreenAction::None;
        }
        if !path.is_file() {
            self.error = Some(format!("File not found: {}", path.display()));
            return ScreenAction::None;
        }

        self.per_chunk.normalize();
        self.uploading = true;
        info!("Uploading {:?}", path);
        ScreenAction::Request(ApiRequest::UploadDocument {
            path,
            num_questions_per_chunk: self.per_chunk.value(),
            difficulty: self.difficulty,
            category: self.category.non_empty(),
        })
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, tick: u64) -> Result<()> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Upload Document to Generate MCQs ")
            .title_style(t.title_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let banner = self
            .error
            .as_deref()
            .or(self.success.as_deref())
            .map_or(0, |m| MessageBox::height(m, inner.width));
        let rows = Layout::vertical([
            Constraint::Length(banner),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
        let focused = self.focused();

        if let Some(error) = &self.error {
            MessageBox::render_error(frame, rows[0], error)?;
        } else if let Some(success) = &self.success {
            MessageBox::render_success(frame, rows[0], success)?;
        }

        frame.render_text_input_widget(
            TextInputWidget::new(&self.file_path)
                .title("Select Document (PDF, TXT, DOCX)")
                .placeholder("~/Documents/notes.pdf")
                .required(true)
                .focused(focused == Field::File)
                .disabled(self.uploading),
            rows[1],
        );
        let selected = self
            .file_path
            .non_empty()
            .map(|raw| expand_path(&raw))
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));
        if let Some(name) = selected {
            frame.render_widget(
                Paragraph::new(format!(" Selected: {}", name)).style(t.muted_style()),
                rows[2],
            );
        }

        frame.render_text_input_widget(
            TextInputWidget::number(&self.per_chunk)
                .title("Questions per Chunk (1-5)")
                .required(true)
                .focused(focused == Field::PerChunk),
            rows[3],
        );
        FormFields::render_choice(
            frame,
            rows[4],
            "Difficulty",
            self.difficulty.label(),
            focused == Field::Difficulty,
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.category)
                .title("Category (optional)")
                .placeholder("e.g., Biology, History")
                .focused(focused == Field::Category),
            rows[5],
        );

        if self.uploading {
            LoadingSpinner::render(frame, rows[7], tick, Some("Uploading..."));
        } else {
            FormFields::render_button(
                frame,
                rows[7],
                "Upload & Generate MCQs",
                focused == Field::Submit,
                false,
            );
        }
        Ok(())
    }

    fn render_documents(&self, frame: &mut Frame, area: Rect, tick: u64) -> Result<()> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Previously Uploaded Documents ")
            .title_style(t.title_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.fetching_documents {
            LoadingSpinner::render(frame, inner, tick, Some("Loading documents..."));
        } else if let Some(error) = &self.documents_error {
            let height = MessageBox::height(error, inner.width).min(inner.height);
            MessageBox::render_error(frame, Rect { height, ..inner }, error)?;
        } else if self.documents.is_empty() {
            frame.render_widget(
                Paragraph::new("No documents uploaded yet.")
                    .style(t.muted_style())
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        } else {
            let items: Vec<ListItem> = self
                .documents
                .iter()
                .map(|doc| {
                    let uploaded = doc.uploaded_at().map_or_else(
                        || doc.upload_date.clone(),
                        |at| format!("{} at {}", at.format("%Y-%m-%d"), at.format("%H:%M:%S")),
                    );
                    ListItem::new(vec![
                        Line::styled(
                            format!("📄 {}", doc.filename),
                            t.text_style().add_modifier(Modifier::BOLD),
                        ),
                        Line::styled(
                            format!("   Uploaded: {} ({})", uploaded, doc.size_label()),
                            t.muted_style(),
                        ),
                    ])
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
        Ok(())
    }
}

impl Screen for DocumentUploadScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let [form_area, docs_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);
        self.render_form(frame, form_area, ctx.tick)?;
        self.render_documents(frame, docs_area, ctx.tick)
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Tab => self.focus = cycle_index(self.focus, FIELDS.len(), true),
            KeyCode::BackTab => self.focus = cycle_index(self.focus, FIELDS.len(), false),
            KeyCode::Enter => return Ok(self.submit()),
            code => match self.focused() {
                Field::File if !self.uploading => {
                    if self.file_path.handle_key(code) {
                        self.error = None;
                        self.success = None;
                    }
                }
                Field::PerChunk => {
                    self.per_chunk.handle_key(code);
                }
                Field::Category => {
                    self.category.handle_key(code);
                }
                Field::Difficulty => match code {
                    KeyCode::Left => self.difficulty = self.difficulty.prev(),
                    KeyCode::Right | KeyCode::Char(' ') => {
                        self.difficulty = self.difficulty.next();
                    }
                    _ => {}
                },
                Field::File | Field::Submit => {}
            },
        }
        Ok(ScreenAction::None)
    }

    fn on_response(&mut self, response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match response {
            ApiResponse::Documents(result) => {
                self.fetching_documents = false;
                match result {
                    Ok(documents) => self.documents = documents,
                    Err(err) => {
                        warn!("Failed to fetch documents: {}", err);
                        self.documents_error = Some(err.message().to_string());
                    }
                }
            }
            ApiResponse::DocumentUploaded(result) => {
                self.uploading = false;
                match result {
                    Ok(document) => {
                        info!("Uploaded document {} ({})", document.filename, document.id);
                        self.success = Some(upload_success_message(&document.filename));
                        self.file_path.clear();
                        return Ok(self.fetch_documents());
                    }
                    Err(err) => {
                        warn!("Document upload failed: {}", err);
                        self.error = Some(err.message().to_string());
                    }
                }
            }
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        matches!(self.focused(), Field::File | Field::PerChunk | Field::Category)
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(self.fetch_documents())
    }

    fn footer_hints(&self) -> &'static str {
        "Field: Tab/Shift+Tab | Change: ←→/↑↓ | Upload: Enter | Home: Esc"
    }
}
