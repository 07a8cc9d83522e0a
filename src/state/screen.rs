//! The mounted view and its exclusively owned state.

use crate::screens::{
    AllQuestionsScreen, CreateQuestionScreen, DocumentUploadScreen, ExportOptionsScreen,
    GenerateScreen, HomeScreen, QuizTakerScreen, Screen,
};
use crate::ui::ViewId;

/// Union of all view states.
///
/// Only one exists at a time. A view is built fresh on every navigation, so
/// nothing carries over from an earlier visit.
///
/// # Example
///
/// ```rust,ignore
/// let mut state = ScreenState::for_view(ViewId::TakeQuiz);
/// let action = state.as_screen_mut().on_enter(&ctx)?;
/// ```
pub enum ScreenState {
    Home(HomeScreen),
    Generate(Box<GenerateScreen>),
    AllQuestions(Box<AllQuestionsScreen>),
    CreateQuestion(Box<CreateQuestionScreen>),
    TakeQuiz(Box<QuizTakerScreen>),
    UploadDocument(Box<DocumentUploadScreen>),
    ExportOptions(Box<ExportOptionsScreen>),
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::Home(HomeScreen::new())
    }
}

impl ScreenState {
    /// Fresh state for `view`.
    pub fn for_view(view: ViewId) -> Self {
        match view {
            ViewId::Home => Self::Home(HomeScreen::new()),
            ViewId::Generate => Self::Generate(Box::default()),
            ViewId::AllQuestions => Self::AllQuestions(Box::default()),
            ViewId::CreateQuestion => Self::CreateQuestion(Box::default()),
            ViewId::TakeQuiz => Self::TakeQuiz(Box::default()),
            ViewId::UploadDocument => Self::UploadDocument(Box::default()),
            ViewId::ExportOptions => Self::ExportOptions(Box::default()),
        }
    }

    pub fn view(&self) -> ViewId {
        match self {
            Self::Home(_) => ViewId::Home,
            Self::Generate(_) => ViewId::Generate,
            Self::AllQuestions(_) => ViewId::AllQuestions,
            Self::CreateQuestion(_) => ViewId::CreateQuestion,
            Self::TakeQuiz(_) => ViewId::TakeQuiz,
            Self::UploadDocument(_) => ViewId::UploadDocument,
            Self::ExportOptions(_) => ViewId::ExportOptions,
        }
    }

    pub fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Home(s) => s,
            Self::Generate(s) => &**s,
            Self::AllQuestions(s) => &**s,
            Self::CreateQuestion(s) => &**s,
            Self::TakeQuiz(s) => &**s,
            Self::UploadDocument(s) => &**s,
            Self::ExportOptions(s) => &**s,
        }
    }

    pub fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Home(s) => s,
            Self::Generate(s) => &mut **s,
            Self::AllQuestions(s) => &mut **s,
            Self::CreateQuestion(s) => &mut **s,
            Self::TakeQuiz(s) => &mut **s,
            Self::UploadDocument(s) => &mut **s,
            Self::ExportOptions(s) => &mut **s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_view_round_trips() {
        for view in ViewId::ALL {
            assert_eq!(ScreenState::for_view(view).view(), view);
        }
    }

    #[test]
    fn test_default_is_home() {
        assert_eq!(ScreenState::default().view(), ViewId::Home);
    }
}
