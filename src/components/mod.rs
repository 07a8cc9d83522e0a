// Reusable rendering pieces shared by the views

pub mod confirm_dialog;
pub mod edit_question_modal;
pub mod footer;
pub mod form_fields;
pub mod header;
pub mod loading_spinner;
pub mod message_box;
pub mod question_card;

pub use confirm_dialog::{ConfirmDialog, Confirmation};
pub use edit_question_modal::{EditQuestionModal, ModalOutcome};
pub use message_box::{Alert, MessageBox};
pub use question_card::QuestionCard;
// Footer, Header, FormFields and LoadingSpinner are used via their module paths
