// Reusable UI widgets

pub mod dialog;
pub mod logo;
pub mod menu;
pub mod text_input;

pub use dialog::{Dialog, DialogVariant};
pub use logo::McqLogo;
pub use menu::{Menu, MenuItem, MenuState};
pub use text_input::{TextInputWidget, TextInputWidgetExt};
