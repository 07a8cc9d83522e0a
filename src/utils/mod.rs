pub mod form;
pub mod layout;
pub mod path;
pub mod text;
pub mod text_input;

// Export utilities that are used
pub use form::{clamp_count, cycle_index, parse_categories, NumberField};
pub use layout::{center_popup, center_rect, create_standard_layout};
pub use path::{
    expand_path, format_path_for_display, get_config_dir, get_config_path, get_home_dir,
    get_log_dir, CONFIG_DIR_ENV,
};
pub use text::{option_letter, truncate, wrap_text};
pub use text_input::TextInput;
