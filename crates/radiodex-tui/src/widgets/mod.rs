pub mod pane_chrome;
pub mod text_field;
pub mod toast;
