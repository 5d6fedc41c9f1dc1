pub mod config;
pub mod error;
pub mod help_popup;
pub mod keybinds;
pub mod logging;
pub mod text_input;
pub mod theme;
pub mod tool;
pub mod ui;
