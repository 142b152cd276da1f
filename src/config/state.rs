// src/config/state.rs
use super::consts::DEFAULT_OUT_DIR;
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Destination folder as typed in the text field
    pub destination_text: String,

    /// Comma-separated name prefixes; empty = everything
    pub only_text: String,

    pub window_w: f32,
    pub window_h: f32,

    /// Cap on log lines kept in the scroll pane
    pub max_log_lines: usize,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            destination_text: s!(DEFAULT_OUT_DIR),
            only_text: s!(),
            window_w: 800.0,
            window_h: 420.0,
            max_log_lines: 5_000,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
