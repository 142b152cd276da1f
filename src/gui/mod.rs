// src/gui/mod.rs
pub mod app;
pub mod progress;

pub use app::run;
