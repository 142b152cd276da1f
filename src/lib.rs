// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;

pub mod entity;
pub mod model;
pub mod specs;
pub mod emit;

pub mod file;
pub mod progress;
pub mod scrape;

pub mod cli;
pub mod gui;

pub use error::{Error, Result};
