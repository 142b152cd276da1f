// src/core/mod.rs

pub mod html;
pub mod net;

pub use html::Cursor;
pub use net::{Fetch, HttpFetcher, StaticFetcher};
