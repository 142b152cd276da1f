// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping specifications for javadoc 8 output.
//! Each spec knows *where the ground truth lives in the HTML* for one kind
//! of page and how to pull it out with the `core::html` marker scanner.
//!
//! ## What lives here
//! - `catalog`: the class index → `EntityRef` work list (plus an offline
//!   variant that lists the page cache).
//! - `class_page`: one class page → `TypeModel`.
//! - `decl`: one raw `<pre>` declaration → a normalized signature line.
//!
//! ## What does **not** live here
//! - **Downloading and caching**: `scrape::fetch_all` and `core::net`.
//! - **Rendering**: `emit` turns the model into text, `file` writes it.
//!
//! ## Typical call chain
//! ```text
//! GUI / CLI → scrape::run → specs::catalog::load
//!                        ↘ scrape::parse_all → specs::class_page::translate_page
//!                                           ↘ emit::emit → file::write_skeleton
//! ```
//!
//! ## Conventions & invariants
//! - Markers are exact, case-sensitive strings from `config::consts`.
//! - Scans move forward only within a page; optional sections may be absent.
//! - A missing *required* marker is an `Error::Structure` for that page only.

pub mod catalog;
pub mod class_page;
pub mod decl;
