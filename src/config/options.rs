// src/config/options.rs
use std::path::{Path, PathBuf};
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub output: OutputOptions,
}

impl AppOptions {
    /// Point both the page cache and the generated sources at one folder,
    /// which is how the GUI "destination" field works.
    pub fn with_destination(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            fetch: FetchOptions::default(),
            output: OutputOptions { cache_root: dir.clone(), out_root: dir },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// Documentation root; entity URLs are `base_url + relative link`.
    pub base_url: String,
    /// Index page listing every documented type, relative to `base_url`.
    pub index_page: String,
    /// Keep only entities whose qualified name starts with one of these.
    pub only: Vec<String>,
    /// Skip the network stage entirely; parse whatever is already cached.
    pub parse_only: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            index_page: s!(INDEX_PAGE),
            only: Vec::new(),
            parse_only: false,
        }
    }
}

impl FetchOptions {
    pub fn index_url(&self) -> String {
        join!(&self.base_url, &self.index_page)
    }

    pub fn accepts(&self, qualified_name: &str) -> bool {
        self.only.is_empty() || self.only.iter().any(|p| qualified_name.starts_with(p.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    pub cache_root: PathBuf,
    pub out_root: PathBuf,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            cache_root: PathBuf::from(DEFAULT_OUT_DIR),
            out_root: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl OutputOptions {
    pub fn cache_root(&self) -> &Path { &self.cache_root }
    pub fn out_root(&self) -> &Path { &self.out_root }
}
