// src/entity.rs
//! One documented type: its fully-qualified name and where its page lives.
//! Knows nothing about HTML; only derives names and local paths.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::consts::{CACHE_EXT, HEADER_EXT, SOURCE_EXT};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityRef {
    qualified_name: String,
    source_url: String,
}

impl EntityRef {
    /// Fails if the name is empty or has an empty segment (`a..b`, `.a`, `a.`).
    pub fn new(qualified_name: impl Into<String>, source_url: impl Into<String>) -> Result<Self> {
        let qualified_name = qualified_name.into();
        if qualified_name.split('.').any(|seg| seg.trim().is_empty()) {
            return Err(Error::InvalidName(qualified_name));
        }
        Ok(Self { qualified_name, source_url: source_url.into() })
    }

    /// e.g. `java.lang.String`
    pub fn name(&self) -> &str { &self.qualified_name }

    pub fn url(&self) -> &str { &self.source_url }

    /// e.g. `String` for `java.lang.String`
    pub fn short_name(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(i) => &self.qualified_name[i + 1..],
            None => &self.qualified_name,
        }
    }

    /// e.g. `java.lang` (empty for the default package)
    pub fn package(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(i) => &self.qualified_name[..i],
            None => "",
        }
    }

    /// Identifier-safe name used in generated code: `java_lang_String`.
    pub fn ident(&self) -> String {
        self.qualified_name.replace('.', "_")
    }

    /// `root/java/lang/String.<ext>`
    pub fn local_path(&self, root: &Path, ext: &str) -> PathBuf {
        let mut p = root.to_path_buf();
        for seg in self.qualified_name.split('.') {
            p.push(seg);
        }
        p.set_extension(ext);
        p
    }

    pub fn cache_path(&self, cache_root: &Path) -> PathBuf {
        self.local_path(cache_root, CACHE_EXT)
    }

    pub fn header_path(&self, out_root: &Path) -> PathBuf {
        self.local_path(out_root, HEADER_EXT)
    }

    pub fn source_path(&self, out_root: &Path) -> PathBuf {
        self.local_path(out_root, SOURCE_EXT)
    }

    /// The cache readiness signal: the page exists locally.
    pub fn is_cached(&self, cache_root: &Path) -> bool {
        self.cache_path(cache_root).is_file()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}
