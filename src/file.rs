// src/file.rs

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::emit::Skeleton;
use crate::entity::EntityRef;
use crate::error::{Error, Result};

/// Paths of one written skeleton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Written {
    pub header: PathBuf,
    pub source: PathBuf,
}

/// Write both artifacts for `entity` under `out_root`, or neither.
/// Both temp files are complete before either is renamed into place; a
/// failed second rename takes the first artifact back out.
pub fn write_skeleton(entity: &EntityRef, out_root: &Path, skeleton: &Skeleton) -> Result<Written> {
    let header = entity.header_path(out_root);
    let source = entity.source_path(out_root);

    let header_tmp = stage(&header, &skeleton.header)?;
    let source_tmp = match stage(&source, &skeleton.source) {
        Ok(tmp) => tmp,
        Err(e) => {
            let _ = fs::remove_file(&header_tmp);
            return Err(e);
        }
    };

    if let Err(e) = commit(&header_tmp, &header) {
        let _ = fs::remove_file(&source_tmp);
        return Err(e);
    }
    if let Err(e) = commit(&source_tmp, &source) {
        loge!("write: {entity}: source not written, removing {}", header.display());
        let _ = fs::remove_file(&header);
        return Err(e);
    }
    Ok(Written { header, source })
}

/// Store a fetched page verbatim at its cache path.
pub fn write_cache_page(entity: &EntityRef, cache_root: &Path, body: &str) -> Result<PathBuf> {
    let path = entity.cache_path(cache_root);
    write_replacing(&path, body)?;
    Ok(path)
}

/// Write to a sibling temp file, then rename over `path`.
/// Readers polling for `path` never see a half-written file.
pub fn write_replacing(path: &Path, contents: &str) -> Result<()> {
    let tmp = stage(path, contents)?;
    commit(&tmp, path)
}

/// Complete `<path>.part` sibling holding `contents`.
fn stage(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".part");
    let tmp = path.with_file_name(tmp_name);

    let written = fs::File::create(&tmp).and_then(|mut f| {
        f.write_all(contents.as_bytes())?;
        f.flush()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(tmp)
}

fn commit(tmp: &Path, path: &Path) -> Result<()> {
    if let Err(e) = fs::rename(tmp, path) {
        let _ = fs::remove_file(tmp);
        return Err(e.into());
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

/// Destination text from the GUI/CLI → directory path.
pub fn normalize_dir_path(p: &str) -> PathBuf {
    PathBuf::from(normalize_separators(p.trim()))
}
