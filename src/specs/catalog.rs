// src/specs/catalog.rs
//! The class index (`allclasses-noframe.html`): one `<li><a href="...">` per
//! documented type. Produces the work list for both pipeline stages.

use std::fs;
use std::path::Path;

use crate::config::consts::{CACHE_EXT, INDEX_ENTRY};
use crate::config::options::FetchOptions;
use crate::core::net::Fetch;
use crate::entity::EntityRef;
use crate::error::{Error, Result};

/// Every index entry, in page order.
/// `java/util/Map.Entry.html` → `java.util.Map.Entry` at `base_url + target`.
pub fn parse_index(html: &str, base_url: &str) -> Vec<EntityRef> {
    let mut out = Vec::new();

    for line in html.lines() {
        let Some(rest) = line.trim_start().strip_prefix(INDEX_ENTRY) else { continue };
        let Some(end) = rest.find('"') else { continue };
        let target = &rest[..end];

        let name = target.strip_suffix(".html").unwrap_or(target).replace('/', ".");
        match EntityRef::new(name, join!(base_url, target)) {
            Ok(e) => out.push(e),
            Err(e) => logd!("index: skipping {target:?}: {e}"),
        }
    }
    out
}

/// Download the index and keep what `opts.only` accepts.
/// No index, or an index with no entries, is fatal for the run.
pub fn load(fetcher: &dyn Fetch, opts: &FetchOptions) -> Result<Vec<EntityRef>> {
    let url = opts.index_url();
    let html = fetcher.fetch(&url).map_err(|e| Error::Catalog(e.to_string()))?;

    let all = parse_index(&html, &opts.base_url);
    if all.is_empty() {
        return Err(Error::Catalog(format!("no entries in {url}")));
    }

    let total = all.len();
    let kept: Vec<EntityRef> = all.into_iter().filter(|e| opts.accepts(e.name())).collect();
    logf!("index: {} of {} entries selected", kept.len(), total);
    Ok(kept)
}

/// Offline catalog: every page already in the cache.
/// `cache/java/lang/String.html` → `java.lang.String`, sorted by name.
pub fn from_cache(cache_root: &Path, opts: &FetchOptions) -> Result<Vec<EntityRef>> {
    let mut targets = Vec::new();
    collect_cached(cache_root, "", &mut targets)?;
    targets.sort();

    let mut out = Vec::new();
    for target in targets {
        let name = target.strip_suffix(&format!(".{CACHE_EXT}")).unwrap_or(&target).replace('/', ".");
        match EntityRef::new(name, join!(&opts.base_url, &page_target(&target))) {
            Ok(e) if opts.accepts(e.name()) => out.push(e),
            Ok(_) => {}
            Err(e) => logd!("cache: skipping {target:?}: {e}"),
        }
    }

    if out.is_empty() {
        return Err(Error::Catalog(format!("no cached pages under {}", cache_root.display())));
    }
    logf!("cache: {} cached entities selected", out.len());
    Ok(out)
}

/// Index target for a cache path. Nested types are cached one directory
/// per enclosing type (`java/util/Map/Entry.html`), but javadoc names their
/// page after the dotted type (`java/util/Map.Entry.html`). Package segments
/// are lower case, so the first capitalized segment starts the type part.
fn page_target(cache_rel: &str) -> String {
    let segments: Vec<&str> = cache_rel.split('/').collect();
    let Some(first_type) = segments.iter().position(|seg| seg.starts_with(|c: char| c.is_ascii_uppercase())) else {
        return s!(cache_rel);
    };
    let type_part = segments[first_type..].join(".");
    if first_type == 0 {
        type_part
    } else {
        join!(&segments[..first_type].join("/"), "/", &type_part)
    }
}

/// Relative `a/b/C.html` paths of cached pages below `dir`.
fn collect_cached(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if prefix.is_empty() => return Err(Error::Catalog(format!("{}: {e}", dir.display()))),
        Err(_) => return Ok(()),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let rel = if prefix.is_empty() { file_name } else { join!(prefix, "/", &file_name) };

        if path.is_dir() {
            collect_cached(&path, &rel, out)?;
        } else if path.extension().is_some_and(|x| x == CACHE_EXT) {
            out.push(rel);
        }
    }
    Ok(())
}
