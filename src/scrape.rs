// src/scrape.rs
//! Fetch–parse scheduler.
//!
//! Two stages run side by side and only talk through the page cache:
//! - **fetch**: download every page that is not cached yet.
//! - **parse**: a revolving queue; a ref whose page is cached gets built,
//!   emitted and retired, anything else goes back to the tail.
//!
//! A cached page is the only readiness signal. Once written it stays.

use std::{
    collections::VecDeque,
    fs,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use crate::{
    config::{
        consts::{IDLE_PAUSE_MS, REQUEST_PAUSE_MS},
        options::{AppOptions, OutputOptions},
    },
    core::net::Fetch,
    emit::emit,
    entity::EntityRef,
    error::{Error, Result},
    file,
    model::{Kind, Translation},
    progress::Progress,
    specs::{catalog, class_page},
};

/// Terminal state of one parsed ref.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Written,
    NotImplemented(Kind),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub fetched: usize,
    pub already_cached: usize,
    pub failed: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub written: Vec<String>,
    pub not_implemented: Vec<String>,
    pub failed: Vec<String>,
    /// Still queued when the stage stopped (turn cap, or fetch finished without them).
    pub pending: Vec<String>,
    /// Dequeue attempts, productive or not.
    pub turns: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetch: FetchReport,
    pub parse: ParseReport,
}

/// When the parse stage may stop before its queue is empty.
#[derive(Clone, Debug, Default)]
pub struct ParseLimits {
    /// Hard cap on dequeue attempts.
    pub max_turns: Option<usize>,
    /// Set by the fetch stage when its pass is over. After that, a full
    /// rotation with nothing ready means the rest will never be ready.
    pub fetch_done: Option<Arc<AtomicBool>>,
}

impl ParseLimits {
    pub fn unbounded() -> Self { Self::default() }

    pub fn turns(max: usize) -> Self {
        Self { max_turns: Some(max), fetch_done: None }
    }

    fn fetch_finished(&self) -> bool {
        self.fetch_done.as_ref().is_some_and(|f| f.load(Ordering::Acquire))
    }
}

/* ---------------- fetch stage ---------------- */

/// Cache every ref's page. Already-cached refs are not downloaded again.
/// A failed download leaves no cache file behind.
pub fn fetch_all(
    refs: &[EntityRef],
    cache_root: &Path,
    fetcher: &dyn Fetch,
    progress: &mut dyn Progress,
) -> FetchReport {
    let mut report = FetchReport::default();
    progress.begin(refs.len());

    for entity in refs {
        if entity.is_cached(cache_root) {
            report.already_cached += 1;
            progress.item_done(entity.name());
            continue;
        }

        let result = fetcher
            .fetch(entity.url())
            .and_then(|body| file::write_cache_page(entity, cache_root, &body));

        match result {
            Ok(path) => {
                logd!("fetch: {entity} → {}", path.display());
                report.fetched += 1;
                progress.item_done(entity.name());
            }
            Err(e) => {
                loge!("fetch: {entity}: {e}");
                report.failed.push(s!(entity.name()));
                progress.item_failed(entity.name(), &e.to_string());
            }
        }
        thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS)); // be polite
    }

    logf!(
        "fetch: {} downloaded, {} already cached, {} failed",
        report.fetched, report.already_cached, report.failed.len()
    );
    progress.finish();
    report
}

/* ---------------- parse stage ---------------- */

/// Build and emit one cached page.
pub fn translate_cached(entity: &EntityRef, output: &OutputOptions) -> Result<Outcome> {
    let doc = fs::read_to_string(entity.cache_path(output.cache_root()))?;

    match class_page::translate_page(&doc, entity)? {
        Translation::Class(model) => {
            let written = file::write_skeleton(entity, output.out_root(), &emit(&model))?;
            logd!(
                "parse: {entity}: {} members → {}",
                model.member_count(),
                written.header.display()
            );
            Ok(Outcome::Written)
        }
        Translation::NotImplemented(kind) => Ok(Outcome::NotImplemented(kind)),
    }
}

/// Revolving-queue parse of every ref. Returns when the queue is empty
/// or `limits` says stop; whatever is left is reported as pending.
pub fn parse_all(
    refs: &[EntityRef],
    output: &OutputOptions,
    limits: &ParseLimits,
    progress: &mut dyn Progress,
) -> ParseReport {
    let mut report = ParseReport::default();
    let mut queue: VecDeque<EntityRef> = refs.iter().cloned().collect();
    progress.begin(queue.len());

    // consecutive requeues; a full rotation is `queue.len()` of them
    let mut idle = 0usize;
    let mut finished_at_rotation_start = limits.fetch_finished();

    while let Some(entity) = queue.pop_front() {
        if limits.max_turns.is_some_and(|max| report.turns >= max) {
            queue.push_front(entity);
            break;
        }
        report.turns += 1;

        if !entity.is_cached(output.cache_root()) {
            queue.push_back(entity);
            idle += 1;
            if idle >= queue.len() {
                if finished_at_rotation_start {
                    break;
                }
                idle = 0;
                thread::sleep(Duration::from_millis(IDLE_PAUSE_MS));
                finished_at_rotation_start = limits.fetch_finished();
            } else {
                thread::yield_now();
            }
            continue;
        }

        idle = 0;
        finished_at_rotation_start = limits.fetch_finished();

        let name = s!(entity.name());
        match translate_cached(&entity, output) {
            Ok(Outcome::Written) => {
                progress.item_done(&name);
                report.written.push(name);
            }
            Ok(Outcome::NotImplemented(kind)) => {
                logf!("parse: {entity}: {kind:?} pages are not implemented yet");
                progress.item_failed(&name, "not implemented");
                report.not_implemented.push(name);
            }
            Err(e) => {
                loge!("parse: {e}");
                progress.item_failed(&name, &e.to_string());
                report.failed.push(name);
            }
        }
    }

    report.pending = queue.iter().map(|e| s!(e.name())).collect();
    if !report.pending.is_empty() {
        logf!("parse: giving up on {} never-cached page(s)", report.pending.len());
    }
    logf!(
        "parse: {} written, {} not implemented, {} failed",
        report.written.len(), report.not_implemented.len(), report.failed.len()
    );
    progress.finish();
    report
}

/* ---------------- whole run ---------------- */

/// Load the catalog, then run both stages concurrently until done.
/// Only a missing catalog fails the run; everything else is per entity.
pub fn run(
    opts: &AppOptions,
    fetcher: Arc<dyn Fetch>,
    mut fetch_progress: Box<dyn Progress>,
    mut parse_progress: Box<dyn Progress>,
) -> Result<RunSummary> {
    let refs = if opts.fetch.parse_only {
        catalog::from_cache(opts.output.cache_root(), &opts.fetch)?
    } else {
        catalog::load(fetcher.as_ref(), &opts.fetch)?
    };
    logf!("run: {} entities, cache at {}", refs.len(), opts.output.cache_root().display());
    let refs = Arc::new(refs);

    let fetch_done = Arc::new(AtomicBool::new(opts.fetch.parse_only));

    let fetch_handle = if opts.fetch.parse_only {
        fetch_progress.log("Using cached pages only");
        fetch_progress.finish();
        None
    } else {
        let refs = Arc::clone(&refs);
        let done = Arc::clone(&fetch_done);
        let cache_root = opts.output.cache_root.clone();
        let handle = thread::Builder::new().name(s!("fetch")).spawn(move || {
            let report = fetch_all(&refs, &cache_root, fetcher.as_ref(), fetch_progress.as_mut());
            done.store(true, Ordering::Release);
            report
        })?;
        Some(handle)
    };

    let parse_handle = {
        let refs = Arc::clone(&refs);
        let output = opts.output.clone();
        let limits = ParseLimits { max_turns: None, fetch_done: Some(fetch_done) };
        thread::Builder::new().name(s!("parse")).spawn(move || {
            parse_all(&refs, &output, &limits, parse_progress.as_mut())
        })?
    };

    let fetch = match fetch_handle {
        Some(h) => h.join().map_err(|_| stage_panicked("fetch"))?,
        None => FetchReport::default(),
    };
    let parse = parse_handle.join().map_err(|_| stage_panicked("parse"))?;

    Ok(RunSummary { fetch, parse })
}

fn stage_panicked(stage: &str) -> Error {
    Error::Io(std::io::Error::other(format!("{stage} stage panicked")))
}
