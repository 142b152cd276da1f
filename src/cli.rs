// src/cli.rs
use std::{path::PathBuf, sync::Arc};

use crate::config::options::AppOptions;
use crate::core::net::{Fetch, HttpFetcher};
use crate::error::{Error, Result};
use crate::file::normalize_dir_path;
use crate::progress::Progress;
use crate::scrape::{self, RunSummary};
use crate::specs::catalog;

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Help,
    List(AppOptions),
    Generate(AppOptions),
}

pub fn parse_args<I>(args: I) -> Result<Mode>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = AppOptions::default();
    let mut cache: Option<PathBuf> = None;
    let mut list = false;

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        let flag = a.as_str();
        let mut value = || {
            args.next().ok_or_else(|| Error::Usage(format!("Missing value for {flag}")))
        };
        match flag {
            "-o" | "--out" => opts.output.out_root = normalize_dir_path(&value()?),
            "--cache" => cache = Some(normalize_dir_path(&value()?)),
            "--base-url" => {
                let mut url = value()?;
                if !url.ends_with('/') {
                    url.push('/');
                }
                opts.fetch.base_url = url;
            }
            "--only" => {
                let v = value()?;
                opts.fetch.only.extend(
                    v.split(',').map(str::trim).filter(|p| !p.is_empty()).map(String::from),
                );
            }
            "--parse-only" => opts.fetch.parse_only = true,
            "--list" => list = true,
            "-h" | "--help" => return Ok(Mode::Help),
            _ => return Err(Error::Usage(format!("Unknown arg: {flag}"))),
        }
    }

    opts.output.cache_root = cache.unwrap_or_else(|| opts.output.out_root.clone());
    Ok(if list { Mode::List(opts) } else { Mode::Generate(opts) })
}

/// Stage status on stderr: failures as they happen, counts at the end.
struct CliProgress {
    stage: &'static str,
    total: usize,
    done: usize,
    failed: usize,
}

impl CliProgress {
    fn boxed(stage: &'static str) -> Box<dyn Progress> {
        Box::new(Self { stage, total: 0, done: 0, failed: 0 })
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("[{}] {} item(s)", self.stage, total);
    }
    fn log(&mut self, msg: &str) {
        eprintln!("[{}] {msg}", self.stage);
    }
    fn item_done(&mut self, _name: &str) {
        self.done += 1;
        if self.done % 250 == 0 {
            eprintln!("[{}] {}/{}", self.stage, self.done + self.failed, self.total);
        }
    }
    fn item_failed(&mut self, name: &str, reason: &str) {
        self.failed += 1;
        eprintln!("[{}] {name}: {reason}", self.stage);
    }
    fn finish(&mut self) {
        eprintln!("[{}] done: {} ok, {} not ok", self.stage, self.done, self.failed);
    }
}

/// Entry for `bin/cli.rs`. `None` when nothing was generated (help, list).
pub fn run(mode: Mode) -> Result<Option<RunSummary>> {
    match mode {
        Mode::Help => {
            eprintln!("{HELP}");
            Ok(None)
        }
        Mode::List(opts) => {
            let refs = if opts.fetch.parse_only {
                catalog::from_cache(opts.output.cache_root(), &opts.fetch)?
            } else {
                catalog::load(&HttpFetcher::new()?, &opts.fetch)?
            };
            for e in refs {
                println!("{e}");
            }
            Ok(None)
        }
        Mode::Generate(opts) => {
            let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetcher::new()?);
            let summary = scrape::run(&opts, fetcher, CliProgress::boxed("fetch"), CliProgress::boxed("parse"))?;
            let p = &summary.parse;
            println!(
                "{} written, {} not implemented, {} failed, {} never fetched → {}",
                p.written.len(),
                p.not_implemented.len(),
                p.failed.len(),
                p.pending.len(),
                opts.output.out_root().display()
            );
            Ok(Some(summary))
        }
    }
}
