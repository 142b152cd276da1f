// tests/classify.rs
use std::fs;
use std::path::PathBuf;

use docskel::config::options::OutputOptions;
use docskel::entity::EntityRef;
use docskel::file;
use docskel::model::{Kind, Translation};
use docskel::progress::CountingProgress;
use docskel::scrape::{self, Outcome, ParseLimits};
use docskel::specs::class_page::translate_page;

/// Keep the debug log out of the working tree.
fn quiet_log() {
    docskel::log::set_log_file(std::env::temp_dir().join(format!("docskel_classify_{}.log", std::process::id())));
}

fn tmp_dir(name: &str) -> PathBuf {
    quiet_log();
    let mut p = std::env::temp_dir();
    p.push(format!("docskel_classify_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn titled(title: &str) -> String {
    format!(
        "<div class=\"header\">\n<h2 title=\"{title}\" class=\"title\">{title}</h2>\n</div>\n<pre>public {} X</pre>",
        title.split(' ').next().unwrap_or("").to_lowercase()
    )
}

#[test]
fn titles_classify_by_first_word() {
    quiet_log();
    let x = EntityRef::new("p.X", "u").unwrap();
    assert_eq!(translate_page(&titled("Interface X"), &x).unwrap(), Translation::NotImplemented(Kind::Interface));
    assert_eq!(translate_page(&titled("Enum Y"), &x).unwrap(), Translation::NotImplemented(Kind::Enum));
    assert!(matches!(translate_page(&titled("Class X"), &x).unwrap(), Translation::Class(_)));
}

#[test]
fn interfaces_and_enums_write_nothing() {
    let dir = tmp_dir("kinds");
    let output = OutputOptions { cache_root: dir.clone(), out_root: dir.join("out") };
    let x = EntityRef::new("p.X", "u").unwrap();
    let y = EntityRef::new("p.Y", "u").unwrap();
    file::write_cache_page(&x, &dir, &titled("Interface X")).unwrap();
    file::write_cache_page(&y, &dir, &titled("Enum Y")).unwrap();

    assert_eq!(scrape::translate_cached(&x, &output).unwrap(), Outcome::NotImplemented(Kind::Interface));

    let mut progress = CountingProgress::default();
    let report = scrape::parse_all(&[x, y], &output, &ParseLimits::unbounded(), &mut progress);

    assert_eq!(report.not_implemented, vec!["p.X", "p.Y"]);
    assert!(report.failed.is_empty());
    assert!(report.written.is_empty());
    assert_eq!(progress.failed.len(), 2);
    assert!(!dir.join("out").exists());
}
