// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://docs.oracle.com/javase/8/docs/api/";
pub const INDEX_PAGE: &str = "allclasses-noframe.html";
pub const USER_AGENT: &str = "docskel/0.3";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Local cache + output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const CACHE_EXT: &str = "html";
pub const HEADER_EXT: &str = "h";
pub const SOURCE_EXT: &str = "c";
pub const LOG_FILE: &str = ".docskel/debug.log";

// Scheduling
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const IDLE_PAUSE_MS: u64 = 5; // after a full rotation found nothing ready

// Page markers (javadoc 8 layout)
pub const TITLE_MARKER: &str = "<h2 title=\"";
pub const TITLE_END: &str = "</h2>";
pub const INHERITANCE_MARKER: &str = "<ul class=\"inheritance\">";
pub const DESCRIPTION_MARKER: &str = "<div class=\"description\">";
pub const LINK_MARKER: &str = "<a href=\"";
pub const INTERFACES_MARKER: &str = "All Implemented Interfaces:";
pub const DD_OPEN: &str = "<dd>";
pub const DD_CLOSE: &str = "</dd>";
pub const PRE_OPEN: &str = "<pre>";
pub const PRE_CLOSE: &str = "</pre>";
pub const FIELD_DETAIL: &str = "<h3>Field Detail</h3>";
pub const CONSTRUCTOR_DETAIL: &str = "<h3>Constructor Detail</h3>";
pub const METHOD_DETAIL: &str = "<h3>Method Detail</h3>";
pub const END_OF_CLASS_DATA: &str = "<!-- ========= END OF CLASS DATA ========= -->";
pub const MEMBER_HEADER: &str = "<h4>";
pub const DOC_BLOCK: &str = "<div class=\"block\">";
pub const DEPRECATED_MARKER: &str = "Deprecated";
pub const INDEX_ENTRY: &str = "<li><a href=\"";

// Emission
pub const SELF_PLACEHOLDER: &str = "$Self";
pub const BODY_PLACEHOLDER: &str = "{ TODO }";
