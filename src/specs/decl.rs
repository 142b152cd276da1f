// src/specs/decl.rs
//! Declaration translator.
//!
//! Turns one raw `<pre>` fragment from a javadoc page into a single-spaced
//! declaration line:
//!
//! ```text
//! public&nbsp;<a href="../../java/lang/String.html" title="class in java.lang">String</a>&nbsp;trim()
//!   → public java_lang_String trim()
//! ```
//!
//! - Hyperlinks collapse to the identifier-safe form of their target; the
//!   tooltip and anchor text are dropped. Links to a type parameter
//!   (`title="type parameter in ..."`) keep their anchor text instead;
//!   annotation links keep their `@`.
//! - Every other tag is dropped; `&lt;` `&gt;` `&nbsp;` are decoded.
//! - A bare word equal to the enclosing type's short name becomes
//!   `SELF_PLACEHOLDER` (see `substitute_self`), resolved later by the emitter.
//! - Deprecated and private fragments are refused with a `Skip`, not an error.

use crate::config::consts::{DEPRECATED_MARKER, SELF_PLACEHOLDER};
use crate::core::html::{locate, plain_text};
use crate::model::{TypeRef, Visibility};

/// Why a member fragment was left out of the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skip {
    Deprecated,
    Private,
}

const HREF: &str = "href=\"";
const LINK_CLOSE: &str = "</a>";
const TYPE_PARAM_TITLE: &str = "title=\"type parameter in";
const ANNOTATION_TITLE: &str = "title=\"annotation in";

/// Normalize a link target (`../../java/util/Map.Entry.html#getKey--`)
/// into `java.util.Map.Entry` / `java_util_Map_Entry`.
pub fn type_ref_from_target(target: &str) -> Option<TypeRef> {
    let mut t = target.trim();
    if let Some(scheme) = t.find("://") {
        // absolute link: drop scheme and host
        let after_host = t[scheme + 3..].find('/').map(|i| scheme + 3 + i + 1)?;
        t = &t[after_host..];
    }
    let t = t.split('#').next().unwrap_or("");
    let t = t.strip_suffix(".html").unwrap_or(t);

    let segs: Vec<&str> = t
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".." && *seg != ".")
        .collect();
    if segs.is_empty() {
        return None;
    }

    let dotted = segs.join(".");
    let ident = dotted.replace('.', "_");
    Some(TypeRef { dotted, ident })
}

/// Type reference of a fragment holding a hyperlink (`<a href="...">`),
/// or of a bare link target. `None` when the quoted target is unterminated or empty.
pub fn translate_type_reference(fragment: &str) -> Option<TypeRef> {
    match locate(fragment, HREF, 0) {
        Some(at) => {
            let start = at + HREF.len();
            let end = locate(fragment, "\"", start)?;
            type_ref_from_target(&fragment[start..end])
        }
        None => type_ref_from_target(fragment),
    }
}

const MODIFIERS: &[&str] = &[
    "static", "final", "abstract", "synchronized", "native",
    "transient", "volatile", "default", "strictfp",
];

/// Visibility from the leading modifier words. Annotations are skipped;
/// no explicit keyword means the member was published, so Public.
pub fn visibility_of(raw: &str) -> Visibility {
    for word in plain_text(raw).split(' ') {
        match word {
            "public" => return Visibility::Public,
            "protected" => return Visibility::Protected,
            "private" => return Visibility::Private,
            w if w.starts_with('@') || MODIFIERS.contains(&w) => continue,
            _ => break,
        }
    }
    Visibility::Public
}

/// The one place the enclosing type's own name is recognized.
#[inline]
pub fn substitute_self<'a>(word: &'a str, self_short_name: &str) -> &'a str {
    if word == self_short_name { SELF_PLACEHOLDER } else { word }
}

/// Replace the placeholder with the generated type's identifier.
pub fn resolve_self(signature: &str, ident: &str) -> String {
    signature.replace(SELF_PLACEHOLDER, ident)
}

/// Translate one raw declaration fragment. See the module docs.
pub fn translate_signature(raw: &str, self_short_name: &str) -> Result<String, Skip> {
    if raw.contains(DEPRECATED_MARKER) {
        return Err(Skip::Deprecated);
    }
    if visibility_of(raw) == Visibility::Private {
        return Err(Skip::Private);
    }
    Ok(render(&tokenize(raw, self_short_name)))
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    Word(String),
    Punct(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Token {
    tok: Tok,
    /// Whitespace separated this token from the previous one in the source.
    space_before: bool,
}

struct Lexer<'a> {
    self_short_name: &'a str,
    out: Vec<Token>,
    word: String,
    space: bool,
}

impl<'a> Lexer<'a> {
    fn push(&mut self, tok: Tok) {
        self.out.push(Token { tok, space_before: self.space });
        self.space = false;
    }

    fn flush(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let w = substitute_self(&self.word, self.self_short_name).to_string();
        self.word.clear();
        self.push(Tok::Word(w));
    }

    fn boundary(&mut self) {
        self.flush();
        self.space = true;
    }
}

fn is_link_open(tag: &str) -> bool {
    tag.starts_with("<a ") && tag.contains(HREF)
}

fn tokenize(raw: &str, self_short_name: &str) -> Vec<Token> {
    let mut lx = Lexer { self_short_name, out: Vec::new(), word: String::new(), space: false };
    let mut i = 0usize;

    while let Some(ch) = raw[i..].chars().next() {
        let rest = &raw[i..];
        match ch {
            '<' => {
                lx.flush();
                let Some(gt) = rest.find('>') else {
                    // unterminated tag: keep the remainder as text
                    lx.word.push_str(rest);
                    break;
                };
                let tag = &rest[..=gt];
                i += gt + 1;
                if is_link_open(tag) {
                    let close = locate(raw, LINK_CLOSE, i);
                    if tag.contains(TYPE_PARAM_TITLE) {
                        // type variables link to their declaring class; keep the variable
                        let name = plain_text(close.map_or("", |end| &raw[i..end]));
                        if !name.is_empty() {
                            lx.push(Tok::Word(name));
                        }
                    } else if let Some(t) = translate_type_reference(tag) {
                        let word = if tag.contains(ANNOTATION_TITLE) { join!("@", &t.ident) } else { t.ident };
                        lx.push(Tok::Word(word));
                    }
                    // tooltip + anchor text up to the closing tag are elided
                    if let Some(end) = close {
                        i = end + LINK_CLOSE.len();
                    }
                }
                continue;
            }
            '&' if rest.starts_with("&lt;") => {
                lx.flush();
                lx.push(Tok::Punct('<'));
                i += 4;
                continue;
            }
            '&' if rest.starts_with("&gt;") => {
                lx.flush();
                lx.push(Tok::Punct('>'));
                i += 4;
                continue;
            }
            '&' if rest.starts_with("&nbsp;") => {
                lx.boundary();
                i += 6;
                continue;
            }
            c if c.is_whitespace() => lx.boundary(),
            '(' | ')' | ',' | '[' | ']' | '>' => {
                lx.flush();
                lx.push(Tok::Punct(ch));
            }
            _ => lx.word.push(ch),
        }
        i += ch.len_utf8();
    }
    lx.flush();
    lx.out
}

fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Tok> = None;

    for t in tokens {
        let glue = match (&t.tok, prev) {
            (_, None) => true,
            (Tok::Punct(')' | ',' | ']'), _) => true,
            (_, Some(Tok::Punct('(' | '<' | '['))) => true,
            _ => !t.space_before,
        };
        if !glue {
            out.push(' ');
        }
        match &t.tok {
            Tok::Word(w) => out.push_str(w),
            Tok::Punct(c) => out.push(*c),
        }
        prev = Some(&t.tok);
    }
    out
}

/// Split on `sep` at generic depth 0: `K, Map<A,B>` → ["K", "Map<A,B>"].
pub fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut cur = String::new();
    for ch in s.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(cur.trim().to_string());
                cur.clear();
                continue;
            }
            _ => {}
        }
        cur.push(ch);
    }
    if !cur.trim().is_empty() {
        parts.push(cur.trim().to_string());
    }
    parts.retain(|p| !p.is_empty());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRING_LINK: &str = r#"<a href="../../java/lang/String.html" title="class in java.lang">String</a>"#;

    #[test]
    fn type_reference_both_forms() {
        let t = translate_type_reference(r#"<a href="../../java/lang/Object.html" title="class in java.lang">Object</a>"#).unwrap();
        assert_eq!(t.dotted, "java.lang.Object");
        assert_eq!(t.ident, "java_lang_Object");

        let t = type_ref_from_target("bar/Baz.html").unwrap();
        assert_eq!((t.dotted.as_str(), t.ident.as_str()), ("bar.Baz", "bar_Baz"));
    }

    #[test]
    fn type_reference_strips_anchor_and_nested_dots() {
        let t = type_ref_from_target("../../java/util/Map.Entry.html#getKey--").unwrap();
        assert_eq!(t.dotted, "java.util.Map.Entry");
        assert_eq!(t.ident, "java_util_Map_Entry");

        let t = type_ref_from_target("https://docs.oracle.com/javase/8/docs/api/java/io/File.html").unwrap();
        assert_eq!(t.dotted, "javase.8.docs.api.java.io.File");
    }

    #[test]
    fn type_reference_rejects_empty_and_unterminated() {
        assert!(type_ref_from_target("").is_none());
        assert!(type_ref_from_target("../../").is_none());
        assert!(translate_type_reference(r#"<a href="java/lang/Object.html"#).is_none());
    }

    #[test]
    fn method_with_linked_return_type() {
        let raw = format!("public&nbsp;{STRING_LINK}&nbsp;substring(int&nbsp;beginIndex)");
        assert_eq!(
            translate_signature(&raw, "String").unwrap(),
            "public java_lang_String substring(int beginIndex)"
        );
    }

    #[test]
    fn constructor_name_becomes_placeholder() {
        let raw = r#"public&nbsp;String(byte[]&nbsp;bytes,
              <a href="../../java/nio/charset/Charset.html" title="class in java.nio.charset">Charset</a>&nbsp;charset)"#;
        let sig = translate_signature(raw, "String").unwrap();
        assert_eq!(sig, "public $Self(byte[] bytes, java_nio_charset_Charset charset)");
        assert_eq!(resolve_self(&sig, "java_lang_String"), "public java_lang_String(byte[] bytes, java_nio_charset_Charset charset)");
    }

    #[test]
    fn generics_are_kept_tight() {
        let raw = format!(
            r#"public&nbsp;<a href="../../java/util/List.html" title="interface in java.util">List</a>&lt;{STRING_LINK}&gt;&nbsp;names()"#
        );
        assert_eq!(translate_signature(&raw, "Foo").unwrap(), "public java_util_List<java_lang_String> names()");

        let raw = "public static&nbsp;&lt;T&gt;&nbsp;void&nbsp;sort(T[]&nbsp;a)";
        assert_eq!(translate_signature(raw, "Arrays").unwrap(), "public static <T> void sort(T[] a)");
    }

    #[test]
    fn varargs_and_fields() {
        let raw = format!(
            r#"public static&nbsp;{STRING_LINK}&nbsp;format({STRING_LINK}&nbsp;format,
                            <a href="../../java/lang/Object.html" title="class in java.lang">Object</a>...&nbsp;args)"#
        );
        assert_eq!(
            translate_signature(&raw, "String").unwrap(),
            "public static java_lang_String format(java_lang_String format, java_lang_Object... args)"
        );

        let raw = format!(
            r#"public static final&nbsp;<a href="../../java/util/Comparator.html" title="interface in java.util">Comparator</a>&lt;{STRING_LINK}&gt; CASE_INSENSITIVE_ORDER"#
        );
        assert_eq!(
            translate_signature(&raw, "String").unwrap(),
            "public static final java_util_Comparator<java_lang_String> CASE_INSENSITIVE_ORDER"
        );
    }

    #[test]
    fn deprecated_and_private_are_skipped() {
        let dep = r#"<a href="../../java/lang/Deprecated.html" title="annotation in java.lang">@Deprecated</a>
public&nbsp;void&nbsp;getBytes(int&nbsp;srcBegin)"#;
        assert_eq!(translate_signature(dep, "String"), Err(Skip::Deprecated));
        assert_eq!(translate_signature("private&nbsp;int&nbsp;hash", "String"), Err(Skip::Private));
        assert_eq!(translate_signature("private static final&nbsp;long&nbsp;x", "String"), Err(Skip::Private));
    }

    #[test]
    fn visibility_reads_leading_keywords() {
        assert_eq!(visibility_of("protected&nbsp;void&nbsp;finalize()"), Visibility::Protected);
        assert_eq!(visibility_of("static&nbsp;private&nbsp;int x"), Visibility::Private);
        assert_eq!(visibility_of("@SafeVarargs public static void f()"), Visibility::Public);
        assert_eq!(visibility_of("int&nbsp;count"), Visibility::Public);
        // "private" after the type is a name, not a modifier
        assert_eq!(visibility_of("int private"), Visibility::Public);
    }

    #[test]
    fn type_parameters_keep_their_name() {
        let raw = r#"public&nbsp;<a href="../../java/util/ArrayList.html" title="type parameter in ArrayList">E</a>&nbsp;get(int&nbsp;index)"#;
        assert_eq!(translate_signature(raw, "ArrayList").unwrap(), "public E get(int index)");
    }

    #[test]
    fn annotations_stay_annotations() {
        let raw = "<a href=\"../../java/lang/SafeVarargs.html\" title=\"annotation in java.lang\">@SafeVarargs</a>\npublic static&nbsp;&lt;T&gt;&nbsp;void&nbsp;of(T...&nbsp;items)";
        assert_eq!(
            translate_signature(raw, "Sets").unwrap(),
            "@java_lang_SafeVarargs public static <T> void of(T... items)"
        );
        assert_eq!(visibility_of(raw), Visibility::Public);
    }

    #[test]
    fn other_tags_are_dropped() {
        let raw = r#"<span class="memberNameLink">run</span>()"#;
        assert_eq!(translate_signature(raw, "Thread").unwrap(), "run()");
    }

    #[test]
    fn split_top_level_respects_nesting() {
        assert_eq!(split_top_level("K, V", ','), vec!["K", "V"]);
        assert_eq!(split_top_level("E extends Enum<E>", ','), vec!["E extends Enum<E>"]);
        assert_eq!(split_top_level("K, Map<A,B>", ','), vec!["K", "Map<A,B>"]);
        assert!(split_top_level(" ", ',').is_empty());
    }
}
