// src/specs/class_page.rs
//! Scraping *spec* for one class documentation page.
//!
//! Purpose:
//! - Read a cached javadoc 8 page and build a `TypeModel`:
//!   title/kind, generics, direct supertype, implemented interfaces,
//!   class modifiers, constructors, methods and fields with their prose.
//!
//! The page is scanned forward only, in the order the sections appear:
//!
//! ```text
//! <h2 title="Class X">            kind + generics        (required)
//! <ul class="inheritance">        chain, last link wins  (optional)
//! All Implemented Interfaces:     <dd> links             (optional)
//! <pre>public class X ...</pre>   class declaration      (required)
//! Field / Constructor / Method Detail sections           (optional)
//! ```
//!
//! Interfaces and enums are recognized from the title and stop there
//! (`Translation::NotImplemented`).

use crate::config::consts::*;
use crate::core::html::{
    collapse_whitespace, decode_entities, extract_between, locate, plain_text, strip_tags, Cursor,
};
use crate::entity::EntityRef;
use crate::error::{Error, Result};
use crate::model::{DeclarationRecord, Kind, Translation, TypeModel, TypeRef};
use crate::specs::decl::{split_top_level, translate_signature, type_ref_from_target, visibility_of};

/// Build the model for `entity` from its page text.
pub fn translate_page(doc: &str, entity: &EntityRef) -> Result<Translation> {
    let name = entity.name();
    let mut cur = Cursor::new(doc);

    // 1) Title → kind
    let title = cur.between(TITLE_MARKER, "\"").map_err(|e| Error::from_markup(name, e))?;
    let title_text = decode_entities(title.inner);
    let kind = Kind::from_title(&title_text).ok_or_else(|| Error::UnrecognizedKind {
        entity: s!(name),
        title: title_text.clone(),
    })?;
    if kind != Kind::Class {
        return Ok(Translation::NotImplemented(kind));
    }

    let mut model = TypeModel::new(entity.clone(), kind);

    // 2) Generics from the visible heading text
    if let Some((generics, end)) = read_heading_generics(doc, cur.pos()) {
        model.generics = generics;
        cur.advance_to(end);
    }

    // 3) Inheritance chain: the last link is the direct parent
    if let Some(chain_at) = cur.peek(INHERITANCE_MARKER) {
        let bound = locate(doc, DESCRIPTION_MARKER, chain_at)
            .or_else(|| locate(doc, PRE_OPEN, chain_at))
            .unwrap_or(doc.len());
        let (super_type, end) = last_link(&doc[chain_at..bound]);
        model.super_type = super_type;
        cur.advance_to(chain_at + end);
    }

    // 4) All Implemented Interfaces, only if it precedes the class declaration
    if let Some(at) = cur.peek(INTERFACES_MARKER) {
        let before_decl = cur.peek(PRE_OPEN).is_none_or(|pre| at < pre);
        if before_decl {
            if let Ok(dd) = extract_between(doc, DD_OPEN, DD_CLOSE, at) {
                for t in read_contracts(dd.inner, name) {
                    model.add_contract(t);
                }
                cur.advance_to(dd.after);
            }
        }
    }

    // 5) Class declaration
    let decl = cur.between(PRE_OPEN, PRE_CLOSE).map_err(|e| Error::from_markup(name, e))?;
    model.modifiers = class_modifiers(decl.inner, kind);

    // 6) Detail sections, each bounded by the next one
    let details_from = cur.pos();

    if let Some(section) = detail_section(doc, FIELD_DETAIL, details_from) {
        read_members(section, entity, &mut model);
    }
    if let Some(section) = detail_section(doc, CONSTRUCTOR_DETAIL, details_from) {
        read_constructors(section, entity, &mut model);
    }
    if let Some(section) = detail_section(doc, METHOD_DETAIL, details_from) {
        read_members(section, entity, &mut model);
    }

    Ok(Translation::Class(model))
}

/// `<h2 title="Class HashMap" class="title">Class HashMap&lt;K,V&gt;</h2>` → ["K", "V"].
/// `from` is just past the title attribute. Returns the offset past `</h2>`.
fn read_heading_generics(doc: &str, from: usize) -> Option<(Vec<String>, usize)> {
    let open_end = locate(doc, ">", from)? + 1;
    let close = locate(doc, TITLE_END, open_end)?;
    let heading = plain_text(&doc[open_end..close]);

    let generics = match (heading.find('<'), heading.rfind('>')) {
        (Some(lt), Some(gt)) if gt > lt => split_top_level(&heading[lt + 1..gt], ','),
        _ => Vec::new(),
    };
    Some((generics, close + TITLE_END.len()))
}

/// Walk every `<a href="` in `region`; keep the last good target.
/// Stops at the first link with no closing quote. Returns the offset reached.
fn last_link(region: &str) -> (Option<TypeRef>, usize) {
    let mut last = None;
    let mut from = 0usize;

    while let Some(at) = locate(region, LINK_MARKER, from) {
        let start = at + LINK_MARKER.len();
        let Some(end) = locate(region, "\"", start) else { break };
        if let Some(t) = type_ref_from_target(&region[start..end]) {
            last = Some(t);
        }
        from = end + 1;
    }
    (last, from)
}

/// Net `<` nesting contributed by a raw fragment.
fn generic_depth(s: &str) -> i32 {
    s.matches("&lt;").count() as i32 - s.matches("&gt;").count() as i32
}

/// Split the interfaces `<dd>` on link openers. Links nested in generic
/// arguments (`Comparable&lt;String&gt;`) are not contracts of their own.
fn read_contracts(dd: &str, entity: &str) -> Vec<TypeRef> {
    let mut out = Vec::new();
    let mut pieces = dd.split(LINK_MARKER);
    let mut depth = pieces.next().map(generic_depth).unwrap_or(0);

    for candidate in pieces {
        if depth == 0 {
            match candidate.find('"') {
                Some(q) if q > 0 => match type_ref_from_target(&candidate[..q]) {
                    Some(t) => out.push(t),
                    None => logd!("{entity}: unusable interface link {:?}", &candidate[..q]),
                },
                _ => logd!("{entity}: malformed interface link skipped"),
            }
        }
        depth += generic_depth(candidate);
    }
    out
}

/// Modifier words ahead of the kind keyword: `public final class String` → ["public", "final"].
fn class_modifiers(decl_inner: &str, kind: Kind) -> Vec<String> {
    let text = plain_text(decl_inner);
    let words: Vec<&str> = text.split(' ').collect();
    let Some(kw) = words.iter().position(|w| *w == kind.keyword()) else {
        return Vec::new();
    };
    words[..kw]
        .iter()
        .filter(|w| !w.is_empty() && !w.starts_with('@'))
        .map(|w| s!(*w))
        .collect()
}

/// From just past `marker` up to the next detail marker or the end of class data.
fn detail_section<'a>(doc: &'a str, marker: &str, from: usize) -> Option<&'a str> {
    let start = locate(doc, marker, from)? + marker.len();
    let end = [FIELD_DETAIL, CONSTRUCTOR_DETAIL, METHOD_DETAIL, END_OF_CLASS_DATA]
        .iter()
        .filter_map(|m| locate(doc, m, start))
        .min()
        .unwrap_or(doc.len());
    Some(&doc[start..end])
}

/// Plain text of a documentation span, one trimmed line per source line,
/// blank runs squeezed to one.
pub fn reflow_doc(html: &str) -> String {
    let text = decode_entities(&strip_tags(html));
    let mut lines: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = collapse_whitespace(line).trim().to_string();
        if line.is_empty() && lines.last().is_none_or(|l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn record(raw_decl: &str, entity: &EntityRef, documentation: String) -> Option<DeclarationRecord> {
    // deprecated/private: silently left out
    let signature = translate_signature(raw_decl, entity.short_name()).ok()?;
    let is_abstract = signature.split(' ').any(|w| w == "abstract");
    Some(DeclarationRecord {
        signature,
        visibility: visibility_of(raw_decl),
        is_abstract_or_interface_member: is_abstract,
        documentation,
    })
}

/// `<h4>` member blocks of a detail section, each up to the next `<h4>`.
fn member_blocks(section: &str) -> impl Iterator<Item = &str> {
    let mut from = 0usize;
    std::iter::from_fn(move || {
        let head = locate(section, MEMBER_HEADER, from)?;
        let next = locate(section, MEMBER_HEADER, head + MEMBER_HEADER.len()).unwrap_or(section.len());
        from = next;
        Some(&section[head..next])
    })
}

/// First `<pre>` of each constructor block; later ones are code samples in the prose.
/// Prose is optional here.
fn read_constructors(section: &str, entity: &EntityRef, model: &mut TypeModel) {
    for block in member_blocks(section) {
        let Ok(decl) = extract_between(block, PRE_OPEN, PRE_CLOSE, 0) else {
            logd!("{entity}: constructor block without declaration skipped");
            continue;
        };
        let documentation = locate(block, DOC_BLOCK, decl.after)
            .map(|at| reflow_doc(&block[at..]))
            .unwrap_or_default();

        if let Some(rec) = record(decl.inner, entity, documentation) {
            model.constructors.push(rec);
        }
    }
}

/// `<h4>` member blocks; each needs a `<pre>` and a documentation block.
fn read_members(section: &str, entity: &EntityRef, model: &mut TypeModel) {
    for block in member_blocks(section) {
        let Ok(decl) = extract_between(block, PRE_OPEN, PRE_CLOSE, 0) else {
            logd!("{entity}: member block without declaration skipped");
            continue;
        };
        let Some(doc_at) = locate(block, DOC_BLOCK, decl.after) else {
            logd!("{entity}: no documentation for {:?}, skipped", plain_text(decl.inner));
            continue;
        };

        let Some(rec) = record(decl.inner, entity, reflow_doc(&block[doc_at..])) else {
            continue;
        };
        if rec.signature.contains('(') {
            model.methods.push(rec);
        } else {
            model.fields.push(rec);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Visibility;

    fn entity(name: &str) -> EntityRef {
        EntityRef::new(name, "https://example/x.html").unwrap()
    }

    fn class(doc: &str, name: &str) -> TypeModel {
        match translate_page(doc, &entity(name)).unwrap() {
            Translation::Class(m) => m,
            other => panic!("expected class, got {other:?}"),
        }
    }

    fn page(heading: &str, chain: &str, interfaces: &str, decl: &str, details: &str) -> String {
        format!(
            r#"<html><body>
<div class="header">
<h2 title="{title}" class="title">{heading}</h2>
</div>
<div class="contentContainer">
{chain}
<div class="description">
<ul class="blockList"><li class="blockList">
{interfaces}
<hr>
<br>
<pre>{decl}</pre>
<div class="block">Class prose.</div>
</li></ul>
</div>
<div class="details">
{details}
</div>
<!-- ========= END OF CLASS DATA ========= -->
</div></body></html>"#,
            title = heading.split("&lt;").next().unwrap_or(heading),
        )
    }

    fn chain(targets: &[&str]) -> String {
        let mut s = s!("<ul class=\"inheritance\">\n");
        for t in targets {
            s.push_str(&format!("<li><a href=\"{t}\" title=\"class\">{t}</a></li>\n<li>\n<ul class=\"inheritance\">\n"));
        }
        s.push_str("<li>Self</li>\n</ul>");
        s
    }

    fn member(name: &str, decl: &str, doc: &str) -> String {
        format!(
            "<a name=\"{name}\">\n<!--   -->\n</a>\n<ul class=\"blockList\">\n<li class=\"blockList\">\n<h4>{name}</h4>\n<pre>{decl}</pre>\n<div class=\"block\">{doc}</div>\n</li>\n</ul>\n"
        )
    }

    #[test]
    fn last_inheritance_link_is_the_direct_parent() {
        let doc = page("Class Self", &chain(&["a/A.html", "b/B.html", "c/C.html"]), "", "public class Self", "");
        let m = class(&doc, "x.Self");
        let sup = m.super_type.unwrap();
        assert_eq!(sup.dotted, "c.C");
        assert_eq!(sup.ident, "c_C");
    }

    #[test]
    fn chain_stops_at_unterminated_link() {
        let (t, _) = last_link("<a href=\"a/A.html\">A</a><a href=\"b/B.html");
        assert_eq!(t.unwrap().dotted, "a.A");
        let (t, end) = last_link("no links");
        assert!(t.is_none());
        assert_eq!(end, 0);
    }

    #[test]
    fn generics_and_modifiers() {
        let doc = page(
            "Class HashMap&lt;K,V&gt;",
            &chain(&["../../java/lang/Object.html", "../../java/util/AbstractMap.html"]),
            "",
            "public class <span class=\"typeNameLabel\">HashMap&lt;K,V&gt;</span>\nextends AbstractMap",
            "",
        );
        let m = class(&doc, "java.util.HashMap");
        assert_eq!(m.generics, vec!["K", "V"]);
        assert_eq!(m.modifiers, vec!["public"]);
        assert_eq!(m.super_type.unwrap().dotted, "java.util.AbstractMap");
    }

    #[test]
    fn interfaces_skip_generic_arguments_and_duplicates() {
        let dd = r#"<dl>
<dt>All Implemented Interfaces:</dt>
<dd><a href="../../java/io/Serializable.html" title="interface in java.io">Serializable</a>, <a href="../../java/lang/Comparable.html" title="interface in java.lang">Comparable</a>&lt;<a href="../../java/lang/String.html" title="class in java.lang">String</a>&gt;, <a href="" title="x">Empty</a>, <a href="../../java/io/Serializable.html" title="interface in java.io">Serializable</a></dd>
</dl>"#;
        let doc = page("Class String", "", dd, "public final class String", "");
        let m = class(&doc, "java.lang.String");
        let names: Vec<&str> = m.implemented.iter().map(|t| t.dotted.as_str()).collect();
        assert_eq!(names, vec!["java.io.Serializable", "java.lang.Comparable"]);
        assert_eq!(m.modifiers, vec!["public", "final"]);
    }

    #[test]
    fn members_split_into_fields_methods_constructors() {
        let mut details = s!("<h3>Field Detail</h3>\n");
        details += &member("MAX", "public static final&nbsp;int MAX", "The max.");
        details += &member("hidden", "private&nbsp;int hidden", "Never shown.");
        details += "<h3>Constructor Detail</h3>\n";
        details += &member("Box", "public&nbsp;Box()", "Makes an empty box.");
        details += &member("Box", "protected&nbsp;Box(int&nbsp;size)", "Sized.");
        details += "<h3>Method Detail</h3>\n";
        details += &member("size", "public&nbsp;int&nbsp;size()", "Returns the size.\n  Never negative.");
        details += &member(
            "old",
            "<a href=\"../../java/lang/Deprecated.html\" title=\"annotation in java.lang\">@Deprecated</a>\npublic&nbsp;void&nbsp;old()",
            "Gone.",
        );
        details += &member("grow", "public abstract&nbsp;void&nbsp;grow(int&nbsp;n)", "Grows.");
        let doc = page("Class Box", "", "", "public abstract class Box", &details);
        let m = class(&doc, "demo.Box");

        assert_eq!(m.fields.len(), 1);
        assert_eq!(m.fields[0].signature, "public static final int MAX");
        assert_eq!(m.fields[0].documentation, "The max.");

        let ctors: Vec<&str> = m.constructors.iter().map(|d| d.signature.as_str()).collect();
        assert_eq!(ctors, vec!["public $Self()", "protected $Self(int size)"]);
        assert_eq!(m.constructors[1].visibility, Visibility::Protected);
        assert_eq!(m.constructors[0].documentation, "Makes an empty box.");

        let methods: Vec<&str> = m.methods.iter().map(|d| d.signature.as_str()).collect();
        assert_eq!(methods, vec!["public int size()", "public abstract void grow(int n)"]);
        assert_eq!(m.methods[0].documentation, "Returns the size.\nNever negative.");
        assert!(!m.methods[0].is_abstract_or_interface_member);
        assert!(m.methods[1].is_abstract_or_interface_member);
    }

    #[test]
    fn code_samples_in_constructor_docs_are_not_constructors() {
        let mut details = s!("<h3>Constructor Detail</h3>\n");
        details += &member("Box", "public&nbsp;Box()", "Use it like this:\n<pre> Box b = new Box(); </pre>\nand nothing else.");
        details += &member("Box", "public&nbsp;Box(int&nbsp;n)", "Sized.");
        let doc = page("Class Box", "", "", "public class Box", &details);
        let m = class(&doc, "p.Box");

        let ctors: Vec<&str> = m.constructors.iter().map(|d| d.signature.as_str()).collect();
        assert_eq!(ctors, vec!["public $Self()", "public $Self(int n)"]);
        assert!(m.constructors[0].documentation.contains("Box b = new Box();"));
    }

    #[test]
    fn member_without_documentation_is_skipped() {
        let details = "<h3>Method Detail</h3>\n<h4>a</h4>\n<pre>public&nbsp;void&nbsp;a()</pre>\n<h4>b</h4>\n<div class=\"block\">no pre</div>\n";
        let doc = page("Class Q", "", "", "public class Q", details);
        let m = class(&doc, "Q");
        assert!(m.methods.is_empty());
    }

    #[test]
    fn interface_and_enum_are_not_implemented() {
        let doc = page("Interface X", "", "", "public interface X", "");
        assert_eq!(translate_page(&doc, &entity("p.X")).unwrap(), Translation::NotImplemented(Kind::Interface));
        let doc = page("Enum Y", "", "", "public enum Y", "");
        assert_eq!(translate_page(&doc, &entity("p.Y")).unwrap(), Translation::NotImplemented(Kind::Enum));
    }

    #[test]
    fn unknown_kind_and_missing_markers_are_errors() {
        let doc = page("Annotation Type Z", "", "", "public @interface Z", "");
        assert!(matches!(translate_page(&doc, &entity("p.Z")), Err(Error::UnrecognizedKind { .. })));

        assert!(matches!(translate_page("<html>nothing</html>", &entity("p.N")), Err(Error::Structure { .. })));

        let no_pre = "<h2 title=\"Class N\" class=\"title\">Class N</h2><div>body</div>";
        match translate_page(no_pre, &entity("p.N")) {
            Err(Error::Structure { entity, detail }) => {
                assert_eq!(entity, "p.N");
                assert!(detail.contains("<pre>"));
            }
            other => panic!("expected structure error, got {other:?}"),
        }
    }

    #[test]
    fn reflow_squeezes_blank_lines() {
        let html = "<div class=\"block\">First  line\n\n\n  second <code>x</code> &lt;y&gt;</div>\n<dl>\n</dl>\n\n";
        assert_eq!(reflow_doc(html), "First line\n\nsecond x <y>");
    }
}
