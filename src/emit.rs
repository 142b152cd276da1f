// src/emit.rs
//! Skeleton emitter: renders a `TypeModel` into a header and an
//! implementation text. Pure: no IO, same model in, same text out.
//!
//! Header for `demo.Foo extends bar.Baz`, no constructors:
//! ```text
//! #ifndef DEMO_FOO_H
//! #define DEMO_FOO_H
//!
//! // @extends bar_Baz (bar.Baz)
//!
//! typedef struct demo_Foo_S *demo_Foo;
//! demo_Foo demo_Foo_init();
//!
//! #endif
//! ```

use crate::config::consts::BODY_PLACEHOLDER;
use crate::model::{DeclarationRecord, TypeModel};
use crate::specs::decl::resolve_self;

/// The two artifacts for one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skeleton {
    pub header: String,
    pub source: String,
}

pub fn emit(model: &TypeModel) -> Skeleton {
    Skeleton { header: header(model), source: source(model) }
}

pub fn include_guard(model: &TypeModel) -> String {
    format!("{}_H", model.entity.ident().to_uppercase())
}

fn header(model: &TypeModel) -> String {
    let ident = model.entity.ident();
    let guard = include_guard(model);
    let mut out = String::new();

    emitln!(out, "#ifndef {guard}");
    emitln!(out, "#define {guard}");
    emitln!(out);

    let mut annotated = false;
    for g in &model.generics {
        emitln!(out, "// @generic {g}");
        annotated = true;
    }
    if let Some(sup) = &model.super_type {
        emitln!(out, "// @extends {} ({})", sup.ident, sup.dotted);
        annotated = true;
    }
    for c in &model.implemented {
        emitln!(out, "// @implements {} ({})", c.ident, c.dotted);
        annotated = true;
    }
    if annotated {
        emitln!(out);
    }

    emitln!(out, "typedef struct {ident}_S *{ident};");
    if model.constructors.is_empty() {
        emitln!(out, "{ident} {ident}_init();");
    }
    emitln!(out);
    emitln!(out, "#endif");
    out
}

fn source(model: &TypeModel) -> String {
    let ident = model.entity.ident();
    let mut out = String::new();

    if !model.modifiers.is_empty() {
        for m in &model.modifiers {
            emitln!(out, "// @{m}");
        }
        emitln!(out);
    }

    emitln!(out, "struct {ident}_S {{");
    emitln!(out, "}};");

    for rec in model.fields.iter().chain(&model.constructors).chain(&model.methods) {
        emitln!(out);
        member(&mut out, rec, &ident);
    }
    out
}

fn member(out: &mut String, rec: &DeclarationRecord, ident: &str) {
    if !rec.documentation.is_empty() {
        emitln!(out, "/**");
        for line in rec.documentation.lines() {
            if line.is_empty() {
                emitln!(out, " *");
            } else {
                emitln!(out, " * {line}");
            }
        }
        emitln!(out, " */");
    }

    let signature = resolve_self(&rec.signature, ident);
    if rec.has_body() {
        emitln!(out, "{signature} {BODY_PLACEHOLDER}");
    } else {
        emitln!(out, "{signature};");
    }
}
