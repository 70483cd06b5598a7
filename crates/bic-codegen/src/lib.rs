//! Emitter for the Bic translator.
//!
//! Walks a parsed [`Program`] and partitions it into two string buffers:
//! the declaration unit (header) and the definition unit (source). The
//! header opens with a single-inclusion directive; the source opens with an
//! include of its sibling header.
//!
//! Top-level dispatch:
//! - raw C++ literals and top-level variables go to the source;
//! - enums go to the header;
//! - imports go to both;
//! - classes split member by member (declarations in the header, method
//!   bodies in the source, qualified with the accumulated class path);
//! - functions split declaration/definition, except that anything carrying
//!   template parameters is emitted entirely into the header, and a free
//!   `main` contributes no header declaration.
//!
//! Member visibility defaults (protected) and constructor detection (name
//! equality with the enclosing class) are computed here, at emission time,
//! from the immutable AST.

use std::fmt;

use bic_common::span::Span;
use bic_parser::ast::{ClassDecl, FuncDecl, Program, Statement, Stmt, Visibility};

/// The two emitted buffers for one translation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub header: String,
    pub source: String,
}

/// A structural error found while emitting, e.g. a statement in a class
/// body that is not a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitError {
    pub message: String,
    pub span: Span,
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EmitError {}

/// Emit a program into its header and source buffers.
///
/// `header_filename` is the name of the sibling header the source unit
/// includes, e.g. `point.hpp`.
pub fn generate(program: &Program, header_filename: &str) -> Result<Output, EmitError> {
    Generator::new(header_filename).run(program)
}

struct Generator {
    header: String,
    source: String,
}

impl Generator {
    fn new(header_filename: &str) -> Self {
        Self {
            header: "#pragma once\n".to_string(),
            source: format!("#include \"{header_filename}\"\n"),
        }
    }

    fn run(mut self, program: &Program) -> Result<Output, EmitError> {
        for stmt in &program.statements {
            self.emit_top_level(stmt)?;
        }
        Ok(Output {
            header: self.header,
            source: self.source,
        })
    }

    fn emit_top_level(&mut self, stmt: &Statement) -> Result<(), EmitError> {
        match &stmt.node {
            Stmt::CppLit(_) => {
                if let Some(text) = stmt.render(0) {
                    self.source.push_str(&text);
                    self.source.push('\n');
                }
            }
            Stmt::Enum(decl) => {
                self.header.push_str(&decl.render_with(decl.visibility, 0));
                self.header.push('\n');
            }
            Stmt::Class(decl) => self.emit_class(decl, None)?,
            Stmt::Func(func) => self.emit_function(func, None, None, None),
            Stmt::Import(import) => {
                let line = import.render();
                self.header.push_str(&line);
                self.header.push('\n');
                self.source.push_str(&line);
                self.source.push('\n');
            }
            // Top-level variables define storage in the source unit.
            Stmt::Var(decl) => {
                self.source.push_str(&decl.render());
                self.source.push_str(";\n");
            }
            // Other top-level forms are not expected and emit nothing.
            _ => {}
        }
        Ok(())
    }

    /// Emit a class: the heading and member declarations into the header,
    /// method bodies into the source, qualified with the class path.
    fn emit_class(&mut self, class: &ClassDecl, qualifier: Option<&str>) -> Result<(), EmitError> {
        self.header.push_str(&class.render_heading());
        self.header.push_str(" {\n");

        let qualified = match qualifier {
            Some(q) => format!("{q}::{}", class.name),
            None => class.name.clone(),
        };

        for member in &class.body.statements {
            match &member.node {
                Stmt::Func(func) => {
                    let vis = func.visibility.unwrap_or(Visibility::Protected);
                    self.emit_function(func, Some(&qualified), Some(&class.name), Some(vis));
                }
                Stmt::Class(nested) => self.emit_class(nested, Some(&qualified))?,
                Stmt::Var(decl) => {
                    let vis = decl.visibility.unwrap_or(Visibility::Protected);
                    self.header.push_str(&decl.render_with(Some(vis)));
                    self.header.push_str(";\n");
                }
                Stmt::Enum(decl) => {
                    let vis = decl.visibility.unwrap_or(Visibility::Protected);
                    self.header.push_str(&decl.render_with(Some(vis), 0));
                    self.header.push('\n');
                }
                Stmt::Operator(decl) => {
                    let vis = decl.visibility.unwrap_or(Visibility::Protected);
                    self.header.push_str(&decl.render_with(Some(vis), 0));
                    self.header.push('\n');
                }
                Stmt::CppLit(text) => {
                    self.header.push_str(text);
                    self.header.push('\n');
                }
                _ => {
                    return Err(EmitError {
                        message: "invalid statement in class body".to_string(),
                        span: member.span,
                    })
                }
            }
        }

        self.header.push_str("};\n");
        Ok(())
    }

    /// Emit a function.
    ///
    /// Functions with template parameters are defined entirely in the
    /// header. Otherwise the header gets a declaration and the source a
    /// qualified definition; pure-virtual methods contribute no definition,
    /// and a free `main` contributes no declaration.
    fn emit_function(
        &mut self,
        func: &FuncDecl,
        qualifier: Option<&str>,
        class_name: Option<&str>,
        vis: Option<Visibility>,
    ) {
        let kind = func.method_kind(class_name);

        if func.template.is_some() {
            self.header.push_str(&func.render_inline(vis, kind, 0));
            self.header.push('\n');
            return;
        }

        if !(qualifier.is_none() && func.name == "main") {
            self.header.push_str(&func.render_declaration(vis, kind));
            self.header.push('\n');
        }

        if let Some(def) = func.render_definition(0, qualifier, kind) {
            self.source.push_str(&def);
            self.source.push('\n');
        }
    }
}
