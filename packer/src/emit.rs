//! Rust code emitter. Contains a small typed model of generated code
//! ([Expr], [Statement], [Item]) and [SourceFile] rendering it into text.
//!
//! The model covers only what generated modules need: `use` declarations,
//! byte slice statics, other statics, functions with `let` / expression
//! statements and nested blocks. Every identifier is validated before
//! anything is written, so invalid module name or symbol never produces
//! partial output.

use itertools::Itertools;
use std::fmt::{self, Write as _};

/// Expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    /// Local variable or item in scope, eg. `fs`.
    Ident(String),
    /// Absolute path, rendered with leading `::`, eg. `::std::io::Read`.
    Path(Vec<String>),
    /// String literal.
    Str(String),
    /// Integer literal.
    Int(u64),
    /// `func(args...)`.
    Call {
        /// Called expression, usually a [Expr::Path].
        func: Box<Expr>,
        /// Arguments.
        args: Vec<Expr>,
    },
    /// `receiver.method(args...)`.
    MethodCall {
        /// Receiver.
        receiver: Box<Expr>,
        /// Method name.
        method: String,
        /// Arguments.
        args: Vec<Expr>,
    },
    /// `&expr`.
    Ref(Box<Expr>),
    /// `&mut expr`.
    RefMut(Box<Expr>),
    /// `expr?`.
    Try(Box<Expr>),
    /// `|params...| body`.
    Closure {
        /// Parameter names.
        params: Vec<String>,
        /// Closure body.
        body: Box<Expr>,
    },
}
impl Expr {
    /// Creates [Expr::Ident].
    pub fn ident(name: &str) -> Self {
        Self::Ident(name.to_owned())
    }
    /// Creates [Expr::Path] from segments.
    pub fn path<'s>(segments: impl IntoIterator<Item = &'s str>) -> Self {
        Self::Path(segments.into_iter().map(str::to_owned).collect())
    }
    /// Creates [Expr::Str].
    pub fn str(value: &str) -> Self {
        Self::Str(value.to_owned())
    }

    /// Wraps [self] into call with `args`.
    pub fn call(
        self,
        args: impl IntoIterator<Item = Expr>,
    ) -> Self {
        Self::Call {
            func: Box::new(self),
            args: args.into_iter().collect(),
        }
    }
    /// Wraps [self] into method call with `args`.
    pub fn method(
        self,
        method: &str,
        args: impl IntoIterator<Item = Expr>,
    ) -> Self {
        Self::MethodCall {
            receiver: Box::new(self),
            method: method.to_owned(),
            args: args.into_iter().collect(),
        }
    }
    /// Wraps [self] into `&`.
    pub fn reference(self) -> Self {
        Self::Ref(Box::new(self))
    }
    /// Wraps [self] into `&mut`.
    pub fn reference_mut(self) -> Self {
        Self::RefMut(Box::new(self))
    }
    /// Wraps [self] into `?`.
    pub fn try_(self) -> Self {
        Self::Try(Box::new(self))
    }
    /// Wraps [self] into parameterless closure.
    pub fn closure(self) -> Self {
        Self::Closure {
            params: Vec::new(),
            body: Box::new(self),
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Expr::Ident(name) => validate_identifier(name),
            Expr::Path(segments) => {
                if segments.is_empty() {
                    return Err("empty path".to_owned());
                }
                segments
                    .iter()
                    .try_for_each(|segment| validate_identifier(segment))
            }
            Expr::Str(_) | Expr::Int(_) => Ok(()),
            Expr::Call { func, args } => {
                func.validate()?;
                args.iter().try_for_each(Expr::validate)
            }
            Expr::MethodCall {
                receiver,
                method,
                args,
            } => {
                receiver.validate()?;
                validate_identifier(method)?;
                args.iter().try_for_each(Expr::validate)
            }
            Expr::Ref(inner) | Expr::RefMut(inner) | Expr::Try(inner) => inner.validate(),
            Expr::Closure { params, body } => {
                params
                    .iter()
                    .try_for_each(|param| validate_identifier(param))?;
                body.validate()
            }
        }
    }
}
impl fmt::Display for Expr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::Path(segments) => {
                for segment in segments {
                    write!(f, "::{segment}")?;
                }
                Ok(())
            }
            // debug formatting of str is a valid rust literal
            Expr::Str(value) => write!(f, "{value:?}"),
            Expr::Int(value) => write!(f, "{value}"),
            Expr::Call { func, args } => write!(f, "{func}({})", args.iter().join(", ")),
            Expr::MethodCall {
                receiver,
                method,
                args,
            } => write!(f, "{receiver}.{method}({})", args.iter().join(", ")),
            Expr::Ref(inner) => write!(f, "&{inner}"),
            Expr::RefMut(inner) => write!(f, "&mut {inner}"),
            Expr::Try(inner) => write!(f, "{inner}?"),
            Expr::Closure { params, body } => write!(f, "|{}| {body}", params.iter().join(", ")),
        }
    }
}

/// Statement inside function body.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Statement {
    /// `let [mut] name[: ty] = value;`
    Let {
        /// Binding name.
        name: String,
        /// Whether binding is `mut`.
        mutable: bool,
        /// Type annotation, emitted verbatim.
        ty: Option<String>,
        /// Initializer.
        value: Expr,
    },
    /// `expr;`
    Expr(Expr),
    /// `{ statements... }`
    Block(Vec<Statement>),
    /// Trailing expression of a function, without `;`.
    Tail(Expr),
}
impl Statement {
    /// Creates immutable [Statement::Let].
    pub fn let_(
        name: &str,
        value: Expr,
    ) -> Self {
        Self::Let {
            name: name.to_owned(),
            mutable: false,
            ty: None,
            value,
        }
    }
    /// Creates mutable [Statement::Let].
    pub fn let_mut(
        name: &str,
        value: Expr,
    ) -> Self {
        Self::Let {
            name: name.to_owned(),
            mutable: true,
            ty: None,
            value,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Statement::Let { name, value, .. } => {
                validate_identifier(name)?;
                value.validate()
            }
            Statement::Expr(expr) | Statement::Tail(expr) => expr.validate(),
            Statement::Block(statements) => statements.iter().try_for_each(Statement::validate),
        }
    }

    fn render(
        &self,
        out: &mut String,
        indent: usize,
    ) -> fmt::Result {
        match self {
            Statement::Let {
                name,
                mutable,
                ty,
                value,
            } => {
                write_indent(out, indent)?;
                out.push_str("let ");
                if *mutable {
                    out.push_str("mut ");
                }
                out.push_str(name);
                if let Some(ty) = ty {
                    write!(out, ": {ty}")?;
                }
                writeln!(out, " = {value};")
            }
            Statement::Expr(expr) => {
                write_indent(out, indent)?;
                writeln!(out, "{expr};")
            }
            Statement::Block(statements) => {
                write_indent(out, indent)?;
                out.push_str("{\n");
                for statement in statements {
                    statement.render(out, indent + 1)?;
                }
                write_indent(out, indent)?;
                out.push_str("}\n");
                Ok(())
            }
            Statement::Tail(expr) => {
                write_indent(out, indent)?;
                writeln!(out, "{expr}")
            }
        }
    }
}

/// Item visibility.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Visibility {
    /// Private to the generated module.
    Private,
    /// `pub`.
    Public,
}
impl Visibility {
    fn prefix(&self) -> &'static str {
        match self {
            Visibility::Private => "",
            Visibility::Public => "pub ",
        }
    }
}

/// Module level item.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Item<'a> {
    /// `// text`, one line per line of `text`.
    Comment(String),
    /// `use ::segments;`
    Use(Vec<String>),
    /// `[pub ]static name: ty = value;`
    Static {
        /// Visibility.
        visibility: Visibility,
        /// Static name.
        name: String,
        /// Type, emitted verbatim.
        ty: String,
        /// Initializer.
        value: Expr,
    },
    /// `static name: &[u8] = &[..];`, holding embedded data.
    Bytes {
        /// Static name.
        name: String,
        /// Data.
        content: &'a [u8],
    },
    /// `[pub ]fn name() -> ret { body }`
    Fn {
        /// Visibility.
        visibility: Visibility,
        /// Function name.
        name: String,
        /// Return type, emitted verbatim.
        ret: Option<String>,
        /// Function body.
        body: Vec<Statement>,
    },
}
impl Item<'_> {
    fn validate(&self) -> Result<(), String> {
        match self {
            Item::Comment(_) => Ok(()),
            Item::Use(segments) => {
                if segments.is_empty() {
                    return Err("empty use path".to_owned());
                }
                segments
                    .iter()
                    .try_for_each(|segment| validate_identifier(segment))
            }
            Item::Static { name, value, .. } => {
                validate_identifier(name)?;
                value.validate()
            }
            Item::Bytes { name, .. } => validate_identifier(name),
            Item::Fn { name, body, .. } => {
                validate_identifier(name)?;
                body.iter().try_for_each(Statement::validate)
            }
        }
    }

    fn render(
        &self,
        out: &mut String,
        indent: usize,
    ) -> fmt::Result {
        match self {
            Item::Comment(text) => {
                for line in text.lines() {
                    write_indent(out, indent)?;
                    writeln!(out, "// {line}")?;
                }
                Ok(())
            }
            Item::Use(segments) => {
                write_indent(out, indent)?;
                writeln!(out, "use ::{};", segments.iter().join("::"))
            }
            Item::Static {
                visibility,
                name,
                ty,
                value,
            } => {
                write_indent(out, indent)?;
                writeln!(
                    out,
                    "{}static {name}: {ty} = {value};",
                    visibility.prefix()
                )
            }
            Item::Bytes { name, content } => {
                write_indent(out, indent)?;
                if content.is_empty() {
                    return writeln!(out, "static {name}: &[u8] = &[];");
                }
                writeln!(out, "static {name}: &[u8] = &[")?;
                for chunk in content.chunks(BYTES_PER_LINE) {
                    write_indent(out, indent + 1)?;
                    writeln!(
                        out,
                        "{},",
                        chunk.iter().map(|byte| format!("0x{byte:02x}")).join(", ")
                    )?;
                }
                write_indent(out, indent)?;
                out.push_str("];\n");
                Ok(())
            }
            Item::Fn {
                visibility,
                name,
                ret,
                body,
            } => {
                write_indent(out, indent)?;
                write!(out, "{}fn {name}()", visibility.prefix())?;
                if let Some(ret) = ret {
                    write!(out, " -> {ret}")?;
                }
                out.push_str(" {\n");
                for statement in body {
                    statement.render(out, indent + 1)?;
                }
                write_indent(out, indent)?;
                out.push_str("}\n");
                Ok(())
            }
        }
    }
}

/// Single generated source file, containing one public module.
#[derive(Debug)]
pub struct SourceFile<'a> {
    /// Comment placed at the very top of the file.
    pub header: String,
    /// Name of the module wrapping all items.
    pub module_name: String,
    /// Items of the module, in output order.
    pub items: Vec<Item<'a>>,
}
impl SourceFile<'_> {
    /// Checks all identifiers used in the file. Returns description of the
    /// first problem found.
    pub fn validate(&self) -> Result<(), String> {
        validate_identifier(&self.module_name).map_err(|error| format!("module name: {error}"))?;
        self.items.iter().try_for_each(Item::validate)
    }

    /// Validates and renders file into text.
    pub fn render(&self) -> Result<String, String> {
        self.validate()?;
        self.render_unchecked()
            .map_err(|error| format!("formatting failed: {error}"))
    }

    fn render_unchecked(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();

        for line in self.header.lines() {
            writeln!(out, "// {line}")?;
        }
        out.push('\n');

        out.push_str("#[allow(dead_code, unused_mut, clippy::all)]\n");
        writeln!(out, "pub mod {} {{", self.module_name)?;
        for (index, item) in self.items.iter().enumerate() {
            // blank line between items, except for consecutive `use`
            if index > 0
                && !matches!(
                    (&self.items[index - 1], item),
                    (Item::Use(_), Item::Use(_))
                )
            {
                out.push('\n');
            }
            item.render(&mut out, 1)?;
        }
        out.push_str("}\n");

        Ok(out)
    }
}

const BYTES_PER_LINE: usize = 16;
const INDENT: &str = "    ";

fn write_indent(
    out: &mut String,
    indent: usize,
) -> fmt::Result {
    for _ in 0..indent {
        out.push_str(INDENT);
    }
    Ok(())
}

// strict and reserved keywords of edition 2024
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Checks whether `name` may be used as plain rust identifier.
pub fn validate_identifier(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|char| char.is_ascii_alphanumeric() || char == '_')
        }
        _ => false,
    };
    if !valid || name == "_" {
        return Err(format!("{name:?} is not a valid identifier"));
    }
    if KEYWORDS.contains(&name) {
        return Err(format!("{name:?} is a reserved keyword"));
    }
    Ok(())
}
