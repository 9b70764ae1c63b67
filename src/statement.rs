//! Per-statement bundle carried through rule evaluation: raw text, a
//! comment-stripped variant for regex rules, the parsed AST (if parsing
//! succeeded), a statement-kind tag, and a fingerprint used by the driver to
//! collapse equivalent queries.

use std::hash::{Hash, Hasher};

use serde::Serialize;
use sqlparser::ast::Statement as AstStatement;

/// Coarse classification of a parsed or partially-recognized statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Replace,
    Union,
    DdlCreateTable,
    DdlAlterTable,
    DdlCreateIndex,
    DdlCreateTrigger,
    DdlCreateProcedure,
    DdlCreateFunction,
    DdlCreateView,
    DdlTruncate,
    DdlDrop,
    Dcl,
    Utility
}

impl StatementKind {
    /// Classify a successfully-parsed AST node.
    ///
    /// The handful of DDL/DCL statement shapes sqlparser's enum does not
    /// break out as their own variants (`CREATE TRIGGER`, `CREATE
    /// PROCEDURE`, `GRANT`/`REVOKE`, `USE`, `SHOW ...`) are classified by a
    /// keyword scan over the rendered statement text instead of by variant
    /// match, since that surface is the part of the AST most likely to
    /// shift between parser versions.
    pub fn classify(ast: &AstStatement) -> Self {
        use sqlparser::ast::Statement as S;
        match ast {
            S::Query(q) => {
                if matches!(q.body.as_ref(), sqlparser::ast::SetExpr::SetOperation { .. }) {
                    Self::Union
                } else {
                    Self::Select
                }
            }
            S::Insert(_) => Self::Insert,
            S::Update { .. } => Self::Update,
            S::Delete(_) => Self::Delete,
            S::Truncate { .. } => Self::DdlTruncate,
            S::Drop { .. } => Self::DdlDrop,
            S::CreateTable(_) => Self::DdlCreateTable,
            S::AlterTable { .. } => Self::DdlAlterTable,
            S::CreateIndex(_) => Self::DdlCreateIndex,
            S::CreateView { .. } => Self::DdlCreateView,
            S::CreateFunction(_) => Self::DdlCreateFunction,
            other => classify_by_keyword(&other.to_string())
        }
    }

    /// Whether this kind participates in MySQL's `INSERT`/`REPLACE` sharing
    /// of semantics — rules that fire on `Insert` also fire on `Replace`.
    pub fn is_insert_like(self) -> bool {
        matches!(self, Self::Insert | Self::Replace)
    }

    pub fn is_dml(self) -> bool {
        matches!(self, Self::Insert | Self::Replace | Self::Update | Self::Delete)
    }
}

/// One input unit: raw SQL text plus everything the rule catalog needs to
/// inspect it.
#[derive(Debug, Clone)]
pub struct Statement {
    pub raw: String,
    pub stripped: String,
    pub kind: StatementKind,
    pub ast: Option<AstStatement>,
    pub parse_error: Option<String>,
    pub fingerprint: u64
}

impl Statement {
    /// Whether parsing produced a usable AST; relative rules require this.
    pub fn has_ast(&self) -> bool {
        self.ast.is_some()
    }
}

fn classify_by_keyword(text: &str) -> StatementKind {
    let upper = text.trim_start().to_ascii_uppercase();
    if upper.starts_with("CREATE TRIGGER") {
        StatementKind::DdlCreateTrigger
    } else if upper.starts_with("CREATE PROCEDURE") || upper.starts_with("CREATE DEFINER") && upper.contains("PROCEDURE") {
        StatementKind::DdlCreateProcedure
    } else if upper.starts_with("GRANT") || upper.starts_with("REVOKE") || upper.starts_with("CREATE USER")
        || upper.starts_with("ALTER USER") || upper.starts_with("DROP USER")
    {
        StatementKind::Dcl
    } else {
        StatementKind::Utility
    }
}

/// Strip `--` and `/* ... */` comments, useful for lexical-probe regexes
/// that should not fire on commented-out SQL.
pub fn strip_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.char_indices().peekable();
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if sql[i..].starts_with("--") {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        if sql[i..].starts_with("/*") {
            if let Some(end) = sql[i + 2..].find("*/") {
                i += 2 + end + 2;
            } else {
                i = bytes.len();
            }
            continue;
        }
        let ch = sql[i..].chars().next().unwrap_or('\u{0}');
        out.push(ch);
        i += ch.len_utf8();
    }
    let _ = &mut chars;
    out
}

/// Canonicalize a statement into a fingerprint: literals and run-of-whitespace
/// collapse so that queries differing only in literal values share a key.
/// This is an approximation consistent with spec.md's definition — exact
/// byte-for-byte equality is not required, only that equivalent shapes
/// collapse.
pub fn fingerprint(sql: &str) -> u64 {
    let canonical = canonicalize(sql);
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}

fn canonicalize(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut last_was_space = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let quote = c;
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == quote {
                        break;
                    }
                }
                out.push('?');
                last_was_space = false;
            }
            c if c.is_ascii_digit() => {
                while matches!(chars.peek(), Some(d) if d.is_ascii_digit() || *d == '.') {
                    chars.next();
                }
                out.push('#');
                last_was_space = false;
            }
            c if c.is_whitespace() => {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
            }
            other => {
                out.push(other.to_ascii_uppercase());
                last_was_space = false;
            }
        }
    }

    out.trim().to_string()
}
