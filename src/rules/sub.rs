//! SUB — subquery/set-operation rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast_util::{all_joins, is_distinct},
    report::Finding,
    rules::{
        FnRule, Rule,
        meta::{SUB_001, SUB_002, SUB_003, SUB_005, SUB_006, SUB_007}
    },
    settings::Settings,
    statement::Statement
};

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule(SUB_001, in_subquery)),
        Box::new(FnRule(SUB_002, union_without_all)),
        Box::new(FnRule(SUB_003, distinct_with_join)),
        Box::new(FnRule(SUB_005, subquery_with_limit)),
        Box::new(FnRule(SUB_006, subquery_of_aggregate)),
        Box::new(FnRule(SUB_007, union_branch_missing_limit))
    ]
}

static IN_SUBQUERY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bIN\s*\(\s*SELECT\b").unwrap());
static UNION_NO_ALL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bUNION\b(?!\s+ALL\b)").unwrap());
static SUBQUERY_LIMIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)\(\s*SELECT[^()]*\bLIMIT\b[^()]*\)").unwrap());
static SUBQUERY_AGGREGATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*SELECT\s+(?:MAX|MIN|SUM|AVG|COUNT)\s*\(").unwrap());
static LIMIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").unwrap());

fn in_subquery(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if IN_SUBQUERY_RE.is_match(&stmt.stripped) {
        Some(Finding::new(SUB_001, 0, "IN is fed a subquery rather than a join"))
    } else {
        None
    }
}

fn union_without_all(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if UNION_NO_ALL_RE.is_match(&stmt.stripped) {
        Some(Finding::new(SUB_002, 0, "UNION deduplicates by default, requiring an extra sort/scan"))
    } else {
        None
    }
}

fn distinct_with_join(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let ast = stmt.ast.as_ref()?;
    if is_distinct(ast) && !all_joins(ast).is_empty() {
        Some(Finding::new(SUB_003, 0, "DISTINCT is used to paper over row duplication introduced by a JOIN"))
    } else {
        None
    }
}

fn subquery_with_limit(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if SUBQUERY_LIMIT_RE.is_match(&stmt.stripped) {
        Some(Finding::new(SUB_005, 0, "subquery carries its own LIMIT"))
    } else {
        None
    }
}

fn subquery_of_aggregate(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    if SUBQUERY_AGGREGATE_RE.is_match(&stmt.stripped) {
        Some(Finding::new(SUB_006, 0, "subquery wraps an aggregate result, often clearer as a join or window function"))
    } else {
        None
    }
}

/// Split `text` on top-level `UNION` keywords, ignoring ones nested inside
/// parentheses or quoted strings.
fn split_top_level_union(text: &str) -> Vec<String> {
    let upper = text.to_ascii_uppercase();
    let bytes = text.as_bytes();
    let upper_bytes = upper.as_bytes();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'\'' | b'"' => {
                quote = Some(b);
                i += 1;
            }
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                depth -= 1;
                i += 1;
            }
            _ if depth == 0 && upper_bytes[i..].starts_with(b"UNION") => {
                let before_ok = i == 0 || !bytes[i - 1].is_ascii_alphanumeric();
                let after = i + 5;
                let after_ok = after >= bytes.len() || !bytes[after].is_ascii_alphanumeric();
                if before_ok && after_ok {
                    parts.push(text[start..i].to_string());
                    let mut next = after;
                    if upper_bytes[next..].trim_ascii_start().starts_with(b"ALL") {
                        let skip = upper[next..].len() - upper[next..].trim_start().len();
                        next += skip + 3;
                    }
                    start = next;
                    i = next;
                } else {
                    i += 5;
                }
            }
            _ => {
                i += 1;
            }
        }
    }
    parts.push(text[start..].to_string());
    parts
}

fn union_branch_missing_limit(stmt: &Statement, _settings: &Settings) -> Option<Finding> {
    let branches = split_top_level_union(&stmt.stripped);
    if branches.len() < 2 {
        return None;
    }
    let with_limit = branches.iter().filter(|b| LIMIT_RE.is_match(b)).count();
    if with_limit > 0 && with_limit < branches.len() {
        Some(Finding::new(SUB_007, 0, "UNION has LIMIT on some branches but not every branch"))
    } else {
        None
    }
}
