//! Inline function-literal signature parsing.
//!
//! A pipeline step may supply its worker as literal function text, e.g.
//! `Transform(func(ev Event<Order>) (Event<Invoice>, error) { ... })`.
//! This module recovers the parameter type and result types from that text
//! without building a type tree. A `None` result means "not recognized";
//! callers treat it as unverifiable rather than wrong.

use crate::text::{last_top_level_whitespace, matching_paren, split_top_level};

/// The `func` keyword that opens a function literal.
pub const FUNC_KEYWORD: &str = "func";

/// The header of an inline function literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineSignature {
    /// The parameter type (binding name removed). Empty for `func()`.
    pub param: String,
    /// Result types in order.
    pub results: Vec<String>,
}

/// Returns true if `text` opens with the `func` keyword token: `func`
/// followed by `(`, whitespace, or nothing.
#[must_use]
pub fn is_func_literal(text: &str) -> bool {
    text.trim_start()
        .strip_prefix(FUNC_KEYWORD)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(|c: char| c == '(' || c.is_whitespace()))
}

/// Parses the header of a function literal.
///
/// Returns `None` if the text does not start with the `func` keyword, has no
/// parameter list, or has an unbalanced parameter or result list.
#[must_use]
pub fn parse_inline_signature(text: &str) -> Option<InlineSignature> {
    if !is_func_literal(text) {
        return None;
    }
    let after_kw = text.trim_start()[FUNC_KEYWORD.len()..].trim_start();
    if !after_kw.starts_with('(') {
        return None;
    }
    let close = matching_paren(after_kw, 0)?;
    let param = param_type(&after_kw[1..close]).to_string();
    let results = parse_results(after_kw[close + 1..].trim_start())?;
    Some(InlineSignature { param, results })
}

/// Parses the result section that follows the parameter list.
fn parse_results(rest: &str) -> Option<Vec<String>> {
    if rest.is_empty() || rest.starts_with('{') {
        return Some(Vec::new());
    }
    if rest.starts_with('(') {
        let close = matching_paren(rest, 0)?;
        let results = split_top_level(&rest[1..close], ',')
            .into_iter()
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect();
        return Some(results);
    }
    let bare = rest.find('{').map_or(rest, |brace| &rest[..brace]).trim();
    if bare.is_empty() {
        Some(Vec::new())
    } else {
        Some(vec![bare.to_string()])
    }
}

/// Derives a parameter's type from `name Type` text.
///
/// Everything after the last top-level whitespace is the type; without such
/// whitespace the whole trimmed text is.
#[must_use]
pub fn param_type(param: &str) -> &str {
    let param = param.trim();
    match last_top_level_whitespace(param) {
        Some(i) => param[i..].trim(),
        None => param,
    }
}
