//! Text utilities for signature and argument inspection.
//!
//! Analysis works on type and argument text as written rather than on a
//! structured type representation, so these helpers are bracket-aware:
//! separators nested inside `<...>`, `(...)` or `[...]` are never split on.

/// Tracks bracket nesting while scanning type text.
#[derive(Clone, Copy, Debug, Default)]
struct Depth(usize);

impl Depth {
    fn step(&mut self, c: char) {
        match c {
            '<' | '(' | '[' => self.0 += 1,
            '>' | ')' | ']' => self.0 = self.0.saturating_sub(1),
            _ => {}
        }
    }

    const fn is_top(self) -> bool {
        self.0 == 0
    }
}

/// Splits `text` on `sep` where it occurs outside any bracket nesting.
///
/// Pieces are trimmed; empty pieces are kept so callers can decide.
///
/// ```
/// use conduit_language::text::split_top_level;
/// assert_eq!(split_top_level("Event<Map<K, V>>, error", ','), vec!["Event<Map<K, V>>", "error"]);
/// ```
#[must_use]
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = Depth::default();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c == sep && depth.is_top() {
            pieces.push(text[start..i].trim());
            start = i + c.len_utf8();
        } else {
            depth.step(c);
        }
    }
    pieces.push(text[start..].trim());
    pieces
}

/// Returns the byte index of the last whitespace character outside bracket
/// nesting.
#[must_use]
pub fn last_top_level_whitespace(text: &str) -> Option<usize> {
    let mut depth = Depth::default();
    let mut last = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() && depth.is_top() {
            last = Some(i);
        } else {
            depth.step(c);
        }
    }
    last
}

/// Given the byte index of an opening `(`, returns the index of its matching
/// `)`. Nested parentheses are balanced; other brackets are ignored.
#[must_use]
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    if text.as_bytes().get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Removes surrounding double quotes.
#[must_use]
pub fn trim_quotes(text: &str) -> &str {
    text.trim_matches('"')
}

/// Splits `key=value` text. The `=` must not be the first character.
/// Both sides are trimmed.
#[must_use]
pub fn split_key_value(text: &str) -> Option<(&str, &str)> {
    match text.find('=') {
        Some(i) if i > 0 => Some((text[..i].trim(), text[i + 1..].trim())),
        _ => None,
    }
}

// =============================================================================
// Literal validators
// =============================================================================

/// Digits in `radix`, with `_` allowed only between two digits.
fn is_digit_run(text: &str, radix: u32) -> bool {
    if text.is_empty() || text.starts_with('_') || text.ends_with('_') || text.contains("__") {
        return false;
    }
    text.chars().all(|c| c == '_' || c.is_digit(radix))
}

/// Returns true for a decimal integer literal such as `42` or `1_000`.
#[must_use]
pub fn is_decimal_int(text: &str) -> bool {
    is_digit_run(text, 10)
}

/// Returns true for an integer literal: decimal, `0x` hex, `0o` octal, or
/// `0b` binary, optionally preceded by `-`.
#[must_use]
pub fn is_int_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in prefixed {
        if let Some(rest) = digits.strip_prefix(prefix) {
            return is_digit_run(rest, radix);
        }
    }
    is_decimal_int(digits)
}

/// Returns true for a decimal float literal such as `2.5`, `.5`, `1e9` or
/// `-3.0e-2`.
#[must_use]
pub fn is_float_literal(text: &str) -> bool {
    let text = text.strip_prefix('-').unwrap_or(text);
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, frac)) => {
            (whole.is_empty() || is_decimal_int(whole))
                && (frac.is_empty() || is_decimal_int(frac))
                && !(whole.is_empty() && frac.is_empty())
        }
        None => exponent.is_some() && is_decimal_int(mantissa),
    };
    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        is_decimal_int(e)
    });
    mantissa_ok && exponent_ok
}

/// Returns true for any integer or float literal.
#[must_use]
pub fn is_number_literal(text: &str) -> bool {
    is_int_literal(text) || is_float_literal(text)
}

/// Returns true for a plain identifier: a letter or `_`, then letters,
/// digits, or `_`.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Returns true for a dotted identifier path such as `pkg.Name`.
#[must_use]
pub fn is_identifier_path(text: &str) -> bool {
    text.split('.').all(is_identifier)
}
