//! Generic type-argument extraction.
//!
//! The event container must never carry a pointer, so `Event<*Order>` and
//! `Event<&Order>` are rejected. These helpers pull the inner argument out of
//! a `Container<Inner>` token.

/// The event container type name.
pub const EVENT: &str = "Event";

/// Returns the trimmed inner text of `Container<Inner>`.
///
/// The token must start with `container<` and end with the matching `>`.
#[must_use]
pub fn generic_inner<'a>(ty: &'a str, container: &str) -> Option<&'a str> {
    ty.trim()
        .strip_prefix(container)?
        .strip_prefix('<')?
        .strip_suffix('>')
        .map(str::trim)
}

/// Returns the inner type of `Event<Inner>`.
#[must_use]
pub fn event_inner(ty: &str) -> Option<&str> {
    generic_inner(ty, EVENT)
}

/// Returns true if the type is exactly `Event` or `Event<...>`.
#[must_use]
pub fn is_event_type(ty: &str) -> bool {
    let ty = ty.trim();
    ty == EVENT || event_inner(ty).is_some()
}

/// Returns true if type text contains a pointer sigil (`&` or `*`).
#[must_use]
pub fn contains_pointer(ty: &str) -> bool {
    ty.contains(['&', '*'])
}

/// Returns the pointer-carrying inner type of `Event<...>`, if any.
#[must_use]
pub fn event_pointer_inner(ty: &str) -> Option<&str> {
    event_inner(ty).filter(|inner| contains_pointer(inner))
}
