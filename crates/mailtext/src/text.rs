//! Small display helpers for contact fields.

/// Uppercases the first character of `input`, leaving the rest unchanged.
///
/// Uses full Unicode uppercasing, so the first character may expand to more
/// than one. Empty input yields empty output.
#[must_use]
pub fn uc_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the interior of the first `<...>` span.
///
/// Only the first span with a non-empty interior counts, e.g. the address
/// part of `"Andy <andy@pm.me>"`. Returns the empty string when no such span
/// exists; `"<>"` has an empty interior and does not match.
#[must_use]
pub fn extract_chevrons(input: &str) -> String {
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            // No closing chevron left anywhere, so no later span either.
            break;
        };
        if close > 0 {
            return after[..close].to_string();
        }
        rest = &after[close + 1..];
    }
    String::new()
}
