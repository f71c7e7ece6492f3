//! Email address normalization and plus-alias handling.
//!
//! These helpers operate on whatever string the caller has, typically a
//! user-entered contact field. Nothing here validates addresses: input with
//! zero or several `@` characters is handled without error, and the
//! documented edge cases of the separator stripping are preserved as-is.

/// Lowercases an email address.
///
/// Only case changes; no trimming or other canonicalization.
#[must_use]
pub fn normalize(email: &str) -> String {
    email.to_lowercase()
}

/// Removes the plus-alias segment and separator characters from an address.
///
/// The input is lowercased, the first `+...` run directly preceding an `@`
/// is deleted, then every `.`, `_` and `-` that still has an `@` somewhere
/// after it is deleted.
///
/// This is a display-matching approximation, not provider-accurate
/// canonicalization: with several `@` characters the separator stripping
/// reaches up to the last one.
#[must_use]
pub fn remove_alias(email: &str) -> String {
    strip_separators(&strip_plus_alias(&normalize(email)))
}

/// Deletes the first `+<run of non-@>` immediately preceding an `@`.
fn strip_plus_alias(email: &str) -> String {
    for (idx, c) in email.char_indices() {
        if c == '+' {
            if let Some(at) = email[idx..].find('@') {
                return format!("{}{}", &email[..idx], &email[idx + at..]);
            }
            // No '@' after the first '+' means none after any later '+'.
            break;
        }
    }
    email.to_string()
}

/// Deletes `.`, `_` and `-` wherever an `@` occurs later in the string.
fn strip_separators(email: &str) -> String {
    let Some(last_at) = email.rfind('@') else {
        return email.to_string();
    };
    email
        .char_indices()
        .filter(|&(idx, c)| !(idx < last_at && matches!(c, '.' | '_' | '-')))
        .map(|(_, c)| c)
        .collect()
}

/// Inserts a `+suffix` alias into the local part of an address.
///
/// Returns the input unchanged when there is no `@` to anchor on, or when a
/// `+` already appears anywhere in the string (no double-aliasing). Case is
/// preserved; no normalization is performed.
#[must_use]
pub fn add_alias(email: &str, plus: &str) -> String {
    let Some(at) = email.find('@') else {
        return email.to_string();
    };
    if email.contains('+') {
        return email.to_string();
    }
    format!("{}+{}{}", &email[..at], plus, &email[at..])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_only() {
        assert_eq!(normalize(" Test@Example.COM"), " test@example.com");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_remove_alias() {
        assert_eq!(
            remove_alias("john.doe+newsletter@example.com"),
            "johndoe@example.com"
        );
    }

    #[test]
    fn test_remove_alias_lowercases() {
        assert_eq!(remove_alias("John_Doe@Example.com"), "johndoe@example.com");
    }

    #[test]
    fn test_remove_alias_without_at_only_lowercases() {
        assert_eq!(remove_alias("No.Address-Here"), "no.address-here");
    }

    #[test]
    fn test_remove_alias_keeps_domain_separators() {
        assert_eq!(remove_alias("a-b@my-host.com"), "ab@my-host.com");
    }

    #[test]
    fn test_remove_alias_multiple_at() {
        // Separator stripping reaches up to the last '@'; kept verbatim.
        assert_eq!(remove_alias("a.b@c.d@e"), "ab@cd@e");
    }

    #[test]
    fn test_remove_alias_plus_without_at_is_kept() {
        assert_eq!(remove_alias("a+b"), "a+b");
    }

    #[test]
    fn test_add_alias() {
        assert_eq!(add_alias("a@b.com", "x"), "a+x@b.com");
    }

    #[test]
    fn test_add_alias_already_aliased() {
        assert_eq!(add_alias("a+y@b.com", "x"), "a+y@b.com");
    }

    #[test]
    fn test_add_alias_plus_in_domain_blocks() {
        assert_eq!(add_alias("a@b+c.com", "x"), "a@b+c.com");
    }

    #[test]
    fn test_add_alias_without_at() {
        assert_eq!(add_alias("not-an-email", "x"), "not-an-email");
    }

    #[test]
    fn test_add_alias_preserves_case() {
        assert_eq!(add_alias("Andy@PM.me", "work"), "Andy+work@PM.me");
    }
}
