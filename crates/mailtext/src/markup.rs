//! HTML escaping and the entity/escape unescape pipeline.
//!
//! [`escape`] rewrites the four characters that can break out of markup when
//! a plain string is interpolated into HTML. [`unescape`] reverses the
//! escapes a message body or style sheet may carry: named entities, decimal
//! and hexadecimal character references, CSS backslash-hex escapes and a
//! final backslash catch-all, applied as a fixed pipeline whose stage order
//! is part of the contract.

use tracing::trace;

/// Characters rewritten by [`escape`] and their replacements.
const ESCAPE_MAP: [(char, &str); 4] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
];

/// Named entities recognized by the first unescape stage.
const NAMED_ENTITIES: [(&str, char); 6] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&apos;", '\''),
];

/// Escapes `&`, `<`, `>` and `"` for safe interpolation into HTML.
///
/// A single left-to-right pass over the input; replacement text is never
/// rescanned, so `&` inside a produced `&amp;` is not escaped again.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match ESCAPE_MAP.iter().find(|&&(from, _)| from == c) {
            Some(&(_, entity)) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

/// Unescapes named entities, character references and backslash escapes.
///
/// Five stages run in a fixed order, each rescanning the whole output of the
/// previous one:
///
/// 1. named entities (`&amp;` `&lt;` `&gt;` `&quot;` `&#39;` `&apos;`)
/// 2. decimal character references (`&#NNN;` or `&#NNN` before a
///    non-digit/non-`;`)
/// 3. hexadecimal character references (`&#xHHHH;`, same terminator rule)
/// 4. CSS backslash escapes (`\H` through `\HHHHHH`, one optional trailing
///    space consumed as separator)
/// 5. remaining single backslash escapes (`\X` becomes `X`)
///
/// The order is observable: stage 1 can uncover references for stages 2-3,
/// and stage 4 can leave text for stage 5. References denoting values that
/// are not Unicode scalars stay in the output verbatim.
#[must_use]
pub fn unescape(input: &str) -> String {
    let named = unescape_named(input);
    let decimal = unescape_decimal(&named);
    let hex = unescape_hex(&decimal);
    let css = unescape_css(&hex);
    unescape_backslash(&css)
}

/// Replaces the named entities of [`NAMED_ENTITIES`]; anything else starting
/// with `&` is copied through.
fn unescape_named(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match NAMED_ENTITIES.iter().find(|&&(name, _)| rest.starts_with(name)) {
            Some(&(name, c)) => {
                out.push(c);
                rest = &rest[name.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Replaces decimal character references.
///
/// A `;` terminator is consumed; any other terminating character is left in
/// place. A reference running into the end of the input does not terminate
/// and stays literal.
fn unescape_decimal(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'&' && bytes.get(i + 1) == Some(&b'#') {
            let digits_start = i + 2;
            let mut j = digits_start;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > digits_start && j < bytes.len() {
                let end = if bytes[j] == b';' { j + 1 } else { j };
                match code_point(&input[digits_start..j], 10) {
                    Some(c) => out.push(c),
                    None => out.push_str(&input[i..end]),
                }
                i = end;
                continue;
            }
        }
        let Some(c) = input[i..].chars().next() else {
            break;
        };
        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Replaces hexadecimal character references, terminator rule as in
/// [`unescape_decimal`].
///
/// The terminator class excludes only decimal digits and `;`, so at the end
/// of the input the last hex letter in the run can terminate the longest
/// digit prefix before it (`&#x12AB` becomes U+012A followed by a literal
/// `B`, `&#x41B9` becomes `A` followed by `B9`).
fn unescape_hex(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'&'
            && bytes.get(i + 1) == Some(&b'#')
            && matches!(bytes.get(i + 2), Some(b'x' | b'X'))
        {
            let digits_start = i + 3;
            let mut j = digits_start;
            while j < bytes.len() && bytes[j].is_ascii_hexdigit() {
                j += 1;
            }
            if j > digits_start {
                if j < bytes.len() {
                    let end = if bytes[j] == b';' { j + 1 } else { j };
                    match code_point(&input[digits_start..j], 16) {
                        Some(c) => out.push(c),
                        None => out.push_str(&input[i..end]),
                    }
                    i = end;
                    continue;
                }
                // Greedy backtracking cuts before the last letter in the
                // run; the prefix left of it must stay non-empty.
                let split = input[digits_start..j]
                    .bytes()
                    .rposition(|b| b.is_ascii_alphabetic())
                    .map(|k| digits_start + k);
                if let Some(split) = split.filter(|&split| split > digits_start) {
                    match code_point(&input[digits_start..split], 16) {
                        Some(c) => out.push(c),
                        None => out.push_str(&input[i..split]),
                    }
                    out.push_str(&input[split..j]);
                    i = j;
                    continue;
                }
            }
        }
        let Some(c) = input[i..].chars().next() else {
            break;
        };
        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Replaces CSS backslash-hex escapes: one to six hex digits taken greedily,
/// with one optional following space consumed as a separator.
fn unescape_css(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let digits_start = i + 1;
            let mut j = digits_start;
            while j < bytes.len() && j - digits_start < 6 && bytes[j].is_ascii_hexdigit() {
                j += 1;
            }
            if j > digits_start {
                if let Some(c) = code_point(&input[digits_start..j], 16) {
                    out.push(c);
                    if bytes.get(j) == Some(&b' ') {
                        j += 1;
                    }
                    i = j;
                    continue;
                }
                // Out-of-range escape: left for the catch-all stage.
            }
        }
        let Some(c) = input[i..].chars().next() else {
            break;
        };
        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Replaces any remaining `\X` with `X`.
///
/// Line terminators are never the escaped character, and a lone trailing
/// backslash stays.
fn unescape_backslash(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next) if !is_line_terminator(next) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

const fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Parses `digits` in `radix` as a Unicode scalar value.
///
/// Returns `None` on overflow, surrogates and values past U+10FFFF; callers
/// leave the source text in place.
fn code_point(digits: &str, radix: u32) -> Option<char> {
    match u32::from_str_radix(digits, radix).ok().and_then(char::from_u32) {
        Some(c) => Some(c),
        None => {
            trace!("character reference out of range: {digits} (radix {radix})");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_basic() {
        assert_eq!(escape("<a>"), "&lt;a&gt;");
    }

    #[test]
    fn test_escape_all_four() {
        assert_eq!(
            escape(r#"a & b < c > d "e""#),
            "a &amp; b &lt; c &gt; d &quot;e&quot;"
        );
    }

    #[test]
    fn test_escape_does_not_rescan_output() {
        // The '&' of an already escaped sequence is escaped once, not twice.
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_unescape_named() {
        assert_eq!(
            unescape_named("&lt;b&gt; &amp; &quot;q&quot; &#39;s&#39; &apos;t&apos;"),
            "<b> & \"q\" 's' 't'"
        );
    }

    #[test]
    fn test_unescape_named_unknown_entity_kept() {
        assert_eq!(unescape_named("&bogus; &nbsp;"), "&bogus; &nbsp;");
    }

    #[test]
    fn test_unescape_named_does_not_rescan() {
        // "&amp;lt;" decodes the leading entity only.
        assert_eq!(unescape_named("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_unescape_decimal() {
        assert_eq!(unescape_decimal("&#65;&#66;"), "AB");
    }

    #[test]
    fn test_unescape_decimal_non_digit_terminator_kept() {
        assert_eq!(unescape_decimal("&#65x"), "Ax");
    }

    #[test]
    fn test_unescape_decimal_end_of_input_stays_literal() {
        assert_eq!(unescape_decimal("&#65"), "&#65");
    }

    #[test]
    fn test_unescape_decimal_out_of_range_stays_literal() {
        // 1114112 is U+110000, one past the last code point.
        assert_eq!(unescape_decimal("&#1114112;"), "&#1114112;");
    }

    #[test]
    fn test_unescape_decimal_no_digits() {
        assert_eq!(unescape_decimal("&#;"), "&#;");
    }

    #[test]
    fn test_unescape_hex() {
        assert_eq!(unescape_hex("&#x41;&#X42;"), "AB");
        assert_eq!(unescape_hex("&#xA0;"), "\u{A0}");
    }

    #[test]
    fn test_unescape_hex_astral_plane() {
        assert_eq!(unescape_hex("&#x1F600;"), "\u{1F600}");
    }

    #[test]
    fn test_unescape_hex_end_of_input_digit_stays_literal() {
        assert_eq!(unescape_hex("&#x41"), "&#x41");
    }

    #[test]
    fn test_unescape_hex_end_of_input_letter_terminates() {
        // A hex letter is a valid terminator of the shortened reference,
        // matching the source terminator class.
        assert_eq!(unescape_hex("&#x12AB"), "\u{12A}B");
    }

    #[test]
    fn test_unescape_hex_end_of_input_splits_at_last_letter() {
        // The longest digit prefix before the last letter decodes, even
        // with decimal digits after that letter.
        assert_eq!(unescape_hex("&#x41B9"), "AB9");
        assert_eq!(unescape_hex("&#x1A2"), "\u{1}A2");
    }

    #[test]
    fn test_unescape_hex_end_of_input_leading_letter_stays_literal() {
        // A letter first in the run leaves no digit prefix to decode.
        assert_eq!(unescape_hex("&#xA2"), "&#xA2");
    }

    #[test]
    fn test_unescape_css() {
        assert_eq!(unescape_css("\\43 d"), "Cd");
        assert_eq!(unescape_css("\\0000411"), "A1");
    }

    #[test]
    fn test_unescape_css_space_is_separator_not_content() {
        assert_eq!(unescape_css("\\41  b"), "A b");
    }

    #[test]
    fn test_unescape_backslash() {
        assert_eq!(unescape_backslash("\\x\\y"), "xy");
        assert_eq!(unescape_backslash("a\\"), "a\\");
        assert_eq!(unescape_backslash("\\\nx"), "\\\nx");
    }

    #[test]
    fn test_unescape_pipeline() {
        assert_eq!(unescape("&#65;&#x42;\\43 D"), "ABCD");
    }

    #[test]
    fn test_unescape_pipeline_feeds_later_stages() {
        // Stage 1 uncovers a decimal reference for stage 2.
        assert_eq!(unescape("&amp;#65;"), "A");
        // Stage 4 leaves an out-of-range escape for stage 5 to strip.
        assert_eq!(unescape("\\110000"), "110000");
    }

    #[test]
    fn test_unescape_plain_text_unchanged() {
        assert_eq!(unescape("nothing to do here"), "nothing to do here");
        assert_eq!(unescape(""), "");
    }

    proptest! {
        #[test]
        fn test_escape_unescape_round_trip(s in "[^&\\\\]*") {
            prop_assert_eq!(unescape(&escape(&s)), s);
        }
    }
}
