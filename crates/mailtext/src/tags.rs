//! Autocomplete tag delimiter substitution.
//!
//! The composer's autocomplete widget wraps recipient tags in raw chevron
//! delimiters. Before rendering, the raw delimiters are swapped for single
//! angle quotation marks so user-typed chevrons cannot be mistaken for tag
//! boundaries; the reverse direction restores the raw form.

use tracing::trace;

/// Raw opening delimiter emitted by the autocomplete widget.
pub const OPEN_TAG_AUTOCOMPLETE_RAW: char = '<';
/// Raw closing delimiter emitted by the autocomplete widget.
pub const CLOSE_TAG_AUTOCOMPLETE_RAW: char = '>';
/// Display form of the opening delimiter (U+2039).
pub const OPEN_TAG_AUTOCOMPLETE: char = '\u{2039}';
/// Display form of the closing delimiter (U+203A).
pub const CLOSE_TAG_AUTOCOMPLETE: char = '\u{203A}';

/// Substitution table covering both directions.
const TAG_MAP: [(char, char); 4] = [
    (OPEN_TAG_AUTOCOMPLETE_RAW, OPEN_TAG_AUTOCOMPLETE),
    (CLOSE_TAG_AUTOCOMPLETE_RAW, CLOSE_TAG_AUTOCOMPLETE),
    (OPEN_TAG_AUTOCOMPLETE, OPEN_TAG_AUTOCOMPLETE_RAW),
    (CLOSE_TAG_AUTOCOMPLETE, CLOSE_TAG_AUTOCOMPLETE_RAW),
];

/// Substitution direction for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Raw delimiters to display form.
    #[default]
    Forward,
    /// Display form back to raw delimiters.
    Reverse,
}

fn lookup(c: char) -> Option<char> {
    TAG_MAP
        .iter()
        .find(|&&(from, _)| from == c)
        .map(|&(_, to)| to)
}

/// Replaces tag delimiter characters according to `direction`.
///
/// Characters outside the delimiter set pass through untouched, so input
/// with no delimiters (including the empty string) comes back unchanged.
/// A matched delimiter with no table entry is dropped from the output
/// rather than passed through; the fixed table makes that unreachable
/// today, but the behavior is deliberate and kept.
#[must_use]
pub fn encode(input: &str, direction: Direction) -> String {
    let needles = match direction {
        Direction::Forward => [OPEN_TAG_AUTOCOMPLETE_RAW, CLOSE_TAG_AUTOCOMPLETE_RAW],
        Direction::Reverse => [OPEN_TAG_AUTOCOMPLETE, CLOSE_TAG_AUTOCOMPLETE],
    };

    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if needles.contains(&c) {
            match lookup(c) {
                Some(mapped) => out.push(mapped),
                None => trace!("dropping unmapped tag delimiter {c:?}"),
            }
        } else {
            out.push(c);
        }
    }
    out
}
