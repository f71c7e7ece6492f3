//! Identifier generation for transient UI elements and contact records.
//!
//! Collision resistance is probabilistic only; none of these tokens is
//! cryptographically secure or guaranteed globally unique.

use chrono::Utc;
use rand::Rng;

/// Digit alphabet for radix rendering, up to base 32.
const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Returns a short prefixed token: 10 random base-32 digits plus the current
/// millisecond timestamp.
#[must_use]
pub fn uniq_id() -> String {
    let mut rng = rand::thread_rng();
    let fragment: String = (0..10)
        .map(|_| {
            let digit: usize = rng.gen_range(0..32);
            char::from(DIGITS[digit])
        })
        .collect();
    format!("mt{fragment}-{}", Utc::now().timestamp_millis())
}

/// Generates a contact UID of the form
/// `mailtext-web-xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
///
/// UUID-shaped only: every hex group is independently random and no version
/// or variant bits are set.
#[must_use]
pub fn generate_uid() -> String {
    let s4 = || format!("{:04x}", rand::thread_rng().r#gen::<u16>());
    format!(
        "mailtext-web-{}{}-{}-{}-{}-{}{}{}",
        s4(),
        s4(),
        s4(),
        s4(),
        s4(),
        s4(),
        s4(),
        s4()
    )
}

/// Encodes a 32-bit value in base `2^bits` with no sign.
///
/// The word is split into a top segment and a fixed-width bottom segment;
/// when the top segment is nonzero the middle is zero-padded so the result
/// always has the full `ceil(32 / bits)` digits.
///
/// # Panics
///
/// Panics if `bits` is outside `1..=5`.
#[must_use]
pub fn to_unsigned_string(val: u32, bits: u32) -> String {
    assert!((1..=5).contains(&bits), "bits must be between 1 and 5");
    let word_count = 32u32.div_ceil(bits);
    let bottom_bits = (word_count - 1) * bits;

    let bottom = val & ((1 << bottom_bits) - 1);
    let top = val >> bottom_bits;
    if top == 0 {
        return to_radix(bottom, bits);
    }
    let top_string = to_radix(top, bits);
    let bottom_string = to_radix(bottom, bits);
    let pad = (word_count as usize).saturating_sub(top_string.len() + bottom_string.len());
    format!("{top_string}{}{bottom_string}", "0".repeat(pad))
}

/// Renders `value` in base `2^bits` with the lowercase digit alphabet.
fn to_radix(mut value: u32, bits: u32) -> String {
    let base = 1u32 << bits;
    let mut digits = Vec::new();
    loop {
        digits.push(char::from(DIGITS[(value % base) as usize]));
        value /= base;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}
