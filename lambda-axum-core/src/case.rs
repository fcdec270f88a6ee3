//! Header-name casing utilities.
//!
//! Two concerns live here:
//!
//! - [`canonical_header_key`]: the `http` crate lowercases every header name,
//!   but the gateway wire formats conventionally carry canonical MIME casing
//!   (`X-Forwarded-For`). Responses are canonical-cased so they match what
//!   clients of the original gateways expect.
//! - [`binary_case`]: some wire formats allow only one value per header name.
//!   Since HTTP header names are case-insensitive, the n-th duplicate of a
//!   name can be emitted under an alternate-case spelling, producing distinct
//!   map keys that a compliant client cannot tell apart from the original.

/// Encode `n` into an alternate-case spelling of `name`.
///
/// `n` is consumed as a bit sequence, least-significant bit first. Each ASCII
/// letter of `name` consumes one bit; a 1-bit flips that letter's case, a
/// 0-bit leaves it alone. Characters that are not ASCII letters are copied
/// through without consuming a bit.
///
/// `binary_case(name, 0)` always returns `name` unchanged. Spellings for
/// distinct `n` are pairwise distinct as long as `name` has enough letters to
/// hold the bits of `n`; names shorter than that collide, which bounds how
/// many duplicates of a very short header name can be represented.
pub fn binary_case(name: &str, n: u32) -> String {
    let mut bits = n;
    name.chars()
        .map(|c| {
            if bits == 0 || !c.is_ascii_alphabetic() {
                return c;
            }
            let flip = bits & 1 == 1;
            bits >>= 1;
            if flip {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            } else {
                c
            }
        })
        .collect()
}

/// Canonicalize a header name to MIME casing: the first letter and every
/// letter following a `-` are uppercased, the rest lowercased.
///
/// `x-forwarded-for` becomes `X-Forwarded-For`; `etag` becomes `Etag`.
pub fn canonical_header_key(name: &str) -> String {
    let mut upper_next = true;
    name.chars()
        .map(|c| {
            let out = if upper_next {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper_next = c == '-';
            out
        })
        .collect()
}
