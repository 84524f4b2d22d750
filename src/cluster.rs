//! Khmer orthographic cluster (syllable) analysis.
//!
//! ```text
//! CLUSTER := BASE (COENG BASE)* SIGN*
//! BASE    := consonant | independent vowel      ; U+1780..U+17B3
//! COENG   := U+17D2
//! SIGN    := U+17B6..U+17D1 | U+17D3 | U+17DD
//! ```

use crate::scanner::{decode, is_valid_single_base};

const COENG: u32 = 0x17D2;

#[inline]
fn is_coeng_target(cp: u32) -> bool {
    (0x1780..=0x17A2).contains(&cp)
}

#[inline]
fn is_sign(cp: u32) -> bool {
    (0x17B6..=0x17D1).contains(&cp) || cp == 0x17D3 || cp == 0x17DD
}

/// Byte length of the maximal Khmer cluster starting at `i` in `text`.
///
/// If the code point at `i` is not a valid base, the cluster is just that
/// one code point (the caller's unknown-edge logic decides how to penalize
/// it). Otherwise the base is followed greedily by `(COENG BASE)` pairs and
/// `SIGN`s; a trailing COENG with no following consonant is not consumed.
pub fn cluster_bytes(text: &[u8], i: usize) -> usize {
    let n = text.len();
    let (first, first_len) = decode(text, i);
    if !is_valid_single_base(first) {
        return first_len;
    }

    let mut len = first_len;
    let mut pos = i + first_len;

    while pos < n {
        let (cp, clen) = decode(text, pos);
        if cp == COENG {
            if pos + clen < n {
                let (next_cp, next_len) = decode(text, pos + clen);
                if is_coeng_target(next_cp) {
                    len += clen + next_len;
                    pos += clen + next_len;
                    continue;
                }
            }
            break;
        }
        if is_sign(cp) {
            len += clen;
            pos += clen;
            continue;
        }
        break;
    }

    len
}
