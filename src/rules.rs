//! Post-processing pipeline over the segment list the Viterbi decoder
//! produced.
//!
//! The decoder stays a pure shortest-path solver over a closed edge
//! enumeration (`{Dict, Number, Separator, Unknown}`); anything Khmer-script
//! specific that doesn't fit that cost model — an acronym run, a sign that
//! always belongs with its preceding consonant — lives here instead, as an
//! ordered pipeline of pattern-matched merges over the segment list. Each
//! [`Rule`] gets one left-to-right pass; rules run in registration order.

use crate::dictionary::Dictionary;
use crate::scanner::{
    classify, decode, is_digit, is_khmer_letter, is_separator, is_valid_single_base,
    CodepointClass,
};

/// A contiguous byte span of the normalized text.
pub type Span = (usize, usize);

/// One pattern-matched pass over the segment list. Implementors must be
/// total: a rule that panics or loops is a programming error, not a
/// runtime failure a caller can recover from (see crate-level error docs).
///
/// `dict` is threaded through even to rules that ignore it, so that any
/// rule can consult dictionary membership without changing the pipeline's
/// shape — see [`UnknownRunMerge`].
pub trait Rule: Send + Sync {
    fn apply(&self, text: &[u8], dict: &Dictionary, segments: &mut Vec<Span>);
}

/// An ordered, pluggable pipeline of [`Rule`]s.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        RuleEngine { rules }
    }

    /// The default pipeline described in SPEC_FULL.md §4.7/§9.2.
    pub fn default_pipeline() -> Self {
        RuleEngine::new(vec![
            Box::new(PrefixMerge),
            Box::new(SuffixSignMerge),
            Box::new(SamyokSannyaMerge),
            Box::new(InvalidSingleConsonantCleanup),
            Box::new(AcronymRunMerge),
            Box::new(UnknownRunMerge),
        ])
    }

    pub fn apply(&self, text: &[u8], dict: &Dictionary, segments: Vec<Span>) -> Vec<Span> {
        let mut segments = segments;
        for rule in &self.rules {
            rule.apply(text, dict, &mut segments);
            segments.retain(|&(s, e)| s < e);
        }
        segments
    }
}

fn chars_of(text: &[u8], (start, end): Span) -> Vec<u32> {
    let mut out = Vec::new();
    let mut pos = start;
    while pos < end {
        let (cp, len) = decode(text, pos);
        out.push(cp);
        pos += len;
    }
    out
}

fn first_codepoint(text: &[u8], span: Span) -> Option<u32> {
    if span.0 >= span.1 {
        return None;
    }
    Some(decode(text, span.0).0)
}

const KA: u32 = 0x1780;
const DA: u32 = 0x178A;
const AHSDA: u32 = 0x17CF;

/// A lone U+17A2 (independent vowel used as an acronym/prefix marker)
/// merges with its right neighbor, unless that neighbor is a separator.
struct PrefixMerge;
impl Rule for PrefixMerge {
    fn apply(&self, text: &[u8], _dict: &Dictionary, segments: &mut Vec<Span>) {
        let mut i = 0;
        while i < segments.len() {
            let chars = chars_of(text, segments[i]);
            if chars.len() == 1 && chars[0] == 0x17A2 && i + 1 < segments.len() {
                let next = segments[i + 1];
                let next_is_sep = first_codepoint(text, next).map(is_separator).unwrap_or(false);
                if !next_is_sep {
                    segments[i].1 = next.1;
                    segments.remove(i + 1);
                    continue;
                }
            }
            i += 1;
        }
    }
}

const SUFFIX_SIGNS: [u32; 4] = [0x17CB, 0x17CC, 0x17CE, 0x17CF];

/// Consonant + one of {U+17CB, U+17CC, U+17CE, U+17CF} merges left — except
/// KA/DA + Ahsda (U+17CF), a fixed two-codepoint idiom that is left intact.
struct SuffixSignMerge;
impl Rule for SuffixSignMerge {
    fn apply(&self, text: &[u8], _dict: &Dictionary, segments: &mut Vec<Span>) {
        let mut i = 0;
        while i < segments.len() {
            let chars = chars_of(text, segments[i]);
            if chars.len() == 2
                && is_valid_single_base(chars[0])
                && SUFFIX_SIGNS.contains(&chars[1])
            {
                let is_ahsda_exception = chars[1] == AHSDA && matches!(chars[0], KA | DA);
                if !is_ahsda_exception && i > 0 {
                    let end = segments[i].1;
                    segments[i - 1].1 = end;
                    segments.remove(i);
                    i -= 1;
                    continue;
                }
            }
            i += 1;
        }
    }
}

/// Consonant + U+17D0 (Samyok Sannya) merges with its right neighbor.
struct SamyokSannyaMerge;
impl Rule for SamyokSannyaMerge {
    fn apply(&self, text: &[u8], _dict: &Dictionary, segments: &mut Vec<Span>) {
        let mut i = 0;
        while i < segments.len() {
            let chars = chars_of(text, segments[i]);
            if chars.len() == 2 && is_valid_single_base(chars[0]) && chars[1] == 0x17D0 {
                if i + 1 < segments.len() {
                    let next_end = segments[i + 1].1;
                    segments[i].1 = next_end;
                    segments.remove(i + 1);
                    continue;
                }
            }
            i += 1;
        }
    }
}

/// A one-codepoint Khmer segment that is neither a separator, a digit, nor
/// a valid single base merges into its left neighbor, unless the left
/// neighbor is a separator (nothing safe to merge into).
struct InvalidSingleConsonantCleanup;
impl Rule for InvalidSingleConsonantCleanup {
    fn apply(&self, text: &[u8], _dict: &Dictionary, segments: &mut Vec<Span>) {
        let mut i = 0;
        while i < segments.len() {
            let chars = chars_of(text, segments[i]);
            let is_invalid_single = chars.len() == 1
                && classify(chars[0]) == CodepointClass::KhmerLetter
                && !is_valid_single_base(chars[0])
                && !is_digit(chars[0])
                && !is_separator(chars[0]);

            if is_invalid_single {
                let prev_is_sep = if i > 0 {
                    first_codepoint(text, segments[i - 1])
                        .map(is_separator)
                        .unwrap_or(true)
                } else {
                    true
                };
                if !prev_is_sep && i > 0 {
                    let end = segments[i].1;
                    segments[i - 1].1 = end;
                    segments.remove(i);
                    continue;
                }
            }
            i += 1;
        }
    }
}

fn is_acronym_cluster(text: &[u8], span: Span) -> bool {
    let chars = chars_of(text, span);
    !chars.is_empty() && is_valid_single_base(chars[0])
}

/// Consecutive `cluster '.'` pairs (e.g. "ស" "." "ភ" "." "ព" ".") fuse into
/// one acronym token.
struct AcronymRunMerge;
impl Rule for AcronymRunMerge {
    fn apply(&self, text: &[u8], _dict: &Dictionary, segments: &mut Vec<Span>) {
        let mut i = 0;
        while i + 1 < segments.len() {
            let cluster_ok = is_acronym_cluster(text, segments[i]);
            let dot_chars = chars_of(text, segments[i + 1]);
            let is_dot = dot_chars.len() == 1 && dot_chars[0] == '.' as u32;

            if cluster_ok && is_dot {
                let end = segments[i + 1].1;
                segments[i].1 = end;
                segments.remove(i + 1);
                // Keep folding further `cluster '.'` pairs into the same run.
                continue;
            }
            i += 1;
        }
    }
}

fn is_recognized(text: &[u8], span: Span, dict: &Dictionary) -> bool {
    let chars = chars_of(text, span);
    if chars.is_empty() {
        return true;
    }
    if chars.len() == 1 {
        let c = chars[0];
        if is_separator(c) || is_digit(c) || is_valid_single_base(c) {
            return true;
        }
    }
    dict.contains(&text[span.0..span.1])
}

/// An unrecognized segment is only eligible to fuse with its unrecognized
/// neighbors if it is itself a single Khmer-script code point. This keeps
/// the merge scoped to genuine unrecognized Khmer syllable runs (its
/// motivating case) and out of plain non-Khmer text: per spec.md §8 S2,
/// `"abc"` with separator `"|"` must segment as `"a|b|c"`, one unknown
/// segment per code point, not fuse into `"abc"`.
fn is_fusable_unknown(text: &[u8], span: Span, dict: &Dictionary) -> bool {
    if is_recognized(text, span, dict) {
        return false;
    }
    let chars = chars_of(text, span);
    chars.len() == 1 && is_khmer_letter(chars[0])
}

/// Consecutive unrecognized single-codepoint Khmer-script segments (not
/// separators, digit runs, valid single bases, or dictionary hits) fuse
/// into one contiguous unknown span, so an unrecognized run of Khmer text
/// reads as one token rather than one per syllable. Scoped to Khmer-script
/// code points only — see [`is_fusable_unknown`] — so non-Khmer runs (S2)
/// are left as individual segments.
struct UnknownRunMerge;
impl Rule for UnknownRunMerge {
    fn apply(&self, text: &[u8], dict: &Dictionary, segments: &mut Vec<Span>) {
        let mut merged: Vec<Span> = Vec::with_capacity(segments.len());
        let mut pending: Option<Span> = None;

        for &span in segments.iter() {
            if is_fusable_unknown(text, span, dict) {
                if let Some(p) = pending.as_mut() {
                    p.1 = span.1;
                } else {
                    pending = Some(span);
                }
            } else {
                if let Some(p) = pending.take() {
                    merged.push(p);
                }
                merged.push(span);
            }
        }
        if let Some(p) = pending.take() {
            merged.push(p);
        }
        *segments = merged;
    }
}
