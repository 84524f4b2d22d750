//! Shortest-path decoder over a closed enumeration of edge types.
//!
//! At every byte offset `i` the decoder considers, in this order:
//!
//! 1. **Number** — a currency-prefixed or plain digit run (§4.3).
//! 2. **Separator** — a single separator code point.
//! 3. **Dictionary** — every `j` in `(i, min(n, i + max_word_length)]` such
//!    that `text[i..j]` is a dictionary entry.
//! 4. **Unknown** — always available, one cluster wide (§4.2); Khmer
//!    clusters that don't start on a valid base take an extra penalty.
//!
//! `dp[i]` holds the lowest total cost to reach byte offset `i`; `back[i]`
//! the offset the winning edge came from. Ties are broken "last writer
//! wins": among edges of equal cost, the later one in the enumeration above
//! overwrites earlier ones, matching the order they're considered here.

use crate::cluster::cluster_bytes;
use crate::dictionary::Dictionary;
use crate::numeric::{currency_number_bytes, number_bytes};
use crate::scanner::{decode, is_khmer_letter, is_separator, is_valid_single_base};

/// Per-call cost parameters. Cheap to copy; see [`crate::segmenter::SegmenterConfig`]
/// for the user-facing, TOML-loadable version this is built from.
#[derive(Debug, Clone, Copy)]
pub struct Costs {
    pub unknown_cost: f32,
    pub unknown_invalid_base_penalty: f32,
    pub separator_cost: f32,
    pub number_cost: f32,
}

/// Runs the shortest-path decode and returns the winning segmentation as a
/// list of `(start, end)` byte spans covering all of `text`, in order.
///
/// Infallible: when no reachable path covers the whole string (shouldn't
/// happen given the Unknown edge is always available, but is cheap to
/// guard against explicitly), the whole input is returned as one segment.
pub fn decode_segments(text: &[u8], dict: &Dictionary, costs: Costs) -> Vec<(usize, usize)> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }

    let mut dp = vec![f32::INFINITY; n + 1];
    let mut back = vec![usize::MAX; n + 1];
    dp[0] = 0.0;

    let max_word_length = dict.max_word_length().max(1);

    for i in 0..n {
        if !dp[i].is_finite() {
            continue;
        }
        let base = dp[i];

        // Number edge (including currency prefix).
        let number_len = currency_number_bytes(text, i)
            .or_else(|| {
                let len = number_bytes(text, i);
                if len > 0 {
                    Some(len)
                } else {
                    None
                }
            });
        if let Some(len) = number_len {
            relax(&mut dp, &mut back, i, i + len, base + costs.number_cost);
        }

        // Separator edge.
        let (cp, cp_len) = decode(text, i);
        if is_separator(cp) {
            relax(&mut dp, &mut back, i, i + cp_len, base + costs.separator_cost);
        }

        // Dictionary edges.
        let limit = (i + max_word_length).min(n);
        for j in (i + 1)..=limit {
            if let Some(cost) = dict.get(&text[i..j]) {
                relax(&mut dp, &mut back, i, j, base + cost);
            }
        }

        // Unknown edge: always available, one cluster wide.
        let unk_len = if is_khmer_letter(cp) {
            cluster_bytes(text, i).max(cp_len)
        } else {
            cp_len
        };
        let penalty = if unk_len == cp_len && is_khmer_letter(cp) && !is_valid_single_base(cp) {
            costs.unknown_invalid_base_penalty
        } else {
            0.0
        };
        relax(
            &mut dp,
            &mut back,
            i,
            i + unk_len,
            base + costs.unknown_cost + penalty,
        );
    }

    if !dp[n].is_finite() {
        return vec![(0, n)];
    }

    let mut spans = Vec::new();
    let mut pos = n;
    while pos > 0 {
        let prev = back[pos];
        spans.push((prev, pos));
        pos = prev;
    }
    spans.reverse();
    spans
}

#[inline]
fn relax(dp: &mut [f32], back: &mut [usize], from: usize, to: usize, cost: f32) {
    if cost <= dp[to] {
        dp[to] = cost;
        back[to] = from;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn default_costs() -> Costs {
        Costs {
            unknown_cost: 20.0,
            unknown_invalid_base_penalty: 10.0,
            separator_cost: 0.1,
            number_cost: 1.0,
        }
    }

    fn dict_with(words: &[&str]) -> Dictionary {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for w in words {
            writeln!(f, "{}", w).unwrap();
        }
        Dictionary::load(f.path(), 10.0).unwrap()
    }

    #[test]
    fn prefers_dictionary_word_over_unknown_clusters() {
        let dict = dict_with(&["ភ្នំពេញ"]);
        let text = "ភ្នំពេញ";
        let spans = decode_segments(text.as_bytes(), &dict, default_costs());
        assert_eq!(spans, vec![(0, text.len())]);
    }

    #[test]
    fn splits_on_dictionary_boundaries() {
        let dict = dict_with(&["ខ្ញុំ", "សុខសប្បាយ"]);
        let text = "ខ្ញុំសុខសប្បាយ";
        let spans = decode_segments(text.as_bytes(), &dict, default_costs());
        let words: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(words, vec!["ខ្ញុំ", "សុខសប្បាយ"]);
    }

    #[test]
    fn numeric_run_is_a_single_segment() {
        let dict = Dictionary::empty(10.0);
        let text = "ថ្ងៃទី១២៣៤៥";
        let spans = decode_segments(text.as_bytes(), &dict, default_costs());
        let last = *spans.last().unwrap();
        assert_eq!(&text[last.0..last.1], "១២៣៤៥");
    }

    #[test]
    fn currency_prefixed_number_is_one_segment() {
        let dict = Dictionary::empty(10.0);
        let text = "តម្លៃ$50.00";
        let spans = decode_segments(text.as_bytes(), &dict, default_costs());
        let last = *spans.last().unwrap();
        assert_eq!(&text[last.0..last.1], "$50.00");
    }

    #[test]
    fn separator_is_its_own_segment() {
        let dict = dict_with(&["ក"]);
        let text = "ក ក";
        let spans = decode_segments(text.as_bytes(), &dict, default_costs());
        let words: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(words, vec!["ក", " ", "ក"]);
    }

    #[test]
    fn empty_text_yields_no_segments() {
        let dict = Dictionary::empty(10.0);
        assert!(decode_segments(b"", &dict, default_costs()).is_empty());
    }

    #[test]
    fn strict_prefix_words_both_reachable_without_forcing_shorter_split() {
        let dict = dict_with(&["ក", "កក"]);
        let text = "កក";
        let spans = decode_segments(text.as_bytes(), &dict, default_costs());
        // Equal cost ties break "last writer wins": the longer dictionary
        // edge at j = text.len() is considered after the shorter one, so it
        // wins the tie and the whole string comes back as one segment.
        assert_eq!(spans, vec![(0, text.len())]);
    }

    #[test]
    fn non_khmer_ascii_falls_back_to_unknown_edges() {
        let dict = Dictionary::empty(10.0);
        let text = "xyz";
        let spans = decode_segments(text.as_bytes(), &dict, default_costs());
        assert_eq!(spans.len(), 3);
    }
}
