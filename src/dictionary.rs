//! The word list the Viterbi decoder competes against.
//!
//! Lookup is the hot path: every DP position probes this map once per
//! candidate word length, so [`Dictionary::get`] must not allocate. It
//! takes a `&[u8]` slice straight into the caller's text buffer; because
//! `Box<[u8]>` implements `Borrow<[u8]>`, `FxHashMap<Box<[u8]>, f32>` can be
//! queried by slice with no temporary key ever constructed.

use fxhash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Error;

const FREQUENCY_FLOOR: f64 = 5.0;
const UNKNOWN_COST_MARGIN: f32 = 5.0;

pub struct Dictionary {
    words: FxHashMap<Box<[u8]>, f32>,
    max_word_length: usize,
    default_cost: f32,
}

impl Dictionary {
    /// A dictionary with no entries. The decoder still terminates against
    /// such a dictionary — every position remains reachable via the
    /// Number, Separator, and Unknown edges.
    pub fn empty(default_cost: f32) -> Self {
        Dictionary {
            words: FxHashMap::default(),
            max_word_length: 0,
            default_cost,
        }
    }

    /// Loads a one-word-per-line dictionary file. Empty lines are skipped;
    /// CR/LF and surrounding whitespace are trimmed. Every word starts at
    /// `default_cost` until/unless [`Dictionary::apply_frequencies`]
    /// overrides it.
    ///
    /// Returns `Err` on a missing or unreadable file; `Segmenter::with_config`
    /// is the caller that matters in practice, and it treats this as
    /// recoverable — falling back to [`Dictionary::empty`] with a warning
    /// rather than failing construction — so this is a plain I/O-shaped
    /// `Result`, not a policy decision baked into the dictionary itself.
    pub fn load(path: &Path, default_cost: f32) -> Result<Self, Error> {
        let file = File::open(path).map_err(|source| Error::DictionaryUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut words = FxHashMap::default();
        let mut max_word_length = 0usize;

        for line in reader.lines() {
            let line = line.map_err(|source| Error::DictionaryUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            let bytes: Box<[u8]> = word.as_bytes().into();
            max_word_length = max_word_length.max(bytes.len());
            words.insert(bytes, default_cost);
        }

        Ok(Dictionary {
            words,
            max_word_length,
            default_cost,
        })
    }

    /// Overlays per-word costs from a `{"word": count, ...}` JSON frequency
    /// table, recomputing `default_cost` as `-log10(floor / total)` and
    /// returning `(new_default_cost, new_unknown_cost)` on success. A
    /// missing file, an unreadable file, an unparsable file, or an empty
    /// table all count as "no overlay" — not an error (§9.1, §7).
    pub fn apply_frequencies(&mut self, path: &Path) -> Option<(f32, f32)> {
        if !path.exists() {
            return None;
        }
        let file = File::open(path).ok()?;
        let counts: std::collections::HashMap<String, f64> = serde_json::from_reader(file).ok()?;
        if counts.is_empty() {
            return None;
        }

        let mut effective: std::collections::HashMap<&str, f64> =
            std::collections::HashMap::with_capacity(counts.len());
        let mut total = 0.0f64;
        for (word, &count) in &counts {
            let eff = count.max(FREQUENCY_FLOOR);
            effective.insert(word.as_str(), eff);
            total += eff;
        }
        if total <= 0.0 {
            return None;
        }

        let min_prob = FREQUENCY_FLOOR / total;
        let new_default = (-min_prob.log10()) as f32;
        let new_unknown = new_default + UNKNOWN_COST_MARGIN;

        for cost in self.words.values_mut() {
            *cost = new_default;
        }
        for (word, &eff) in &effective {
            if let Some(cost) = self.words.get_mut(word.as_bytes()) {
                let prob = eff / total;
                if prob > 0.0 {
                    *cost = (-prob.log10()) as f32;
                }
            }
        }

        self.default_cost = new_default;
        Some((new_default, new_unknown))
    }

    #[inline]
    pub fn get(&self, word: &[u8]) -> Option<f32> {
        self.words.get(word).copied()
    }

    #[inline]
    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.contains_key(word)
    }

    #[inline]
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    pub fn default_cost(&self) -> f32 {
        self.default_cost
    }
}
