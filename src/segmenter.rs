//! The public facade: load a dictionary, optionally overlay frequencies
//! and config, then segment text through normalize → decode → rules.

use std::path::Path;

use crate::dictionary::Dictionary;
use crate::error::{ConfigLoadError, Error};
use crate::normalize::normalize;
use crate::rules::RuleEngine;
use crate::viterbi::{decode_segments, Costs};

const DEFAULT_SEPARATOR: &str = "\u{200B}";

/// Cost-model knobs, overridable from a TOML file (§9.3). Every field has a
/// default drawn from the decoder's original calibration; `default_cost`
/// and `unknown_cost` are further overridden at load time if a frequency
/// table is supplied (§9.1).
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    pub default_cost: f32,
    pub unknown_cost: f32,
    pub unknown_invalid_base_penalty: f32,
    pub separator_cost: f32,
    pub number_cost: f32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig {
            default_cost: 10.0,
            unknown_cost: 20.0,
            unknown_invalid_base_penalty: 10.0,
            separator_cost: 0.1,
            number_cost: 1.0,
        }
    }
}

impl SegmenterConfig {
    /// Loads overrides from a TOML file. Unset fields keep [`Default`]
    /// values. A present-but-malformed file is an error — unlike the
    /// frequency table, a config file the caller explicitly named is not
    /// allowed to silently degrade (§9.3, §11).
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigUnavailable {
            path: path.to_path_buf(),
            source: ConfigLoadError::Io(source),
        })?;
        toml::from_str(&contents).map_err(|source| Error::ConfigUnavailable {
            path: path.to_path_buf(),
            source: ConfigLoadError::Parse(source),
        })
    }
}

/// A loaded dictionary, rule pipeline, and cost model ready to segment
/// text. Construction never fails: a missing or unreadable dictionary
/// degrades to an empty one (logged at `warn`) rather than aborting init —
/// see [`Segmenter::with_config`] and `crate::error`. [`SegmenterConfig::load`]
/// is the one genuinely fallible operation in this module, since a config
/// file the caller explicitly named is not allowed to silently degrade.
/// [`Segmenter::segment`] itself never fails either, and is safe to call
/// concurrently from many threads, since each call only touches its own
/// local DP tables and segment list.
pub struct Segmenter {
    dictionary: Dictionary,
    rules: RuleEngine,
    costs: Costs,
}

impl Segmenter {
    /// Loads a dictionary from `dictionary_path` and, if `frequency_path`
    /// is given and readable, overlays frequency-weighted costs on top of
    /// it (§9.1). A missing or unreadable dictionary file degrades
    /// gracefully to an empty dictionary, logged once at `warn` (§7, §9.4,
    /// §11) — the decoder's Unknown edge makes an empty dictionary a legal,
    /// total segmenter. A missing or unparsable frequency file is likewise
    /// not an error; it just means every word keeps `default_cost`.
    pub fn new(dictionary_path: &Path, frequency_path: Option<&Path>) -> Self {
        Self::with_config(dictionary_path, frequency_path, SegmenterConfig::default())
    }

    pub fn with_config(
        dictionary_path: &Path,
        frequency_path: Option<&Path>,
        mut config: SegmenterConfig,
    ) -> Self {
        let mut dictionary = match Dictionary::load(dictionary_path, config.default_cost) {
            Ok(dictionary) => dictionary,
            Err(error) => {
                tracing::warn!(
                    path = %dictionary_path.display(),
                    %error,
                    "dictionary unavailable; falling back to an empty dictionary"
                );
                Dictionary::empty(config.default_cost)
            }
        };

        if let Some(freq_path) = frequency_path {
            match dictionary.apply_frequencies(freq_path) {
                Some((new_default, new_unknown)) => {
                    tracing::info!(
                        path = %freq_path.display(),
                        new_default_cost = new_default,
                        new_unknown_cost = new_unknown,
                        "applied frequency overlay"
                    );
                    config.default_cost = new_default;
                    config.unknown_cost = new_unknown;
                }
                None => {
                    tracing::warn!(
                        path = %freq_path.display(),
                        "frequency file missing, unreadable, or empty; keeping uniform costs"
                    );
                }
            }
        }

        tracing::info!(
            path = %dictionary_path.display(),
            words = dictionary.len(),
            max_word_length = dictionary.max_word_length(),
            "dictionary loaded"
        );

        Segmenter {
            dictionary,
            rules: RuleEngine::default_pipeline(),
            costs: Costs {
                unknown_cost: config.unknown_cost,
                unknown_invalid_base_penalty: config.unknown_invalid_base_penalty,
                separator_cost: config.separator_cost,
                number_cost: config.number_cost,
            },
        }
    }

    /// Builds a segmenter over an empty dictionary — every input reduces
    /// to Number/Separator/Unknown edges only. Useful for testing the
    /// pipeline shape without shipping a wordlist.
    pub fn empty(config: SegmenterConfig) -> Self {
        Segmenter {
            dictionary: Dictionary::empty(config.default_cost),
            rules: RuleEngine::default_pipeline(),
            costs: Costs {
                unknown_cost: config.unknown_cost,
                unknown_invalid_base_penalty: config.unknown_invalid_base_penalty,
                separator_cost: config.separator_cost,
                number_cost: config.number_cost,
            },
        }
    }

    /// Normalizes `text`, decodes its shortest-path segmentation, runs the
    /// post-processing rule pipeline, then joins the resulting words with
    /// `separator` (defaulting to U+200B ZERO WIDTH SPACE).
    pub fn segment(&self, text: &str, separator: Option<&str>) -> String {
        let normalized = normalize(text);
        let bytes = normalized.as_bytes();

        let raw_spans = decode_segments(bytes, &self.dictionary, self.costs);
        tracing::trace!(segments = raw_spans.len(), "decoded raw segments");

        let spans = self.rules.apply(bytes, &self.dictionary, raw_spans);
        tracing::trace!(segments = spans.len(), "applied rule pipeline");

        let sep = separator.unwrap_or(DEFAULT_SEPARATOR);
        let words: Vec<&str> = spans.iter().map(|&(s, e)| &normalized[s..e]).collect();
        words.join(sep)
    }

    /// As [`Segmenter::segment`], but returns the individual words rather
    /// than a joined string.
    pub fn segment_words(&self, text: &str) -> Vec<String> {
        let normalized = normalize(text);
        let bytes = normalized.as_bytes();
        let raw_spans = decode_segments(bytes, &self.dictionary, self.costs);
        let spans = self.rules.apply(bytes, &self.dictionary, raw_spans);
        spans
            .iter()
            .map(|&(s, e)| normalized[s..e].to_string())
            .collect()
    }

    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dict_file(words: &[&str]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for w in words {
            writeln!(f, "{}", w).unwrap();
        }
        f
    }

    #[test]
    fn segments_with_default_separator() {
        let f = dict_file(&["ខ្ញុំ", "ចូលចិត្ត"]);
        let seg = Segmenter::new(f.path(), None);
        let out = seg.segment("ខ្ញុំចូលចិត្ត", None);
        assert_eq!(out, "ខ្ញុំ\u{200B}ចូលចិត្ត");
    }

    #[test]
    fn segments_with_custom_separator() {
        let f = dict_file(&["ខ្ញុំ", "ចូលចិត្ត"]);
        let seg = Segmenter::new(f.path(), None);
        let out = seg.segment("ខ្ញុំចូលចិត្ត", Some("|"));
        assert_eq!(out, "ខ្ញុំ|ចូលចិត្ត");
    }

    #[test]
    fn missing_dictionary_degrades_to_empty_dictionary_instead_of_failing() {
        let seg = Segmenter::new(Path::new("/nonexistent/dict.txt"), None);
        assert_eq!(seg.dictionary_len(), 0);
        // Still a total function: Unknown/Separator edges cover the input.
        assert_eq!(seg.segment("", None), "");
    }

    #[test]
    fn empty_text_segments_to_empty_string() {
        let seg = Segmenter::empty(SegmenterConfig::default());
        assert_eq!(seg.segment("", None), "");
    }

    #[test]
    fn config_overrides_apply() {
        let config = SegmenterConfig {
            number_cost: 5.0,
            ..SegmenterConfig::default()
        };
        let seg = Segmenter::empty(config);
        assert_eq!(seg.costs.number_cost, 5.0);
    }
}
