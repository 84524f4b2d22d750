//! End-to-end coverage over a small embedded dictionary — no external data
//! file dependency, so this runs the same in CI as on a laptop.

use std::io::Write;

use khmer_segmenter::{Segmenter, SegmenterConfig};

const WORDS: &[&str] = &[
    "ខ្ញុំ",
    "ចូលចិត្ត",
    "ភ្នំពេញ",
    "ក្រុមហ៊ុន",
    "ឆ្នាំ",
    "នេះ",
    "បាន",
    "ប្រកាស",
    "ថា",
    "ជោគជ័យ",
    "សាកលវិទ្យាល័យ",
];

fn test_segmenter() -> Segmenter {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    for w in WORDS {
        writeln!(f, "{}", w).unwrap();
    }
    Segmenter::new(f.path(), None)
}

#[test]
fn splits_consecutive_dictionary_words() {
    let seg = test_segmenter();
    let words = seg.segment_words("ខ្ញុំចូលចិត្តភ្នំពេញ");
    assert_eq!(words, vec!["ខ្ញុំ", "ចូលចិត្ត", "ភ្នំពេញ"]);
}

#[test]
fn preserves_separator_segments_rather_than_stripping_them() {
    let seg = test_segmenter();
    let words = seg.segment_words("ខ្ញុំ ចូលចិត្ត");
    assert_eq!(words, vec!["ខ្ញុំ", " ", "ចូលចិត្ត"]);
}

#[test]
fn mixed_dictionary_number_and_currency_text() {
    let seg = test_segmenter();
    let out = seg.segment("ក្រុមហ៊ុននេះបាន$50.00", Some("|"));
    assert!(out.contains("ក្រុមហ៊ុន"));
    assert!(out.contains("$50.00"));
}

#[test]
fn sentence_with_an_acronym_and_a_trailing_period() {
    let seg = test_segmenter();
    // "ស.ភ.ព." should fuse into one acronym token via AcronymRunMerge.
    let words = seg.segment_words("សាកលវិទ្យាល័យស.ភ.ព.");
    assert_eq!(words.last().unwrap(), "ស.ភ.ព.");
}

#[test]
fn foreign_script_run_splits_into_individual_unknown_segments() {
    // UnknownRunMerge is scoped to Khmer-script code points (see S2 below),
    // so a run of foreign-script letters stays one segment per code point.
    let seg = test_segmenter();
    let words = seg.segment_words("ខ្ញុំhello");
    assert_eq!(words, vec!["ខ្ញុំ", "h", "e", "l", "l", "o"]);
}

#[test]
fn s2_non_khmer_text_splits_into_one_segment_per_code_point() {
    let seg = test_segmenter();
    let out = seg.segment("abc", Some("|"));
    assert_eq!(out, "a|b|c");
}

#[test]
fn invalid_utf8_never_panics_the_decoder() {
    // Constructed directly as bytes to sidestep the &str boundary; exercises
    // the scanner's fallback path (an invalid lead byte decodes as one byte)
    // rather than the public segment() API, which only accepts valid UTF-8.
    let bytes: &[u8] = &[0xFFu8, b'a', b'b'];
    let (cp, len) = khmer_segmenter::scanner::decode(bytes, 0);
    assert_eq!((cp, len), (0, 1));
}

#[test]
fn trailing_coeng_with_no_consonant_is_handled() {
    let seg = test_segmenter();
    let mut text = String::from("ខ្ញុំ");
    text.push('\u{17D2}');
    // Must not panic, and must still cover every byte of input.
    let words = seg.segment_words(&text);
    let total: usize = words.iter().map(|w| w.len()).sum();
    assert_eq!(total, text.len());
}

#[test]
fn dictionary_word_that_is_a_strict_prefix_of_another_is_still_reachable() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "ក").unwrap();
    writeln!(f, "កក").unwrap();
    let seg = Segmenter::new(f.path(), None);
    let words = seg.segment_words("ក");
    assert_eq!(words, vec!["ក"]);
}

#[test]
fn text_longer_than_max_word_length_of_non_dictionary_clusters() {
    let seg = test_segmenter();
    let text = "abcdefghijklmnopqrstuvwxyz";
    let words = seg.segment_words(text);
    let total: usize = words.iter().map(|w| w.len()).sum();
    assert_eq!(total, text.len());
}

#[test]
fn segmenter_is_safe_to_call_concurrently() {
    use std::sync::Arc;
    use std::thread;

    let seg = Arc::new(test_segmenter());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let seg = Arc::clone(&seg);
        handles.push(thread::spawn(move || {
            seg.segment("ខ្ញុំចូលចិត្តភ្នំពេញ", None)
        }));
    }
    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.iter().all(|r| r == &results[0]));
}

#[test]
fn config_overrides_unknown_cost() {
    let config = SegmenterConfig {
        unknown_cost: 1.0,
        ..SegmenterConfig::default()
    };
    let seg = Segmenter::with_config(test_dict_path().path(), None, config);
    // With a near-zero unknown cost, non-dictionary letters stay as
    // separate single-cluster segments rather than being pulled into a
    // longer dictionary match.
    let words = seg.segment_words("xyz");
    assert_eq!(words.len(), 3);
}

fn test_dict_path() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    for w in WORDS {
        writeln!(f, "{}", w).unwrap();
    }
    f
}
