//! Shortest-path Khmer word segmentation.
//!
//! The pipeline, in order: [`normalize`](normalize::normalize) canonicalizes
//! the input text; [`viterbi`] finds the minimum-cost segmentation over a
//! closed set of edge types (number, separator, dictionary, unknown); and
//! [`rules`] runs a pluggable post-processing pipeline over the result for
//! the script-specific merges the cost model can't express directly.
//! [`Segmenter`] wires the three stages together behind a single
//! `segment`/`segment_words` call.
//!
//! `Segmenter::segment` is infallible by design: malformed UTF-8 never
//! occurs (the type system rules it out at the boundary), and an
//! unrecognized cluster just gets the Unknown edge's cost rather than
//! failing the whole call. Building a [`Segmenter`] is infallible too: a
//! missing or unreadable dictionary degrades to an empty one (logged at
//! `warn`) rather than aborting construction. The one operation that does
//! return [`Error`] is [`SegmenterConfig::load`], since a config file the
//! caller explicitly named is not allowed to silently fall back to
//! defaults.

pub mod cluster;
pub mod dictionary;
pub mod error;
pub mod normalize;
pub mod numeric;
pub mod rules;
pub mod scanner;
pub mod segmenter;
pub mod viterbi;

pub use dictionary::Dictionary;
pub use error::{ConfigLoadError, Error};
pub use segmenter::{Segmenter, SegmenterConfig};
