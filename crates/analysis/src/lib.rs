//! Comment relevance filtering and sentiment aggregation.
//!
//! Every stage here is a pure transformation over in-memory sequences:
//! resolve a video id from a URL, drop link spam and emoji noise, score
//! what is left and reduce the scores to a three-way verdict.

pub mod aggregate;
pub mod emoji;
pub mod lexicon;
pub mod relevance;
pub mod sentiment;
pub mod video;

pub use aggregate::{AnalysisError, BucketCounts, SentimentSummary, summarize};
pub use emoji::{EmojiCounter, UnicodeEmojiCounter};
pub use lexicon::LexiconScorer;
pub use relevance::{RelevanceFilter, Rejection};
pub use sentiment::{Bucket, Classification, PolarityScorer, SentimentClassifier};
pub use video::{VideoId, resolve_video_id};
