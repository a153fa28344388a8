//! Per-comment polarity scoring and three-way bucketing.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scores above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Scores below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Maps a comment to a compound polarity score in `[-1.0, 1.0]`.
///
/// Implementations must be stateless with respect to earlier calls.
pub trait PolarityScorer {
    fn score(&self, text: &str) -> f64;
}

impl<F> PolarityScorer for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Positive,
    Negative,
    Neutral,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Positive, Bucket::Negative, Bucket::Neutral];

    /// `> 0.05` positive, `< -0.05` negative, anything else (including the
    /// closed band `[-0.05, 0.05]`) neutral.
    pub fn for_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Bucket::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Bucket::Negative
        } else {
            Bucket::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Positive => "Positive",
            Bucket::Negative => "Negative",
            Bucket::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of [`SentimentClassifier::classify`].
///
/// `scores` runs parallel to the classified comments; every comment lands in
/// exactly one of the three bucket lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub scores: Vec<f64>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

impl Classification {
    pub fn bucket(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Positive => &self.positive,
            Bucket::Negative => &self.negative,
            Bucket::Neutral => &self.neutral,
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn push(&mut self, comment: &str, score: f64) {
        self.scores.push(score);
        let target = match Bucket::for_score(score) {
            Bucket::Positive => &mut self.positive,
            Bucket::Negative => &mut self.negative,
            Bucket::Neutral => &mut self.neutral,
        };
        target.push(comment.to_string());
    }
}

pub struct SentimentClassifier<S> {
    scorer: S,
}

impl<S: PolarityScorer> SentimentClassifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Score every comment in order.  Never drops a comment.
    pub fn classify<T: AsRef<str>>(&self, comments: &[T]) -> Classification {
        let mut out = Classification::default();
        for comment in comments {
            let comment = comment.as_ref();
            let score = self.scorer.score(comment);
            debug!(score, bucket = %Bucket::for_score(score), "scored comment");
            out.push(comment, score);
        }
        out
    }
}
