//! Reduce per-comment scores to an overall verdict.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sentiment::{Bucket, Classification};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("insufficient data: no comments left to score")]
    InsufficientData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl BucketCounts {
    pub fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Positive => self.positive,
            Bucket::Negative => self.negative,
            Bucket::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub average_polarity: f64,
    pub verdict: Bucket,
    pub counts: BucketCounts,
}

impl SentimentSummary {
    pub fn total(&self) -> usize {
        self.counts.total()
    }

    /// Human readable verdict line, e.g. "The Video has got a Positive response".
    pub fn verdict_sentence(&self) -> String {
        format!("The Video has got a {} response", self.verdict)
    }
}

/// Average the scores and count the buckets.
///
/// Fails with [`AnalysisError::InsufficientData`] when nothing was scored.
pub fn summarize(classification: &Classification) -> Result<SentimentSummary, AnalysisError> {
    let scores = &classification.scores;
    if scores.is_empty() {
        return Err(AnalysisError::InsufficientData);
    }

    let average_polarity = scores.iter().sum::<f64>() / scores.len() as f64;
    let counts = BucketCounts {
        positive: classification.positive.len(),
        negative: classification.negative.len(),
        neutral: classification.neutral.len(),
    };
    debug_assert_eq!(counts.total(), scores.len());

    Ok(SentimentSummary {
        average_polarity,
        verdict: Bucket::for_score(average_polarity),
        counts,
    })
}
