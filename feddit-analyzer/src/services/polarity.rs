//! Polarity computation from multi-label sentiment scores
//!
//! The sentiment model scores every statement on three labels. These are
//! collapsed into a single polarity in [-1, 1]:
//!
//! ```text
//! polarity = (positive - negative) / (positive + neutral + negative)
//! ```
//!
//! The neutral score only acts as a damping term in the denominator. A
//! statement is classified positive when its polarity is >= 0.

use thiserror::Error;

use crate::types::{Classification, Label, LabelScore, PolarityResult};

/// Polarity at or above which a statement is positive
const POLARITY_THRESHOLD: f64 = 0.0;

/// Polarity computation errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PolarityError {
    #[error("Score for label '{label}' out of range [0, 1]: {score}")]
    ScoreOutOfRange { label: Label, score: f64 },

    #[error("Expected exactly one score for each of positive, neutral and negative, got [{0}]")]
    MissingLabel(String),

    #[error("All label scores are zero, polarity is undefined")]
    DegenerateScores,

    #[error("Invalid polarity value: {0}")]
    InvalidPolarity(f64),
}

/// Compute polarity from the three label scores
pub fn compute_polarity(positive: f64, neutral: f64, negative: f64) -> Result<f64, PolarityError> {
    for (label, score) in [
        (Label::Positive, positive),
        (Label::Neutral, neutral),
        (Label::Negative, negative),
    ] {
        if !(0.0..=1.0).contains(&score) {
            return Err(PolarityError::ScoreOutOfRange { label, score });
        }
    }

    let total = positive + neutral + negative;
    if total == 0.0 {
        return Err(PolarityError::DegenerateScores);
    }

    let polarity = (positive - negative) / total;
    if !(-1.0..=1.0).contains(&polarity) {
        return Err(PolarityError::InvalidPolarity(polarity));
    }

    // Rounding can land a near-extreme ratio on exactly +/-1. Those values
    // are reserved for a single non-zero label.
    if polarity == 1.0 && (neutral > 0.0 || negative > 0.0) {
        return Ok(POLARITY_BELOW_ONE);
    }
    if polarity == -1.0 && (neutral > 0.0 || positive > 0.0) {
        return Ok(-POLARITY_BELOW_ONE);
    }

    Ok(polarity)
}

/// Largest `f64` below 1.0
const POLARITY_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Classify a polarity value
pub fn classify(polarity: f64) -> Result<Classification, PolarityError> {
    if !(-1.0..=1.0).contains(&polarity) {
        return Err(PolarityError::InvalidPolarity(polarity));
    }

    Ok(if polarity >= POLARITY_THRESHOLD {
        Classification::Positive
    } else {
        Classification::Negative
    })
}

/// Turn one statement's label scores into a [`PolarityResult`]
///
/// `scores` must hold exactly one entry per label, in any order.
pub fn analyze_scores(statement: &str, scores: &[LabelScore]) -> Result<PolarityResult, PolarityError> {
    let [positive, neutral, negative] = split_labels(scores)?;
    let polarity = compute_polarity(positive, neutral, negative)?;

    Ok(PolarityResult {
        statement: statement.to_string(),
        polarity,
        classification: classify(polarity)?,
    })
}

/// Pick out the positive, neutral and negative scores, in that order
fn split_labels(scores: &[LabelScore]) -> Result<[f64; 3], PolarityError> {
    let mut found: [Option<f64>; 3] = [None; 3];

    if scores.len() == Label::ALL.len() {
        for entry in scores {
            let slot = &mut found[label_index(entry.label)];
            if slot.is_some() {
                break;
            }
            *slot = Some(entry.score);
        }
    }

    match found {
        [Some(p), Some(n), Some(g)] => Ok([p, n, g]),
        _ => Err(PolarityError::MissingLabel(
            scores
                .iter()
                .map(|s| s.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )),
    }
}

fn label_index(label: Label) -> usize {
    match label {
        Label::Positive => 0,
        Label::Neutral => 1,
        Label::Negative => 2,
    }
}
