use crate::dimension::Dimension;
use crate::error::{InsightError, Result};
use crate::response::ResponseState;
use serde::{Deserialize, Serialize};

/// Ratings at or above this count as a strong area.
pub const STRONG_THRESHOLD: u8 = 8;

// ---------------------------------------------------------------------------
// DimensionScore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub key: String,
    pub label: String,
    pub rating: u8,
}

// ---------------------------------------------------------------------------
// ScoreSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub total: u32,
    pub count: u32,
    /// Exact mean, `total / count`.
    pub average: f64,
    pub strongest: DimensionScore,
    pub weakest: DimensionScore,
    /// Ratings in catalog order.
    pub scores: Vec<DimensionScore>,
}

impl ScoreSummary {
    /// Mean in tenths, rounded half-up.
    pub fn average_tenths(&self) -> u32 {
        (20 * self.total + self.count) / (2 * self.count)
    }

    /// Mean rounded to one decimal place, e.g. `"5.9"`.
    pub fn average_display(&self) -> String {
        let tenths = self.average_tenths();
        format!("{}.{}", tenths / 10, tenths % 10)
    }

    pub fn count_at_or_above(&self, threshold: u8) -> usize {
        self.scores.iter().filter(|s| s.rating >= threshold).count()
    }

    pub fn strong_areas(&self) -> usize {
        self.count_at_or_above(STRONG_THRESHOLD)
    }
}

/// Summarize `response` over `dimensions`.
///
/// Ties for strongest and weakest go to the earliest dimension in catalog
/// order.
pub fn compute_summary(response: &ResponseState, dimensions: &[Dimension]) -> Result<ScoreSummary> {
    let scores = dimensions
        .iter()
        .map(|d| {
            response
                .get(d.key)
                .map(|rating| DimensionScore {
                    key: d.key.to_string(),
                    label: d.label.to_string(),
                    rating,
                })
                .ok_or_else(|| InsightError::IncompleteResponse(d.key.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let Some(first) = scores.first() else {
        return Err(InsightError::IncompleteResponse(
            "no dimensions to score".to_string(),
        ));
    };

    let mut strongest = first;
    let mut weakest = first;
    for s in &scores[1..] {
        if s.rating > strongest.rating {
            strongest = s;
        }
        if s.rating < weakest.rating {
            weakest = s;
        }
    }

    let total: u32 = scores.iter().map(|s| u32::from(s.rating)).sum();
    let count = scores.len() as u32;

    Ok(ScoreSummary {
        total,
        count,
        average: f64::from(total) / f64::from(count),
        strongest: strongest.clone(),
        weakest: weakest.clone(),
        scores,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
