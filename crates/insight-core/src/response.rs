use crate::dimension::Dimension;
use crate::error::{InsightError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;
pub const DEFAULT_RATING: u8 = 5;

/// Current ratings for every dimension of one assessment.
///
/// Built with [`ResponseState::initialize`], which seeds every dimension
/// with [`DEFAULT_RATING`]. Afterwards ratings only change one key at a
/// time through [`ResponseState::set_rating`], so the key set always
/// matches the catalog it was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u8>", into = "BTreeMap<String, u8>")]
pub struct ResponseState {
    ratings: BTreeMap<String, u8>,
}

impl ResponseState {
    pub fn initialize(dimensions: &[Dimension]) -> Self {
        Self {
            ratings: dimensions
                .iter()
                .map(|d| (d.key.to_string(), DEFAULT_RATING))
                .collect(),
        }
    }

    /// Replace the rating of a single dimension.
    pub fn set_rating(&mut self, key: &str, value: i64) -> Result<()> {
        let Some(slot) = self.ratings.get_mut(key) else {
            return Err(InsightError::InvalidDimension(key.to_string()));
        };
        *slot = validate_rating(key, value)?;
        Ok(())
    }

    /// Initialize from `dimensions` and apply each `(key, value)` in turn.
    pub fn with_ratings<'a, I>(dimensions: &[Dimension], ratings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut state = Self::initialize(dimensions);
        for (key, value) in ratings {
            state.set_rating(key, value)?;
        }
        Ok(state)
    }

    pub fn get(&self, key: &str) -> Option<u8> {
        self.ratings.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// True when the rated keys are exactly the keys of `dimensions`.
    pub fn covers_exactly(&self, dimensions: &[Dimension]) -> bool {
        self.ratings.len() == dimensions.len()
            && dimensions.iter().all(|d| self.ratings.contains_key(d.key))
    }
}

impl TryFrom<BTreeMap<String, u8>> for ResponseState {
    type Error = InsightError;

    fn try_from(ratings: BTreeMap<String, u8>) -> Result<Self> {
        for (key, &value) in &ratings {
            validate_rating(key, i64::from(value))?;
        }
        Ok(Self { ratings })
    }
}

impl From<ResponseState> for BTreeMap<String, u8> {
    fn from(state: ResponseState) -> Self {
        state.ratings
    }
}

fn validate_rating(key: &str, value: i64) -> Result<u8> {
    if value < i64::from(MIN_RATING) || value > i64::from(MAX_RATING) {
        return Err(InsightError::OutOfRange {
            key: key.to_string(),
            value,
        });
    }
    Ok(value as u8)
}

/// Parse a `key=value` pair as typed on the command line. Range and key
/// checks happen later, in [`ResponseState::set_rating`].
pub fn parse_assignment(s: &str) -> Result<(String, i64)> {
    let invalid = || InsightError::InvalidAssignment(s.to_string());
    let (key, value) = s.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid());
    }
    let value = value.trim().parse::<i64>().map_err(|_| invalid())?;
    Ok((key.to_string(), value))
}
