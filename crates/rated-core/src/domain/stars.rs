//! Star rating value objects.

use crate::RatedError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A single review's star rating.
///
/// Fixed-point with one decimal, always within `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Stars(Decimal);

impl Stars {
    /// Highest rating a review can carry.
    pub const MAX: u8 = 5;

    /// Creates a rating, rejecting values outside `[0, 5]` or with more than one decimal.
    pub fn new(value: Decimal) -> Result<Self, RatedError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(RatedError::validation(format!("stars must be >= 0, got {value}")));
        }
        if value > Decimal::from(Self::MAX) {
            return Err(RatedError::validation(format!("stars must be <= 5, got {value}")));
        }
        if value.normalize().scale() > 1 {
            return Err(RatedError::validation(format!(
                "stars allow one decimal place, got {value}"
            )));
        }
        let mut value = value;
        value.rescale(1);
        Ok(Self(value))
    }

    /// Creates a whole-star rating.
    pub fn whole(stars: u8) -> Result<Self, RatedError> {
        Self::new(Decimal::from(stars))
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the histogram bucket (1..=5) this rating falls in exactly.
    ///
    /// Fractional ratings and zero belong to no bucket.
    #[must_use]
    pub fn bucket(&self) -> Option<u8> {
        if !self.0.fract().is_zero() {
            return None;
        }
        self.0.to_u8().filter(|b| (1..=Self::MAX).contains(b))
    }
}

impl TryFrom<Decimal> for Stars {
    type Error = RatedError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stars> for Decimal {
    fn from(stars: Stars) -> Self {
        stars.0
    }
}

impl Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An aggregate rating on the half-star lattice `{0, 0.5, ..., 5.0}`.
///
/// Always carries exactly one decimal place, so it renders as `"4.0"`,
/// `"3.5"` and so on. Serialized as a string; deserializing a value off the
/// lattice fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct StarRating(Decimal);

impl StarRating {
    /// Number of half-star steps between 0 and 5.
    pub const MAX_HALF_STEPS: u32 = 10;

    /// Rating for a workplace with nothing to count.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_half_steps(0)
    }

    /// Builds a rating from a count of half stars (8 half stars = 4.0).
    ///
    /// Steps above [`Self::MAX_HALF_STEPS`] are clamped.
    #[must_use]
    pub fn from_half_steps(steps: u32) -> Self {
        let mut value = Decimal::from(steps.min(Self::MAX_HALF_STEPS)) / Decimal::TWO;
        value.rescale(1);
        Self(value)
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for StarRating {
    type Error = RatedError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let doubled = value * Decimal::TWO;
        match doubled.to_u32() {
            Some(steps) if doubled.fract().is_zero() && steps <= Self::MAX_HALF_STEPS => {
                Ok(Self::from_half_steps(steps))
            }
            _ => Err(RatedError::validation(format!(
                "star rating must be a half step between 0 and 5, got {value}"
            ))),
        }
    }
}

impl From<StarRating> for Decimal {
    fn from(rating: StarRating) -> Self {
        rating.0
    }
}

impl Default for StarRating {
    fn default() -> Self {
        Self::zero()
    }
}

impl Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
