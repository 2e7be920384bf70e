//! Summary length policy: estimated token count → target line-count bucket.

use crate::error::{Error, Result};

/// One tier of the bucket table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketTier {
    /// Exclusive upper bound in estimated tokens; `None` for the last tier.
    pub below: Option<usize>,
    /// Human-readable target length, embedded into the instruction prompt.
    pub label: String,
}

impl BucketTier {
    /// Tier for token counts strictly below `below`.
    pub fn below(below: usize, label: impl Into<String>) -> Self {
        Self {
            below: Some(below),
            label: label.into(),
        }
    }

    /// Open-ended final tier.
    pub fn otherwise(label: impl Into<String>) -> Self {
        Self {
            below: None,
            label: label.into(),
        }
    }
}

/// Mapping from estimated token count to a summary length bucket.
///
/// Monotonic by construction: tiers are validated to have strictly
/// increasing bounds, so more tokens never select an earlier bucket.
#[derive(Debug, Clone)]
pub struct BucketTable {
    tiers: Vec<BucketTier>,
}

impl BucketTable {
    /// Build a table from tiers ordered smallest-first.
    ///
    /// The final tier must be open-ended and bounds must strictly increase.
    pub fn new(tiers: Vec<BucketTier>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(Error::InvalidConfig("bucket table is empty".into()));
        }
        let (last, bounded) = tiers.split_last().expect("non-empty");
        if last.below.is_some() {
            return Err(Error::InvalidConfig(
                "last bucket tier must be open-ended".into(),
            ));
        }
        let mut previous: Option<usize> = None;
        for tier in bounded {
            let bound = tier.below.ok_or_else(|| {
                Error::InvalidConfig("only the last tier may be open-ended".into())
            })?;
            if previous.is_some_and(|p| bound <= p) {
                return Err(Error::InvalidConfig(
                    "bucket bounds must strictly increase".into(),
                ));
            }
            previous = Some(bound);
        }
        Ok(Self { tiers })
    }

    /// Select the bucket label for an estimated token count.
    pub fn select(&self, tokens: usize) -> &str {
        for tier in &self.tiers {
            match tier.below {
                Some(bound) if tokens < bound => return &tier.label,
                Some(_) => continue,
                None => return &tier.label,
            }
        }
        unreachable!("validated table always ends with an open tier")
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the table has no tiers. Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Ordinal position of the tier a token count falls into.
    pub fn tier_index(&self, tokens: usize) -> usize {
        self.tiers
            .iter()
            .position(|t| t.below.map_or(true, |bound| tokens < bound))
            .expect("validated table always ends with an open tier")
    }
}

impl Default for BucketTable {
    /// The monetary-policy summary policy: <1000 → "3~4줄", <2000 → "5~6줄",
    /// <3000 → "6~8줄", otherwise "8~10줄".
    fn default() -> Self {
        Self::new(vec![
            BucketTier::below(1000, "3~4줄"),
            BucketTier::below(2000, "5~6줄"),
            BucketTier::below(3000, "6~8줄"),
            BucketTier::otherwise("8~10줄"),
        ])
        .expect("default table is valid")
    }
}
