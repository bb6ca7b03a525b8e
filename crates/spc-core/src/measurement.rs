//! Measurement records and their extraction into a numeric sequence
//!
//! Upstream systems deliver measured values and specification limits as
//! loosely typed fields (text, numbers, or nothing at all). Extraction is the
//! single place where those fields are validated; everything downstream works
//! on a plain `&[f64]` plus one [`SpecificationLimits`] pair.

use crate::constants::SubgroupSize;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// A numeric field as carried by the source system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Already numeric
    Number(f64),
    /// Decimal text, e.g. `"10.013"`
    Text(String),
}

impl RawValue {
    /// Parse into a finite `f64`, or `None` if the field is unusable
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(v) => *v,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// One inspection event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    /// Shift the measurement was taken on
    pub shift_id: i64,
    /// Measured value
    #[serde(default)]
    pub actual: Option<RawValue>,
    /// Lower specification limit
    #[serde(default)]
    pub lower_limit: Option<RawValue>,
    /// Upper specification limit
    #[serde(default)]
    pub upper_limit: Option<RawValue>,
}

impl MeasurementRecord {
    /// Create a record from any field representation
    pub fn new(
        shift_id: i64,
        actual: impl Into<RawValue>,
        lower_limit: impl Into<RawValue>,
        upper_limit: impl Into<RawValue>,
    ) -> Self {
        Self {
            shift_id,
            actual: Some(actual.into()),
            lower_limit: Some(lower_limit.into()),
            upper_limit: Some(upper_limit.into()),
        }
    }

    /// Parse `(actual, lsl, usl)` if all three fields are present and finite
    pub fn parse(&self) -> Option<(f64, f64, f64)> {
        let actual = self.actual.as_ref()?.parse()?;
        let lsl = self.lower_limit.as_ref()?.parse()?;
        let usl = self.upper_limit.as_ref()?.parse()?;
        Some((actual, lsl, usl))
    }

    /// Whether the record survives extraction
    pub fn is_valid(&self) -> bool {
        self.parse().is_some()
    }
}

/// Lower and upper specification limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificationLimits {
    /// Lower specification limit
    pub lsl: f64,
    /// Upper specification limit
    pub usl: f64,
}

impl SpecificationLimits {
    /// Create limits, failing if `lsl >= usl` or either bound is not finite
    pub fn new(lsl: f64, usl: f64) -> Result<Self> {
        if !(lsl.is_finite() && usl.is_finite()) || lsl >= usl {
            return Err(Error::InvalidLimits { lsl, usl });
        }
        Ok(Self { lsl, usl })
    }

    /// Tolerance width `usl - lsl`
    pub fn width(&self) -> f64 {
        self.usl - self.lsl
    }

    /// Nominal target, the midpoint of the limits
    pub fn target(&self) -> f64 {
        (self.usl + self.lsl) / 2.0
    }

    /// Whether a value lies within `[lsl, usl]`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lsl && value <= self.usl
    }
}

impl fmt::Display for SpecificationLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lsl, self.usl)
    }
}

/// How specification limits are reconciled across a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitsPolicy {
    /// Every valid record must carry the same limits as the first one
    #[default]
    RequireUniform,
    /// Take the first valid record's limits and ignore the rest
    FirstRecord,
}

/// Validated measurement sequence ready for analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurements {
    /// Measured values in input order
    pub values: Vec<f64>,
    /// Specification limits shared by the batch
    pub limits: SpecificationLimits,
    /// Number of input records dropped as malformed
    pub discarded: usize,
}

impl Measurements {
    /// Number of valid measurements
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no measurements
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validate raw records and convert them into a numeric sequence
///
/// Records with a missing or non-numeric field are dropped. The remaining
/// count must be non-zero and at least `subgroup_size`.
pub fn extract(
    records: &[MeasurementRecord],
    subgroup_size: SubgroupSize,
    policy: LimitsPolicy,
) -> Result<Measurements> {
    let parsed: Vec<(f64, f64, f64)> = records.iter().filter_map(MeasurementRecord::parse).collect();
    let discarded = records.len() - parsed.len();
    if discarded > 0 {
        warn!(
            discarded,
            total = records.len(),
            "dropped malformed measurement records"
        );
    }

    let n = subgroup_size.get();
    let &(_, first_lsl, first_usl) = parsed.first().ok_or(Error::empty_input(n))?;
    if parsed.len() < n {
        return Err(Error::InsufficientData {
            expected: n,
            actual: parsed.len(),
        });
    }
    let limits = SpecificationLimits::new(first_lsl, first_usl)?;

    if policy == LimitsPolicy::RequireUniform {
        if let Some((index, &(_, lsl, usl))) = parsed
            .iter()
            .enumerate()
            .find(|(_, &(_, lsl, usl))| lsl != limits.lsl || usl != limits.usl)
        {
            return Err(Error::InconsistentLimits {
                index,
                expected_lsl: limits.lsl,
                expected_usl: limits.usl,
                lsl,
                usl,
            });
        }
    }

    let values: Vec<f64> = parsed.into_iter().map(|(actual, _, _)| actual).collect();
    debug!(count = values.len(), %limits, "extracted measurements");

    Ok(Measurements {
        values,
        limits,
        discarded,
    })
}
