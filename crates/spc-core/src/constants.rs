//! Control chart constants indexed by subgroup size
//!
//! The table covers subgroup sizes 1 through 5. Size 1 reuses the n=2 moving
//! range factors for D4 and d2, since an individuals chart is built from
//! two-point moving ranges.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported subgroup size
pub const MAX_SUBGROUP_SIZE: usize = 5;

/// A validated subgroup size in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SubgroupSize(usize);

impl SubgroupSize {
    /// Individuals (moving range) chart
    pub const INDIVIDUALS: SubgroupSize = SubgroupSize(1);

    /// Create a subgroup size, rejecting values outside `1..=5`
    pub fn new(size: usize) -> Result<Self> {
        if (1..=MAX_SUBGROUP_SIZE).contains(&size) {
            Ok(Self(size))
        } else {
            Err(Error::invalid_subgroup_size(size))
        }
    }

    /// Get the size as a plain integer
    pub fn get(self) -> usize {
        self.0
    }

    /// Whether this is the individuals (n = 1) case
    pub fn is_individuals(self) -> bool {
        self.0 == 1
    }

    /// Constants for this subgroup size
    pub fn constants(self) -> &'static ChartConstants {
        &CONSTANTS[self.0 - 1]
    }
}

impl TryFrom<usize> for SubgroupSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SubgroupSize> for usize {
    fn from(size: SubgroupSize) -> Self {
        size.0
    }
}

impl fmt::Display for SubgroupSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tabulated factors relating subgroup ranges to limits and sigma
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartConstants {
    /// Mean chart limit factor: limits = grand mean ± A2 * R-bar
    pub a2: f64,
    /// Range chart lower limit factor: LCL = D3 * R-bar
    pub d3: f64,
    /// Range chart upper limit factor: UCL = D4 * R-bar
    pub d4: f64,
    /// Mean of the relative range: sigma-hat = R-bar / d2
    pub d2: f64,
}

const CONSTANTS: [ChartConstants; MAX_SUBGROUP_SIZE] = [
    ChartConstants { a2: 2.66, d3: 0.0, d4: 3.267, d2: 1.128 },
    ChartConstants { a2: 1.88, d3: 0.0, d4: 3.267, d2: 1.128 },
    ChartConstants { a2: 1.772, d3: 0.0, d4: 2.574, d2: 1.693 },
    ChartConstants { a2: 0.796, d3: 0.0, d4: 2.282, d2: 2.059 },
    ChartConstants { a2: 0.691, d3: 0.0, d4: 2.114, d2: 2.326 },
];

/// Look up the constants for a raw subgroup size
pub fn constants_for(size: usize) -> Result<&'static ChartConstants> {
    SubgroupSize::new(size).map(SubgroupSize::constants)
}
