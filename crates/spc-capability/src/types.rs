//! Verdict types for capability interpretation
//!
//! Every verdict serializes as its display string so reports can be shown
//! without further mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Yes/No answer to a diagnostic question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether special causes inflate the long-term spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialCause {
    Yes,
    No,
    /// Long-term spread is no worse than short-term, so the comparison says nothing
    #[serde(rename = "Special Cause Detection impossible")]
    Undetectable,
}

impl SpecialCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Undetectable => "Special Cause Detection impossible",
        }
    }
}

impl fmt::Display for SpecialCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recommended action, graded on Cpk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DecisionRemark {
    /// Cpk < 1.00
    #[serde(rename = "Stop Process change, process design")]
    StopProcess,
    /// 1.00 <= Cpk < 1.33
    #[serde(rename = "Process is slightly capable, need 100% inspection")]
    SlightlyCapable,
    /// 1.33 <= Cpk < 1.45
    #[serde(rename = "Process is capable, Scope for Further Improvement")]
    Capable,
    /// 1.45 <= Cpk < 1.67
    #[serde(rename = "Process is more capable, Scope for Further Improvement")]
    MoreCapable,
    /// Cpk >= 1.67
    #[serde(rename = "Process Excellent")]
    Excellent,
}

impl DecisionRemark {
    /// Grade a Cpk value
    pub fn from_cpk(cpk: f64) -> Self {
        if cpk >= 1.67 {
            Self::Excellent
        } else if cpk >= 1.45 {
            Self::MoreCapable
        } else if cpk >= 1.33 {
            Self::Capable
        } else if cpk >= 1.0 {
            Self::SlightlyCapable
        } else {
            Self::StopProcess
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Process Excellent",
            Self::MoreCapable => "Process is more capable, Scope for Further Improvement",
            Self::Capable => "Process is capable, Scope for Further Improvement",
            Self::SlightlyCapable => "Process is slightly capable, need 100% inspection",
            Self::StopProcess => "Stop Process change, process design",
        }
    }

    /// Whether the process may keep running without full inspection
    pub fn is_acceptable(&self) -> bool {
        *self >= Self::Capable
    }
}

impl fmt::Display for DecisionRemark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three-level rating for potential (Cp) and performance (Cpk)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProcessRating {
    Poor,
    Good,
    Excellent,
}

impl ProcessRating {
    /// Excellent at 1.33 and above, Good from 1.00
    pub fn from_index(index: f64) -> Self {
        if index >= 1.33 {
            Self::Excellent
        } else if index >= 1.0 {
            Self::Good
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for ProcessRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Statistical control status of the mean chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStability {
    Stable,
    Unstable,
}

impl ProcessStability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Unstable => "Unstable",
        }
    }
}

impl fmt::Display for ProcessStability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
