use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProcessingError;
use crate::utils::constants::{PM10_BAD_MAX, PM10_GOOD_MAX, PM10_NORMAL_MAX};

/// PM10 severity bucket. Variant order is the presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PmGrade {
    Good,
    Normal,
    Bad,
    Worse,
}

impl PmGrade {
    pub const ALL: [PmGrade; 4] = [PmGrade::Good, PmGrade::Normal, PmGrade::Bad, PmGrade::Worse];

    /// Thresholds are inclusive upper bounds: 30 is good, 30.01 is normal.
    pub fn from_pm10(pm10: f64) -> Self {
        if pm10 <= PM10_GOOD_MAX {
            PmGrade::Good
        } else if pm10 <= PM10_NORMAL_MAX {
            PmGrade::Normal
        } else if pm10 <= PM10_BAD_MAX {
            PmGrade::Bad
        } else {
            PmGrade::Worse
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PmGrade::Good => "good",
            PmGrade::Normal => "normal",
            PmGrade::Bad => "bad",
            PmGrade::Worse => "worse",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for PmGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PmGrade {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "good" => Ok(PmGrade::Good),
            "normal" => Ok(PmGrade::Normal),
            "bad" => Ok(PmGrade::Bad),
            "worse" => Ok(PmGrade::Worse),
            other => Err(ProcessingError::InvalidFormat(format!(
                "Unknown PM10 grade: '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(PmGrade::from_pm10(0.0), PmGrade::Good);
        assert_eq!(PmGrade::from_pm10(30.0), PmGrade::Good);
        assert_eq!(PmGrade::from_pm10(30.01), PmGrade::Normal);
        assert_eq!(PmGrade::from_pm10(80.0), PmGrade::Normal);
        assert_eq!(PmGrade::from_pm10(80.01), PmGrade::Bad);
        assert_eq!(PmGrade::from_pm10(150.0), PmGrade::Bad);
        assert_eq!(PmGrade::from_pm10(150.01), PmGrade::Worse);
        assert_eq!(PmGrade::from_pm10(999.0), PmGrade::Worse);
    }

    #[test]
    fn test_grade_order_is_severity_order() {
        assert!(PmGrade::Good < PmGrade::Normal);
        assert!(PmGrade::Normal < PmGrade::Bad);
        assert!(PmGrade::Bad < PmGrade::Worse);
    }
}
