use std::fmt::Display;

use serde::Serialize;

const HALF_DAY_LIMIT: f64 = 4.5;
const REGULARIZATION_LIMIT: f64 = 8.5;
const FULL_DAY_LIMIT: f64 = 9.0;

/// Category of a person's worked time for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WorkMode {
    #[serde(rename = "Half Day")]
    HalfDay,
    #[serde(rename = "Regularization")]
    Regularization,
    #[serde(rename = "Full Day")]
    FullDay,
    #[serde(rename = "Overtime")]
    Overtime,
    #[serde(rename = "Invalid Time")]
    InvalidTime,
}

impl WorkMode {
    /// Fixed order used when presenting modes.
    pub const ALL: [WorkMode; 5] = [
        WorkMode::HalfDay,
        WorkMode::Regularization,
        WorkMode::FullDay,
        WorkMode::Overtime,
        WorkMode::InvalidTime,
    ];

    /// Modes shown on charts. Invalid time is data, not a category of work.
    pub const CHART: [WorkMode; 4] = [
        WorkMode::HalfDay,
        WorkMode::Regularization,
        WorkMode::FullDay,
        WorkMode::Overtime,
    ];

    /// Classifies hours worked. Branches are checked top to bottom and the first one wins,
    /// which is what puts exactly 8.5 hours into [WorkMode::Regularization].
    pub fn classify(hours: Option<f64>) -> WorkMode {
        let Some(hours) = hours.filter(|v| !v.is_nan()) else {
            return WorkMode::InvalidTime;
        };
        if hours < HALF_DAY_LIMIT {
            WorkMode::HalfDay
        } else if (HALF_DAY_LIMIT..=REGULARIZATION_LIMIT).contains(&hours) {
            WorkMode::Regularization
        } else if (REGULARIZATION_LIMIT..=FULL_DAY_LIMIT).contains(&hours) {
            WorkMode::FullDay
        } else {
            WorkMode::Overtime
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkMode::HalfDay => "Half Day",
            WorkMode::Regularization => "Regularization",
            WorkMode::FullDay => "Full Day",
            WorkMode::Overtime => "Overtime",
            WorkMode::InvalidTime => "Invalid Time",
        }
    }
}

impl Display for WorkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
