//! Date window a sprint imposes on its tasks

use chrono::NaiveDate;

use crate::schemas::Sprint;

/// Inclusive bounds for task dates. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Picker `min` attribute: ISO date or empty string
    pub fn min_str(&self) -> String {
        self.min.map(|d| d.to_string()).unwrap_or_default()
    }

    /// Picker `max` attribute: ISO date or empty string
    pub fn max_str(&self) -> String {
        self.max.map(|d| d.to_string()).unwrap_or_default()
    }

    /// Whether a date lies inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date <= max)
    }
}

/// Bounds for tasks in `sprint`; unbounded when there is no sprint.
///
/// Sprint dates are taken verbatim, each side independently.
pub fn date_bounds(sprint: Option<&Sprint>) -> DateBounds {
    match sprint {
        None => DateBounds::default(),
        Some(sprint) => DateBounds {
            min: sprint.start_date,
            max: sprint.end_date,
        },
    }
}
