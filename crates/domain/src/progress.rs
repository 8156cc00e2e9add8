//! Progress logging: workout sets and body-weight entries.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One logged exercise session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    /// Client-generated id.
    pub id: String,
    /// Muscle group the exercise belongs to.
    pub muscle_group: String,
    /// Exercise name.
    pub exercise: String,
    /// Number of sets.
    pub sets: u32,
    /// Repetitions per set.
    pub reps: u32,
    /// Working weight in kilograms.
    pub weight: f64,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// When the session was logged.
    pub date: DateTime<Utc>,
}

/// One body-weight measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    /// Client-generated id.
    pub id: String,
    /// Body weight in kilograms.
    pub weight: f64,
    /// When the measurement was taken.
    pub date: DateTime<Utc>,
}

/// The workout form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutForm {
    /// Selected muscle group.
    pub muscle_group: String,
    /// Selected exercise.
    pub exercise: String,
    /// Sets, as typed.
    pub sets: String,
    /// Reps, as typed.
    pub reps: String,
    /// Weight, as typed.
    pub weight: String,
    /// Notes.
    pub notes: String,
}

impl WorkoutForm {
    /// Validates the form and stamps it with an id and date.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing group/exercise or unparsable numbers.
    pub fn into_log(self, id: String, date: DateTime<Utc>) -> DomainResult<WorkoutLog> {
        if self.muscle_group.trim().is_empty() || self.exercise.trim().is_empty() {
            return Err(DomainError::MissingField(
                "Please select a muscle group and exercise".to_string(),
            ));
        }
        Ok(WorkoutLog {
            id,
            sets: parse_field("sets", &self.sets)?,
            reps: parse_field("reps", &self.reps)?,
            weight: parse_weight("weight", &self.weight)?,
            muscle_group: self.muscle_group,
            exercise: self.exercise,
            notes: self.notes,
            date,
        })
    }
}

/// Builds a weight log from the typed value.
///
/// # Errors
///
/// Returns `InvalidNumber` unless the value is a positive number.
pub fn weight_entry(value: &str, id: String, date: DateTime<Utc>) -> DomainResult<WeightLog> {
    let weight = parse_weight("body weight", value)?;
    if weight <= 0.0 {
        return Err(DomainError::InvalidNumber {
            field: "body weight".to_string(),
            value: value.to_string(),
        });
    }
    Ok(WeightLog { id, weight, date })
}

fn parse_field(field: &str, value: &str) -> DomainResult<u32> {
    value.trim().parse().map_err(|_| DomainError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_weight(field: &str, value: &str) -> DomainResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
        .ok_or_else(|| DomainError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Window for the body-weight chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    /// Last 7 days.
    #[default]
    Week,
    /// Last 30 days.
    Month,
    /// Last 365 days.
    Year,
}

impl TimeRange {
    /// Length of the window.
    #[must_use]
    pub fn span(self) -> Duration {
        match self {
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
            Self::Year => Duration::days(365),
        }
    }
}

impl FromStr for TimeRange {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(DomainError::UnknownTimeRange(other.to_string())),
        }
    }
}

/// Chart input for the body-weight graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightSeries {
    /// Date labels (`YYYY-MM-DD`).
    pub labels: Vec<String>,
    /// Weights matching `labels`.
    pub values: Vec<f64>,
}

impl WeightSeries {
    /// Builds the series for the entries inside `range` ending at `now`,
    /// oldest first.
    #[must_use]
    pub fn build(logs: &[WeightLog], range: TimeRange, now: DateTime<Utc>) -> Self {
        let start = now - range.span();
        let mut entries: Vec<&WeightLog> = logs
            .iter()
            .filter(|l| l.date >= start && l.date <= now)
            .collect();
        entries.sort_by_key(|l| l.date);
        Self {
            labels: entries
                .iter()
                .map(|l| l.date.format("%Y-%m-%d").to_string())
                .collect(),
            values: entries.iter().map(|l| l.weight).collect(),
        }
    }

    /// Difference between the newest and oldest value.
    #[must_use]
    pub fn change(&self) -> Option<f64> {
        match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) if self.values.len() > 1 => Some(last - first),
            _ => None,
        }
    }
}
