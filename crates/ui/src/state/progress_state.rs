//! Progress page state: logs plus the body-weight chart.

use chrono::{DateTime, Utc};
use zenkai_application::ProgressLogs;
use zenkai_domain::{Catalog, TimeRange, WeightLog, WeightSeries, WorkoutLog};

/// Logs, the exercise picker catalog and the chart series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressState {
    /// Catalog feeding the workout form.
    pub catalog: Catalog,
    /// Workout history, oldest first.
    pub workouts: Vec<WorkoutLog>,
    /// Body-weight history.
    pub weights: Vec<WeightLog>,
    /// Chart window.
    pub range: TimeRange,
    /// Chart input for `range`.
    pub series: WeightSeries,
}

impl ProgressState {
    /// Installs freshly fetched logs.
    pub fn load(&mut self, logs: ProgressLogs, now: DateTime<Utc>) {
        self.workouts = logs.workouts;
        self.weights = logs.weights;
        self.rebuild(now);
    }

    /// Appends a logged workout.
    pub fn push_workout(&mut self, log: WorkoutLog) {
        self.workouts.push(log);
    }

    /// Appends a weight entry and refreshes the chart.
    pub fn push_weight(&mut self, log: WeightLog, now: DateTime<Utc>) {
        self.weights.push(log);
        self.rebuild(now);
    }

    /// Drops a deleted workout.
    pub fn remove_workout(&mut self, id: &str) {
        self.workouts.retain(|w| w.id != id);
    }

    /// Switches the chart window.
    pub fn set_range(&mut self, range: TimeRange, now: DateTime<Utc>) {
        self.range = range;
        self.rebuild(now);
    }

    /// Most recent body weight.
    #[must_use]
    pub fn latest_weight(&self) -> Option<f64> {
        self.weights.iter().max_by_key(|w| w.date).map(|w| w.weight)
    }

    fn rebuild(&mut self, now: DateTime<Utc>) {
        self.series = WeightSeries::build(&self.weights, self.range, now);
    }
}
