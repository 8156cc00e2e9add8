//! Workout and body-weight logs.

use std::sync::Arc;

use tracing::info;
use zenkai_domain::{ApiRequest, WeightLog, WorkoutForm, WorkoutLog, weight_entry};

use crate::ports::{ApiClient, Clock, fetch_json, send_ok};
use crate::ApplicationResult;

const WORKOUT_LOGS: &[&str] = &["api", "workoutLogs"];
const WEIGHT_LOGS: &[&str] = &["api", "weightLogs"];

/// Both log lists, fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressLogs {
    /// Logged workouts in server order.
    pub workouts: Vec<WorkoutLog>,
    /// Body-weight entries in server order.
    pub weights: Vec<WeightLog>,
}

/// Reads and appends progress logs.
#[derive(Clone)]
pub struct TrackProgress {
    client: Arc<dyn ApiClient>,
    clock: Arc<dyn Clock>,
}

impl TrackProgress {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    /// Fetches workout and weight logs concurrently.
    ///
    /// # Errors
    ///
    /// Fails if either list cannot be fetched.
    pub async fn load(&self) -> ApplicationResult<ProgressLogs> {
        let client = self.client.as_ref();
        let (workouts, weights) = tokio::join!(
            fetch_json::<Vec<WorkoutLog>>(
                client,
                ApiRequest::get(WORKOUT_LOGS),
                "Failed to fetch workout logs"
            ),
            fetch_json::<Vec<WeightLog>>(
                client,
                ApiRequest::get(WEIGHT_LOGS),
                "Failed to fetch weight logs"
            ),
        );
        Ok(ProgressLogs {
            workouts: workouts?,
            weights: weights?,
        })
    }

    /// Validates and saves a workout. Returns the log as sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete form, or the server's rejection.
    pub async fn log_workout(&self, form: WorkoutForm) -> ApplicationResult<WorkoutLog> {
        let now = self.clock.now();
        let log = form.into_log(now.timestamp_millis().to_string(), now)?;
        let request = ApiRequest::post(WORKOUT_LOGS).with_json(&log)?;
        send_ok(self.client.as_ref(), request, "Failed to save workout log").await?;
        info!(id = %log.id, exercise = %log.exercise, "workout logged");
        Ok(log)
    }

    /// Validates and saves a body-weight entry. Returns the entry as sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive value, or the server's rejection.
    pub async fn log_weight(&self, value: &str) -> ApplicationResult<WeightLog> {
        let now = self.clock.now();
        let log = weight_entry(value, now.timestamp_millis().to_string(), now)?;
        let request = ApiRequest::post(WEIGHT_LOGS).with_json(&log)?;
        send_ok(self.client.as_ref(), request, "Failed to save weight log").await?;
        info!(id = %log.id, weight = log.weight, "weight logged");
        Ok(log)
    }

    /// Deletes a workout log.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn delete_workout(&self, id: &str) -> ApplicationResult<()> {
        send_ok(
            self.client.as_ref(),
            ApiRequest::delete(&["api", "workoutLogs", id]),
            "Failed to delete workout log",
        )
        .await?;
        Ok(())
    }
}
