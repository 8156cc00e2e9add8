//! Workout catalog administration against `/api/workouts`.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use zenkai_domain::{ApiRequest, Catalog, DomainError, MuscleGroup};

use crate::ports::{ApiClient, fetch_json, send_ok};
use crate::ApplicationResult;

const WORKOUTS: &str = "workouts";

/// CRUD over muscle groups and their exercises.
///
/// Mutations return the backend's updated record so callers can patch
/// their local catalog without refetching.
#[derive(Clone)]
pub struct ManageCatalog {
    client: Arc<dyn ApiClient>,
}

impl ManageCatalog {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches every muscle group.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn list(&self) -> ApplicationResult<Vec<MuscleGroup>> {
        fetch_json(
            self.client.as_ref(),
            ApiRequest::get(&["api", WORKOUTS]),
            "Failed to fetch workouts",
        )
        .await
    }

    /// Fetches the catalog as an ordered map.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list`].
    pub async fn load(&self) -> ApplicationResult<Catalog> {
        Ok(Catalog::from_groups(self.list().await?))
    }

    /// Fetches the catalog, falling back to the built-in groups on any failure.
    pub async fn load_or_default(&self) -> Catalog {
        match self.load().await {
            Ok(catalog) if !catalog.is_empty() => catalog,
            Ok(_) => Catalog::defaults(),
            Err(err) => {
                warn!(error = %err, "catalog unavailable, using defaults");
                Catalog::defaults()
            }
        }
    }

    /// Creates an empty muscle group.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or the server's rejection
    /// (409 when the name is taken).
    pub async fn add_group(&self, name: &str) -> ApplicationResult<MuscleGroup> {
        let name = required(name, "Please enter a muscle group name")?;
        let request =
            ApiRequest::post(&["api", WORKOUTS]).with_json(&MuscleGroup::new(name))?;
        let group: MuscleGroup =
            fetch_json(self.client.as_ref(), request, "Failed to add muscle group")
                .await
                .inspect_err(|err| {
                    if err.status().is_some_and(|s| s.is_conflict()) {
                        info!(group = name, "muscle group already exists");
                    }
                })?;
        info!(group = %group.name, "muscle group added");
        Ok(group)
    }

    /// Renames a group.
    ///
    /// Returns `None` without contacting the backend when the new name is
    /// blank or unchanged.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn rename_group(
        &self,
        old: &str,
        new: &str,
    ) -> ApplicationResult<Option<MuscleGroup>> {
        let new = new.trim();
        if new.is_empty() || new == old {
            return Ok(None);
        }
        let request =
            ApiRequest::put(&["api", WORKOUTS, old]).with_json(&json!({ "newName": new }))?;
        let group: MuscleGroup =
            fetch_json(self.client.as_ref(), request, "Failed to update muscle group").await?;
        info!(from = old, to = %group.name, "muscle group renamed");
        Ok(Some(group))
    }

    /// Deletes a group and its exercises.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn delete_group(&self, name: &str) -> ApplicationResult<()> {
        send_ok(
            self.client.as_ref(),
            ApiRequest::delete(&["api", WORKOUTS, name]),
            "Failed to delete muscle group",
        )
        .await?;
        info!(group = name, "muscle group deleted");
        Ok(())
    }

    /// Appends an exercise to a group.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank exercise, or the server's rejection.
    pub async fn add_exercise(
        &self,
        group: &str,
        exercise: &str,
    ) -> ApplicationResult<MuscleGroup> {
        let exercise = required(exercise, "Please enter an exercise name")?;
        let request = ApiRequest::post(&["api", WORKOUTS, group, "exercises"])
            .with_json(&json!({ "exercise": exercise }))?;
        fetch_json(self.client.as_ref(), request, "Failed to add exercise").await
    }

    /// Removes an exercise from a group. The backend matches case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn delete_exercise(
        &self,
        group: &str,
        exercise: &str,
    ) -> ApplicationResult<MuscleGroup> {
        fetch_json(
            self.client.as_ref(),
            ApiRequest::delete(&["api", WORKOUTS, group, "exercises", exercise]),
            "Failed to delete exercise",
        )
        .await
    }
}

fn required<'a>(value: &'a str, message: &str) -> ApplicationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MissingField(message.to_string()).into());
    }
    Ok(value)
}
