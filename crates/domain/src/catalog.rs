//! Workout catalog: muscle groups and their exercises.
//!
//! The backend stores one record per muscle group holding a flat list of
//! exercise names. The client keeps them as an insertion-ordered map and
//! mutates it optimistically from mutation responses.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A muscle group record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleGroup {
    /// Database id, absent on create payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Unique group name.
    pub name: String,
    /// Exercise names in insertion order.
    #[serde(default)]
    pub exercises: Vec<String>,
}

impl MuscleGroup {
    /// Creates an empty group for a create request.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            exercises: Vec::new(),
        }
    }
}

/// Ordered map of group name to exercises.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    groups: IndexMap<String, Vec<String>>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from backend records, keeping their order.
    #[must_use]
    pub fn from_groups(groups: impl IntoIterator<Item = MuscleGroup>) -> Self {
        Self {
            groups: groups
                .into_iter()
                .map(|g| (g.name, g.exercises))
                .collect(),
        }
    }

    /// The fallback catalog used when the backend list is unavailable.
    #[must_use]
    pub fn defaults() -> Self {
        let table: [(&str, [&str; 4]); 6] = [
            ("Chest", ["Bench Press", "Incline Press", "Decline Press", "Dumbbell Flyes"]),
            ("Back", ["Pull-ups", "Deadlifts", "Barbell Rows", "Lat Pulldowns"]),
            ("Legs", ["Squats", "Leg Press", "Lunges", "Calf Raises"]),
            ("Shoulders", ["Military Press", "Lateral Raises", "Front Raises", "Shrugs"]),
            ("Arms", ["Bicep Curls", "Tricep Extensions", "Hammer Curls", "Skull Crushers"]),
            ("Core", ["Crunches", "Planks", "Russian Twists", "Leg Raises"]),
        ];
        Self {
            groups: table
                .iter()
                .map(|(name, exercises)| {
                    (
                        (*name).to_string(),
                        exercises.iter().map(|e| (*e).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group names in display order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Exercises of a group.
    #[must_use]
    pub fn exercises(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Returns true if the group exists.
    #[must_use]
    pub fn contains_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Iterates `(group, exercises)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Adds an empty group at the end. Existing groups are left untouched.
    pub fn add_group(&mut self, name: impl Into<String>) {
        self.groups.entry(name.into()).or_default();
    }

    /// Renames a group in place, keeping its position and exercises.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMuscleGroup` if `old` does not exist.
    pub fn rename_group(&mut self, old: &str, new: impl Into<String>) -> DomainResult<()> {
        let index = self
            .groups
            .get_index_of(old)
            .ok_or_else(|| DomainError::UnknownMuscleGroup(old.to_string()))?;
        let new = new.into();
        if let Some((_, exercises)) = self.groups.shift_remove_index(index) {
            let (inserted, _) = self.groups.insert_full(new, exercises);
            self.groups.move_index(inserted, index.min(self.groups.len() - 1));
        }
        Ok(())
    }

    /// Removes a group. Returns its exercises if it existed.
    pub fn remove_group(&mut self, name: &str) -> Option<Vec<String>> {
        self.groups.shift_remove(name)
    }

    /// Appends an exercise to a group.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMuscleGroup` if the group does not exist.
    pub fn add_exercise(&mut self, group: &str, exercise: impl Into<String>) -> DomainResult<()> {
        self.groups
            .get_mut(group)
            .ok_or_else(|| DomainError::UnknownMuscleGroup(group.to_string()))?
            .push(exercise.into());
        Ok(())
    }

    /// Removes an exercise, matching names case-insensitively.
    ///
    /// Returns true if anything was removed.
    pub fn remove_exercise(&mut self, group: &str, exercise: &str) -> bool {
        self.groups.get_mut(group).is_some_and(|exercises| {
            let before = exercises.len();
            exercises.retain(|e| !e.eq_ignore_ascii_case(exercise));
            exercises.len() != before
        })
    }

    /// Replaces one group's record with the backend's version.
    pub fn apply(&mut self, group: MuscleGroup) {
        self.groups.insert(group.name, group.exercises);
    }
}
