//! Serialisable snapshot of the persisted part of the board.

use super::{FilterCriteria, SortCriteria, SortField, SortOrder, Task, ViewportClass};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Persisted board state.
///
/// Fields that are missing or `null` in stored JSON fall back to their
/// initial values, so snapshots written by older schemas still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardSnapshot {
    /// Tasks in insertion order.
    ///
    /// Entries that do not decode as a task are dropped with a warning;
    /// the rest of the board still loads.
    #[serde(deserialize_with = "tasks_skipping_invalid")]
    pub tasks: Vec<Task>,
    /// Global filter criteria.
    #[serde(deserialize_with = "null_as_default")]
    pub filters: FilterCriteria,
    /// Sort field.
    #[serde(deserialize_with = "null_as_default")]
    pub sort_by: SortField,
    /// Sort direction.
    #[serde(deserialize_with = "null_as_default")]
    pub sort_order: SortOrder,
    /// Viewport classification.
    #[serde(deserialize_with = "null_as_default")]
    pub ui: ViewportClass,
}

impl BoardSnapshot {
    /// Returns the sort criteria stored in the snapshot.
    #[must_use]
    pub const fn sort(&self) -> SortCriteria {
        SortCriteria::new(self.sort_by, self.sort_order)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn tasks_skipping_invalid<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Value> = null_as_default(deserializer)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(task) => Some(task),
            Err(err) => {
                warn!(index, error = %err, "dropping undecodable stored task");
                None
            }
        })
        .collect())
}
