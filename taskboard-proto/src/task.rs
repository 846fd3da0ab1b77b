//! Task board document types.
//!
//! The source document pre-partitions tasks into four status categories.
//! The dashboard never reclassifies a task: the collection it was read from
//! is its [`StatusCategory`].

use serde::{Deserialize, Serialize};

use crate::de::{Scalar, display_text, nullable};
use crate::meta::DocumentMeta;

/// Identifier of a task, used as its list key.
///
/// Sources write either integer or string ids. Other scalars are kept as
/// their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    /// Numeric identifier (`"id": 7`).
    Number(i64),
    /// Textual identifier (`"id": "task-7"`).
    Text(String),
}

/// Deserializes an optional id, keeping any scalar and dropping the rest.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<TaskId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => Some(TaskId::Number(n)),
        other => other.into_text().map(TaskId::Text),
    })
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// The group a task was supplied in by the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// Actively being worked on.
    InProgress,
    /// Queued for later.
    Planned,
    /// Finished.
    Completed,
    /// Parked with no near-term plan.
    Backburner,
}

impl StatusCategory {
    /// All categories in board display order.
    pub const ALL: [Self; 4] = [
        Self::InProgress,
        Self::Planned,
        Self::Backburner,
        Self::Completed,
    ];

    /// The key of this category's collection in the source document.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Planned => "planned",
            Self::Completed => "completed",
            Self::Backburner => "backburner",
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Task priority.
///
/// Values other than `high`, `medium`, and `low` are kept as
/// [`Priority::Unrecognized`] rather than rejecting the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Urgent.
    High,
    /// Normal.
    Medium,
    /// Whenever.
    Low,
    /// Any other priority label.
    #[serde(other)]
    Unrecognized,
}

/// One unit of work as it appears in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Task {
    /// List key.
    #[serde(deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    /// Short title.
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// Longer free-text description.
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text status label, shown as a badge.
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Priority label, shown as an icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// When the task is scheduled to happen (display text).
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
    /// Estimated effort (display text, e.g. `"2h"`).
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    /// Completion timestamp (ISO-8601 text).
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    /// What came of the task.
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    /// What is holding the task up.
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<String>,
    /// Free-text notes.
    #[serde(deserialize_with = "display_text", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The four pre-partitioned task collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskGroups {
    /// Tasks being worked on now.
    #[serde(deserialize_with = "nullable")]
    pub in_progress: Vec<Task>,
    /// Tasks queued for later.
    #[serde(deserialize_with = "nullable")]
    pub planned: Vec<Task>,
    /// Parked tasks.
    #[serde(deserialize_with = "nullable")]
    pub backburner: Vec<Task>,
    /// Finished tasks, most recent first.
    #[serde(deserialize_with = "nullable")]
    pub completed: Vec<Task>,
}

impl TaskGroups {
    /// Returns the tasks supplied under the given category.
    #[must_use]
    pub fn category(&self, category: StatusCategory) -> &[Task] {
        match category {
            StatusCategory::InProgress => &self.in_progress,
            StatusCategory::Planned => &self.planned,
            StatusCategory::Completed => &self.completed,
            StatusCategory::Backburner => &self.backburner,
        }
    }

    /// Total number of tasks across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        StatusCategory::ALL
            .iter()
            .map(|c| self.category(*c).len())
            .sum()
    }

    /// Returns `true` if no category holds any task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The tasks document: `{ tasks: {...}, meta: {...} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDocument {
    /// Tasks by status category.
    #[serde(deserialize_with = "nullable")]
    pub tasks: TaskGroups,
    /// Document metadata.
    #[serde(deserialize_with = "nullable")]
    pub meta: DocumentMeta,
}
