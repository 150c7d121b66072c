//! The UI-shaped mobility plan.
//!
//! Produced only by [`crate::mapper::plan_to_ui`]; the store replaces the
//! whole value on every refetch. Serialized with camelCase keys for
//! compatibility with records written by earlier versions of the app.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Priority bucket shared by checklist items and risk severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Bucket a wire-side priority or severity label. Matching is
    /// case-insensitive; unknown or empty labels land in `Medium`.
    pub fn from_wire(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    /// Name of the synthetic checklist category for this bucket.
    pub fn category_name(self) -> &'static str {
        match self {
            Self::High => "High Priority",
            Self::Medium => "Medium Priority",
            Self::Low => "Low Priority",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = PriorityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(PriorityParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Priority`] string.
#[derive(Debug, Clone)]
pub struct PriorityParseError(pub String);

impl fmt::Display for PriorityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid priority: {:?}", self.0)
    }
}

impl std::error::Error for PriorityParseError {}

// ---------------------------------------------------------------------------

/// Status of a timeline milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Pending,
    Completed,
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Plan structs
// ---------------------------------------------------------------------------

/// Headline numbers for the plan. Totals are recomputed from the
/// translated collections, never trusted from the wire summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Confidence score in `0..=1`.
    pub confidence: f64,
    pub estimated_weeks: u32,
    pub total_documents: usize,
    pub total_tasks: usize,
}

/// One entry on the plan timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    /// The wire time-window label, e.g. `"Week 2-3"`.
    pub date: String,
    pub status: MilestoneStatus,
    pub description: String,
}

/// One actionable checklist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Stable identifier assigned at translation time; the completion
    /// set is keyed on it, so it must survive regrouping and plan
    /// regeneration.
    pub id: String,
    pub title: String,
    pub priority: Priority,
}

/// A synthetic priority bucket of checklist items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistCategory {
    pub category: String,
    pub items: Vec<ChecklistItem>,
}

/// One required document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    pub name: String,
    pub description: String,
    pub requirements: Vec<String>,
}

/// A category of required documents, as grouped by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCategory {
    pub category: String,
    pub documents: Vec<DocumentEntry>,
}

/// One identified risk with mitigation steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub title: String,
    pub severity: Priority,
    pub description: String,
    pub mitigation: Vec<String>,
}

/// The generated mobility plan as consumed by every UI surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub summary: PlanSummary,
    pub timeline: Vec<Milestone>,
    pub checklist: Vec<ChecklistCategory>,
    pub documents: Vec<DocumentCategory>,
    pub risks: Vec<Risk>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
