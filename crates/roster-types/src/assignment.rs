use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for an assignment, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub Uuid);

impl AssignmentId {
    /// Create a new AssignmentId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AssignmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssignmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A commitment of a freelancer's capacity to a project over an inclusive
/// whole-day date range.
///
/// `start_date <= end_date` and `0 <= allocation <= 100` are enforced by
/// `AssignmentService` before anything reaches a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub freelancer_id: String,
    pub project_id: String,
    /// Display title of the project, used in conflict messages.
    pub project_title: String,
    pub role: String,
    /// First booked day (inclusive).
    pub start_date: NaiveDate,
    /// Last booked day (inclusive).
    pub end_date: NaiveDate,
    /// Percentage of working capacity committed (0-100).
    pub allocation: f64,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Assignment lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    #[default]
    Active,
    Tentative,
    Confirmed,
}

impl AssignmentStatus {
    /// Lenient conversion used for user-supplied status strings.
    ///
    /// Uppercases the input and replaces every whitespace run, leading and
    /// trailing ones included, with a single `_` before matching. Missing or
    /// unknown values fall back to `Active`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Active;
        };
        let mut normalized = String::with_capacity(raw.len());
        let mut in_whitespace = false;
        for ch in raw.to_uppercase().chars() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    normalized.push('_');
                }
                in_whitespace = true;
            } else {
                normalized.push(ch);
                in_whitespace = false;
            }
        }
        match normalized.as_str() {
            "TENTATIVE" => Self::Tentative,
            "CONFIRMED" => Self::Confirmed,
            _ => Self::Active,
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatus::Active => write!(f, "active"),
            AssignmentStatus::Tentative => write!(f, "tentative"),
            AssignmentStatus::Confirmed => write!(f, "confirmed"),
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AssignmentStatus::Active),
            "tentative" => Ok(AssignmentStatus::Tentative),
            "confirmed" => Ok(AssignmentStatus::Confirmed),
            other => Err(format!("invalid assignment status: '{other}'")),
        }
    }
}

/// Request to book a freelancer onto a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    pub freelancer_id: String,
    pub project_id: String,
    pub project_title: String,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Defaults to 100 when omitted.
    pub allocation: Option<f64>,
    /// Free-form status, normalized with [`AssignmentStatus::normalize`].
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Partial update of an existing assignment. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub freelancer_id: Option<String>,
    pub project_id: Option<String>,
    pub project_title: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub allocation: Option<f64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
