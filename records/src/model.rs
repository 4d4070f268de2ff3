//! Record types for the five entity kinds, their status enums, and the
//! insert payloads accepted by the repositories.
//!
//! Status columns are stored as their snake_case text and parsed back
//! through [`FromStr`]. Each status enum carries its own transition table.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Auto-assigned row identifier, unique per entity kind.
pub type RecordId = i64;

/// Textual format accepted for task due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` due date.
pub fn parse_due_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DUE_DATE_FORMAT)
}

/// The entity kinds stored by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Resident,
    ServiceRequest,
    Permit,
    Contact,
    Task,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Resident => "resident",
            RecordKind::ServiceRequest => "service request",
            RecordKind::Permit => "permit",
            RecordKind::Contact => "contact",
            RecordKind::Task => "task",
        };
        f.write_str(name)
    }
}

/// Error returned when a status string is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} status '{value}' (expected one of: {expected})")]
pub struct ParseStatusError {
    kind: RecordKind,
    value: String,
    expected: &'static str,
}

// ── ServiceRequestStatus ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRequestStatus {
    Open,
    InProgress,
    Closed,
}

impl ServiceRequestStatus {
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceRequestStatus::Open => "open",
            ServiceRequestStatus::InProgress => "in_progress",
            ServiceRequestStatus::Closed => "closed",
        }
    }

    /// Whether a request in this status may be moved to `next`.
    ///
    /// Re-applying the current status is always allowed. A closed request
    /// can only be reopened.
    pub fn can_transition_to(self, next: Self) -> bool {
        use ServiceRequestStatus as S;
        match (self, next) {
            (a, b) if a == b => true,
            (S::Open, S::InProgress | S::Closed) => true,
            (S::InProgress, S::Open | S::Closed) => true,
            (S::Closed, S::Open) => true,
            _ => false,
        }
    }

    /// Statuses a request may be in for a move to `target` to succeed.
    pub fn sources_for(target: Self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|s| s.can_transition_to(target))
            .collect()
    }
}

impl fmt::Display for ServiceRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceRequestStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            other => Err(ParseStatusError {
                kind: RecordKind::ServiceRequest,
                value: other.to_string(),
                expected: "open, in_progress, closed",
            }),
        }
    }
}

// ── PermitStatus ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermitStatus {
    Pending,
    Approved,
    Rejected,
}

impl PermitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PermitStatus::Pending => "pending",
            PermitStatus::Approved => "approved",
            PermitStatus::Rejected => "rejected",
        }
    }

    /// Map a decision outcome to the resulting status.
    ///
    /// Only the exact string `"approved"` approves. Every other value,
    /// including misspellings, rejects.
    pub fn from_outcome(outcome: &str) -> Self {
        if outcome == "approved" {
            PermitStatus::Approved
        } else {
            PermitStatus::Rejected
        }
    }

    pub fn is_decided(self) -> bool {
        self != PermitStatus::Pending
    }
}

impl fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermitStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseStatusError {
                kind: RecordKind::Permit,
                value: other.to_string(),
                expected: "pending, approved, rejected",
            }),
        }
    }
}

// ── TaskStatus ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Whether a task in this status may be moved to `next`.
    ///
    /// A finished task can only go back to `todo`.
    pub fn can_transition_to(self, next: Self) -> bool {
        use TaskStatus as T;
        match (self, next) {
            (a, b) if a == b => true,
            (T::Todo, T::InProgress | T::Done) => true,
            (T::InProgress, T::Todo | T::Done) => true,
            (T::Done, T::Todo) => true,
            _ => false,
        }
    }

    /// Statuses a task may be in for a move to `target` to succeed.
    pub fn sources_for(target: Self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|s| s.can_transition_to(target))
            .collect()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ParseStatusError {
                kind: RecordKind::Task,
                value: other.to_string(),
                expected: "todo, in_progress, done",
            }),
        }
    }
}

// ── Records ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: RecordId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RecordId,
    /// Advisory link to a resident; never checked.
    pub resident_id: Option<RecordId>,
    pub category: String,
    pub description: String,
    pub status: ServiceRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permit {
    pub id: RecordId,
    /// Advisory link to a resident; never checked.
    pub resident_id: Option<RecordId>,
    #[serde(rename = "type")]
    pub permit_type: String,
    pub status: PermitStatus,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: RecordId,
    pub department: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_to: Option<String>,
    pub status: TaskStatus,
    pub notes: Option<String>,
}

// ── Insert payloads ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewResident {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewServiceRequest {
    #[serde(default)]
    pub resident_id: Option<RecordId>,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPermit {
    #[serde(default)]
    pub resident_id: Option<RecordId>,
    #[serde(rename = "type")]
    pub permit_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    pub department: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

/// Check that a required text field is present and not blank.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), crate::PersistenceError> {
    if value.trim().is_empty() {
        return Err(crate::PersistenceError::Validation {
            field,
            reason: "must not be blank",
        });
    }
    Ok(())
}

impl NewResident {
    pub fn validate(&self) -> Result<(), crate::PersistenceError> {
        require("name", &self.name)
    }
}

impl NewServiceRequest {
    pub fn validate(&self) -> Result<(), crate::PersistenceError> {
        require("category", &self.category)?;
        require("description", &self.description)
    }
}

impl NewPermit {
    pub fn validate(&self) -> Result<(), crate::PersistenceError> {
        require("type", &self.permit_type)
    }
}

impl NewContact {
    pub fn validate(&self) -> Result<(), crate::PersistenceError> {
        require("department", &self.department)?;
        require("name", &self.name)
    }
}

impl NewTask {
    pub fn validate(&self) -> Result<(), crate::PersistenceError> {
        require("title", &self.title)
    }
}
