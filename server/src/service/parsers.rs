//! Query strings and request payloads that don't map one-to-one onto the
//! record types.

use std::fmt::Display;
use std::str::FromStr;

use records::model::{parse_due_date, NewTask};
use serde::{Deserialize, Deserializer};

use super::ApiError;

/// `?status=` filter. Unknown values fail deserialization and are
/// answered with 400. An empty value means no filter.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "S: FromStr, <S as FromStr>::Err: Display"))]
pub struct StatusFilter<S> {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<S>,
}

#[derive(Debug, Deserialize)]
pub struct DepartmentFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department: Option<String>,
}

/// Reads an optional query value, treating a blank one as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(text) if !text.trim().is_empty() => {
            text.parse().map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
pub struct DecideParams {
    pub outcome: String,
}

/// Body of `POST /tasks`. The due date arrives as text.
#[derive(Debug, Deserialize)]
pub struct TaskIn {
    pub title: String,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<TaskIn> for NewTask {
    type Error = ApiError;

    fn try_from(task: TaskIn) -> Result<Self, Self::Error> {
        // An empty string means no due date.
        let due_date = match task.due.as_deref() {
            None | Some("") => None,
            Some(text) => {
                Some(parse_due_date(text).map_err(|_| ApiError::MalformedDate(text.to_string()))?)
            }
        };
        Ok(NewTask {
            title: task.title,
            due_date,
            assigned_to: task.assigned_to,
            notes: task.notes,
        })
    }
}
