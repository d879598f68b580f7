use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dates::{age_on, format_date};

/// Persisted user record, exactly as stored in the `users` table
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub dob: NaiveDate,
}

/// Request body for both creating and replacing a user.
///
/// Missing fields deserialize to empty strings so they are reported as
/// validation failures rather than malformed JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    #[schema(example = "Alice", min_length = 1, max_length = 255)]
    pub name: String,

    /// Date of birth, `YYYY-MM-DD`
    #[serde(default)]
    #[schema(example = "1990-05-10", format = Date)]
    pub dob: String,
}

impl UserRequest {
    pub fn new(name: impl Into<String>, dob: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dob: dob.into(),
        }
    }
}

/// User as returned by create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "1990-05-10", format = Date)]
    pub dob: String,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            dob: format_date(row.dob),
        }
    }
}

/// User as returned by get and list, with the age derived on read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserWithAge {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "1990-05-10", format = Date)]
    pub dob: String,
    /// Completed years as of today
    #[schema(example = 35)]
    pub age: i32,
}

impl UserWithAge {
    pub fn from_row(row: UserRow, today: NaiveDate) -> Self {
        Self {
            age: age_on(row.dob, today),
            id: row.id,
            name: row.name,
            dob: format_date(row.dob),
        }
    }
}

/// Pagination for listing users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page size; values <= 0 fall back to 10, values above 100 are capped
    #[serde(default = "default_limit")]
    #[param(example = 10)]
    pub limit: i64,

    /// Rows to skip
    #[serde(default)]
    #[param(example = 0)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}
