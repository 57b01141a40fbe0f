use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
    pub course_description: Option<String>,
}

/// Body of `POST /api/course` and `PUT /api/course/{id}`.
///
/// Every field is optional on the wire so that a missing required field
/// surfaces as a structured validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub course_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub course_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub course_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub course_name: String,
    pub course_code: String,
    pub course_description: Option<String>,
}
