use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub course_id: Option<i64>,
}
