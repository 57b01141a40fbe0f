use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub roll_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub roll_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub roll_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
}
