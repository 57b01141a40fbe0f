use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::api::body::RequestBody;
use crate::db::repository;
use crate::error::{AppError, ErrorCode};
use crate::models::{NewStudent, Student, StudentRequest};
use crate::state::AppState;

pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = repository::fetch_students(&state.db).await?;
    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = repository::find_student(&state.db, student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(student))
}

// Unlike courses, a missing student wins over a malformed body.
pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    RequestBody(req): RequestBody<StudentRequest>,
) -> Result<Json<Student>, AppError> {
    let mut student = repository::find_student(&state.db, student_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let (roll_number, first_name) = required_fields(&req)?;
    student.roll_number = roll_number;
    student.first_name = first_name;
    if let Some(last_name) = req.last_name.filter(|l| !l.is_empty()) {
        student.last_name = Some(last_name);
    }

    repository::update_student(&state.db, &student).await?;
    Ok(Json(student))
}

pub async fn create_student(
    State(state): State<AppState>,
    RequestBody(req): RequestBody<StudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let (roll_number, first_name) = required_fields(&req)?;

    if repository::find_student_by_roll(&state.db, &roll_number).await?.is_some() {
        return Err(AppError::Conflict);
    }

    let student = repository::insert_student(
        &state.db,
        NewStudent {
            roll_number,
            first_name,
            last_name: req.last_name,
        },
    )
    .await?;
    info!("Created student {} ({})", student.student_id, student.roll_number);

    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.roster().delete_student(student_id).await?;
    Ok(StatusCode::OK)
}

fn required_fields(req: &StudentRequest) -> Result<(String, String), AppError> {
    let roll_number = req
        .roll_number
        .clone()
        .ok_or(AppError::Invalid(ErrorCode::RollNumberRequired))?;
    let first_name = req
        .first_name
        .clone()
        .ok_or(AppError::Invalid(ErrorCode::FirstNameRequired))?;
    Ok((roll_number, first_name))
}
