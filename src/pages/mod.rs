//! Server-rendered student pages. The forms post `roll`, `f_name`, `l_name`
//! and one `courses` entry per ticked course slot.

pub mod views;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum_extra::extract::Form;
use maud::Markup;
use serde::Deserialize;

use crate::db::repository;
use crate::error::AppError;
use crate::models::NewStudent;
use crate::services::CreateOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStudentForm {
    #[serde(default)]
    pub roll: String,
    #[serde(default)]
    pub f_name: String,
    #[serde(default)]
    pub l_name: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentForm {
    #[serde(default)]
    pub f_name: String,
    #[serde(default)]
    pub l_name: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/student/create", get(create_form).post(create_student))
        .route("/student/{student_id}", get(display_student))
        .route("/student/{student_id}/update", get(update_form).post(update_student))
        .route("/student/{student_id}/delete", get(delete_student))
}

fn render(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let students = repository::fetch_students(&state.db).await?;
    Ok(render(views::index(&students)))
}

async fn create_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let choices = state.roster().slot_choices(None).await?;
    Ok(render(views::create(&choices, None)))
}

async fn create_student(
    State(state): State<AppState>,
    Form(form): Form<CreateStudentForm>,
) -> Result<Response, AppError> {
    let roster = state.roster();
    let roll = form.roll;
    // stored as typed; only blank values are rejected
    let new = NewStudent {
        roll_number: roll.clone(),
        first_name: form.f_name,
        last_name: optional(form.l_name),
    };

    match roster.create_student(new, &form.courses).await {
        Ok(CreateOutcome::Created(_)) => Ok(Redirect::to("/").into_response()),
        Ok(CreateOutcome::AlreadyExists) => Ok(render(views::student_exists(&roll)).into_response()),
        Err(AppError::Invalid(code)) => {
            let choices = roster.slot_choices(None).await?;
            let page = render(views::create(&choices, Some(code.message())));
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e),
    }
}

async fn update_form(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let student = repository::find_student(&state.db, student_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let choices = state.roster().slot_choices(Some(student_id)).await?;
    Ok(render(views::update(&student, &choices, None)))
}

async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Form(form): Form<UpdateStudentForm>,
) -> Result<Response, AppError> {
    let roster = state.roster();
    match roster
        .update_student(student_id, form.f_name, optional(form.l_name), &form.courses)
        .await
    {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Invalid(code)) => {
            let student = repository::find_student(&state.db, student_id)
                .await?
                .ok_or(AppError::NotFound)?;
            let choices = roster.slot_choices(Some(student_id)).await?;
            let page = render(views::update(&student, &choices, Some(code.message())));
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e),
    }
}

async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.roster().delete_student(student_id).await?;
    Ok(Redirect::to("/"))
}

async fn display_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let (student, courses) = state.roster().student_profile(student_id).await?;
    Ok(render(views::display(&student, &courses)))
}
