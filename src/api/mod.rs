pub mod body;
pub mod course;
pub mod enrollment;
pub mod student;

use axum::Router;
use axum::routing::{delete, get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/course", get(course::list_courses).post(course::create_course))
        .route(
            "/course/{course_id}",
            get(course::get_course)
                .put(course::update_course)
                .delete(course::delete_course),
        )
        .route("/student", get(student::list_students).post(student::create_student))
        .route(
            "/student/{student_id}",
            get(student::get_student)
                .put(student::update_student)
                .delete(student::delete_student),
        )
        .route(
            "/student/{student_id}/course",
            get(enrollment::list_enrollments).post(enrollment::create_enrollment),
        )
        .route(
            "/student/{student_id}/course/{course_id}",
            delete(enrollment::delete_enrollment),
        )
}
