use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::CourseSlot;
use crate::services::RosterService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub course_slots: Arc<[CourseSlot]>,
}

impl AppState {
    pub fn new(db: SqlitePool, course_slots: Vec<CourseSlot>) -> Self {
        Self {
            db,
            course_slots: course_slots.into(),
        }
    }

    pub fn roster(&self) -> RosterService {
        RosterService::new(self.db.clone(), self.course_slots.clone())
    }
}
