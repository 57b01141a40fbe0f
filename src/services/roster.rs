use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::CourseSlot;
use crate::db::repository;
use crate::error::{AppError, ErrorCode};
use crate::models::{Course, NewStudent, Student};

/// Multi-row student and course mutations shared by the pages and the API.
///
/// Each operation runs in one transaction and commits once; returning early
/// with an error drops the transaction and rolls everything back.
pub struct RosterService {
    db: SqlitePool,
    slots: Arc<[CourseSlot]>,
}

#[derive(Debug)]
pub enum CreateOutcome {
    Created(Student),
    AlreadyExists,
}

#[derive(Debug, Default, PartialEq)]
pub struct ReconcileStats {
    pub enrolled: usize,
    pub dropped: usize,
    pub skipped: usize,
}

/// A configured slot paired with the course it points at.
#[derive(Debug, Clone)]
pub struct SlotChoice {
    pub slot: CourseSlot,
    pub course: Course,
    pub selected: bool,
}

impl RosterService {
    pub fn new(db: SqlitePool, slots: Arc<[CourseSlot]>) -> Self {
        Self { db, slots }
    }

    /// Slots whose course exists, marked with the given student's enrollments.
    pub async fn slot_choices(&self, student_id: Option<i64>) -> Result<Vec<SlotChoice>, AppError> {
        let enrolled = match student_id {
            Some(id) => repository::fetch_enrollments_for_student(&self.db, id).await?,
            None => Vec::new(),
        };

        let mut choices = Vec::with_capacity(self.slots.len());
        for slot in self.slots.iter() {
            let Some(course) = repository::find_course(&self.db, slot.course_id).await? else {
                continue;
            };
            let selected = enrolled.iter().any(|e| e.course_id == slot.course_id);
            choices.push(SlotChoice {
                slot: slot.clone(),
                course,
                selected,
            });
        }
        Ok(choices)
    }

    pub async fn create_student(
        &self,
        new: NewStudent,
        selected: &[String],
    ) -> Result<CreateOutcome, AppError> {
        if new.roll_number.trim().is_empty() {
            return Err(AppError::Invalid(ErrorCode::RollNumberRequired));
        }
        if new.first_name.trim().is_empty() {
            return Err(AppError::Invalid(ErrorCode::FirstNameRequired));
        }

        let mut tx = self.db.begin().await?;

        if repository::find_student_by_roll(&mut *tx, &new.roll_number).await?.is_some() {
            return Ok(CreateOutcome::AlreadyExists);
        }

        let student = repository::insert_student(&mut *tx, new).await?;
        let mut enrolled = 0;
        for slot in self.selected_slots(selected) {
            if repository::find_course(&mut *tx, slot.course_id).await?.is_none() {
                warn!("Skipping slot {} (course {} missing)", slot.key, slot.course_id);
                continue;
            }
            repository::insert_enrollment(&mut *tx, student.student_id, slot.course_id).await?;
            enrolled += 1;
        }

        tx.commit().await?;
        info!(
            "Created student {} ({}) with {} enrollments",
            student.student_id, student.roll_number, enrolled
        );
        Ok(CreateOutcome::Created(student))
    }

    /// Overwrites the names, then brings every configured slot in line with
    /// `selected`: at most one enrollment is added or removed per slot.
    pub async fn update_student(
        &self,
        student_id: i64,
        first_name: String,
        last_name: Option<String>,
        selected: &[String],
    ) -> Result<ReconcileStats, AppError> {
        if first_name.trim().is_empty() {
            return Err(AppError::Invalid(ErrorCode::FirstNameRequired));
        }

        let mut tx = self.db.begin().await?;

        let mut student = repository::find_student(&mut *tx, student_id)
            .await?
            .ok_or(AppError::NotFound)?;
        student.first_name = first_name;
        student.last_name = last_name.filter(|l| !l.is_empty());
        repository::update_student(&mut *tx, &student).await?;

        let mut stats = ReconcileStats::default();
        for slot in self.slots.iter() {
            let wanted = selected.iter().any(|key| key == &slot.key);
            let existing = repository::find_enrollment(&mut *tx, student_id, slot.course_id).await?;

            match (wanted, existing) {
                (true, None) => {
                    if repository::find_course(&mut *tx, slot.course_id).await?.is_none() {
                        warn!("Skipping slot {} (course {} missing)", slot.key, slot.course_id);
                        stats.skipped += 1;
                        continue;
                    }
                    repository::insert_enrollment(&mut *tx, student_id, slot.course_id).await?;
                    stats.enrolled += 1;
                }
                (false, Some(enrollment)) => {
                    repository::delete_enrollment(&mut *tx, enrollment.enrollment_id).await?;
                    stats.dropped += 1;
                }
                _ => {}
            }
        }

        tx.commit().await?;
        info!("Updated student {}: {:?}", student_id, stats);
        Ok(stats)
    }

    pub async fn delete_student(&self, student_id: i64) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        if repository::find_student(&mut *tx, student_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let removed = repository::delete_enrollments_for_student(&mut *tx, student_id).await?;
        repository::delete_student(&mut *tx, student_id).await?;

        tx.commit().await?;
        info!("Deleted student {} and {} enrollments", student_id, removed);
        Ok(())
    }

    pub async fn delete_course(&self, course_id: i64) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        if repository::find_course(&mut *tx, course_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let removed = repository::delete_enrollments_for_course(&mut *tx, course_id).await?;
        repository::delete_course(&mut *tx, course_id).await?;

        tx.commit().await?;
        info!("Deleted course {} and {} enrollments", course_id, removed);
        Ok(())
    }

    pub async fn student_profile(&self, student_id: i64) -> Result<(Student, Vec<Course>), AppError> {
        let student = repository::find_student(&self.db, student_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let courses = repository::fetch_courses_for_student(&self.db, student_id).await?;
        Ok((student, courses))
    }

    fn selected_slots<'a>(&'a self, selected: &'a [String]) -> impl Iterator<Item = &'a CourseSlot> + 'a {
        self.slots
            .iter()
            .filter(move |slot| selected.iter().any(|key| key == &slot.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_course_slots;
    use crate::models::NewCourse;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> (SqlitePool, RosterService) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create database");
        crate::db::migrate(&pool).await.expect("Failed to migrate");

        for (code, name) in [("C1", "Physics"), ("C2", "Chemistry"), ("C3", "Biology")] {
            repository::insert_course(
                &pool,
                NewCourse {
                    course_name: name.to_string(),
                    course_code: code.to_string(),
                    course_description: None,
                },
            )
            .await
            .unwrap();
        }

        let service = RosterService::new(pool.clone(), default_course_slots().into());
        (pool, service)
    }

    fn new_student(roll: &str) -> NewStudent {
        NewStudent {
            roll_number: roll.to_string(),
            first_name: "Ann".to_string(),
            last_name: None,
        }
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[tokio::test]
    async fn create_enrolls_selected_existing_slots_only() {
        let (pool, service) = setup().await;

        // course_4 points at a course that was never created
        let outcome = service
            .create_student(new_student("R1"), &keys(&["course_1", "course_3", "course_4"]))
            .await
            .unwrap();
        let CreateOutcome::Created(student) = outcome else {
            panic!("expected a new student");
        };

        let enrollments = repository::fetch_enrollments_for_student(&pool, student.student_id)
            .await
            .unwrap();
        let course_ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();
        assert_eq!(course_ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn create_with_taken_roll_number_changes_nothing() {
        let (pool, service) = setup().await;
        service.create_student(new_student("R1"), &[]).await.unwrap();

        let outcome = service
            .create_student(new_student("R1"), &keys(&["course_1"]))
            .await
            .unwrap();
        assert!(matches!(outcome, CreateOutcome::AlreadyExists));
        assert_eq!(repository::fetch_students(&pool).await.unwrap().len(), 1);
        assert!(repository::fetch_enrollments_for_course(&pool, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_blank_required_fields() {
        let (_pool, service) = setup().await;
        let err = service.create_student(new_student("  "), &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Invalid(ErrorCode::RollNumberRequired)));

        let mut nameless = new_student("R2");
        nameless.first_name.clear();
        let err = service.create_student(nameless, &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Invalid(ErrorCode::FirstNameRequired)));
    }

    #[tokio::test]
    async fn update_reconciles_each_slot_once() {
        let (pool, service) = setup().await;
        let CreateOutcome::Created(student) = service
            .create_student(new_student("R1"), &keys(&["course_1", "course_2"]))
            .await
            .unwrap()
        else {
            panic!("expected a new student");
        };
        // a duplicate row for course_2: only one of them is dropped
        repository::insert_enrollment(&pool, student.student_id, 2).await.unwrap();

        let stats = service
            .update_student(
                student.student_id,
                "Anna".to_string(),
                Some("Lee".to_string()),
                &keys(&["course_1", "course_3"]),
            )
            .await
            .unwrap();
        assert_eq!(
            stats,
            ReconcileStats {
                enrolled: 1,
                dropped: 1,
                skipped: 0
            }
        );

        let course_ids: Vec<i64> = repository::fetch_enrollments_for_student(&pool, student.student_id)
            .await
            .unwrap()
            .iter()
            .map(|e| e.course_id)
            .collect();
        assert_eq!(course_ids, vec![1, 2, 3]);

        let updated = repository::find_student(&pool, student.student_id).await.unwrap().unwrap();
        assert_eq!(updated.first_name, "Anna");
        assert_eq!(updated.last_name.as_deref(), Some("Lee"));
    }

    #[tokio::test]
    async fn update_missing_student_is_not_found() {
        let (_pool, service) = setup().await;
        let err = service
            .update_student(42, "Ann".to_string(), None, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn delete_student_removes_enrollments() {
        let (pool, service) = setup().await;
        let CreateOutcome::Created(student) = service
            .create_student(new_student("R1"), &keys(&["course_1", "course_2"]))
            .await
            .unwrap()
        else {
            panic!("expected a new student");
        };

        service.delete_student(student.student_id).await.unwrap();
        assert!(repository::find_student(&pool, student.student_id).await.unwrap().is_none());
        assert!(
            repository::fetch_enrollments_for_student(&pool, student.student_id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            service.delete_student(student.student_id).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_course_removes_enrollments() {
        let (pool, service) = setup().await;
        service
            .create_student(new_student("R1"), &keys(&["course_1", "course_2"]))
            .await
            .unwrap();

        service.delete_course(1).await.unwrap();
        assert!(repository::find_course(&pool, 1).await.unwrap().is_none());
        assert!(repository::fetch_enrollments_for_course(&pool, 1).await.unwrap().is_empty());
        assert_eq!(repository::fetch_enrollments_for_course(&pool, 2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn slot_choices_skip_missing_courses_and_mark_enrollments() {
        let (_pool, service) = setup().await;
        let CreateOutcome::Created(student) = service
            .create_student(new_student("R1"), &keys(&["course_2"]))
            .await
            .unwrap()
        else {
            panic!("expected a new student");
        };

        let choices = service.slot_choices(Some(student.student_id)).await.unwrap();
        let summary: Vec<(&str, bool)> = choices
            .iter()
            .map(|c| (c.slot.key.as_str(), c.selected))
            .collect();
        assert_eq!(
            summary,
            vec![("course_1", false), ("course_2", true), ("course_3", false)]
        );
        assert_eq!(choices[1].course.course_name, "Chemistry");
    }
}
