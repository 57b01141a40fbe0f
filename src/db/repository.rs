use sqlx::{Executor, Sqlite};

use crate::models::{Course, Enrollment, NewCourse, NewStudent, Student};

// Every function runs a single statement against whatever executor it is
// handed: `&SqlitePool` for one-shot reads, `&mut *tx` inside a transaction.

pub async fn fetch_courses<'e, E>(db: E) -> Result<Vec<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(
        "SELECT course_id, course_name, course_code, course_description FROM course ORDER BY course_id"
    )
    .fetch_all(db)
    .await
}

pub async fn find_course<'e, E>(db: E, course_id: i64) -> Result<Option<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(
        "SELECT course_id, course_name, course_code, course_description FROM course WHERE course_id = ?"
    )
    .bind(course_id)
    .fetch_optional(db)
    .await
}

pub async fn find_course_by_code<'e, E>(db: E, course_code: &str) -> Result<Option<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(
        "SELECT course_id, course_name, course_code, course_description FROM course WHERE course_code = ?"
    )
    .bind(course_code)
    .fetch_optional(db)
    .await
}

pub async fn insert_course<'e, E>(db: E, new: NewCourse) -> Result<Course, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO course (course_name, course_code, course_description) VALUES (?1, ?2, ?3)"
    )
    .bind(&new.course_name)
    .bind(&new.course_code)
    .bind(&new.course_description)
    .execute(db)
    .await?;

    Ok(Course {
        course_id: result.last_insert_rowid(),
        course_name: new.course_name,
        course_code: new.course_code,
        course_description: new.course_description,
    })
}

pub async fn update_course<'e, E>(db: E, course: &Course) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE course
        SET course_name = ?1,
            course_code = ?2,
            course_description = ?3
        WHERE course_id = ?4
        "#,
    )
    .bind(&course.course_name)
    .bind(&course.course_code)
    .bind(&course.course_description)
    .bind(course.course_id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_course<'e, E>(db: E, course_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM course WHERE course_id = ?")
        .bind(course_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_students<'e, E>(db: E) -> Result<Vec<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Student>(
        "SELECT student_id, first_name, last_name, roll_number FROM student ORDER BY student_id"
    )
    .fetch_all(db)
    .await
}

pub async fn find_student<'e, E>(db: E, student_id: i64) -> Result<Option<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Student>(
        "SELECT student_id, first_name, last_name, roll_number FROM student WHERE student_id = ?"
    )
    .bind(student_id)
    .fetch_optional(db)
    .await
}

pub async fn find_student_by_roll<'e, E>(db: E, roll_number: &str) -> Result<Option<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Student>(
        "SELECT student_id, first_name, last_name, roll_number FROM student WHERE roll_number = ?"
    )
    .bind(roll_number)
    .fetch_optional(db)
    .await
}

pub async fn insert_student<'e, E>(db: E, new: NewStudent) -> Result<Student, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO student (roll_number, first_name, last_name) VALUES (?1, ?2, ?3)"
    )
    .bind(&new.roll_number)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .execute(db)
    .await?;

    Ok(Student {
        student_id: result.last_insert_rowid(),
        first_name: new.first_name,
        last_name: new.last_name,
        roll_number: new.roll_number,
    })
}

pub async fn update_student<'e, E>(db: E, student: &Student) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE student
        SET roll_number = ?1,
            first_name = ?2,
            last_name = ?3
        WHERE student_id = ?4
        "#,
    )
    .bind(&student.roll_number)
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(student.student_id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_student<'e, E>(db: E, student_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM student WHERE student_id = ?")
        .bind(student_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_enrollments_for_student<'e, E>(db: E, student_id: i64) -> Result<Vec<Enrollment>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Enrollment>(
        "SELECT enrollment_id, student_id, course_id FROM enrollment WHERE student_id = ? ORDER BY enrollment_id"
    )
    .bind(student_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_enrollments_for_course<'e, E>(db: E, course_id: i64) -> Result<Vec<Enrollment>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Enrollment>(
        "SELECT enrollment_id, student_id, course_id FROM enrollment WHERE course_id = ? ORDER BY enrollment_id"
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

/// First (lowest id) enrollment linking the pair, if any.
pub async fn find_enrollment<'e, E>(
    db: E,
    student_id: i64,
    course_id: i64,
) -> Result<Option<Enrollment>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Enrollment>(
        r#"
        SELECT enrollment_id, student_id, course_id
        FROM enrollment
        WHERE student_id = ?1 AND course_id = ?2
        ORDER BY enrollment_id
        LIMIT 1
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(db)
    .await
}

pub async fn insert_enrollment<'e, E>(db: E, student_id: i64, course_id: i64) -> Result<Enrollment, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO enrollment (student_id, course_id) VALUES (?1, ?2)")
        .bind(student_id)
        .bind(course_id)
        .execute(db)
        .await?;

    Ok(Enrollment {
        enrollment_id: result.last_insert_rowid(),
        student_id,
        course_id,
    })
}

pub async fn delete_enrollment<'e, E>(db: E, enrollment_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM enrollment WHERE enrollment_id = ?")
        .bind(enrollment_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn delete_enrollments_for_student<'e, E>(db: E, student_id: i64) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    Ok(sqlx::query("DELETE FROM enrollment WHERE student_id = ?")
        .bind(student_id)
        .execute(db)
        .await?
        .rows_affected())
}

pub async fn delete_enrollments_for_course<'e, E>(db: E, course_id: i64) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    Ok(sqlx::query("DELETE FROM enrollment WHERE course_id = ?")
        .bind(course_id)
        .execute(db)
        .await?
        .rows_affected())
}

/// Courses a student is enrolled in, one entry per enrollment row.
pub async fn fetch_courses_for_student<'e, E>(db: E, student_id: i64) -> Result<Vec<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(
        r#"
        SELECT c.course_id, c.course_name, c.course_code, c.course_description
        FROM enrollment e
        JOIN course c ON c.course_id = e.course_id
        WHERE e.student_id = ?
        ORDER BY e.enrollment_id
        "#,
    )
    .bind(student_id)
    .fetch_all(db)
    .await
}
