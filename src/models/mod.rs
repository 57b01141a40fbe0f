pub mod course;
pub mod enrollment;
pub mod lenient;
pub mod student;

pub use course::{Course, CourseRequest, NewCourse};
pub use enrollment::{Enrollment, EnrollmentRequest};
pub use student::{NewStudent, Student, StudentRequest};
