use maud::{DOCTYPE, Markup, html};

use crate::models::{Course, Student};
use crate::services::SlotChoice;

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                h1 { (title) }
                (body)
            }
        }
    }
}

fn full_name(student: &Student) -> String {
    match student.last_name.as_deref() {
        Some(last) if !last.is_empty() => format!("{} {}", student.first_name, last),
        _ => student.first_name.clone(),
    }
}

pub fn index(students: &[Student]) -> Markup {
    layout("Students", html! {
        @if students.is_empty() {
            p { "No students found." }
        } @else {
            table {
                thead { tr {
                    th { "#" }
                    th { "Roll Number" }
                    th { "Name" }
                    th { "Actions" }
                } }
                tbody {
                    @for (n, student) in students.iter().enumerate() {
                        tr {
                            td { (n + 1) }
                            td { a href={ "/student/" (student.student_id) } { (student.roll_number) } }
                            td { (full_name(student)) }
                            td {
                                a href={ "/student/" (student.student_id) "/update" } { "Update" }
                                " "
                                a href={ "/student/" (student.student_id) "/delete" } { "Delete" }
                            }
                        }
                    }
                }
            }
        }
        p { a href="/student/create" { "Add Student" } }
    })
}

fn slot_boxes(choices: &[SlotChoice]) -> Markup {
    html! {
        fieldset {
            legend { "Courses" }
            @if choices.is_empty() {
                p { "No courses available." }
            }
            @for choice in choices {
                label {
                    input type="checkbox" name="courses" value=(choice.slot.key) checked[choice.selected];
                    " " (choice.course.course_name)
                }
                br;
            }
        }
    }
}

fn error_line(error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            p class="error" { (message) }
        }
    }
}

pub fn create(choices: &[SlotChoice], error: Option<&str>) -> Markup {
    layout("Add Student", html! {
        (error_line(error))
        form method="POST" action="/student/create" {
            label { "Roll Number " input type="text" name="roll" required; }
            br;
            label { "First Name " input type="text" name="f_name" required; }
            br;
            label { "Last Name " input type="text" name="l_name"; }
            br;
            (slot_boxes(choices))
            button type="submit" { "Submit" }
        }
    })
}

pub fn student_exists(roll_number: &str) -> Markup {
    layout("Already Exists", html! {
        p { "A student with roll number " strong { (roll_number) } " already exists." }
        p { a href="/" { "Go back" } }
    })
}

pub fn update(student: &Student, choices: &[SlotChoice], error: Option<&str>) -> Markup {
    layout("Update Student", html! {
        (error_line(error))
        form method="POST" action={ "/student/" (student.student_id) "/update" } {
            label {
                "Roll Number "
                input type="text" name="roll" value=(student.roll_number) disabled;
            }
            br;
            label {
                "First Name "
                input type="text" name="f_name" value=(student.first_name) required;
            }
            br;
            label {
                "Last Name "
                input type="text" name="l_name" value=(student.last_name.as_deref().unwrap_or_default());
            }
            br;
            (slot_boxes(choices))
            button type="submit" { "Submit" }
        }
    })
}

pub fn display(student: &Student, courses: &[Course]) -> Markup {
    layout("Student Details", html! {
        table {
            tr { th { "Roll Number" } td { (student.roll_number) } }
            tr { th { "First Name" } td { (student.first_name) } }
            tr { th { "Last Name" } td { (student.last_name.as_deref().unwrap_or_default()) } }
        }
        h2 { "Enrolled Courses" }
        @if courses.is_empty() {
            p { "Not enrolled in any course." }
        } @else {
            table {
                thead { tr {
                    th { "#" }
                    th { "Course Code" }
                    th { "Course Name" }
                    th { "Description" }
                } }
                tbody {
                    @for (n, course) in courses.iter().enumerate() {
                        tr {
                            td { (n + 1) }
                            td { (course.course_code) }
                            td { (course.course_name) }
                            td { (course.course_description.as_deref().unwrap_or_default()) }
                        }
                    }
                }
            }
        }
        p { a href="/" { "Go back" } }
    })
}
