// crates/registrar-cli/src/output.rs
//
// Output formatting utilities for the Registrar CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

use registrar_core::{Course, Student};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Table row for a student.
#[derive(Debug, Tabled)]
pub struct StudentRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Program")]
    pub program: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            name: student.full_name(),
            program: student.program.clone(),
        }
    }
}

/// Table row for a course.
#[derive(Debug, Tabled)]
pub struct CourseRow {
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Instructor")]
    pub instructor: String,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            instructor: course.instructor.clone(),
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Render students in the requested format.
pub fn render_students(students: &[Student], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(&students),
        OutputFormat::Table if students.is_empty() => "No students found.".to_string(),
        OutputFormat::Table => {
            let rows: Vec<StudentRow> = students.iter().map(StudentRow::from).collect();
            format_table(&rows)
        }
    }
}

/// Render courses in the requested format.
pub fn render_courses(courses: &[Course], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(&courses),
        OutputFormat::Table if courses.is_empty() => "No courses found.".to_string(),
        OutputFormat::Table => {
            let rows: Vec<CourseRow> = courses.iter().map(CourseRow::from).collect();
            format_table(&rows)
        }
    }
}
