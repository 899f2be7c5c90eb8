// crates/registrar-core/src/record.rs

use serde::{Deserialize, Serialize};

/// A registered student.
///
/// Every field defaults to the empty string when missing from an incoming
/// payload, so an absent `id` is rejected by the registry rather than by
/// the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    /// Civil-registry style identifier. Unique across the student catalog.
    #[serde(default)]
    pub id: String,
    /// Given names (e.g., "Carlos").
    #[serde(default)]
    pub given_names: String,
    /// Surnames (e.g., "Montellano").
    #[serde(default)]
    pub surnames: String,
    /// Degree program or major.
    #[serde(default)]
    pub program: String,
}

/// A registered course.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    /// Course code (e.g., "INF101"). Unique across the course catalog.
    #[serde(default)]
    pub code: String,
    /// Display name of the course.
    #[serde(default)]
    pub name: String,
    /// Instructor teaching the course.
    #[serde(default)]
    pub instructor: String,
}

impl Student {
    /// Full display name: given names followed by surnames.
    pub fn full_name(&self) -> String {
        match (self.given_names.is_empty(), self.surnames.is_empty()) {
            (false, false) => format!("{} {}", self.given_names, self.surnames),
            (false, true) => self.given_names.clone(),
            _ => self.surnames.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let student: Student = serde_json::from_str(r#"{"given_names":"Ana"}"#).unwrap();
        assert_eq!(student.id, "");
        assert_eq!(student.given_names, "Ana");
        assert_eq!(student.program, "");

        let course: Course = serde_json::from_str("{}").unwrap();
        assert_eq!(course, Course::default());
    }

    #[test]
    fn test_full_name() {
        let mut student = Student {
            id: "1".to_string(),
            given_names: "Carlos".to_string(),
            surnames: "Montellano".to_string(),
            program: "Sistemas".to_string(),
        };
        assert_eq!(student.full_name(), "Carlos Montellano");

        student.surnames.clear();
        assert_eq!(student.full_name(), "Carlos");
    }
}
