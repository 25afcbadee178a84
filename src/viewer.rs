use crate::attendance::{AttendanceSession, Student};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("userId must not be empty")]
    EmptyUserId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("student sign-in requires studentId")]
    MissingStudentId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherView {
    user_id: String,
    name: String,
}

impl TeacherView {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Starts attendance-taking for one class and date. Only teachers hold
    /// an attendance session.
    pub fn open_attendance(
        &self,
        class_id: &str,
        date: NaiveDate,
        roster: Vec<Student>,
    ) -> AttendanceSession {
        tracing::info!(
            teacher = %self.user_id,
            class_id,
            %date,
            roster = roster.len(),
            "attendance session opened"
        );
        AttendanceSession::new(class_id, date, roster)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentView {
    user_id: String,
    name: String,
    student_id: String,
}

impl StudentView {
    pub fn student_id(&self) -> &str {
        &self.student_id
    }
}

/// The signed-in identity. Created by sign-in and dropped by sign-out; each
/// variant only exposes what its role may do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Teacher(TeacherView),
    Student(StudentView),
}

impl Viewer {
    pub fn sign_in(
        user_id: &str,
        name: &str,
        role: Role,
        student_id: Option<&str>,
    ) -> Result<Viewer, ViewerError> {
        let user_id = user_id.trim();
        let name = name.trim();
        if user_id.is_empty() {
            return Err(ViewerError::EmptyUserId);
        }
        if name.is_empty() {
            return Err(ViewerError::EmptyName);
        }
        match role {
            Role::Teacher => Ok(Viewer::Teacher(TeacherView {
                user_id: user_id.to_string(),
                name: name.to_string(),
            })),
            Role::Student => {
                let student_id = student_id
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or(ViewerError::MissingStudentId)?;
                Ok(Viewer::Student(StudentView {
                    user_id: user_id.to_string(),
                    name: name.to_string(),
                    student_id: student_id.to_string(),
                }))
            }
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Viewer::Teacher(_) => Role::Teacher,
            Viewer::Student(_) => Role::Student,
        }
    }

    pub fn as_teacher(&self) -> Option<&TeacherView> {
        match self {
            Viewer::Teacher(t) => Some(t),
            Viewer::Student(_) => None,
        }
    }

    /// Teachers may read anyone's history, students only their own.
    pub fn can_view_history(&self, student_id: &str) -> bool {
        match self {
            Viewer::Teacher(_) => true,
            Viewer::Student(s) => s.student_id == student_id,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Viewer::Teacher(t) => json!({
                "userId": t.user_id,
                "name": t.name,
                "role": Role::Teacher,
            }),
            Viewer::Student(s) => json!({
                "userId": s.user_id,
                "name": s.name,
                "role": Role::Student,
                "studentId": s.student_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_sign_in_needs_a_student_id() {
        assert_eq!(
            Viewer::sign_in("s1", "Alice Smith", Role::Student, None),
            Err(ViewerError::MissingStudentId)
        );
        assert_eq!(
            Viewer::sign_in("s1", "Alice Smith", Role::Student, Some("  ")),
            Err(ViewerError::MissingStudentId)
        );
        assert_eq!(
            Viewer::sign_in(" ", "x", Role::Teacher, None),
            Err(ViewerError::EmptyUserId)
        );
    }

    #[test]
    fn capabilities_follow_role() {
        let teacher = Viewer::sign_in("t1", "John Doe", Role::Teacher, None).expect("teacher");
        let student =
            Viewer::sign_in("s1", "Alice Smith", Role::Student, Some("stu-1")).expect("student");

        assert!(teacher.as_teacher().is_some());
        assert!(student.as_teacher().is_none());
        assert!(teacher.can_view_history("stu-2"));
        assert!(student.can_view_history("stu-1"));
        assert!(!student.can_view_history("stu-2"));
        assert_eq!(student.to_json()["studentId"], "stu-1");
        assert_eq!(teacher.to_json()["role"], "teacher");
    }
}
