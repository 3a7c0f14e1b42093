use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest grade a course records.
pub const MIN_GRADE: f64 = 1.0;
/// Highest grade a course records.
pub const MAX_GRADE: f64 = 10.0;
/// Grade from which an applicant meets the TA requirements.
pub const SUFFICIENT_GRADE: f64 = 6.0;

/// A person holds at most this many PENDING applications across all courses.
pub const MAX_PENDING_APPLICATIONS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("unknown application status: {other}")),
        }
    }
}

/// A student's application to TA a course. Keyed by (course_id, net_id):
/// one application per person per course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub course_id: String,
    pub net_id: String,
    pub grade: f64,
    pub motivation: String,
    pub contact_email: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// A fresh application always starts out PENDING.
    pub fn new(
        course_id: impl Into<String>,
        net_id: impl Into<String>,
        grade: f64,
        motivation: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            net_id: net_id.into(),
            grade,
            motivation: motivation.into(),
            contact_email: contact_email.into(),
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    pub fn meets_requirements(&self) -> bool {
        meets_requirements(self.grade)
    }
}

/// Grade lies inside the recordable range.
pub fn has_valid_grade(grade: f64) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&grade)
}

/// Grade is high enough to TA the course.
pub fn meets_requirements(grade: f64) -> bool {
    grade >= SUFFICIENT_GRADE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_range_boundaries() {
        assert!(has_valid_grade(1.0));
        assert!(has_valid_grade(10.0));
        assert!(has_valid_grade(6.0));
        assert!(!has_valid_grade(0.99));
        assert!(!has_valid_grade(10.01));
    }

    #[test]
    fn requirement_boundary_is_six() {
        assert!(meets_requirements(6.0));
        assert!(meets_requirements(10.0));
        assert!(!meets_requirements(5.99));
    }

    #[test]
    fn new_applications_are_pending() {
        let app = Application::new("CSE1300", "jsmith", 7.0, "motivated", "j@tud.nl");
        assert!(app.is_pending());
        assert!(app.meets_requirements());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
        assert!("OPEN".parse::<ApplicationStatus>().is_err());
    }
}
