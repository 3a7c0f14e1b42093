use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A TA's claim of worked time against a contract, pending lecturer
/// review. References the contract by its (net_id, course_id) key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourDeclaration {
    pub id: Uuid,
    pub net_id: String,
    pub course_id: String,
    /// Worked time in minutes.
    pub worked_time: i32,
    pub date: NaiveDate,
    pub description: String,
    pub approved: bool,
    pub reviewed: bool,
}

impl HourDeclaration {
    pub fn new(
        net_id: impl Into<String>,
        course_id: impl Into<String>,
        worked_time: i32,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            net_id: net_id.into(),
            course_id: course_id.into(),
            worked_time,
            date,
            description: description.into(),
            approved: false,
            reviewed: false,
        }
    }
}
