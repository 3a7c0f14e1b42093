use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Course metadata as served by the Course Directory. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub start_date: NaiveDate,
    pub number_of_students: i32,
}
