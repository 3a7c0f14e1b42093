use serde::{Deserialize, Serialize};

/// Ratings live on a [0, 10] scale; 0 means "unrated".
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// The agreement created when an application is accepted. Keyed by
/// (net_id, course_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub net_id: String,
    pub course_id: String,
    pub max_hours: i32,
    pub duties: String,
    pub signed: bool,
    pub rating: f64,
    pub actual_worked_hours: i32,
}

impl Contract {
    /// A newly formed contract: unsigned, unrated, no hours worked yet.
    pub fn new(
        net_id: impl Into<String>,
        course_id: impl Into<String>,
        max_hours: i32,
        duties: impl Into<String>,
    ) -> Self {
        Self {
            net_id: net_id.into(),
            course_id: course_id.into(),
            max_hours,
            duties: duties.into(),
            signed: false,
            rating: 0.0,
            actual_worked_hours: 0,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.rating > MIN_RATING
    }
}

pub fn is_valid_rating(rating: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contracts_are_unsigned_and_unrated() {
        let contract = Contract::new("jsmith", "CSE1300", 5, "grade homework");
        assert!(!contract.signed);
        assert!(!contract.is_rated());
        assert_eq!(contract.actual_worked_hours, 0);
    }

    #[test]
    fn rating_range_boundaries() {
        assert!(is_valid_rating(0.0));
        assert!(is_valid_rating(10.0));
        assert!(!is_valid_rating(-0.1));
        assert!(!is_valid_rating(10.1));
    }
}
