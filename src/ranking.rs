//! Ordering of pending applications for lecturer review, by historical
//! TA rating.

use serde::{Deserialize, Serialize};

use crate::domain::Application;

/// Rating from which a past TA counts as sufficiently experienced.
pub const SUFFICIENT_RATING: f64 = 5.75;
/// Sentinel for "no rating on record".
pub const NO_RATING: f64 = -1.0;

/// A pending application augmented with the applicant's historical rating
/// ([`NO_RATING`] when none is on record).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedApplication {
    #[serde(flatten)]
    pub application: Application,
    pub rating: f64,
}

/// Reformulate a historical rating into an ascending sort key:
/// sufficient ratings map to their negation (best first), the no-rating
/// sentinel stays at -1 (after every sufficient key, before every
/// insufficient one), insufficient ratings map to their distance from the
/// threshold (closest first).
pub fn sort_key(rating: f64) -> f64 {
    if rating >= SUFFICIENT_RATING {
        -rating
    } else if rating == NO_RATING {
        NO_RATING
    } else {
        SUFFICIENT_RATING - rating
    }
}

/// Total order for the review queue. Equal keys keep their relative order.
pub fn rank(mut entries: Vec<RankedApplication>) -> Vec<RankedApplication> {
    entries.sort_by(|a, b| sort_key(a.rating).total_cmp(&sort_key(b.rating)));
    entries
}
