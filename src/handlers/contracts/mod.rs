pub mod create;
pub mod rating;
pub mod ratings;
pub mod show;
pub mod worked_hours;

pub use create::contract_post;
pub use rating::rating_put;
pub use ratings::ratings_get;
pub use show::contract_get;
pub use worked_hours::worked_hours_put;
