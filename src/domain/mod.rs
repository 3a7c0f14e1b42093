pub mod application;
pub mod contract;
pub mod course;
pub mod hour_declaration;

pub use application::{Application, ApplicationStatus};
pub use contract::Contract;
pub use course::Course;
pub use hour_declaration::HourDeclaration;
