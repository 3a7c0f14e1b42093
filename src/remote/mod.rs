pub mod client;
pub mod contract_directory;
pub mod course_directory;

pub use client::{RemoteCallClient, RemoteError};
pub use contract_directory::{ContractDirectory, HttpContractDirectory, NewContract};
pub use course_directory::{CourseDirectory, HttpCourseDirectory};
