pub mod application_service;
pub mod contract_service;

pub use application_service::{ApplicationError, ApplicationService};
pub use contract_service::{ContractError, ContractService};
