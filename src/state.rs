use std::sync::Arc;

use crate::auth::TokenService;
use crate::services::{ApplicationService, ContractService};

/// Capabilities shared across request handlers. Everything is constructed
/// explicitly at startup (or by a test harness) and injected here; there
/// is no global mutable state.
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub applications: Arc<ApplicationService>,
    pub contracts: Arc<ContractService>,
}
