use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Application, ApplicationStatus, Contract, HourDeclaration};

pub mod postgres;

pub use postgres::{PgApplicationRepository, PgContractRepository, PgHourDeclarationRepository};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Backend(err.to_string())
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Persistence seam for applications. The check-then-act sequences of the
/// lifecycle service are expressed as conditional writes here, so two
/// concurrent calls resolve to exactly one winner at the store.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find(&self, course_id: &str, net_id: &str) -> RepoResult<Option<Application>>;

    /// Insert a new application. Returns false when the (course_id, net_id)
    /// key is already taken.
    async fn insert_new(&self, application: &Application) -> RepoResult<bool>;

    /// Number of PENDING applications this person holds across all courses.
    async fn count_pending_for(&self, net_id: &str) -> RepoResult<i64>;

    async fn find_pending_by_course(&self, course_id: &str) -> RepoResult<Vec<Application>>;

    /// Move a PENDING application to `to`. Returns false when the row is
    /// absent or no longer PENDING.
    async fn transition_from_pending(
        &self,
        course_id: &str,
        net_id: &str,
        to: ApplicationStatus,
    ) -> RepoResult<bool>;

    /// Delete only while PENDING. Returns false when absent or decided.
    async fn delete_pending(&self, course_id: &str, net_id: &str) -> RepoResult<bool>;
}

#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn find(&self, net_id: &str, course_id: &str) -> RepoResult<Option<Contract>>;

    /// Insert a new contract. Returns false when the (net_id, course_id)
    /// key is already taken.
    async fn insert_new(&self, contract: &Contract) -> RepoResult<bool>;

    /// Returns false when no such contract exists.
    async fn set_rating(&self, net_id: &str, course_id: &str, rating: f64) -> RepoResult<bool>;

    /// Returns false when no such contract exists.
    async fn set_actual_worked_hours(
        &self,
        net_id: &str,
        course_id: &str,
        hours: i32,
    ) -> RepoResult<bool>;

    /// Mean rating per net_id over contracts with signed = true and
    /// rating > 0. Net IDs with no qualifying contract are absent from the
    /// result, not reported as zero.
    async fn average_ratings(&self, net_ids: &[String]) -> RepoResult<HashMap<String, f64>>;
}

#[async_trait]
pub trait HourDeclarationRepository: Send + Sync {
    async fn insert(&self, declaration: &HourDeclaration) -> RepoResult<()>;

    async fn find(&self, id: Uuid) -> RepoResult<Option<HourDeclaration>>;

    /// Record the lecturer's verdict on an unreviewed declaration. Returns
    /// false when the declaration was already reviewed.
    async fn mark_reviewed(&self, id: Uuid, approved: bool) -> RepoResult<bool>;

    async fn find_pending_by_course(&self, course_id: &str) -> RepoResult<Vec<HourDeclaration>>;
}
