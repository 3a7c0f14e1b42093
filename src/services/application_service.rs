use std::sync::Arc;

use crate::domain::application::{self, Application, ApplicationStatus, MAX_PENDING_APPLICATIONS};
use crate::middleware::identity::AuthUser;
use crate::ranking::{self, RankedApplication, NO_RATING};
use crate::remote::{ContractDirectory, CourseDirectory, NewContract};
use crate::repository::{ApplicationRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("{0} already has the maximum number of pending applications")]
    QuotaExceeded(String),
    #[error("course {0} not found")]
    CourseNotFound(String),
    #[error("grade {0} is outside the valid range")]
    InvalidGrade(f64),
    #[error("an application for {course_id} by {net_id} already exists")]
    Duplicate { course_id: String, net_id: String },
    #[error("no application for {course_id} by {net_id}")]
    NotFound { course_id: String, net_id: String },
    #[error("application has been decided and can no longer be withdrawn")]
    NotAllowed,
    #[error("application is not pending")]
    NotPending,
    #[error("{net_id} is not a responsible lecturer for {course_id}")]
    NotLecturer { net_id: String, course_id: String },
    #[error("contract could not be created")]
    ContractRefused,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The application state machine: apply, withdraw, and the lecturer-side
/// accept/reject decisions. All collaborator lookups go through the
/// directory seams, so an unreachable directory degrades to "course not
/// found" / "not a lecturer" rather than failing the request.
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    course_directory: Arc<dyn CourseDirectory>,
    contract_directory: Arc<dyn ContractDirectory>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        course_directory: Arc<dyn CourseDirectory>,
        contract_directory: Arc<dyn ContractDirectory>,
    ) -> Self {
        Self {
            applications,
            course_directory,
            contract_directory,
        }
    }

    /// Submit a new application. Guards, in order: pending quota, course
    /// resolution, grade range. Insertion is conditional, so a racing
    /// duplicate apply resolves to one PENDING row.
    pub async fn apply(
        &self,
        caller: &AuthUser,
        course_id: &str,
        grade: f64,
        motivation: &str,
        contact_email: &str,
    ) -> Result<Application, ApplicationError> {
        let pending = self.applications.count_pending_for(&caller.net_id).await?;
        if pending >= MAX_PENDING_APPLICATIONS {
            return Err(ApplicationError::QuotaExceeded(caller.net_id.clone()));
        }

        let course = self
            .course_directory
            .get_course_by_id(Some(&caller.authorization), Some(course_id))
            .await;
        if course.is_none() {
            return Err(ApplicationError::CourseNotFound(course_id.to_string()));
        }

        if !application::has_valid_grade(grade) {
            return Err(ApplicationError::InvalidGrade(grade));
        }

        let application =
            Application::new(course_id, &caller.net_id, grade, motivation, contact_email);
        if !self.applications.insert_new(&application).await? {
            return Err(ApplicationError::Duplicate {
                course_id: course_id.to_string(),
                net_id: caller.net_id.clone(),
            });
        }

        tracing::info!(net_id = %caller.net_id, course_id, "application submitted");
        Ok(application)
    }

    /// Withdraw the caller's own application; only allowed while PENDING.
    pub async fn withdraw(&self, caller: &AuthUser, course_id: &str) -> Result<(), ApplicationError> {
        let existing = self
            .applications
            .find(course_id, &caller.net_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound {
                course_id: course_id.to_string(),
                net_id: caller.net_id.clone(),
            })?;

        if !existing.is_pending() {
            return Err(ApplicationError::NotAllowed);
        }

        // Conditional delete: losing a race against a concurrent decision
        // is the same outcome as finding the application decided.
        if !self
            .applications
            .delete_pending(course_id, &caller.net_id)
            .await?
        {
            return Err(ApplicationError::NotAllowed);
        }

        tracing::info!(net_id = %caller.net_id, course_id, "application withdrawn");
        Ok(())
    }

    /// Reject a pending application. Lecturer-only.
    pub async fn reject(
        &self,
        caller: &AuthUser,
        course_id: &str,
        net_id: &str,
    ) -> Result<(), ApplicationError> {
        self.ensure_lecturer(caller, course_id).await?;
        self.ensure_pending(course_id, net_id).await?;

        if !self
            .applications
            .transition_from_pending(course_id, net_id, ApplicationStatus::Rejected)
            .await?
        {
            return Err(ApplicationError::NotPending);
        }

        tracing::info!(net_id, course_id, decided_by = %caller.net_id, "application rejected");
        Ok(())
    }

    /// Accept a pending application and form the contract. The contract is
    /// created through the Contract Directory before the status changes, so
    /// a refused contract leaves the application PENDING.
    pub async fn accept(
        &self,
        caller: &AuthUser,
        course_id: &str,
        net_id: &str,
        duties: &str,
        max_hours: i32,
    ) -> Result<(), ApplicationError> {
        self.ensure_lecturer(caller, course_id).await?;
        self.ensure_pending(course_id, net_id).await?;

        let contract = NewContract {
            net_id: net_id.to_string(),
            course_id: course_id.to_string(),
            max_hours,
            duties: duties.to_string(),
        };
        if !self
            .contract_directory
            .create_contract(Some(&caller.authorization), &contract)
            .await
        {
            return Err(ApplicationError::ContractRefused);
        }

        if !self
            .applications
            .transition_from_pending(course_id, net_id, ApplicationStatus::Accepted)
            .await?
        {
            return Err(ApplicationError::NotPending);
        }

        tracing::info!(net_id, course_id, decided_by = %caller.net_id, "application accepted");
        Ok(())
    }

    /// The lecturer's review queue: pending applications augmented with
    /// historical ratings and ordered by the ranking function.
    pub async fn list_pending(
        &self,
        caller: &AuthUser,
        course_id: &str,
    ) -> Result<Vec<RankedApplication>, ApplicationError> {
        self.ensure_lecturer(caller, course_id).await?;

        let pending = self.applications.find_pending_by_course(course_id).await?;
        let net_ids: Vec<String> = pending.iter().map(|a| a.net_id.clone()).collect();
        let ratings = self
            .contract_directory
            .get_ta_ratings(Some(&caller.authorization), &net_ids)
            .await;

        let entries = pending
            .into_iter()
            .map(|application| {
                let rating = ratings
                    .get(&application.net_id)
                    .copied()
                    .unwrap_or(NO_RATING);
                RankedApplication {
                    application,
                    rating,
                }
            })
            .collect();

        Ok(ranking::rank(entries))
    }

    /// The caller's own application record for a course.
    pub async fn get_status(
        &self,
        caller: &AuthUser,
        course_id: &str,
    ) -> Result<Application, ApplicationError> {
        self.applications
            .find(course_id, &caller.net_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound {
                course_id: course_id.to_string(),
                net_id: caller.net_id.clone(),
            })
    }

    async fn ensure_lecturer(
        &self,
        caller: &AuthUser,
        course_id: &str,
    ) -> Result<(), ApplicationError> {
        let responsible = self
            .course_directory
            .is_responsible_lecturer(
                Some(&caller.authorization),
                Some(&caller.net_id),
                Some(course_id),
            )
            .await;
        if !responsible {
            return Err(ApplicationError::NotLecturer {
                net_id: caller.net_id.clone(),
                course_id: course_id.to_string(),
            });
        }
        Ok(())
    }

    async fn ensure_pending(&self, course_id: &str, net_id: &str) -> Result<(), ApplicationError> {
        let existing = self
            .applications
            .find(course_id, net_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound {
                course_id: course_id.to_string(),
                net_id: net_id.to_string(),
            })?;
        if !existing.is_pending() {
            return Err(ApplicationError::NotPending);
        }
        Ok(())
    }
}
