use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::contract::{self, Contract};
use crate::domain::HourDeclaration;
use crate::middleware::identity::AuthUser;
use crate::remote::{CourseDirectory, NewContract};
use crate::repository::{ContractRepository, HourDeclarationRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("no contract for {net_id} on {course_id}")]
    NotFound { net_id: String, course_id: String },
    #[error("a contract for {net_id} on {course_id} already exists")]
    Duplicate { net_id: String, course_id: String },
    #[error("rating {0} is outside the [0, 10] range")]
    InvalidRating(f64),
    #[error("actual worked hours {0} may not be negative")]
    InvalidWorkedHours(i32),
    #[error("worked time {0} may not be negative")]
    InvalidWorkedTime(i32),
    #[error("max hours {0} must be positive")]
    InvalidMaxHours(i32),
    #[error("no hour declaration {0}")]
    DeclarationNotFound(Uuid),
    #[error("hour declaration {0} has already been reviewed")]
    AlreadyReviewed(Uuid),
    #[error("{net_id} is not a responsible lecturer for {course_id}")]
    NotLecturer { net_id: String, course_id: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Contract formation and the worked-hour approval flow. Contracts are
/// owned here once an application is accepted; hour declarations move
/// through submit -> review exactly once.
pub struct ContractService {
    contracts: Arc<dyn ContractRepository>,
    hours: Arc<dyn HourDeclarationRepository>,
    course_directory: Arc<dyn CourseDirectory>,
}

impl ContractService {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        hours: Arc<dyn HourDeclarationRepository>,
        course_directory: Arc<dyn CourseDirectory>,
    ) -> Self {
        Self {
            contracts,
            hours,
            course_directory,
        }
    }

    pub async fn get_contract(
        &self,
        net_id: &str,
        course_id: &str,
    ) -> Result<Contract, ContractError> {
        self.contracts
            .find(net_id, course_id)
            .await?
            .ok_or_else(|| ContractError::NotFound {
                net_id: net_id.to_string(),
                course_id: course_id.to_string(),
            })
    }

    /// Create a contract record. This is the surface a sibling's accept
    /// flow reaches through the Contract Directory.
    pub async fn create_contract(&self, request: &NewContract) -> Result<Contract, ContractError> {
        if request.max_hours <= 0 {
            return Err(ContractError::InvalidMaxHours(request.max_hours));
        }

        let contract = Contract::new(
            &request.net_id,
            &request.course_id,
            request.max_hours,
            &request.duties,
        );
        if !self.contracts.insert_new(&contract).await? {
            return Err(ContractError::Duplicate {
                net_id: request.net_id.clone(),
                course_id: request.course_id.clone(),
            });
        }

        tracing::info!(
            net_id = %request.net_id,
            course_id = %request.course_id,
            max_hours = request.max_hours,
            "contract created"
        );
        Ok(contract)
    }

    pub async fn set_rating(
        &self,
        caller: &AuthUser,
        course_id: &str,
        net_id: &str,
        rating: f64,
    ) -> Result<(), ContractError> {
        self.ensure_lecturer(caller, course_id).await?;
        if !contract::is_valid_rating(rating) {
            return Err(ContractError::InvalidRating(rating));
        }

        if !self.contracts.set_rating(net_id, course_id, rating).await? {
            return Err(ContractError::NotFound {
                net_id: net_id.to_string(),
                course_id: course_id.to_string(),
            });
        }
        Ok(())
    }

    pub async fn set_actual_worked_hours(
        &self,
        caller: &AuthUser,
        course_id: &str,
        net_id: &str,
        hours: i32,
    ) -> Result<(), ContractError> {
        self.ensure_lecturer(caller, course_id).await?;
        if hours < 0 {
            return Err(ContractError::InvalidWorkedHours(hours));
        }

        if !self
            .contracts
            .set_actual_worked_hours(net_id, course_id, hours)
            .await?
        {
            return Err(ContractError::NotFound {
                net_id: net_id.to_string(),
                course_id: course_id.to_string(),
            });
        }
        Ok(())
    }

    /// A TA declares worked time against their own contract.
    pub async fn submit_hours(
        &self,
        caller: &AuthUser,
        course_id: &str,
        worked_time: i32,
        date: NaiveDate,
        description: &str,
    ) -> Result<HourDeclaration, ContractError> {
        if worked_time < 0 {
            return Err(ContractError::InvalidWorkedTime(worked_time));
        }

        // The declaration must hang off an existing contract
        self.get_contract(&caller.net_id, course_id).await?;

        let declaration =
            HourDeclaration::new(&caller.net_id, course_id, worked_time, date, description);
        self.hours.insert(&declaration).await?;

        tracing::info!(
            net_id = %caller.net_id,
            course_id,
            worked_time,
            "hour declaration submitted"
        );
        Ok(declaration)
    }

    /// Record the lecturer's verdict. Review is terminal: a reviewed
    /// declaration never returns to the pending queue.
    pub async fn review_hours(
        &self,
        caller: &AuthUser,
        id: Uuid,
        approve: bool,
    ) -> Result<(), ContractError> {
        let declaration = self
            .hours
            .find(id)
            .await?
            .ok_or(ContractError::DeclarationNotFound(id))?;

        self.ensure_lecturer(caller, &declaration.course_id).await?;

        if !self.hours.mark_reviewed(id, approve).await? {
            return Err(ContractError::AlreadyReviewed(id));
        }

        tracing::info!(
            %id,
            approve,
            reviewed_by = %caller.net_id,
            "hour declaration reviewed"
        );
        Ok(())
    }

    /// Unreviewed declarations for a course. Lecturer-only.
    pub async fn list_pending_hours(
        &self,
        caller: &AuthUser,
        course_id: &str,
    ) -> Result<Vec<HourDeclaration>, ContractError> {
        self.ensure_lecturer(caller, course_id).await?;
        Ok(self.hours.find_pending_by_course(course_id).await?)
    }

    /// Mean rating per net_id across signed, rated contracts. Net IDs with
    /// no qualifying contract are omitted.
    pub async fn average_rating(
        &self,
        net_ids: &[String],
    ) -> Result<HashMap<String, f64>, ContractError> {
        Ok(self.contracts.average_ratings(net_ids).await?)
    }

    async fn ensure_lecturer(
        &self,
        caller: &AuthUser,
        course_id: &str,
    ) -> Result<(), ContractError> {
        let responsible = self
            .course_directory
            .is_responsible_lecturer(
                Some(&caller.authorization),
                Some(&caller.net_id),
                Some(course_id),
            )
            .await;
        if !responsible {
            return Err(ContractError::NotLecturer {
                net_id: caller.net_id.clone(),
                course_id: course_id.to_string(),
            });
        }
        Ok(())
    }
}
