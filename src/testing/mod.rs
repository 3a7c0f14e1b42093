//! In-memory repositories and directory stubs. These back the unit and
//! router test suites so they run without Postgres or live collaborator
//! services, while keeping the same conditional-write semantics as the
//! Postgres implementations.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Application, ApplicationStatus, Contract, Course, HourDeclaration};
use crate::remote::{ContractDirectory, CourseDirectory, NewContract};
use crate::repository::{
    ApplicationRepository, ContractRepository, HourDeclarationRepository, RepoResult,
};

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("fixture lock poisoned")
}

#[derive(Default)]
pub struct MemoryApplicationRepository {
    rows: Mutex<HashMap<(String, String), Application>>,
}

impl MemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for MemoryApplicationRepository {
    async fn find(&self, course_id: &str, net_id: &str) -> RepoResult<Option<Application>> {
        let rows = locked(&self.rows);
        Ok(rows
            .get(&(course_id.to_string(), net_id.to_string()))
            .cloned())
    }

    async fn insert_new(&self, application: &Application) -> RepoResult<bool> {
        let mut rows = locked(&self.rows);
        let key = (application.course_id.clone(), application.net_id.clone());
        if rows.contains_key(&key) {
            return Ok(false);
        }
        rows.insert(key, application.clone());
        Ok(true)
    }

    async fn count_pending_for(&self, net_id: &str) -> RepoResult<i64> {
        let rows = locked(&self.rows);
        Ok(rows
            .values()
            .filter(|a| a.net_id == net_id && a.status == ApplicationStatus::Pending)
            .count() as i64)
    }

    async fn find_pending_by_course(&self, course_id: &str) -> RepoResult<Vec<Application>> {
        let rows = locked(&self.rows);
        let mut pending: Vec<Application> = rows
            .values()
            .filter(|a| a.course_id == course_id && a.status == ApplicationStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|a| a.created_at);
        Ok(pending)
    }

    async fn transition_from_pending(
        &self,
        course_id: &str,
        net_id: &str,
        to: ApplicationStatus,
    ) -> RepoResult<bool> {
        let mut rows = locked(&self.rows);
        match rows.get_mut(&(course_id.to_string(), net_id.to_string())) {
            Some(application) if application.status == ApplicationStatus::Pending => {
                application.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_pending(&self, course_id: &str, net_id: &str) -> RepoResult<bool> {
        let mut rows = locked(&self.rows);
        let key = (course_id.to_string(), net_id.to_string());
        match rows.get(&key) {
            Some(application) if application.status == ApplicationStatus::Pending => {
                rows.remove(&key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryContractRepository {
    rows: Mutex<HashMap<(String, String), Contract>>,
}

impl MemoryContractRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractRepository for MemoryContractRepository {
    async fn find(&self, net_id: &str, course_id: &str) -> RepoResult<Option<Contract>> {
        let rows = locked(&self.rows);
        Ok(rows
            .get(&(net_id.to_string(), course_id.to_string()))
            .cloned())
    }

    async fn insert_new(&self, contract: &Contract) -> RepoResult<bool> {
        let mut rows = locked(&self.rows);
        let key = (contract.net_id.clone(), contract.course_id.clone());
        if rows.contains_key(&key) {
            return Ok(false);
        }
        rows.insert(key, contract.clone());
        Ok(true)
    }

    async fn set_rating(&self, net_id: &str, course_id: &str, rating: f64) -> RepoResult<bool> {
        let mut rows = locked(&self.rows);
        match rows.get_mut(&(net_id.to_string(), course_id.to_string())) {
            Some(contract) => {
                contract.rating = rating;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_actual_worked_hours(
        &self,
        net_id: &str,
        course_id: &str,
        hours: i32,
    ) -> RepoResult<bool> {
        let mut rows = locked(&self.rows);
        match rows.get_mut(&(net_id.to_string(), course_id.to_string())) {
            Some(contract) => {
                contract.actual_worked_hours = hours;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn average_ratings(&self, net_ids: &[String]) -> RepoResult<HashMap<String, f64>> {
        let rows = locked(&self.rows);
        let mut averages = HashMap::new();
        for net_id in net_ids {
            let ratings: Vec<f64> = rows
                .values()
                .filter(|c| &c.net_id == net_id && c.signed && c.rating > 0.0)
                .map(|c| c.rating)
                .collect();
            if !ratings.is_empty() {
                averages.insert(
                    net_id.clone(),
                    ratings.iter().sum::<f64>() / ratings.len() as f64,
                );
            }
        }
        Ok(averages)
    }
}

#[derive(Default)]
pub struct MemoryHourDeclarationRepository {
    rows: Mutex<HashMap<Uuid, HourDeclaration>>,
}

impl MemoryHourDeclarationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HourDeclarationRepository for MemoryHourDeclarationRepository {
    async fn insert(&self, declaration: &HourDeclaration) -> RepoResult<()> {
        locked(&self.rows).insert(declaration.id, declaration.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<HourDeclaration>> {
        Ok(locked(&self.rows).get(&id).cloned())
    }

    async fn mark_reviewed(&self, id: Uuid, approved: bool) -> RepoResult<bool> {
        let mut rows = locked(&self.rows);
        match rows.get_mut(&id) {
            Some(declaration) if !declaration.reviewed => {
                declaration.approved = approved;
                declaration.reviewed = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_pending_by_course(&self, course_id: &str) -> RepoResult<Vec<HourDeclaration>> {
        let rows = locked(&self.rows);
        let mut pending: Vec<HourDeclaration> = rows
            .values()
            .filter(|d| d.course_id == course_id && !d.reviewed)
            .cloned()
            .collect();
        pending.sort_by_key(|d| d.date);
        Ok(pending)
    }
}

/// Course directory with a fixed set of courses and lecturer assignments.
pub struct StaticCourseDirectory {
    courses: HashMap<String, Course>,
    lecturers: HashSet<(String, String)>,
}

impl StaticCourseDirectory {
    pub fn new() -> Self {
        Self {
            courses: HashMap::new(),
            lecturers: HashSet::new(),
        }
    }

    pub fn with_course(mut self, course_id: &str) -> Self {
        self.courses.insert(
            course_id.to_string(),
            Course {
                id: course_id.to_string(),
                start_date: NaiveDate::from_ymd_opt(2022, 9, 5).expect("valid date"),
                number_of_students: 500,
            },
        );
        self
    }

    pub fn with_lecturer(mut self, net_id: &str, course_id: &str) -> Self {
        self.lecturers
            .insert((net_id.to_string(), course_id.to_string()));
        self
    }
}

impl Default for StaticCourseDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseDirectory for StaticCourseDirectory {
    async fn is_responsible_lecturer(
        &self,
        _authorization: Option<&str>,
        net_id: Option<&str>,
        course_id: Option<&str>,
    ) -> bool {
        let (Some(net_id), Some(course_id)) = (net_id, course_id) else {
            return false;
        };
        self.lecturers
            .contains(&(net_id.to_string(), course_id.to_string()))
    }

    async fn get_course_by_id(
        &self,
        _authorization: Option<&str>,
        course_id: Option<&str>,
    ) -> Option<Course> {
        self.courses.get(course_id?).cloned()
    }
}

/// Contract directory double. Records every contract creation, optionally
/// refuses them, serves a configured rating map, and can loop contract
/// creation back into a repository so accept scenarios end with a real
/// contract on record.
pub struct StubContractDirectory {
    ratings: HashMap<String, f64>,
    refuse_contracts: bool,
    repository: Option<Arc<dyn ContractRepository>>,
    recorded: Arc<Mutex<Vec<NewContract>>>,
}

impl StubContractDirectory {
    pub fn new() -> Self {
        Self {
            ratings: HashMap::new(),
            refuse_contracts: false,
            repository: None,
            recorded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_rating(mut self, net_id: &str, rating: f64) -> Self {
        self.ratings.insert(net_id.to_string(), rating);
        self
    }

    /// Refuse every contract creation, as an unreachable directory would.
    pub fn refusing(mut self) -> Self {
        self.refuse_contracts = true;
        self
    }

    /// Loop contract creations back into the given repository.
    pub fn with_repository(mut self, repository: Arc<dyn ContractRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Handle onto the creations observed so far.
    pub fn recorded(&self) -> Arc<Mutex<Vec<NewContract>>> {
        self.recorded.clone()
    }
}

impl Default for StubContractDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractDirectory for StubContractDirectory {
    async fn get_ta_ratings(
        &self,
        _authorization: Option<&str>,
        net_ids: &[String],
    ) -> HashMap<String, f64> {
        net_ids
            .iter()
            .filter_map(|id| self.ratings.get(id).map(|r| (id.clone(), *r)))
            .collect()
    }

    async fn create_contract(&self, _authorization: Option<&str>, contract: &NewContract) -> bool {
        if self.refuse_contracts {
            return false;
        }

        if let Some(repository) = &self.repository {
            let record = Contract::new(
                &contract.net_id,
                &contract.course_id,
                contract.max_hours,
                &contract.duties,
            );
            match repository.insert_new(&record).await {
                Ok(inserted) => {
                    if inserted {
                        locked(&self.recorded).push(contract.clone());
                    }
                    inserted
                }
                Err(_) => false,
            }
        } else {
            locked(&self.recorded).push(contract.clone());
            true
        }
    }
}
