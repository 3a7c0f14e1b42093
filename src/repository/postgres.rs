use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{
    ApplicationRepository, ContractRepository, HourDeclarationRepository, RepoResult,
    RepositoryError,
};
use crate::domain::{Application, ApplicationStatus, Contract, HourDeclaration};

#[derive(Debug, FromRow)]
struct ApplicationRow {
    course_id: String,
    net_id: String,
    grade: f64,
    motivation: String,
    contact_email: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = RepositoryError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status: ApplicationStatus =
            row.status.parse().map_err(RepositoryError::Backend)?;
        Ok(Application {
            course_id: row.course_id,
            net_id: row.net_id,
            grade: row.grade,
            motivation: row.motivation,
            contact_email: row.contact_email,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ContractRow {
    net_id: String,
    course_id: String,
    max_hours: i32,
    duties: String,
    signed: bool,
    rating: f64,
    actual_worked_hours: i32,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Contract {
            net_id: row.net_id,
            course_id: row.course_id,
            max_hours: row.max_hours,
            duties: row.duties,
            signed: row.signed,
            rating: row.rating,
            actual_worked_hours: row.actual_worked_hours,
        }
    }
}

#[derive(Debug, FromRow)]
struct HourDeclarationRow {
    id: Uuid,
    net_id: String,
    course_id: String,
    worked_time: i32,
    date: NaiveDate,
    description: String,
    approved: bool,
    reviewed: bool,
}

impl From<HourDeclarationRow> for HourDeclaration {
    fn from(row: HourDeclarationRow) -> Self {
        HourDeclaration {
            id: row.id,
            net_id: row.net_id,
            course_id: row.course_id,
            worked_time: row.worked_time,
            date: row.date,
            description: row.description,
            approved: row.approved,
            reviewed: row.reviewed,
        }
    }
}

pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn find(&self, course_id: &str, net_id: &str) -> RepoResult<Option<Application>> {
        let row: Option<ApplicationRow> = sqlx::query_as(
            "SELECT course_id, net_id, grade, motivation, contact_email, status, created_at \
             FROM applications WHERE course_id = $1 AND net_id = $2",
        )
        .bind(course_id)
        .bind(net_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Application::try_from).transpose()
    }

    async fn insert_new(&self, application: &Application) -> RepoResult<bool> {
        // ON CONFLICT DO NOTHING makes two racing applies resolve to one row
        let result = sqlx::query(
            "INSERT INTO applications \
             (course_id, net_id, grade, motivation, contact_email, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (course_id, net_id) DO NOTHING",
        )
        .bind(&application.course_id)
        .bind(&application.net_id)
        .bind(application.grade)
        .bind(&application.motivation)
        .bind(&application.contact_email)
        .bind(application.status.as_str())
        .bind(application.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn count_pending_for(&self, net_id: &str) -> RepoResult<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM applications WHERE net_id = $1 AND status = 'PENDING'",
        )
        .bind(net_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn find_pending_by_course(&self, course_id: &str) -> RepoResult<Vec<Application>> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            "SELECT course_id, net_id, grade, motivation, contact_email, status, created_at \
             FROM applications WHERE course_id = $1 AND status = 'PENDING' \
             ORDER BY created_at",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Application::try_from).collect()
    }

    async fn transition_from_pending(
        &self,
        course_id: &str,
        net_id: &str,
        to: ApplicationStatus,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE applications SET status = $3 \
             WHERE course_id = $1 AND net_id = $2 AND status = 'PENDING'",
        )
        .bind(course_id)
        .bind(net_id)
        .bind(to.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_pending(&self, course_id: &str, net_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            "DELETE FROM applications \
             WHERE course_id = $1 AND net_id = $2 AND status = 'PENDING'",
        )
        .bind(course_id)
        .bind(net_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

pub struct PgContractRepository {
    pool: PgPool,
}

impl PgContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractRepository for PgContractRepository {
    async fn find(&self, net_id: &str, course_id: &str) -> RepoResult<Option<Contract>> {
        let row: Option<ContractRow> = sqlx::query_as(
            "SELECT net_id, course_id, max_hours, duties, signed, rating, actual_worked_hours \
             FROM contracts WHERE net_id = $1 AND course_id = $2",
        )
        .bind(net_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Contract::from))
    }

    async fn insert_new(&self, contract: &Contract) -> RepoResult<bool> {
        let result = sqlx::query(
            "INSERT INTO contracts \
             (net_id, course_id, max_hours, duties, signed, rating, actual_worked_hours) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (net_id, course_id) DO NOTHING",
        )
        .bind(&contract.net_id)
        .bind(&contract.course_id)
        .bind(contract.max_hours)
        .bind(&contract.duties)
        .bind(contract.signed)
        .bind(contract.rating)
        .bind(contract.actual_worked_hours)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_rating(&self, net_id: &str, course_id: &str, rating: f64) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE contracts SET rating = $3 WHERE net_id = $1 AND course_id = $2",
        )
        .bind(net_id)
        .bind(course_id)
        .bind(rating)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_actual_worked_hours(
        &self,
        net_id: &str,
        course_id: &str,
        hours: i32,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE contracts SET actual_worked_hours = $3 \
             WHERE net_id = $1 AND course_id = $2",
        )
        .bind(net_id)
        .bind(course_id)
        .bind(hours)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn average_ratings(&self, net_ids: &[String]) -> RepoResult<HashMap<String, f64>> {
        let rows: Vec<(String, f64)> = sqlx::query_as(
            "SELECT net_id, AVG(rating) FROM contracts \
             WHERE signed = TRUE AND rating > 0 AND net_id = ANY($1) \
             GROUP BY net_id",
        )
        .bind(net_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}

pub struct PgHourDeclarationRepository {
    pool: PgPool,
}

impl PgHourDeclarationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HourDeclarationRepository for PgHourDeclarationRepository {
    async fn insert(&self, declaration: &HourDeclaration) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO hour_declarations \
             (id, net_id, course_id, worked_time, date, description, approved, reviewed) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(declaration.id)
        .bind(&declaration.net_id)
        .bind(&declaration.course_id)
        .bind(declaration.worked_time)
        .bind(declaration.date)
        .bind(&declaration.description)
        .bind(declaration.approved)
        .bind(declaration.reviewed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, id: Uuid) -> RepoResult<Option<HourDeclaration>> {
        let row: Option<HourDeclarationRow> = sqlx::query_as(
            "SELECT id, net_id, course_id, worked_time, date, description, approved, reviewed \
             FROM hour_declarations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(HourDeclaration::from))
    }

    async fn mark_reviewed(&self, id: Uuid, approved: bool) -> RepoResult<bool> {
        // reviewed = TRUE is terminal; the guard makes a double review lose
        let result = sqlx::query(
            "UPDATE hour_declarations SET approved = $2, reviewed = TRUE \
             WHERE id = $1 AND reviewed = FALSE",
        )
        .bind(id)
        .bind(approved)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_pending_by_course(&self, course_id: &str) -> RepoResult<Vec<HourDeclaration>> {
        let rows: Vec<HourDeclarationRow> = sqlx::query_as(
            "SELECT id, net_id, course_id, worked_time, date, description, approved, reviewed \
             FROM hour_declarations WHERE course_id = $1 AND reviewed = FALSE \
             ORDER BY date",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HourDeclaration::from).collect())
    }
}
