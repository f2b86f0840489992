use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::companies::{parse_job_posts, CompanyPublic};
use crate::error::StoreError;
use crate::query::{fold_case, Filter, JobSort};
use crate::DbPool;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct JobsRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub job_title: String,
    pub job_type: String,
    pub location: String,
    pub salary: i64,
    pub vacancies: Option<i64>,
    pub experience: Option<i64>,
    pub description: String,
    pub requirements: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Replacement values for an existing posting. `None` numerics keep the
/// stored value.
#[derive(Debug, Clone)]
pub struct JobReplacement {
    pub job_title: String,
    pub job_type: String,
    pub location: String,
    pub salary: i64,
    pub vacancies: Option<i64>,
    pub experience: Option<i64>,
    pub description: String,
    pub requirements: String,
    pub updated_at: String,
}

/// Job row with its owning company's public columns joined in.
#[derive(Debug, Clone, sqlx::FromRow)]
struct JobWithCompanyRow {
    #[sqlx(flatten)]
    job: JobsRow,
    company_ref: Option<Uuid>,
    company_name: Option<String>,
    company_email: Option<String>,
    company_contact: Option<String>,
    company_location: Option<String>,
    company_about: Option<String>,
    company_profile_url: Option<String>,
    company_job_posts: Option<String>,
    company_created_at: Option<String>,
}

/// A posting with its company populated. `company` is `None` when the
/// referenced company no longer exists.
#[derive(Debug, Clone)]
pub struct JobWithCompany {
    pub job: JobsRow,
    pub company: Option<CompanyPublic>,
}

impl TryFrom<JobWithCompanyRow> for JobWithCompany {
    type Error = StoreError;

    fn try_from(row: JobWithCompanyRow) -> Result<Self, Self::Error> {
        let company = match row.company_ref {
            Some(id) => Some(CompanyPublic {
                id,
                name: row.company_name.unwrap_or_default(),
                email: row.company_email.unwrap_or_default(),
                contact: row.company_contact,
                location: row.company_location,
                about: row.company_about,
                profile_url: row.company_profile_url,
                job_posts: parse_job_posts(row.company_job_posts.as_deref().unwrap_or(""))?,
                created_at: row.company_created_at.unwrap_or_default(),
            }),
            None => None,
        };
        Ok(Self {
            job: row.job,
            company,
        })
    }
}

const JOB_COLUMNS: &str = "j.id, j.company_id, j.job_title, j.job_type, j.location, j.salary, j.vacancies, j.experience, j.description, j.requirements, j.created_at, j.updated_at";

// no password column
const COMPANY_PUBLIC_COLUMNS: &str = "c.id AS company_ref, c.name AS company_name, c.email AS company_email, c.contact AS company_contact, c.location AS company_location, c.about AS company_about, c.profile_url AS company_profile_url, c.job_posts AS company_job_posts, c.created_at AS company_created_at";

fn select_joined() -> QueryBuilder<'static, Sqlite> {
    QueryBuilder::new(format!(
        "SELECT {JOB_COLUMNS}, {COMPANY_PUBLIC_COLUMNS} FROM jobs j LEFT JOIN companies c ON c.id = j.company_id WHERE "
    ))
}

/// Store client for job postings.
#[derive(Debug, Clone)]
pub struct JobStore {
    pool: DbPool,
}

impl JobStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Round-trip to the database, used by readiness probes.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert(&self, row: &JobsRow) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO jobs (id, company_id, job_title, job_type, location, salary, vacancies, experience, description, requirements, created_at, updated_at, job_title_folded, job_type_folded, location_folded) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(row.id)
        .bind(row.company_id)
        .bind(&row.job_title)
        .bind(&row.job_type)
        .bind(&row.location)
        .bind(row.salary)
        .bind(row.vacancies)
        .bind(row.experience)
        .bind(&row.description)
        .bind(&row.requirements)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .bind(fold_case(&row.job_title))
        .bind(fold_case(&row.job_type))
        .bind(fold_case(&row.location))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<JobWithCompany>, StoreError> {
        let mut qb = select_joined();
        qb.push("j.id = ").push_bind(*id);
        let row = qb
            .build_query_as::<JobWithCompanyRow>()
            .fetch_optional(&self.pool)
            .await?;
        row.map(JobWithCompany::try_from).transpose()
    }

    /// Postings matching `filter`, ordered by `sort`, skipping `offset` and
    /// returning at most `limit`.
    pub async fn find(
        &self,
        filter: &Filter,
        sort: JobSort,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<JobWithCompany>, StoreError> {
        let mut qb = select_joined();
        filter.push_sql(&mut qb);
        qb.push(" ORDER BY ")
            .push(sort.order_by())
            .push(" LIMIT ")
            .push_bind(clamp_i64(limit))
            .push(" OFFSET ")
            .push_bind(clamp_i64(offset));
        tracing::trace!(sql = qb.sql(), "job query");
        let rows = qb
            .build_query_as::<JobWithCompanyRow>()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(JobWithCompany::try_from).collect()
    }

    pub async fn count(&self, filter: &Filter) -> Result<i64, StoreError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM jobs j WHERE ");
        filter.push_sql(&mut qb);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    /// Atomically replace the mutable fields of a posting and return the
    /// stored result, or `None` when no posting has this id.
    pub async fn replace_by_id(
        &self,
        id: &Uuid,
        replacement: &JobReplacement,
    ) -> Result<Option<JobsRow>, StoreError> {
        let row = sqlx::query_as::<_, JobsRow>(
            "UPDATE jobs SET job_title = ?, job_type = ?, location = ?, salary = ?, vacancies = COALESCE(?, vacancies), experience = COALESCE(?, experience), description = ?, requirements = ?, updated_at = ?, job_title_folded = ?, job_type_folded = ?, location_folded = ? WHERE id = ? RETURNING id, company_id, job_title, job_type, location, salary, vacancies, experience, description, requirements, created_at, updated_at",
        )
        .bind(&replacement.job_title)
        .bind(&replacement.job_type)
        .bind(&replacement.location)
        .bind(replacement.salary)
        .bind(replacement.vacancies)
        .bind(replacement.experience)
        .bind(&replacement.description)
        .bind(&replacement.requirements)
        .bind(&replacement.updated_at)
        .bind(fold_case(&replacement.job_title))
        .bind(fold_case(&replacement.job_type))
        .bind(fold_case(&replacement.location))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Returns the number of rows removed; zero is not an error.
    pub async fn delete_by_id(&self, id: &Uuid) -> Result<u64, StoreError> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

fn clamp_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
