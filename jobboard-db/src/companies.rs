use uuid::Uuid;

use crate::error::StoreError;
use crate::DbPool;

/// Full company document, credentials included. Never serialise this
/// directly into a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompaniesRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub profile_url: Option<String>,
    /// JSON array of owned job ids, oldest first.
    pub job_posts: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CompaniesRow {
    pub fn job_post_ids(&self) -> Result<Vec<Uuid>, serde_json::Error> {
        parse_job_posts(&self.job_posts)
    }
}

/// Company fields that may be embedded in job responses.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub profile_url: Option<String>,
    pub job_posts: Vec<Uuid>,
    pub created_at: String,
}

pub(crate) fn parse_job_posts(raw: &str) -> Result<Vec<Uuid>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

const SELECT_COMPANY: &str = "SELECT id, name, email, password, contact, location, about, profile_url, job_posts, created_at, updated_at FROM companies";

/// Store client for company documents.
#[derive(Debug, Clone)]
pub struct CompanyStore {
    pool: DbPool,
}

impl CompanyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &CompaniesRow) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO companies (id, name, email, password, contact, location, about, profile_url, job_posts, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.password)
        .bind(&row.contact)
        .bind(&row.location)
        .bind(&row.about)
        .bind(&row.profile_url)
        .bind(&row.job_posts)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<CompaniesRow>, StoreError> {
        let row = sqlx::query_as::<_, CompaniesRow>(&format!("{SELECT_COMPANY} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<CompaniesRow>, StoreError> {
        let row = sqlx::query_as::<_, CompaniesRow>(&format!("{SELECT_COMPANY} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Append a job id to the company's owned list in a single statement,
    /// so concurrent appends for the same company never overwrite each other.
    /// Returns the number of rows touched; zero means no such company.
    pub async fn append_job_post(
        &self,
        id: &Uuid,
        job_id: &Uuid,
        updated_at: &str,
    ) -> Result<u64, StoreError> {
        let res = sqlx::query(
            "UPDATE companies SET job_posts = json_insert(job_posts, '$[#]', ?), updated_at = ? WHERE id = ?",
        )
        .bind(job_id.to_string())
        .bind(updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
