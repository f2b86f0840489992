use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use jobboard_db::companies::CompaniesRow;
use uuid::Uuid;

use crate::handlers::utils::now_timestamp;
use crate::state::AppState;

const DEFAULT_COMPANY_NAME: &str = "Default Company";

/// Company account to provision on first start.
#[derive(Debug, Clone)]
pub struct SeedCompany {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SeedCompany {
    /// Read from JOBBOARD_SEED_COMPANY_EMAIL, JOBBOARD_SEED_COMPANY_PASSWORD and
    /// JOBBOARD_SEED_COMPANY_NAME (optional). `None` when seeding is not configured.
    pub fn from_env() -> Option<Self> {
        let email = match std::env::var("JOBBOARD_SEED_COMPANY_EMAIL") {
            Ok(e) if !e.trim().is_empty() => e.trim().to_string(),
            _ => return None,
        };
        let password = match std::env::var("JOBBOARD_SEED_COMPANY_PASSWORD") {
            Ok(p) if !p.is_empty() => p,
            _ => {
                tracing::warn!("JOBBOARD_SEED_COMPANY_EMAIL set but JOBBOARD_SEED_COMPANY_PASSWORD missing; skipping company provisioning");
                return None;
            }
        };
        let name = std::env::var("JOBBOARD_SEED_COMPANY_NAME")
            .ok()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string());
        Some(Self {
            name,
            email,
            password,
        })
    }
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Provision the seed company unless one with the same email exists.
/// Returns the id of the new company, or `None` if nothing was written.
pub async fn provision_company(state: &AppState, seed: &SeedCompany) -> anyhow::Result<Option<Uuid>> {
    if let Some(existing) = state.companies.find_by_email(&seed.email).await? {
        tracing::info!(email = %seed.email, company_id = %existing.id, "company already exists; skipping provisioning");
        return Ok(None);
    }

    let now = now_timestamp();
    let row = CompaniesRow {
        id: Uuid::now_v7(),
        name: seed.name.clone(),
        email: seed.email.clone(),
        password: hash_password(&seed.password)?,
        contact: None,
        location: None,
        about: None,
        profile_url: None,
        job_posts: "[]".to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    state.companies.insert(&row).await?;
    tracing::info!(email = %row.email, company_id = %row.id, "provisioned company account");
    Ok(Some(row.id))
}

/// Provision a company from environment variables if configured.
pub async fn maybe_provision_company(state: &AppState) -> anyhow::Result<Option<Uuid>> {
    match SeedCompany::from_env() {
        Some(seed) => provision_company(state, &seed).await,
        None => Ok(None),
    }
}
