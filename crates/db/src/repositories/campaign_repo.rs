//! Repository for the `campaigns` table.

use opsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CreateCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, source, medium, created_by, created_at, updated_at";

/// Provides create and read operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the created row.
    ///
    /// A duplicate code violates `uq_campaigns_code` and maps to 409 in the
    /// api layer.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (name, code, source, medium, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.source)
            .bind(&input.medium)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its unique code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE code = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all campaigns, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns ORDER BY created_at DESC");
        sqlx::query_as::<_, Campaign>(&query).fetch_all(pool).await
    }
}
