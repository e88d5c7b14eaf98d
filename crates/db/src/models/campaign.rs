//! Campaign entity model and DTOs.

use opsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A campaign row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a campaign.
#[derive(Debug, Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    pub code: String,
    pub source: Option<String>,
    pub medium: Option<String>,
}
