//! Client payment history model.

use opsdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An append-only payment row from the `client_payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientPayment {
    pub id: DbId,
    pub client_id: DbId,
    pub amount_cents: i64,
    /// One of `plan`, `upgrade`, `addon`.
    pub kind: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
}
