//! Repository for the `clients` table.

use opsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient, UpdateClient};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, full_name, phone, plan, amount_paid_cents, is_active, \
                        operator_id, welcome_email_sent, kickoff_call_done, resume_received, \
                        credentials_json, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client and its initial payment-history row in one
    /// transaction, returning the created client.
    ///
    /// The initial plan price is recorded both as `amount_paid_cents` and as
    /// the first `client_payments` row; the transaction keeps the two in
    /// sync. A duplicate email violates `uq_clients_email` and surfaces as a
    /// database error the api layer maps to 409.
    pub async fn create(
        pool: &PgPool,
        input: &CreateClient,
        initial_amount_cents: i64,
    ) -> Result<Client, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO clients (email, full_name, phone, plan, amount_paid_cents, operator_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.plan)
            .bind(initial_amount_cents)
            .bind(input.operator_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO client_payments (client_id, amount_cents, kind, note)
             VALUES ($1, $2, 'plan', $3)",
        )
        .bind(client.id)
        .bind(initial_amount_cents)
        .bind(format!("Initial {} plan", input.plan))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(client)
    }

    /// Find a client by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE email = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List clients, most recently created first.
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Client>, sqlx::Error> {
        let filter = if include_inactive {
            ""
        } else {
            "WHERE is_active = true"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM clients {filter}
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                email = COALESCE($2, email),
                full_name = COALESCE($3, full_name),
                phone = COALESCE($4, phone),
                operator_id = COALESCE($5, operator_id),
                is_active = COALESCE($6, is_active),
                welcome_email_sent = COALESCE($7, welcome_email_sent),
                kickoff_call_done = COALESCE($8, kickoff_call_done),
                resume_received = COALESCE($9, resume_received),
                credentials_json = COALESCE($10, credentials_json)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(input.operator_id)
            .bind(input.is_active)
            .bind(input.welcome_email_sent)
            .bind(input.kickoff_call_done)
            .bind(input.resume_received)
            .bind(&input.credentials_json)
            .fetch_optional(pool)
            .await
    }

    /// Apply a plan upgrade: set the new plan, add the price delta to
    /// `amount_paid_cents`, and append a payment-history row, all in one
    /// transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn upgrade_plan(
        pool: &PgPool,
        id: DbId,
        new_plan: &str,
        delta_cents: i64,
    ) -> Result<Option<Client>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE clients SET
                plan = $2,
                amount_paid_cents = amount_paid_cents + $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(new_plan)
            .bind(delta_cents)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(client) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO client_payments (client_id, amount_cents, kind, note)
             VALUES ($1, $2, 'upgrade', $3)",
        )
        .bind(id)
        .bind(delta_cents)
        .bind(format!("Plan upgrade to {new_plan}"))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(client))
    }

    /// Delete a client and all dependent records in one transaction.
    ///
    /// Removes jobs, call logs, payment history, and onboarding artifacts
    /// before the client row itself, so a failure anywhere rolls the whole
    /// cascade back. Returns `true` if the client existed.
    pub async fn cascade_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM jobs WHERE client_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM call_logs WHERE client_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM client_payments WHERE client_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "DELETE FROM onboarding_comments WHERE onboarding_job_id IN
                 (SELECT id FROM onboarding_jobs WHERE client_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "DELETE FROM onboarding_moves WHERE onboarding_job_id IN
                 (SELECT id FROM onboarding_jobs WHERE client_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM onboarding_jobs WHERE client_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(client_id = id, "Client and dependent records deleted");
        }
        Ok(deleted)
    }
}
