//! Repository for the `client_payments` table (append-only).

use opsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::ClientPayment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, amount_cents, kind, note, created_at";

/// Read side of the payment history. Rows are appended by `ClientRepo`
/// inside the registration and upgrade transactions.
pub struct PaymentRepo;

impl PaymentRepo {
    /// List a client's payment history, oldest first.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ClientPayment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_payments
             WHERE client_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ClientPayment>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }
}
