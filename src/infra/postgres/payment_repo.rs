use {
    crate::domain::{
        error::PipelineError,
        id::{PaymentId, SiteId},
        lookup::PaymentLookup,
    },
    sqlx::PgPool,
    std::{future::Future, pin::Pin},
};

/// Site lookup backed by the storefront's `payments` table.
pub struct PgPaymentLookup {
    pool: PgPool,
}

impl PgPaymentLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PaymentLookup for PgPaymentLookup {
    fn site_id_for_payment(
        &self,
        payment_id: &PaymentId,
    ) -> Pin<Box<dyn Future<Output = Result<SiteId, PipelineError>> + Send + '_>> {
        let payment_id = payment_id.clone();
        Box::pin(async move { find_site_id(&self.pool, &payment_id).await })
    }
}

pub async fn find_site_id(pool: &PgPool, payment_id: &PaymentId) -> Result<SiteId, PipelineError> {
    let site_id: Option<String> =
        sqlx::query_scalar("SELECT site_id FROM payments WHERE payment_id = $1")
            .bind(payment_id.as_str())
            .fetch_optional(pool)
            .await?;

    match site_id {
        Some(id) => SiteId::new(id),
        None => Err(PipelineError::PaymentNotFound(payment_id.to_string())),
    }
}

/// Record which site a payment belongs to. Called when the storefront
/// creates the payment; a repeated call for the same payment is a no-op.
pub async fn record_payment_site(
    pool: &PgPool,
    payment_id: &PaymentId,
    site_id: &SiteId,
) -> Result<bool, PipelineError> {
    let result = sqlx::query(
        "INSERT INTO payments (payment_id, site_id) VALUES ($1, $2) ON CONFLICT (payment_id) DO NOTHING",
    )
    .bind(payment_id.as_str())
    .bind(site_id.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
