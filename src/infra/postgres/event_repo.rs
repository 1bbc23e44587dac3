use {
    super::audit_repo::insert_audit_entry,
    crate::domain::{
        error::PipelineError,
        persisted::PersistedEvent,
        store::{EventStore, SaveOutcome},
    },
    sqlx::PgPool,
    std::{future::Future, pin::Pin},
};

const ACTOR: &str = "webhook:gateway";

pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EventStore for PgEventStore {
    fn save<'a>(
        &'a self,
        event: &'a PersistedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<SaveOutcome, PipelineError>> + Send + 'a>> {
        Box::pin(insert_event(&self.pool, event))
    }
}

/// Insert the event and its audit row in one transaction. The unique constraint on
/// `event_id` decides concurrent redeliveries: the loser sees `Duplicate`.
/// Dropping the future before commit rolls everything back.
pub async fn insert_event(
    pool: &PgPool,
    event: &PersistedEvent,
) -> Result<SaveOutcome, PipelineError> {
    let mut tx = pool.begin().await?;

    let inserted: Option<bool> = sqlx::query_scalar(
        r#"
        INSERT INTO webhook_events
            (id, event_id, event_type, site_id, payment_id, action_id,
             response_code, response_summary, reference, risk_flagged,
             source_type, amount, currency, status, provider_created_on,
             raw_payload, received_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        ON CONFLICT (event_id) DO NOTHING
        RETURNING true
        "#,
    )
    .bind(event.id())
    .bind(event.event_id().as_str())
    .bind(event.event_type())
    .bind(event.site_id().as_str())
    .bind(event.payment_id().as_str())
    .bind(event.action_id())
    .bind(event.response_code())
    .bind(event.response_summary())
    .bind(event.reference())
    .bind(event.risk_flagged())
    .bind(event.source_type())
    .bind(event.amount())
    .bind(event.currency().map(|c| c.as_str()))
    .bind(event.status().as_str())
    .bind(event.provider_created_on())
    .bind(event.raw_payload())
    .bind(event.received_at())
    .fetch_optional(&mut *tx)
    .await?;

    if inserted.is_none() {
        tx.commit().await?;
        return Ok(SaveOutcome::Duplicate);
    }

    let audit = event.audit_entry(ACTOR, "event_received");
    insert_audit_entry(&mut tx, &audit).await?;
    tx.commit().await?;
    Ok(SaveOutcome::Inserted)
}
