use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("event is missing")]
    MissingEvent,

    #[error("event data is missing")]
    MissingData,

    #[error("event data has no payment id")]
    MissingPaymentId,

    #[error("event type is missing")]
    MissingType,

    #[error("site id is missing")]
    MissingSiteId,

    #[error("unknown site: {0}")]
    UnknownSite(String),

    #[error("no site recorded for payment: {0}")]
    PaymentNotFound(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config: {0}")]
    Config(String),
}

impl PipelineError {
    /// Malformed-input errors: rejected without persistence, never retried
    /// into success by redelivery.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::MissingEvent
                | Self::MissingData
                | Self::MissingPaymentId
                | Self::MissingType
                | Self::MissingSiteId
        )
    }
}
