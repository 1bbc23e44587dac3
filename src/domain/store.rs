use {
    super::error::PipelineError,
    super::persisted::PersistedEvent,
    std::{future::Future, pin::Pin},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First delivery of this event id; the row was written.
    Inserted,
    /// A row with this event id already exists; nothing was written.
    Duplicate,
}

/// Durable storage for accepted events.
///
/// Implementations must write each event in a single atomic operation and
/// enforce uniqueness on the event id, so concurrent redeliveries of the
/// same event produce exactly one row.
pub trait EventStore: Send + Sync {
    fn save<'a>(
        &'a self,
        event: &'a PersistedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<SaveOutcome, PipelineError>> + Send + 'a>>;
}
