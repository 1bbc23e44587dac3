use {
    super::error::PipelineError,
    super::id::{PaymentId, SiteId},
    std::{future::Future, pin::Pin},
};

/// Maps a payment to the site that created it. Consulted when an event
/// arrives without a site id in its metadata.
pub trait PaymentLookup: Send + Sync {
    /// `Err(PipelineError::PaymentNotFound)` when no payment record exists.
    fn site_id_for_payment(
        &self,
        payment_id: &PaymentId,
    ) -> Pin<Box<dyn Future<Output = Result<SiteId, PipelineError>> + Send + '_>>;
}
