use {
    crate::domain::{
        error::PipelineError,
        event::PaymentEvent,
        id::{PaymentId, SiteId},
        lookup::PaymentLookup,
    },
    std::sync::Arc,
};

/// Works out which site an event belongs to.
#[derive(Clone)]
pub struct SiteResolver {
    lookup: Arc<dyn PaymentLookup>,
}

impl SiteResolver {
    pub fn new(lookup: Arc<dyn PaymentLookup>) -> Self {
        Self { lookup }
    }

    /// Metadata `site_id` wins when present; otherwise the site is taken
    /// from the payment record, and a missing record is an error.
    pub async fn resolve_site_id(&self, event: &PaymentEvent) -> Result<SiteId, PipelineError> {
        let data = event.data.as_ref().ok_or(PipelineError::MissingData)?;
        let payment_id = PaymentId::new(data.id.clone())?;

        if let Some(site_id) = data.metadata_site_id() {
            return SiteId::new(site_id);
        }

        tracing::debug!(payment_id = %payment_id, "no site in metadata, looking up payment");
        self.lookup.site_id_for_payment(&payment_id).await
    }
}
