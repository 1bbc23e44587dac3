//! Webhook ingestion pipeline.
//!
//! A delivery moves through: parse → resolve site → authenticate against that
//! site's secrets → allow-list check → persist. Any step may end the run;
//! only the last one writes anything. No step retries: a non-200 response
//! makes the gateway redeliver.

use {
    super::{event_gate, site_resolver::SiteResolver, verification},
    crate::domain::{
        error::PipelineError,
        event::PaymentEvent,
        id::SiteId,
        lookup::PaymentLookup,
        persisted::PersistedEvent,
        site::{SiteConfig, SiteRegistry, SiteSecrets},
        store::{EventStore, SaveOutcome},
    },
    axum::http::HeaderMap,
    std::sync::Arc,
    uuid::Uuid,
};

/// Hex HMAC-SHA256 of the raw body.
pub const SIGNATURE_HEADER: &str = "cko-signature";

/// Shared secret configured on the gateway's webhook endpoint.
pub const AUTH_HEADER: &str = "authorization";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Accepted and written to the store.
    Persisted(Uuid),
    /// Accepted, but the store already held this event id.
    Duplicate,
    /// Authentic, but the site has not opted into this event type.
    Ignored,
    /// Failed the site's header or signature check; nothing was written.
    Unauthenticated,
}

impl IngestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Persisted(_) => "accepted",
            Self::Duplicate => "duplicate",
            Self::Ignored => "ignored",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

pub struct EventIngestor {
    sites: Arc<SiteRegistry>,
    resolver: SiteResolver,
    store: Arc<dyn EventStore>,
}

impl EventIngestor {
    pub fn new(
        sites: Arc<SiteRegistry>,
        lookup: Arc<dyn PaymentLookup>,
        store: Arc<dyn EventStore>,
    ) -> Self {
        Self {
            sites,
            resolver: SiteResolver::new(lookup),
            store,
        }
    }

    /// Whether the request carries valid credentials for the site its event
    /// belongs to. `Ok(false)` is an authentication failure; `Err` means the
    /// request could not be routed at all.
    pub async fn validate_request(
        &self,
        headers: &HeaderMap,
        raw_body: &[u8],
    ) -> Result<bool, PipelineError> {
        let event = PaymentEvent::parse(raw_body)?;
        let (site_id, site) = self.route(&event).await?;
        Ok(authenticate(&site_id, &site.secrets(), headers, &event.raw_payload))
    }

    /// Gate and persist an already-authenticated event.
    pub async fn on_event(&self, event: &PaymentEvent) -> Result<IngestOutcome, PipelineError> {
        event.type_code()?;
        let (site_id, site) = self.route(event).await?;
        self.admit(event, site_id, site).await
    }

    /// Full pipeline for one HTTP delivery: parse once, route once, then
    /// authenticate and admit.
    pub async fn ingest(
        &self,
        headers: &HeaderMap,
        raw_body: &[u8],
    ) -> Result<IngestOutcome, PipelineError> {
        let event = PaymentEvent::parse(raw_body)?;

        // No-op unless the caller's span declares these fields.
        tracing::Span::current()
            .record("event_id", tracing::field::display(&event.id))
            .record("event_type", tracing::field::display(&event.event_type));

        event.type_code()?;
        let (site_id, site) = self.route(&event).await?;

        if !authenticate(&site_id, &site.secrets(), headers, &event.raw_payload) {
            return Ok(IngestOutcome::Unauthenticated);
        }

        self.admit(&event, site_id, site).await
    }

    async fn route(&self, event: &PaymentEvent) -> Result<(SiteId, &SiteConfig), PipelineError> {
        let site_id = self.resolver.resolve_site_id(event).await?;
        let site = self.sites.get(&site_id)?;
        Ok((site_id, site))
    }

    async fn admit(
        &self,
        event: &PaymentEvent,
        site_id: SiteId,
        site: &SiteConfig,
    ) -> Result<IngestOutcome, PipelineError> {
        let event_type = event.type_code()?;

        if !event_gate::is_allowed(site_id.as_str(), event_type, &site.allowed_event_types)? {
            tracing::warn!(
                event_id = %event.id,
                event_type,
                site_id = %site_id,
                "event type not enabled for site, ignoring"
            );
            return Ok(IngestOutcome::Ignored);
        }

        let record = PersistedEvent::from_event(event, site_id)?;

        match self.store.save(&record).await? {
            SaveOutcome::Inserted => {
                tracing::info!(
                    event_id = %record.event_id(),
                    site_id = %record.site_id(),
                    payment_id = %record.payment_id(),
                    "event persisted"
                );
                Ok(IngestOutcome::Persisted(record.id()))
            }
            SaveOutcome::Duplicate => {
                tracing::info!(event_id = %record.event_id(), "duplicate event, already stored");
                Ok(IngestOutcome::Duplicate)
            }
        }
    }
}

/// Header check first; the signature is only examined when the header
/// check passes.
fn authenticate(
    site_id: &SiteId,
    secrets: &SiteSecrets,
    headers: &HeaderMap,
    raw_body: &[u8],
) -> bool {
    if secrets.require_auth_header {
        let received = header_str(headers, AUTH_HEADER);
        if !verification::verify_auth_header(&secrets.auth_header_key, received) {
            tracing::warn!(site_id = %site_id, "webhook rejected: auth header mismatch");
            return false;
        }
    }

    if secrets.require_signature {
        let provided = header_str(headers, SIGNATURE_HEADER);
        if !verification::verify_signature(&secrets.signature_key, raw_body, provided) {
            tracing::warn!(site_id = %site_id, "webhook rejected: signature mismatch");
            return false;
        }
    }

    true
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
