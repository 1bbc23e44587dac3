use {
    super::audit::NewAuditEntry,
    super::error::PipelineError,
    super::event::PaymentEvent,
    super::id::{EventId, PaymentId, SiteId},
    super::money::{Currency, Money, MoneyAmount},
    chrono::{DateTime, Utc},
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
    std::fmt,
    uuid::Uuid,
};

/// Gateway response code for an approved action.
pub const APPROVED_RESPONSE_CODE: &str = "10000";

/// Stored events only ever enter as `PENDING`; downstream consumers own any
/// later transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Pending,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Durable form of an accepted event. Id generated in Rust via Uuid::now_v7().
#[derive(Debug, Clone)]
pub struct PersistedEvent {
    id: Uuid,
    event_id: EventId,
    event_type: String,
    site_id: SiteId,
    payment_id: PaymentId,
    action_id: String,
    response_code: String,
    response_summary: Option<String>,
    reference: Option<String>,
    risk_flagged: bool,
    source_type: Option<String>,
    money: Option<Money>,
    status: EventStatus,
    provider_created_on: Option<DateTime<Utc>>,
    raw_payload: Vec<u8>,
    received_at: DateTime<Utc>,
}

impl PersistedEvent {
    /// Build the record for an event already routed to `site_id`.
    ///
    /// Defaults: `action_id` falls back to the payment id, a blank
    /// `response_code` becomes [`APPROVED_RESPONSE_CODE`]. The minor-unit
    /// amount is kept as [`Money`] and converted with the currency's
    /// exponent on read.
    pub fn from_event(event: &PaymentEvent, site_id: SiteId) -> Result<Self, PipelineError> {
        let event_type = event.type_code()?.to_string();
        let event_id = EventId::new(event.id.clone())?;
        let data = event.data.as_ref().ok_or(PipelineError::MissingData)?;
        let payment_id = PaymentId::new(data.id.clone())?;

        let action_id = non_blank(data.action_id.as_deref())
            .unwrap_or(payment_id.as_str())
            .to_string();
        let response_code = non_blank(data.response_code.as_deref())
            .unwrap_or(APPROVED_RESPONSE_CODE)
            .to_string();

        let money = match (data.amount, non_blank(data.currency.as_deref())) {
            (Some(amount), Some(currency)) => Some(Money::new(
                MoneyAmount::new(amount)?,
                Currency::try_from(currency)?,
            )),
            (Some(_), None) => {
                return Err(PipelineError::Validation(
                    "amount present without currency".into(),
                ));
            }
            (None, _) => None,
        };

        Ok(Self {
            id: Uuid::now_v7(),
            event_id,
            event_type,
            site_id,
            payment_id,
            action_id,
            response_code,
            response_summary: data.response_summary.clone(),
            reference: data.reference.clone(),
            risk_flagged: data.risk.flagged,
            source_type: data.source.source_type.clone(),
            money,
            status: EventStatus::Pending,
            provider_created_on: event.created_on,
            raw_payload: event.raw_payload.clone(),
            received_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    pub fn payment_id(&self) -> &PaymentId {
        &self.payment_id
    }

    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    pub fn response_code(&self) -> &str {
        &self.response_code
    }

    pub fn response_summary(&self) -> Option<&str> {
        self.response_summary.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn risk_flagged(&self) -> bool {
        self.risk_flagged
    }

    pub fn source_type(&self) -> Option<&str> {
        self.source_type.as_deref()
    }

    pub fn currency(&self) -> Option<&Currency> {
        self.money.as_ref().map(Money::currency)
    }

    /// Amount in major units of [`currency`](Self::currency).
    pub fn amount(&self) -> Option<Decimal> {
        self.money.as_ref().map(Money::to_major)
    }

    pub fn status(&self) -> EventStatus {
        self.status
    }

    pub fn provider_created_on(&self) -> Option<DateTime<Utc>> {
        self.provider_created_on
    }

    pub fn raw_payload(&self) -> &[u8] {
        &self.raw_payload
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn audit_entry(&self, actor: &str, action: &str) -> NewAuditEntry {
        NewAuditEntry {
            id: Uuid::now_v7(),
            entity_type: "webhook_event".to_string(),
            entity_id: self.id,
            event_id: self.event_id.as_str().to_string(),
            action: action.to_string(),
            actor: actor.to_string(),
            detail: serde_json::json!({
                "event_type": self.event_type,
                "site_id": self.site_id.as_str(),
                "payment_id": self.payment_id.as_str(),
                "amount": self.amount().map(|a| a.to_string()),
                "currency": self.currency().map(Currency::as_str),
                "status": self.status.as_str(),
            }),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
