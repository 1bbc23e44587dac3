use {
    super::error::PipelineError,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Webhook event types the gateway emits. Sites opt into a subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum EventType {
    CardVerified,
    CardVerificationDeclined,
    PaymentApproved,
    PaymentPending,
    PaymentDeclined,
    PaymentExpired,
    PaymentCanceled,
    PaymentVoided,
    PaymentVoidDeclined,
    PaymentCaptured,
    PaymentCaptureDeclined,
    PaymentCapturePending,
    PaymentRefunded,
    PaymentRefundDeclined,
    PaymentRefundPending,
    PaymentReturned,
    PaymentAuthenticationFailed,
    PaymentPaid,
}

impl EventType {
    pub const ALL: [EventType; 18] = [
        Self::CardVerified,
        Self::CardVerificationDeclined,
        Self::PaymentApproved,
        Self::PaymentPending,
        Self::PaymentDeclined,
        Self::PaymentExpired,
        Self::PaymentCanceled,
        Self::PaymentVoided,
        Self::PaymentVoidDeclined,
        Self::PaymentCaptured,
        Self::PaymentCaptureDeclined,
        Self::PaymentCapturePending,
        Self::PaymentRefunded,
        Self::PaymentRefundDeclined,
        Self::PaymentRefundPending,
        Self::PaymentReturned,
        Self::PaymentAuthenticationFailed,
        Self::PaymentPaid,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::CardVerified => "card_verified",
            Self::CardVerificationDeclined => "card_verification_declined",
            Self::PaymentApproved => "payment_approved",
            Self::PaymentPending => "payment_pending",
            Self::PaymentDeclined => "payment_declined",
            Self::PaymentExpired => "payment_expired",
            Self::PaymentCanceled => "payment_canceled",
            Self::PaymentVoided => "payment_voided",
            Self::PaymentVoidDeclined => "payment_void_declined",
            Self::PaymentCaptured => "payment_captured",
            Self::PaymentCaptureDeclined => "payment_capture_declined",
            Self::PaymentCapturePending => "payment_capture_pending",
            Self::PaymentRefunded => "payment_refunded",
            Self::PaymentRefundDeclined => "payment_refund_declined",
            Self::PaymentRefundPending => "payment_refund_pending",
            Self::PaymentReturned => "payment_returned",
            Self::PaymentAuthenticationFailed => "payment_authentication_failed",
            Self::PaymentPaid => "payment_paid",
        }
    }

    /// Case-insensitive lookup. `None` for codes this service does not know.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for EventType {
    type Error = PipelineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_code(&s)
            .ok_or_else(|| PipelineError::Validation(format!("unknown event type: {s}")))
    }
}

impl From<EventType> for &'static str {
    fn from(t: EventType) -> Self {
        t.code()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventMetadata {
    #[serde(default, alias = "siteId")]
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventRisk {
    #[serde(default)]
    pub flagged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventSource {
    #[serde(default, rename = "type")]
    pub source_type: Option<String>,
}

/// The `data` object of a gateway event: the payment the event is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub action_id: Option<String>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub response_summary: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub risk: EventRisk,
    #[serde(default)]
    pub source: EventSource,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub metadata: EventMetadata,
}

impl EventData {
    pub fn metadata_site_id(&self) -> Option<&str> {
        self.metadata
            .site_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// One webhook delivery from the gateway. Built once per request and never
/// mutated; `raw_payload` holds the exact bytes the signature was computed
/// over.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Option<EventData>,
    #[serde(skip)]
    pub raw_payload: Vec<u8>,
}

impl PaymentEvent {
    /// Parse a raw webhook body. An empty body or a JSON `null` is a missing
    /// event; anything else that fails to parse is a validation error.
    pub fn parse(raw: &[u8]) -> Result<Self, PipelineError> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Err(PipelineError::MissingEvent);
        }

        let parsed: Option<PaymentEvent> = serde_json::from_slice(raw)
            .map_err(|e| PipelineError::Validation(format!("malformed event payload: {e}")))?;

        let mut event = parsed.ok_or(PipelineError::MissingEvent)?;
        event.raw_payload = raw.to_vec();
        Ok(event)
    }

    /// Type as sent, trimmed; `MissingType` when blank.
    pub fn type_code(&self) -> Result<&str, PipelineError> {
        let code = self.event_type.trim();
        if code.is_empty() {
            return Err(PipelineError::MissingType);
        }
        Ok(code)
    }
}
