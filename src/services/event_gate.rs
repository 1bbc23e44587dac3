use {
    crate::domain::{error::PipelineError, event::EventType},
    std::collections::HashSet,
};

/// Strict allow-list check. An empty allow-list admits nothing, and codes
/// this service does not recognise are never admitted.
pub fn is_allowed(
    site_id: &str,
    event_type: &str,
    allowed: &HashSet<EventType>,
) -> Result<bool, PipelineError> {
    if site_id.trim().is_empty() {
        return Err(PipelineError::MissingSiteId);
    }
    if allowed.is_empty() {
        return Ok(false);
    }
    Ok(EventType::from_code(event_type).is_some_and(|t| allowed.contains(&t)))
}
